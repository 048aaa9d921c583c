// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Freeze frame shown while the preview switches lenses.
//!
//! ```text
//!   Live --switch, frame captured--> FrameCaptured --stream idle--> Displaying
//!    ^                                     |                            |
//!    |                                  on_stop                    (same resolve)
//!    |                                     v                            v
//!    +------ stream resumes ---------- Consumed <-----------------------+
//!                                          ^
//!   Live --switch, nothing captured--------+
//! ```
//!
//! Displaying -> Consumed emits the slot overlay, then preview-changed, then the
//! zoom reset, exactly once per switch. A new switch at any point discards the
//! in-flight frame and starts over.

use serde::Serialize;

use crate::core::config::{CamSelector, LensFacing};
use crate::core::frames::Bitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FreezePhase {
    /// Normal preview on the selected lens
    #[default]
    Live,
    /// Snapshot of the previous lens held, waiting for its stream to stop
    FrameCaptured,
    /// Snapshot handed to the overlay slot
    Displaying,
    /// Switch finished (or abandoned), waiting for the new lens to stream
    Consumed,
}

impl std::fmt::Display for FreezePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "Live"),
            Self::FrameCaptured => write!(f, "FrameCaptured"),
            Self::Displaying => write!(f, "Displaying"),
            Self::Consumed => write!(f, "Consumed"),
        }
    }
}

/// Snapshot of the lens being switched away from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeFrame {
    pub bitmap: Bitmap,
    /// Facing of the previous selector; picks the overlay slot.
    pub facing: LensFacing,
}

/// Ordered outbound effects of a resolve step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreezeEffect {
    ShowFront(Bitmap),
    ShowBack(Bitmap),
    PreviewStreamChanged,
    ResetZoom,
}

#[derive(Debug, Default)]
pub struct SwitchFreezeController {
    phase: FreezePhase,
    frame: Option<FreezeFrame>,
    target: Option<CamSelector>,
    seen_idle: bool,
    completed_switches: u64,
}

impl SwitchFreezeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FreezePhase {
        self.phase
    }

    pub fn frame(&self) -> Option<&FreezeFrame> {
        self.frame.as_ref()
    }

    /// Lens the in-flight switch is heading to.
    pub fn target(&self) -> Option<CamSelector> {
        self.target
    }

    /// Switches that reached `Consumed` through the overlay.
    pub fn completed_switches(&self) -> u64 {
        self.completed_switches
    }

    /// A switch from `previous` to `requested` was requested. `capture` is only
    /// called when the two differ.
    pub fn on_selector_change<F>(&mut self, previous: CamSelector, requested: CamSelector, capture: F)
    where
        F: FnOnce() -> Option<Bitmap>,
    {
        if previous == requested {
            return;
        }

        if self.frame.take().is_some() {
            tracing::debug!(
                superseded = ?self.target,
                %requested,
                "Lens switch superseded, discarding captured frame"
            );
        }

        self.target = Some(requested);
        self.seen_idle = false;

        match capture().filter(|bitmap| !bitmap.is_empty()) {
            Some(bitmap) => {
                tracing::debug!(%previous, %requested, ?bitmap, "Captured freeze frame");
                self.frame = Some(FreezeFrame {
                    bitmap,
                    facing: previous.facing(),
                });
                self.transition(FreezePhase::FrameCaptured);
            }
            None => {
                tracing::debug!(%previous, %requested, "No frame available, switching without overlay");
                self.transition(FreezePhase::Consumed);
            }
        }
    }

    /// A stop-class lifecycle event. Drops any captured frame without showing it.
    /// Returns `true` if a frame was discarded.
    pub fn on_stop(&mut self) -> bool {
        self.seen_idle = true;
        match self.phase {
            FreezePhase::FrameCaptured | FreezePhase::Displaying => {
                self.frame = None;
                self.transition(FreezePhase::Consumed);
                tracing::debug!("Lifecycle stop, freeze frame discarded");
                true
            }
            _ => false,
        }
    }

    /// Advance against the current streaming flag.
    pub fn resolve(&mut self, is_streaming: bool) -> Vec<FreezeEffect> {
        let mut effects = Vec::new();
        if !is_streaming {
            self.seen_idle = true;
        }

        if self.phase == FreezePhase::FrameCaptured && !is_streaming {
            self.transition(FreezePhase::Displaying);
            if let Some(frame) = &self.frame {
                match frame.facing {
                    LensFacing::Front => effects.push(FreezeEffect::ShowFront(frame.bitmap.clone())),
                    LensFacing::Back => effects.push(FreezeEffect::ShowBack(frame.bitmap.clone())),
                    LensFacing::External => {
                        tracing::debug!("No overlay slot for external lens");
                    }
                }
            }
        }

        if self.phase == FreezePhase::Displaying {
            effects.push(FreezeEffect::PreviewStreamChanged);
            effects.push(FreezeEffect::ResetZoom);
            self.frame = None;
            self.completed_switches += 1;
            self.transition(FreezePhase::Consumed);
        }

        if self.phase == FreezePhase::Consumed && is_streaming && self.seen_idle {
            self.target = None;
            self.transition(FreezePhase::Live);
        }

        effects
    }

    fn transition(&mut self, next: FreezePhase) {
        if self.phase != next {
            tracing::debug!(from = %self.phase, to = %next, "Freeze phase");
            self.phase = next;
        }
    }
}
