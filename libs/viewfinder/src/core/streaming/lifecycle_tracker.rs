// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Merges hardware stream-state and host lifecycle into one streaming flag.
//!
//! `is_streaming` follows the hardware signal, except that a stop-class lifecycle
//! event forces it off and latches: hardware signals are ignored until a
//! start-class event opens a new binding cycle, after which a fresh `Streaming`
//! signal is needed.

use super::{HardwareStreamState, LifecycleEvent, StreamState};

#[derive(Debug, Default)]
pub struct StreamLifecycleTracker {
    hardware: Option<HardwareStreamState>,
    halted: bool,
    state: StreamState,
}

impl StreamLifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state.is_streaming()
    }

    /// Whether a stop-class event is latched.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Feed a hardware notification. Returns `true` if `is_streaming` changed.
    pub fn on_hardware_signal(&mut self, signal: HardwareStreamState) -> bool {
        if self.halted {
            tracing::trace!(?signal, "Ignoring hardware stream signal while stopped");
            return false;
        }
        self.hardware = Some(signal);
        self.reevaluate()
    }

    /// Feed a lifecycle event. Returns `true` if `is_streaming` changed.
    pub fn on_lifecycle_event(&mut self, event: LifecycleEvent) -> bool {
        if event.is_stop_class() {
            self.halted = true;
            self.hardware = None;
        } else if event.is_start_class() && self.halted {
            tracing::debug!(?event, "New binding cycle, awaiting fresh stream signal");
            self.halted = false;
        }
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> bool {
        let next = match (self.halted, self.hardware) {
            (false, Some(HardwareStreamState::Streaming)) => StreamState::Streaming,
            _ => StreamState::Idle,
        };
        let changed = next != self.state;
        if changed {
            tracing::debug!(from = %self.state, to = %next, "Stream state changed");
            self.state = next;
        }
        changed
    }
}
