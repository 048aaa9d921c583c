// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Tap-to-focus indicator lifecycle.
//!
//! ```text
//!   Inactive --tap(p)--> Active(p) --tap(p')--> Active(p')   (timer restarts)
//!                          |
//!                          +-- hide delay elapsed --> Inactive
//!                          +-- reset() -----------> Inactive (timer cancelled)
//! ```

use std::time::Duration;

use super::CancellableTimer;
use crate::core::config::FocusSettings;
use crate::core::frames::FocusPoint;

#[derive(Debug)]
pub struct TapFocusScheduler {
    offset: Option<FocusPoint>,
    timer: CancellableTimer,
    hide_delay: Duration,
}

impl TapFocusScheduler {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            offset: None,
            timer: CancellableTimer::new(),
            hide_delay,
        }
    }

    pub fn from_settings(settings: &FocusSettings) -> Self {
        Self::new(settings.hide_delay())
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    /// Current indicator position, `None` when hidden.
    pub fn offset(&self) -> Option<FocusPoint> {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.offset.is_some()
    }

    /// When the indicator will hide, if it is showing.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Show the indicator at `point`; the last tap wins.
    pub fn on_tap(&mut self, point: FocusPoint, now: Duration) {
        self.timer.arm(now, self.hide_delay);
        self.offset = Some(point);
        tracing::trace!(%point, deadline = ?self.timer.deadline(), "Focus indicator shown");
    }

    /// Hide the indicator if its deadline has passed. Returns `true` if it was
    /// hidden by this call.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.timer.fire_if_due(now).is_some() {
            self.offset = None;
            tracing::trace!("Focus indicator expired");
            return true;
        }
        false
    }

    /// Hide immediately and cancel the pending timer. Returns `true` if the
    /// indicator was showing.
    pub fn reset(&mut self) -> bool {
        self.timer.cancel();
        self.offset.take().is_some()
    }
}

impl Default for TapFocusScheduler {
    fn default() -> Self {
        Self::from_settings(&FocusSettings::default())
    }
}
