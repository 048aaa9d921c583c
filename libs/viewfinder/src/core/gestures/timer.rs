// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::Duration;

/// Identifies one arming of a [`CancellableTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Single-shot deadline owned by the coordination thread.
///
/// Nothing runs on its own: the owner polls it with the current clock reading.
/// Re-arming or cancelling bumps the generation, so a token from an earlier arming
/// can never be mistaken for the live one.
#[derive(Debug, Default)]
pub struct CancellableTimer {
    generation: u64,
    pending: Option<(TimerToken, Duration)>,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) to fire at `now + delay`, cancelling any pending deadline.
    pub fn arm(&mut self, now: Duration, delay: Duration) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.pending = Some((token, now + delay));
        token
    }

    /// Cancel the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.pending.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.map(|(_, deadline)| deadline)
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        matches!(self.pending, Some((live, _)) if live == token)
    }

    /// Disarm and return the token if the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Duration) -> Option<TimerToken> {
        match self.pending {
            Some((token, deadline)) if now >= deadline => {
                self.pending = None;
                Some(token)
            }
            _ => None,
        }
    }
}
