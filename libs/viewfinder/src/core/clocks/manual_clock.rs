// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::Clock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and give another
/// to the code under test.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    pub fn starting_at(start: Duration) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Jump to an absolute reading. Readings earlier than the current one are ignored.
    pub fn set(&self, at: Duration) {
        let mut now = self.now.lock();
        if at > *now {
            *now = at;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn description(&self) -> &str {
        "Manual Clock"
    }
}
