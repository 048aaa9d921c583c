// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::Clock;
use std::time::{Duration, Instant};

pub struct SoftwareClock {
    start_time: Instant,
    description: String,
}

impl SoftwareClock {
    pub fn new() -> Self {
        Self::with_description("Software Clock".to_string())
    }

    pub fn with_description(description: String) -> Self {
        Self {
            start_time: Instant::now(),
            description,
        }
    }

    /// Instant corresponding to a clock reading, for deadline-based waits.
    pub fn instant_at(&self, at: Duration) -> Instant {
        self.start_time + at
    }

    pub fn reset(&mut self) {
        self.start_time = Instant::now();
    }
}

impl Default for SoftwareClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SoftwareClock {
    fn now(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn description(&self) -> &str {
        &self.description
    }
}
