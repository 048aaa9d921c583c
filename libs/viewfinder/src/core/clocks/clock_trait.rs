// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Clock trait - passive time reference for the coordination thread
//!
//! Clocks are queried, never scheduled: the coordinator asks for `now()` when it
//! arms or polls a timer, and the coordination loop turns the nearest deadline
//! into a channel receive timeout.

use std::time::Duration;

/// Passive monotonic clock.
///
/// ## Implementations
///
/// - `SoftwareClock`: `Instant`-backed, used by the coordination loop
/// - `ManualClock`: advanced explicitly, used for deterministic timelines
pub trait Clock: Send + Sync {
    /// Time since the clock's epoch. Never decreases.
    fn now(&self) -> Duration;

    /// Current time in nanoseconds (convenience).
    fn now_ns(&self) -> u64 {
        self.now().as_nanos() as u64
    }

    /// Human-readable clock description, used for logging.
    fn description(&self) -> &str;
}
