// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Touch gesture interpretation: pinch-to-zoom and tap-to-focus.

mod tap_focus;
mod timer;
mod zoom;

pub use tap_focus::TapFocusScheduler;
pub use timer::{CancellableTimer, TimerToken};
pub use zoom::{ZoomGestureInterpreter, round_to_one_decimal};
