// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! In-process stand-ins for the camera hardware and the embedding UI.
//!
//! Used by the test suites and by `viewfinder-cli replay`, which drives the
//! coordinator through a recorded scenario without a device.

mod controller;
mod listener;

pub use controller::{ControllerCall, SimulatedController};
pub use listener::{Callback, RecordingListener};
