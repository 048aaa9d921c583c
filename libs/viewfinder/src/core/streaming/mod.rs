// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod lifecycle_tracker;
mod state;

pub use lifecycle_tracker::StreamLifecycleTracker;
pub use state::{HardwareStreamState, LifecycleEvent, LifecycleOwner, StreamState};
