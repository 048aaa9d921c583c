// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Single-writer coordination of configuration, stream state, gestures and the
//! lens-switch freeze frame.

mod coordination_loop;
#[allow(clippy::module_inception)] // Common pattern: coordinator/coordinator.rs for the main type
mod coordinator;
mod events;

pub use coordination_loop::{CoordinationLoop, EventSender};
pub use coordinator::CameraCoordinator;
pub use events::CoordinatorEvent;
