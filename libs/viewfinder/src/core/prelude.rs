// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Commonly used types for `use viewfinder::prelude::*`.

pub use crate::core::{
    // Errors
    error::{Result, ViewfinderError},

    // Configuration
    config::{CamSelector, CameraConfiguration, ViewfinderConfig},

    // Collaborator seams
    controller::CameraController,
    listener::PreviewListener,

    // Coordination
    coordinator::{CameraCoordinator, CoordinationLoop, CoordinatorEvent, EventSender},
    streaming::{HardwareStreamState, LifecycleEvent},
};
