// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Camera configuration and the `viewfinder.yaml` loader.

mod camera_configuration;
mod viewfinder_config;

pub use camera_configuration::{
    CamSelector, CameraConfiguration, CaptureMode, FlashMode, ImplementationMode, LensFacing,
    ScaleType, ZoomRange,
};
pub use viewfinder_config::{FocusSettings, ViewfinderConfig};
