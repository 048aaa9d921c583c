// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Camera preview coordination.
//!
//! Reconciles a declarative [`CameraConfiguration`] against hardware stream-state
//! notifications, host lifecycle transitions and touch gestures, and drives an
//! opaque [`CameraController`]. Everything runs on a single coordination thread;
//! background producers hand events over through an [`EventSender`].

#![allow(clippy::new_without_default)] // Constructors with validation stay explicit

pub mod core;
pub mod sim;

pub use core::{
    AnalysisFrame, AnalysisQueue, AnalyzerCallback, AnalyzerConfig, AnalyzerHandle,
    AnalyzerPipelineConfig, BackpressureStrategy, Bitmap, CamSelector, CameraConfiguration,
    CameraController, CameraCoordinator, CancellableTimer, CaptureMode, Clock, CoordinationLoop,
    CoordinatorEvent, EventSender, FlashMode, FocusPoint, FocusSettings, FreezePhase,
    HardwareStreamState, ImplementationMode, LensFacing, LifecycleEvent, LifecycleOwner,
    ManualClock, PreviewListener, Resolution, Result, ScaleType, SoftwareClock,
    StreamLifecycleTracker, StreamState, SwitchFreezeController, TapFocusScheduler,
    ViewfinderConfig, ViewfinderError, ZoomGestureInterpreter, ZoomRange,
};

pub mod prelude {
    //! Commonly used types for `use viewfinder::prelude::*`.
    pub use crate::core::prelude::*;
}
