// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::analysis::AnalyzerConfig;
use crate::core::config::CameraConfiguration;
use crate::core::frames::FocusPoint;
use crate::core::streaming::{HardwareStreamState, LifecycleEvent};

/// Every input the coordinator reacts to. Each one runs exactly one update cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CoordinatorEvent {
    /// Embedder replaced the declarative configuration.
    ConfigurationChanged(CameraConfiguration),
    /// Single tap on the preview surface.
    Tap { x: f32, y: f32 },
    /// Pinch gesture step with its incremental scale factor.
    Pinch { scale_factor: f32 },
    /// Host lifecycle transition.
    Lifecycle(LifecycleEvent),
    /// Camera pipeline stream-state notification.
    HardwareStream(HardwareStreamState),
    /// The controller finished its one-time initialization.
    ControllerInitialized,
    /// New analyzer snapshot.
    ConfigureAnalyzer(AnalyzerConfig),
    /// Stop the coordination loop.
    Shutdown,
}

impl CoordinatorEvent {
    pub fn tap(point: FocusPoint) -> Self {
        Self::Tap {
            x: point.x,
            y: point.y,
        }
    }

    pub fn pinch(scale_factor: f32) -> Self {
        Self::Pinch { scale_factor }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationChanged(_) => "configuration_changed",
            Self::Tap { .. } => "tap",
            Self::Pinch { .. } => "pinch",
            Self::Lifecycle(_) => "lifecycle",
            Self::HardwareStream(_) => "hardware_stream",
            Self::ControllerInitialized => "controller_initialized",
            Self::ConfigureAnalyzer(_) => "configure_analyzer",
            Self::Shutdown => "shutdown",
        }
    }

    /// Gesture intents are dropped, not queued, while the controller is not ready.
    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::Tap { .. } | Self::Pinch { .. })
    }
}
