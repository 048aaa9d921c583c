// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

/// Derived preview stream state. Never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StreamState {
    /// No frames reaching the preview surface
    #[default]
    Idle,
    /// Frames actively flowing to the preview surface
    Streaming,
}

impl StreamState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming)
    }
}

impl std::fmt::Display for StreamState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Streaming => write!(f, "Streaming"),
        }
    }
}

/// Raw stream-state notification from the camera pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareStreamState {
    Streaming,
    NotStreaming,
}

/// Host application lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    OnCreate,
    OnStart,
    OnResume,
    OnPause,
    OnStop,
    OnDestroy,
}

impl LifecycleEvent {
    /// Events that tear the preview down.
    pub fn is_stop_class(&self) -> bool {
        matches!(self, Self::OnStop | Self::OnDestroy)
    }

    /// Events that begin a new binding cycle.
    pub fn is_start_class(&self) -> bool {
        matches!(self, Self::OnStart | Self::OnResume)
    }
}

/// Identity of the host component the controller binds its lifecycle to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LifecycleOwner {
    name: String,
}

impl LifecycleOwner {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for LifecycleOwner {
    fn default() -> Self {
        Self::new("viewfinder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_classes() {
        assert!(LifecycleEvent::OnStop.is_stop_class());
        assert!(LifecycleEvent::OnDestroy.is_stop_class());
        assert!(!LifecycleEvent::OnPause.is_stop_class());
        assert!(LifecycleEvent::OnStart.is_start_class());
        assert!(LifecycleEvent::OnResume.is_start_class());
        assert!(!LifecycleEvent::OnCreate.is_start_class());
    }
}
