// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Embedder-level configuration via `viewfinder.yaml`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::CameraConfiguration;
use crate::core::analysis::AnalyzerConfig;
use crate::core::{Result, ViewfinderError};

/// Tap-to-focus indicator timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// How long the indicator stays visible after the last tap.
    pub hide_delay_ms: u64,
}

impl FocusSettings {
    pub const DEFAULT_HIDE_DELAY_MS: u64 = 1000;

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            hide_delay_ms: Self::DEFAULT_HIDE_DELAY_MS,
        }
    }
}

/// Configuration from `viewfinder.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewfinderConfig {
    /// Initial camera configuration handed to the coordinator.
    pub camera: CameraConfiguration,

    /// Analyzer snapshot applied when image analysis is enabled.
    pub analyzer: Option<AnalyzerConfig>,

    /// Focus indicator timing.
    pub focus: FocusSettings,
}

impl ViewfinderConfig {
    /// Configuration file name.
    pub const FILE_NAME: &'static str = "viewfinder.yaml";

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file. Returns error if the file is missing or
    /// cannot be parsed.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            ViewfinderError::Configuration(format!(
                "Failed to read {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml_str(&content).map_err(|e| {
            ViewfinderError::Configuration(format!(
                "Failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })?;

        tracing::info!("Loaded viewfinder config from {}", config_path.display());
        Ok(config)
    }

    /// Load `viewfinder.yaml` from a directory, returning defaults if the file is
    /// missing or unparseable.
    pub fn load_or_default(dir: &Path) -> Self {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(
                "No {} found in {}, using defaults",
                Self::FILE_NAME,
                dir.display()
            );
            return Self::default();
        }

        match Self::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.focus.hide_delay_ms == 0 {
            return Err(ViewfinderError::Configuration(
                "focus.hide_delay_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(analyzer) = &self.analyzer {
            analyzer.validate()?;
        }
        Ok(())
    }
}
