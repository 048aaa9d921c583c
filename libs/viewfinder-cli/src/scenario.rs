// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Scenario files: a `viewfinder.yaml`-style configuration, simulated device
//! capabilities and a list of timed events.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use viewfinder::sim::SimulatedController;
use viewfinder::{CamSelector, CoordinatorEvent, ViewfinderConfig, ZoomRange};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Short label shown in the report header.
    pub name: Option<String>,
    pub config: ViewfinderConfig,
    pub device: DeviceProfile,
    pub steps: Vec<Step>,
}

/// Capabilities of the simulated camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// When `false` the controller only reports ready after a
    /// `controller_initialized` step.
    pub initialized: bool,
    /// Whether `capture_current_frame` returns a preview frame.
    pub frame_available: bool,
    pub flash_unit: bool,
    /// Lenses without a flash unit, overriding `flash_unit`.
    pub flashless_lenses: Vec<CamSelector>,
    pub zoom_range: Option<ZoomRange>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            initialized: true,
            frame_available: true,
            flash_unit: true,
            flashless_lenses: Vec::new(),
            zoom_range: None,
        }
    }
}

impl DeviceProfile {
    pub fn build_controller(&self) -> SimulatedController {
        let mut controller = if self.initialized {
            SimulatedController::new()
        } else {
            SimulatedController::pending_initialization()
        };
        if !self.frame_available {
            controller.set_frame(None);
        }
        controller.set_flash_unit(self.flash_unit);
        for lens in &self.flashless_lenses {
            controller.set_flash_unit_for(*lens, false);
        }
        controller.set_reported_zoom_range(self.zoom_range);
        controller
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Clock reading at which the event is delivered.
    pub at_ms: u64,
    pub event: CoordinatorEvent,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            steps = scenario.steps.len(),
            "Loaded scenario"
        );
        Ok(scenario)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        if let Some(range) = self.device.zoom_range {
            let zoom = self.config.camera.zoom_ratio;
            if !range.contains(zoom) {
                tracing::warn!(
                    zoom,
                    min = range.min(),
                    max = range.max(),
                    "Initial zoom outside device range, it will be clamped"
                );
            }
        }

        for pair in self.steps.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                bail!(
                    "steps must be in time order: {} ms comes after {} ms",
                    pair[1].at_ms,
                    pair[0].at_ms
                );
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            match &step.event {
                CoordinatorEvent::Pinch { scale_factor }
                    if !(scale_factor.is_finite() && *scale_factor > 0.0) =>
                {
                    tracing::warn!(
                        step = index,
                        scale_factor,
                        "Pinch scale factor out of range, it will be ignored"
                    );
                }
                CoordinatorEvent::ConfigureAnalyzer(config) => config
                    .validate()
                    .with_context(|| format!("step {} carries an invalid analyzer", index))?,
                CoordinatorEvent::Shutdown if index + 1 != self.steps.len() => {
                    bail!("step {} is a shutdown but is not the last step", index)
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Clock reading of the last step.
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map(|s| s.at_ms).unwrap_or(0)
    }
}
