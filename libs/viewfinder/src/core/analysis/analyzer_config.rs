// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ViewfinderError};
use crate::core::frames::Resolution;

/// Policy when analysis frames arrive faster than the analyzer consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackpressureStrategy {
    /// Drop the oldest queued frame to make room for the newest.
    #[default]
    KeepOnlyLatest,
    /// Make the producer wait for room in the queue.
    Blocking,
}

/// Immutable analyzer snapshot applied per enable cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub backpressure_strategy: BackpressureStrategy,
    pub target_resolution: Option<Resolution>,
    /// Frames the analysis queue may hold. Must be at least 1.
    pub queue_depth: u32,
}

impl AnalyzerConfig {
    pub const DEFAULT_QUEUE_DEPTH: u32 = 6;

    pub fn new(
        backpressure_strategy: BackpressureStrategy,
        target_resolution: Option<Resolution>,
        queue_depth: u32,
    ) -> Result<Self> {
        let config = Self {
            backpressure_strategy,
            target_resolution,
            queue_depth,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_depth < 1 {
            return Err(ViewfinderError::InvalidArgument(format!(
                "analyzer queue depth must be at least 1, got {}",
                self.queue_depth
            )));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            backpressure_strategy: BackpressureStrategy::KeepOnlyLatest,
            target_resolution: None,
            queue_depth: Self::DEFAULT_QUEUE_DEPTH,
        }
    }
}
