// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Image-analysis configuration, attachment gating and frame hand-off.

mod analyzer_config;
mod handle;
mod pipeline;
mod queue;

pub use analyzer_config::{AnalyzerConfig, BackpressureStrategy};
pub use handle::{AnalysisFrame, AnalyzerCallback, AnalyzerHandle};
pub use pipeline::AnalyzerPipelineConfig;
pub use queue::{AnalysisQueue, PushOutcome};
