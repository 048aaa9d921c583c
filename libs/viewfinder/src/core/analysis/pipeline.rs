// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;

use super::{AnalysisFrame, AnalyzerCallback, AnalyzerConfig, AnalyzerHandle, BackpressureStrategy};
use crate::core::controller::CameraController;
use crate::core::error::Result;
use crate::core::frames::Resolution;

/// Holds the analyzer snapshot and decides whether it is attached to the controller.
///
/// Disabling detaches the analyzer but keeps the snapshot; enabling again
/// reattaches the very same handle unless `configure` minted a new one in between.
pub struct AnalyzerPipelineConfig {
    callback: AnalyzerCallback,
    current: AnalyzerHandle,
    attached: Option<AnalyzerHandle>,
    enabled: bool,
    next_id: u64,
}

impl AnalyzerPipelineConfig {
    /// Pipeline with the default snapshot, initially disabled.
    pub fn new<F>(analyze: F) -> Self
    where
        F: Fn(&AnalysisFrame) + Send + Sync + 'static,
    {
        let callback: AnalyzerCallback = Arc::new(analyze);
        let current = AnalyzerHandle::new(1, AnalyzerConfig::default(), Arc::clone(&callback));
        Self {
            callback,
            current,
            attached: None,
            enabled: false,
            next_id: 2,
        }
    }

    /// Pipeline with an explicit initial snapshot.
    pub fn with_config<F>(analyze: F, config: AnalyzerConfig) -> Result<Self>
    where
        F: Fn(&AnalysisFrame) + Send + Sync + 'static,
    {
        let mut pipeline = Self::new(analyze);
        pipeline.apply_config(config)?;
        Ok(pipeline)
    }

    /// Replace the snapshot. The new handle takes effect on the next reconcile.
    pub fn configure(
        &mut self,
        strategy: BackpressureStrategy,
        target_resolution: Option<Resolution>,
        queue_depth: u32,
    ) -> Result<AnalyzerHandle> {
        let config = AnalyzerConfig::new(strategy, target_resolution, queue_depth)?;
        self.apply_config(config)
    }

    pub fn apply_config(&mut self, config: AnalyzerConfig) -> Result<AnalyzerHandle> {
        config.validate()?;
        let id = self.next_id;
        self.next_id += 1;
        self.current = AnalyzerHandle::new(id, config, Arc::clone(&self.callback));
        tracing::debug!(handle = id, ?config, "Analyzer configured");
        Ok(self.current.clone())
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The snapshot that is (or would be) attached.
    pub fn snapshot(&self) -> &AnalyzerConfig {
        self.current.config()
    }

    pub fn current_handle(&self) -> &AnalyzerHandle {
        &self.current
    }

    pub fn attached_handle(&self) -> Option<&AnalyzerHandle> {
        self.attached.as_ref()
    }

    /// Bring the controller's analyzer attachment in line with the enabled flag and
    /// the current snapshot. Returns `true` if the controller was touched.
    pub fn reconcile<C>(&mut self, controller: &mut C) -> bool
    where
        C: CameraController + ?Sized,
    {
        let up_to_date = matches!(&self.attached, Some(h) if h.id() == self.current.id());

        match (self.enabled, up_to_date) {
            (true, true) => false,
            (true, false) => {
                self.detach(controller);
                self.current.set_attached(true);
                controller.attach_analyzer(self.current.clone());
                self.attached = Some(self.current.clone());
                tracing::debug!(handle = self.current.id(), "Analyzer attached");
                true
            }
            (false, _) => self.detach(controller),
        }
    }

    /// Detach unconditionally. Returns `true` if something was attached.
    pub fn detach<C>(&mut self, controller: &mut C) -> bool
    where
        C: CameraController + ?Sized,
    {
        match self.attached.take() {
            Some(handle) => {
                // Close the gate before the controller lets go, so a frame racing the
                // detach cannot reach the callback.
                handle.set_attached(false);
                controller.detach_analyzer();
                tracing::debug!(handle = handle.id(), "Analyzer detached");
                true
            }
            None => false,
        }
    }
}
