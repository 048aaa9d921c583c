// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{AnalysisQueue, AnalyzerConfig};
use crate::core::frames::Bitmap;

/// One frame handed to the analyzer.
#[derive(Debug, Clone)]
pub struct AnalysisFrame {
    pub frame_number: u64,
    pub timestamp: Duration,
    pub image: Bitmap,
}

/// Analyzer callback. Invoked from whatever context the controller delivers
/// analysis frames on, never from the coordination thread.
pub type AnalyzerCallback = Arc<dyn Fn(&AnalysisFrame) + Send + Sync>;

/// A configured analyzer ready to be attached to a controller.
///
/// Every `configure` call mints a new handle id. The handle's gate closes on
/// detach, after which `analyze` refuses frames even if a controller thread is
/// still holding the handle.
#[derive(Clone)]
pub struct AnalyzerHandle {
    id: u64,
    config: AnalyzerConfig,
    callback: AnalyzerCallback,
    attached: Arc<AtomicBool>,
}

impl AnalyzerHandle {
    pub(crate) fn new(id: u64, config: AnalyzerConfig, callback: AnalyzerCallback) -> Self {
        Self {
            id,
            config,
            callback,
            attached: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    pub(crate) fn set_attached(&self, attached: bool) {
        self.attached.store(attached, Ordering::Release);
    }

    /// Run the analyzer on a frame. Returns `false` (and drops the frame) when the
    /// handle is detached.
    pub fn analyze(&self, frame: &AnalysisFrame) -> bool {
        if !self.is_attached() {
            tracing::trace!(
                handle = self.id,
                frame = frame.frame_number,
                "Dropping analysis frame for detached analyzer"
            );
            return false;
        }
        (self.callback)(frame);
        true
    }

    /// Frame queue sized and governed by this handle's snapshot.
    pub fn open_queue(&self) -> AnalysisQueue {
        AnalysisQueue::new(self.clone())
    }
}

impl std::fmt::Debug for AnalyzerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerHandle")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("attached", &self.is_attached())
            .finish()
    }
}
