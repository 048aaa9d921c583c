// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Bounded analysis frame hand-off.
//!
//! The controller's frame producer pushes, the analysis worker drains. Capacity
//! is the snapshot's queue depth; what happens when it is full depends on the
//! backpressure strategy:
//!
//! - `KeepOnlyLatest`: the oldest queued frame is dropped, the push never waits
//! - `Blocking`: the producer waits for room
//!
//! Once the owning handle is detached, pushes are refused and pending frames are
//! discarded instead of delivered.

use crossbeam_channel::{Receiver, SendTimeoutError, Sender, TrySendError, bounded};
use std::time::Duration;

use super::{AnalysisFrame, AnalyzerHandle, BackpressureStrategy};

/// How often a blocked producer re-checks whether the analyzer was detached.
const BLOCKING_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Queued,
    /// Queued after evicting the oldest pending frame.
    DroppedOldest,
    /// Refused: the analyzer is no longer attached.
    Detached,
}

/// Cloneable queue; clones share the same channel.
#[derive(Clone)]
pub struct AnalysisQueue {
    handle: AnalyzerHandle,
    tx: Sender<AnalysisFrame>,
    rx: Receiver<AnalysisFrame>,
}

impl AnalysisQueue {
    pub(crate) fn new(handle: AnalyzerHandle) -> Self {
        let (tx, rx) = bounded(handle.config().queue_depth.max(1) as usize);
        Self { handle, tx, rx }
    }

    pub fn handle(&self) -> &AnalyzerHandle {
        &self.handle
    }

    pub fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Offer a frame under the handle's backpressure strategy.
    pub fn push(&self, frame: AnalysisFrame) -> PushOutcome {
        if !self.handle.is_attached() {
            self.clear();
            return PushOutcome::Detached;
        }

        match self.handle.config().backpressure_strategy {
            BackpressureStrategy::KeepOnlyLatest => self.push_keep_latest(frame),
            BackpressureStrategy::Blocking => self.push_blocking(frame),
        }
    }

    fn push_keep_latest(&self, frame: AnalysisFrame) -> PushOutcome {
        match self.tx.try_send(frame) {
            Ok(()) => PushOutcome::Queued,
            Err(TrySendError::Full(frame)) => {
                // Evict oldest, then retry once. A concurrent producer may refill the
                // slot first, in which case this frame is the one dropped.
                let _ = self.rx.try_recv();
                if let Err(e) = self.tx.try_send(frame) {
                    tracing::trace!(
                        frame = e.into_inner().frame_number,
                        "Analysis queue refilled concurrently, dropping frame"
                    );
                }
                PushOutcome::DroppedOldest
            }
            Err(TrySendError::Disconnected(_)) => PushOutcome::Detached,
        }
    }

    fn push_blocking(&self, mut frame: AnalysisFrame) -> PushOutcome {
        loop {
            if !self.handle.is_attached() {
                self.clear();
                return PushOutcome::Detached;
            }
            match self.tx.send_timeout(frame, BLOCKING_POLL) {
                Ok(()) => return PushOutcome::Queued,
                Err(SendTimeoutError::Timeout(returned)) => frame = returned,
                Err(SendTimeoutError::Disconnected(_)) => return PushOutcome::Detached,
            }
        }
    }

    /// Deliver every pending frame to the analyzer. Returns how many were analyzed.
    pub fn deliver_pending(&self) -> usize {
        let mut delivered = 0;
        while let Ok(frame) = self.rx.try_recv() {
            if !self.handle.analyze(&frame) {
                self.clear();
                break;
            }
            delivered += 1;
        }
        delivered
    }

    /// Wait up to `timeout` for one frame and analyze it.
    pub fn deliver_next(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(frame) => {
                let analyzed = self.handle.analyze(&frame);
                if !analyzed {
                    self.clear();
                }
                analyzed
            }
            Err(_) => false,
        }
    }

    /// Discard pending frames.
    pub fn clear(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}
