// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::frames::{Bitmap, FocusPoint};
use crate::core::listener::PreviewListener;

/// One outbound callback as the embedder would have seen it.
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    PreviewStreamChanged,
    ZoomRatioChanged(f32),
    SwitchToFront(Bitmap),
    SwitchToBack(Bitmap),
    FocusIndicatorChanged(Option<FocusPoint>),
    StreamingChanged(bool),
}

impl Callback {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreviewStreamChanged => "on_preview_stream_changed",
            Self::ZoomRatioChanged(_) => "on_zoom_ratio_changed",
            Self::SwitchToFront(_) => "on_switch_to_front",
            Self::SwitchToBack(_) => "on_switch_to_back",
            Self::FocusIndicatorChanged(_) => "on_focus_indicator_changed",
            Self::StreamingChanged(_) => "on_streaming_changed",
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreviewStreamChanged => write!(f, "{}()", self.name()),
            Self::ZoomRatioChanged(z) => write!(f, "{}({})", self.name(), z),
            Self::SwitchToFront(b) | Self::SwitchToBack(b) => {
                write!(f, "{}({}x{} bitmap)", self.name(), b.width(), b.height())
            }
            Self::FocusIndicatorChanged(Some(p)) => write!(f, "{}({})", self.name(), p),
            Self::FocusIndicatorChanged(None) => write!(f, "{}(hidden)", self.name()),
            Self::StreamingChanged(s) => write!(f, "{}({})", self.name(), s),
        }
    }
}

/// Listener that appends every callback to a shared log.
///
/// Clones share the log, so a test can keep one clone while the coordinator
/// (or its thread) owns the other.
#[derive(Clone, Default)]
pub struct RecordingListener {
    log: Arc<Mutex<Vec<Callback>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callbacks(&self) -> Vec<Callback> {
        self.log.lock().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Callback> {
        std::mem::take(&mut *self.log.lock())
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    fn record(&mut self, callback: Callback) {
        tracing::trace!(%callback, "Listener callback");
        self.log.lock().push(callback);
    }
}

impl PreviewListener for RecordingListener {
    fn on_preview_stream_changed(&mut self) {
        self.record(Callback::PreviewStreamChanged);
    }

    fn on_zoom_ratio_changed(&mut self, zoom_ratio: f32) {
        self.record(Callback::ZoomRatioChanged(zoom_ratio));
    }

    fn on_switch_to_front(&mut self, bitmap: &Bitmap) {
        self.record(Callback::SwitchToFront(bitmap.clone()));
    }

    fn on_switch_to_back(&mut self, bitmap: &Bitmap) {
        self.record(Callback::SwitchToBack(bitmap.clone()));
    }

    fn on_focus_indicator_changed(&mut self, position: Option<FocusPoint>) {
        self.record(Callback::FocusIndicatorChanged(position));
    }

    fn on_streaming_changed(&mut self, is_streaming: bool) {
        self.record(Callback::StreamingChanged(is_streaming));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_log() {
        let listener = RecordingListener::new();
        let mut owned = listener.clone();
        owned.on_zoom_ratio_changed(2.0);
        owned.on_focus_indicator_changed(None);
        assert_eq!(listener.len(), 2);
        assert_eq!(
            listener.take(),
            vec![
                Callback::ZoomRatioChanged(2.0),
                Callback::FocusIndicatorChanged(None)
            ]
        );
        assert!(owned.is_empty());
    }

    #[test]
    fn test_display_names_callback() {
        let shown = Callback::FocusIndicatorChanged(Some(FocusPoint::new(1.0, 2.5))).to_string();
        assert_eq!(shown, "on_focus_indicator_changed((1, 2.5))");
    }
}
