// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Callbacks exposed to the embedding application.

use crate::core::frames::{Bitmap, FocusPoint};

/// Receives the coordinator's outbound effects.
///
/// Every method runs on the coordination thread and defaults to a no-op, so an
/// embedder only implements what it renders.
pub trait PreviewListener: Send {
    /// Fired once per completed lens switch, after the freeze frame was shown.
    fn on_preview_stream_changed(&mut self) {}

    /// Fired on every gesture-driven zoom change, and with `1.0` after a switch.
    fn on_zoom_ratio_changed(&mut self, _zoom_ratio: f32) {}

    /// Freeze frame for a switch away from the front lens.
    fn on_switch_to_front(&mut self, _bitmap: &Bitmap) {}

    /// Freeze frame for a switch away from the back lens.
    fn on_switch_to_back(&mut self, _bitmap: &Bitmap) {}

    /// Focus indicator position; `None` hides it.
    fn on_focus_indicator_changed(&mut self, _position: Option<FocusPoint>) {}

    /// Derived streaming flag changed. Overlays can be dropped once this turns `true`.
    fn on_streaming_changed(&mut self, _is_streaming: bool) {}
}

/// Listener that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl PreviewListener for NoopListener {}
