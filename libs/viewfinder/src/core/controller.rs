// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Seam to the camera hardware driver and video pipeline.

use crate::core::analysis::AnalyzerHandle;
use crate::core::config::{
    CamSelector, CaptureMode, FlashMode, ImplementationMode, ScaleType, ZoomRange,
};
use crate::core::frames::Bitmap;
use crate::core::streaming::LifecycleOwner;

/// Opaque camera controller driven by the coordinator.
///
/// All methods are called on the coordination thread. Stream-state notifications
/// flow the other way: the controller's background context reports them through
/// an `EventSender` as `CoordinatorEvent::HardwareStream`.
pub trait CameraController: Send {
    /// Whether the controller has finished its one-time initialization. Nothing
    /// else is called until this returns `true`.
    fn is_initialized(&self) -> bool;

    fn bind_to_lifecycle(&mut self, owner: &LifecycleOwner);

    /// Whether the selected lens has a flash unit. Flash and torch writes are
    /// coerced to their defaults when it does not.
    fn has_flash_unit(&self) -> bool;

    /// Zoom bounds reported by the device, if it reports any.
    fn zoom_range(&self) -> Option<ZoomRange> {
        None
    }

    fn set_lens_selector(&mut self, selector: CamSelector);

    fn set_capture_mode(&mut self, mode: CaptureMode);

    fn set_scale_type(&mut self, scale_type: ScaleType);

    fn set_implementation_mode(&mut self, mode: ImplementationMode);

    fn set_flash(&mut self, mode: FlashMode);

    fn set_torch(&mut self, enabled: bool);

    fn set_zoom_ratio(&mut self, ratio: f32);

    /// Hardware focus/metering on tap.
    fn set_tap_to_focus_enabled(&mut self, _enabled: bool) {}

    fn attach_analyzer(&mut self, handle: AnalyzerHandle);

    fn detach_analyzer(&mut self);

    /// Snapshot of the most recently rendered preview frame. Must not block;
    /// returns `None` when no frame has been rendered yet.
    fn capture_current_frame(&mut self) -> Option<Bitmap>;
}
