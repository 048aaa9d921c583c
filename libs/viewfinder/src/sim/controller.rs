// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::core::analysis::AnalyzerHandle;
use crate::core::config::{
    CamSelector, CaptureMode, FlashMode, ImplementationMode, ScaleType, ZoomRange,
};
use crate::core::controller::CameraController;
use crate::core::frames::Bitmap;
use crate::core::streaming::LifecycleOwner;

/// One call the coordinator made on the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", content = "value", rename_all = "snake_case")]
pub enum ControllerCall {
    Bind(String),
    LensSelector(CamSelector),
    CaptureMode(CaptureMode),
    ScaleType(ScaleType),
    ImplementationMode(ImplementationMode),
    Flash(FlashMode),
    Torch(bool),
    ZoomRatio(f32),
    TapToFocus(bool),
    AttachAnalyzer(u64),
    DetachAnalyzer,
    CaptureFrame { captured: bool },
}

impl ControllerCall {
    /// Whether this call changed a controller setting.
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Bind(_) | Self::CaptureFrame { .. })
    }
}

impl fmt::Display for ControllerCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind(owner) => write!(f, "bind_to_lifecycle({})", owner),
            Self::LensSelector(s) => write!(f, "set_lens_selector({})", s),
            Self::CaptureMode(m) => write!(f, "set_capture_mode({:?})", m),
            Self::ScaleType(s) => write!(f, "set_scale_type({:?})", s),
            Self::ImplementationMode(m) => write!(f, "set_implementation_mode({:?})", m),
            Self::Flash(m) => write!(f, "set_flash({:?})", m),
            Self::Torch(on) => write!(f, "set_torch({})", on),
            Self::ZoomRatio(z) => write!(f, "set_zoom_ratio({})", z),
            Self::TapToFocus(on) => write!(f, "set_tap_to_focus_enabled({})", on),
            Self::AttachAnalyzer(id) => write!(f, "attach_analyzer(#{})", id),
            Self::DetachAnalyzer => write!(f, "detach_analyzer()"),
            Self::CaptureFrame { captured } => write!(f, "capture_current_frame() -> {}", captured),
        }
    }
}

/// Camera controller that records every call and serves a fixed preview frame.
///
/// Flash availability is tracked per lens, and the current lens is whatever
/// `set_lens_selector` last received.
pub struct SimulatedController {
    initialized: bool,
    calls: Vec<ControllerCall>,
    frame: Option<Bitmap>,
    flash_default: bool,
    flash_by_lens: HashMap<CamSelector, bool>,
    reported_zoom_range: Option<ZoomRange>,
    selector: Option<CamSelector>,
    capture_mode: Option<CaptureMode>,
    scale_type: Option<ScaleType>,
    implementation_mode: Option<ImplementationMode>,
    flash: Option<FlashMode>,
    torch: Option<bool>,
    zoom_ratio: Option<f32>,
    tap_to_focus: Option<bool>,
    analyzer: Option<AnalyzerHandle>,
}

impl SimulatedController {
    pub const FRAME_WIDTH: u32 = 4;
    pub const FRAME_HEIGHT: u32 = 4;

    /// Initialized controller with a flash unit on every lens and a gray frame.
    pub fn new() -> Self {
        let pixels = vec![0x80u8; (Self::FRAME_WIDTH * Self::FRAME_HEIGHT * 4) as usize];
        Self {
            initialized: true,
            calls: Vec::new(),
            frame: Some(Bitmap::new(Self::FRAME_WIDTH, Self::FRAME_HEIGHT, pixels)),
            flash_default: true,
            flash_by_lens: HashMap::new(),
            reported_zoom_range: None,
            selector: None,
            capture_mode: None,
            scale_type: None,
            implementation_mode: None,
            flash: None,
            torch: None,
            zoom_ratio: None,
            tap_to_focus: None,
            analyzer: None,
        }
    }

    /// Controller that reports itself uninitialized until `mark_initialized`.
    pub fn pending_initialization() -> Self {
        Self {
            initialized: false,
            ..Self::new()
        }
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Frame returned by `capture_current_frame`; `None` simulates a cold preview.
    pub fn set_frame(&mut self, frame: Option<Bitmap>) {
        self.frame = frame;
    }

    pub fn set_flash_unit(&mut self, available: bool) {
        self.flash_default = available;
        self.flash_by_lens.clear();
    }

    pub fn set_flash_unit_for(&mut self, selector: CamSelector, available: bool) {
        self.flash_by_lens.insert(selector, available);
    }

    pub fn set_reported_zoom_range(&mut self, range: Option<ZoomRange>) {
        self.reported_zoom_range = range;
    }

    pub fn calls(&self) -> &[ControllerCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<ControllerCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of setting writes, excluding binds and frame captures.
    pub fn write_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_write()).count()
    }

    pub fn capture_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ControllerCall::CaptureFrame { .. }))
            .count()
    }

    pub fn bind_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ControllerCall::Bind(_)))
            .count()
    }

    pub fn analyzer_attach_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ControllerCall::AttachAnalyzer(_)))
            .count()
    }

    pub fn analyzer_detach_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ControllerCall::DetachAnalyzer))
            .count()
    }

    pub fn attached_analyzer(&self) -> Option<AnalyzerHandle> {
        self.analyzer.clone()
    }

    pub fn selector(&self) -> Option<CamSelector> {
        self.selector
    }

    pub fn capture_mode(&self) -> Option<CaptureMode> {
        self.capture_mode
    }

    pub fn scale_type(&self) -> Option<ScaleType> {
        self.scale_type
    }

    pub fn implementation_mode(&self) -> Option<ImplementationMode> {
        self.implementation_mode
    }

    pub fn flash(&self) -> Option<FlashMode> {
        self.flash
    }

    pub fn torch(&self) -> Option<bool> {
        self.torch
    }

    pub fn zoom_ratio(&self) -> Option<f32> {
        self.zoom_ratio
    }

    pub fn tap_to_focus_enabled(&self) -> Option<bool> {
        self.tap_to_focus
    }
}

impl CameraController for SimulatedController {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn bind_to_lifecycle(&mut self, owner: &LifecycleOwner) {
        self.calls.push(ControllerCall::Bind(owner.name().to_string()));
    }

    fn has_flash_unit(&self) -> bool {
        self.selector
            .and_then(|s| self.flash_by_lens.get(&s).copied())
            .unwrap_or(self.flash_default)
    }

    fn zoom_range(&self) -> Option<ZoomRange> {
        self.reported_zoom_range
    }

    fn set_lens_selector(&mut self, selector: CamSelector) {
        self.selector = Some(selector);
        self.calls.push(ControllerCall::LensSelector(selector));
    }

    fn set_capture_mode(&mut self, mode: CaptureMode) {
        self.capture_mode = Some(mode);
        self.calls.push(ControllerCall::CaptureMode(mode));
    }

    fn set_scale_type(&mut self, scale_type: ScaleType) {
        self.scale_type = Some(scale_type);
        self.calls.push(ControllerCall::ScaleType(scale_type));
    }

    fn set_implementation_mode(&mut self, mode: ImplementationMode) {
        self.implementation_mode = Some(mode);
        self.calls.push(ControllerCall::ImplementationMode(mode));
    }

    fn set_flash(&mut self, mode: FlashMode) {
        self.flash = Some(mode);
        self.calls.push(ControllerCall::Flash(mode));
    }

    fn set_torch(&mut self, enabled: bool) {
        self.torch = Some(enabled);
        self.calls.push(ControllerCall::Torch(enabled));
    }

    fn set_zoom_ratio(&mut self, ratio: f32) {
        self.zoom_ratio = Some(ratio);
        self.calls.push(ControllerCall::ZoomRatio(ratio));
    }

    fn set_tap_to_focus_enabled(&mut self, enabled: bool) {
        self.tap_to_focus = Some(enabled);
        self.calls.push(ControllerCall::TapToFocus(enabled));
    }

    fn attach_analyzer(&mut self, handle: AnalyzerHandle) {
        self.calls.push(ControllerCall::AttachAnalyzer(handle.id()));
        self.analyzer = Some(handle);
    }

    fn detach_analyzer(&mut self) {
        self.analyzer = None;
        self.calls.push(ControllerCall::DetachAnalyzer);
    }

    fn capture_current_frame(&mut self) -> Option<Bitmap> {
        let frame = self.frame.clone();
        self.calls.push(ControllerCall::CaptureFrame {
            captured: frame.is_some(),
        });
        frame
    }
}
