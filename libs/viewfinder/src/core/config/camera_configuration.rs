// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ViewfinderError};

/// Physical direction a lens faces, with the device's raw facing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensFacing {
    Front,
    Back,
    External,
}

impl LensFacing {
    pub const RAW_FRONT: i32 = 0;
    pub const RAW_BACK: i32 = 1;
    pub const RAW_EXTERNAL: i32 = 2;

    pub fn raw_id(&self) -> i32 {
        match self {
            Self::Front => Self::RAW_FRONT,
            Self::Back => Self::RAW_BACK,
            Self::External => Self::RAW_EXTERNAL,
        }
    }

    pub fn from_raw_id(raw: i32) -> Option<Self> {
        match raw {
            Self::RAW_FRONT => Some(Self::Front),
            Self::RAW_BACK => Some(Self::Back),
            Self::RAW_EXTERNAL => Some(Self::External),
            _ => None,
        }
    }
}

/// Which physical camera the preview should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CamSelector {
    Front,
    #[default]
    Back,
    External,
}

impl CamSelector {
    pub fn facing(&self) -> LensFacing {
        match self {
            Self::Front => LensFacing::Front,
            Self::Back => LensFacing::Back,
            Self::External => LensFacing::External,
        }
    }

    /// The other built-in lens. External cameras flip to the back lens.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back | Self::External => Self::Front,
        }
    }
}

impl std::fmt::Display for CamSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
            Self::External => write!(f, "external"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    #[default]
    Image,
    Video,
}

/// Flash behaviour. Only honoured when the device reports a flash unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashMode {
    On,
    #[default]
    Off,
    Auto,
}

/// How the preview stream is scaled into its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    FitStart,
    FitCenter,
    FitEnd,
    FillStart,
    #[default]
    FillCenter,
    FillEnd,
}

/// Surface backing used by the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationMode {
    #[default]
    Performance,
    Compatible,
}

/// Closed zoom interval `[min, max]` with `0 < min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawZoomRange")]
pub struct ZoomRange {
    min: f32,
    max: f32,
}

#[derive(Deserialize)]
struct RawZoomRange {
    min: f32,
    max: f32,
}

impl TryFrom<RawZoomRange> for ZoomRange {
    type Error = ViewfinderError;

    fn try_from(raw: RawZoomRange) -> Result<Self> {
        ZoomRange::new(raw.min, raw.max)
    }
}

impl ZoomRange {
    pub const DEFAULT_MIN: f32 = 1.0;
    pub const DEFAULT_MAX: f32 = 10.0;

    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ViewfinderError::InvalidArgument(format!(
                "zoom range must satisfy 0 < min <= max, got [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Declarative camera configuration.
///
/// The coordinator owns the live copy; embedders hand it a new value and the
/// coordinator reconciles the difference against the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfiguration {
    /// Lens to preview. Default: back.
    pub lens_selector: CamSelector,
    /// Default: image.
    pub capture_mode: CaptureMode,
    /// Coerced to `Off` when the device has no flash unit. Default: off.
    pub flash_mode: FlashMode,
    /// Coerced to `false` when the device has no flash unit. Default: false.
    pub torch_enabled: bool,
    /// Default: fill-center.
    pub scale_type: ScaleType,
    /// Default: performance.
    pub implementation_mode: ImplementationMode,
    /// Default: 1.0. Clamped to the active zoom range before it reaches the controller.
    pub zoom_ratio: f32,
    /// Bounds used when the controller does not report its own. Default: `[1.0, 10.0]`.
    pub zoom_range: ZoomRange,
    /// Default: true.
    pub is_focus_on_tap_enabled: bool,
    /// Default: true.
    pub is_pinch_to_zoom_enabled: bool,
    /// Default: false.
    pub is_image_analysis_enabled: bool,
}

impl Default for CameraConfiguration {
    fn default() -> Self {
        Self {
            lens_selector: CamSelector::Back,
            capture_mode: CaptureMode::Image,
            flash_mode: FlashMode::Off,
            torch_enabled: false,
            scale_type: ScaleType::FillCenter,
            implementation_mode: ImplementationMode::Performance,
            zoom_ratio: 1.0,
            zoom_range: ZoomRange::default(),
            is_focus_on_tap_enabled: true,
            is_pinch_to_zoom_enabled: true,
            is_image_analysis_enabled: false,
        }
    }
}

impl CameraConfiguration {
    pub fn with_lens_selector(mut self, selector: CamSelector) -> Self {
        self.lens_selector = selector;
        self
    }

    pub fn with_capture_mode(mut self, mode: CaptureMode) -> Self {
        self.capture_mode = mode;
        self
    }

    pub fn with_flash_mode(mut self, mode: FlashMode) -> Self {
        self.flash_mode = mode;
        self
    }

    pub fn with_torch(mut self, enabled: bool) -> Self {
        self.torch_enabled = enabled;
        self
    }

    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    pub fn with_implementation_mode(mut self, mode: ImplementationMode) -> Self {
        self.implementation_mode = mode;
        self
    }

    pub fn with_zoom_ratio(mut self, zoom_ratio: f32) -> Self {
        self.zoom_ratio = zoom_ratio;
        self
    }

    pub fn with_zoom_range(mut self, range: ZoomRange) -> Self {
        self.zoom_range = range;
        self
    }

    pub fn with_focus_on_tap(mut self, enabled: bool) -> Self {
        self.is_focus_on_tap_enabled = enabled;
        self
    }

    pub fn with_pinch_to_zoom(mut self, enabled: bool) -> Self {
        self.is_pinch_to_zoom_enabled = enabled;
        self
    }

    pub fn with_image_analysis(mut self, enabled: bool) -> Self {
        self.is_image_analysis_enabled = enabled;
        self
    }
}
