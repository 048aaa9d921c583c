// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::config::ZoomRange;

/// Round to one decimal place, half away from zero.
#[inline]
pub fn round_to_one_decimal(value: f32) -> f32 {
    ((value as f64 * 10.0).round() / 10.0) as f32
}

/// Turns a raw pinch scale factor into the next zoom ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomGestureInterpreter {
    range: ZoomRange,
}

impl ZoomGestureInterpreter {
    pub fn new(range: ZoomRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> ZoomRange {
        self.range
    }

    pub fn set_range(&mut self, range: ZoomRange) {
        self.range = range;
    }

    /// `current * factor`, rounded to one decimal, clamped to the range.
    ///
    /// A non-positive or non-finite factor leaves the zoom where it is (still
    /// rounded and clamped).
    pub fn on_pinch(&self, current_zoom: f32, raw_scale_factor: f32) -> f32 {
        let candidate = if raw_scale_factor.is_finite() && raw_scale_factor > 0.0 {
            (current_zoom as f64 * raw_scale_factor as f64) as f32
        } else {
            tracing::trace!(raw_scale_factor, "Ignoring out-of-range pinch scale factor");
            current_zoom
        };
        self.range.clamp(round_to_one_decimal(candidate))
    }
}
