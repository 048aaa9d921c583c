// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ViewfinderError};

/// Tap position in preview-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

impl FocusPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for FocusPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Target analysis resolution. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawResolution")]
pub struct Resolution {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawResolution {
    width: u32,
    height: u32,
}

impl TryFrom<RawResolution> for Resolution {
    type Error = ViewfinderError;

    fn try_from(raw: RawResolution) -> Result<Self> {
        Resolution::new(raw.width, raw.height)
    }
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewfinderError::InvalidArgument(format!(
                "resolution must be non-zero, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
