// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod bitmap;
mod geometry;

pub use bitmap::Bitmap;
pub use geometry::{FocusPoint, Resolution};
