// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use bytes::Bytes;

/// Opaque still snapshot of a rendered preview frame.
///
/// The pixel payload is reference-counted, so handing the same snapshot to the
/// freeze overlay and to a listener does not copy pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Bytes,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: impl Into<Bytes>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &Bytes {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_payload() {
        let bitmap = Bitmap::new(4, 2, vec![7u8; 32]);
        let copy = bitmap.clone();
        assert_eq!(bitmap.pixels().as_ptr(), copy.pixels().as_ptr());
        assert_eq!(copy.width(), 4);
        assert_eq!(copy.height(), 2);
    }

    #[test]
    fn test_debug_omits_pixels() {
        let bitmap = Bitmap::new(2, 2, vec![0u8; 16]);
        assert_eq!(
            format!("{:?}", bitmap),
            "Bitmap { width: 2, height: 2, bytes: 16 }"
        );
    }
}
