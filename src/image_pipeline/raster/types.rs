//! Raster and per-pixel field types

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Interleaved RGBA8 raster, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width of the raster in pixels
    pub width: usize,
    /// Height of the raster in pixels
    pub height: usize,
    /// Pixel data interleaved [R, G, B, A, R, G, B, A, ...]
    pub data: Vec<u8>,
}

impl Raster {
    pub const CHANNELS: usize = 4;

    /// Allocates a fully transparent black raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * Self::CHANNELS],
        }
    }

    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * Self::CHANNELS {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * Self::CHANNELS
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + Self::CHANNELS].copy_from_slice(&rgba);
    }
}

/// 8-bit perceptual intensity per pixel, computed once from the decoded raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceField {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl LuminanceField {
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Summed-area table over a [`LuminanceField`].
///
/// `get(x, y)` is the sum of every luminance sample at or above-left of
/// `(x, y)`. Values are `u64` so a full-resolution frame of 255s cannot
/// overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegralField {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u64>,
}

impl IntegralField {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u64 {
        self.data[y * self.width + x]
    }

    /// Exact sum over the inclusive rectangle `[x1, x2] × [y1, y2]`.
    ///
    /// Corners are expected in bounds with `x1 <= x2` and `y1 <= y2`.
    #[inline]
    pub fn window_sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> u64 {
        let total = self.get(x2, y2);
        let above = if y1 > 0 { self.get(x2, y1 - 1) } else { 0 };
        let left = if x1 > 0 { self.get(x1 - 1, y2) } else { 0 };
        let corner = if x1 > 0 && y1 > 0 { self.get(x1 - 1, y1 - 1) } else { 0 };
        // total + corner >= above + left always holds for a summed-area table.
        total + corner - above - left
    }

    /// `I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1]` on the given corners.
    ///
    /// This covers `(x1, x2] × (y1, y2]`, so the row and column at `x1`/`y1`
    /// are excluded. It is what the adaptive detector uses by default.
    #[inline]
    pub fn clamped_corner_sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> u64 {
        self.get(x2, y2) + self.get(x1, y1) - self.get(x2, y1) - self.get(x1, y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_pixel_roundtrip() {
        let mut raster = Raster::new(3, 2);
        raster.set_pixel(2, 1, [1, 2, 3, 4]);
        assert_eq!(raster.pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(raster.pixel_count(), 6);
    }

    #[test]
    fn test_raster_rejects_short_buffer() {
        let result = Raster::from_rgba(2, 2, vec![0u8; 15]);
        assert!(matches!(result, Err(PipelineError::InvalidDimensions(2, 2))));
    }

    #[test]
    fn test_luminance_rejects_wrong_length() {
        assert!(LuminanceField::from_vec(4, 4, vec![0u8; 15]).is_err());
        assert!(LuminanceField::from_vec(4, 4, vec![0u8; 16]).is_ok());
    }
}
