//! Adaptive (local-contrast) highlight detection.
//!
//! A pixel is a highlight when it is darker than the average luminance of a
//! square window around it by more than a fixed margin. Window sums come
//! from the summed-area table, so each decision is O(1) regardless of the
//! window size.

use crate::image_pipeline::raster::{IntegralField, LuminanceField};

/// How a window's luminance total is read from the integral image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowSum {
    /// `I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1]` on the clamped
    /// corners, divided by the inclusive pixel count. The leading row and
    /// column are left out of the sum, which biases the average low.
    #[default]
    ClampedCorners,
    /// Exact sum over the inclusive clamped window.
    Inclusive,
}

/// Per-pixel detection result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightDecision {
    pub is_highlight: bool,
    /// Normalized darkness below the local average, in `[0, 1]`.
    /// Zero when the pixel is not a highlight.
    pub confidence: f32,
}

impl HighlightDecision {
    pub const NONE: Self = Self {
        is_highlight: false,
        confidence: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct AdaptiveHighlightDetector {
    half_window: usize,
    threshold: i32,
    confidence_scale: f32,
    window_sum: WindowSum,
}

impl AdaptiveHighlightDetector {
    /// Creates a detector for frames `frame_width` pixels wide.
    ///
    /// The window is `frame_width / block_size_ratio` pixels across; a zero
    /// ratio degenerates to a single-pixel window.
    pub fn new(
        frame_width: usize,
        block_size_ratio: usize,
        threshold: i32,
        confidence_scale: f32,
        window_sum: WindowSum,
    ) -> Self {
        let block_size = frame_width.checked_div(block_size_ratio).unwrap_or(0);
        Self {
            half_window: block_size / 2,
            threshold,
            confidence_scale,
            window_sum,
        }
    }

    pub fn half_window(&self) -> usize {
        self.half_window
    }

    /// Integer mean luminance of the window centred on `(x, y)`.
    pub fn local_average(&self, integral: &IntegralField, x: usize, y: usize) -> u64 {
        let h = self.half_window;
        let x1 = x.saturating_sub(h);
        let y1 = y.saturating_sub(h);
        let x2 = (x + h).min(integral.width - 1);
        let y2 = (y + h).min(integral.height - 1);

        let count = ((x2 - x1 + 1) * (y2 - y1 + 1)) as u64;
        let sum = match self.window_sum {
            WindowSum::ClampedCorners => integral.clamped_corner_sum(x1, y1, x2, y2),
            WindowSum::Inclusive => integral.window_sum(x1, y1, x2, y2),
        };
        sum / count
    }

    pub fn decide(
        &self,
        luminance: &LuminanceField,
        integral: &IntegralField,
        x: usize,
        y: usize,
    ) -> HighlightDecision {
        let local_average = self.local_average(integral, x, y) as i64;
        let value = luminance.get(x, y) as i64;

        if value < local_average - self.threshold as i64 {
            let diff = (local_average - value) as f32;
            HighlightDecision {
                is_highlight: true,
                confidence: (diff / self.confidence_scale).clamp(0.0, 1.0),
            }
        } else {
            HighlightDecision::NONE
        }
    }

    /// Number of highlight pixels in the whole field.
    pub fn count_highlights(&self, luminance: &LuminanceField, integral: &IntegralField) -> usize {
        let mut count = 0;
        for y in 0..luminance.height {
            for x in 0..luminance.width {
                if self.decide(luminance, integral, x, y).is_highlight {
                    count += 1;
                }
            }
        }
        count
    }
}
