//! Highlight pipeline configuration types

use crate::image_pipeline::analysis::WindowSum;
use crate::image_pipeline::common::error::{PipelineError, Result};

/// Construction-time tuning for [`HighlightPipeline`](super::HighlightPipeline)
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// Detection window width is `frame width / block_size_ratio`
    pub block_size_ratio: usize,
    /// How much darker than its local average a pixel must be to be flagged
    pub threshold: i32,
    /// Luminance difference that maps to full confidence
    pub confidence_scale: f32,
    /// Additive blue offset of the grayscale backdrop
    pub tint_offset: u8,
    /// Rectangle-sum convention used for the local average
    pub window_sum: WindowSum,
    /// Whether to check frame dimensions before decoding
    pub validate_dimensions: bool,
    /// Largest accepted frame width or height
    pub max_dimension: Option<usize>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            block_size_ratio: 12,
            threshold: 9,
            confidence_scale: 80.0,
            tint_offset: 80,
            window_sum: WindowSum::ClampedCorners,
            validate_dimensions: true,
            max_dimension: Some(16384),
        }
    }
}

impl HighlightConfig {
    pub fn builder() -> HighlightConfigBuilder {
        HighlightConfigBuilder::default()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.block_size_ratio == 0 {
            return Err(PipelineError::InvalidConfig(
                "block_size_ratio must be at least 1".to_string(),
            ));
        }
        if !self.confidence_scale.is_finite() || self.confidence_scale <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "confidence_scale must be positive, got {}",
                self.confidence_scale
            )));
        }
        Ok(())
    }
}

/// Builder for HighlightConfig
#[derive(Default)]
pub struct HighlightConfigBuilder {
    block_size_ratio: Option<usize>,
    threshold: Option<i32>,
    confidence_scale: Option<f32>,
    tint_offset: Option<u8>,
    window_sum: Option<WindowSum>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl HighlightConfigBuilder {
    pub fn block_size_ratio(mut self, ratio: usize) -> Self {
        self.block_size_ratio = Some(ratio);
        self
    }

    pub fn threshold(mut self, threshold: i32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn confidence_scale(mut self, scale: f32) -> Self {
        self.confidence_scale = Some(scale);
        self
    }

    pub fn tint_offset(mut self, offset: u8) -> Self {
        self.tint_offset = Some(offset);
        self
    }

    pub fn window_sum(mut self, window_sum: WindowSum) -> Self {
        self.window_sum = Some(window_sum);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> HighlightConfig {
        let default = HighlightConfig::default();
        HighlightConfig {
            block_size_ratio: self.block_size_ratio.unwrap_or(default.block_size_ratio),
            threshold: self.threshold.unwrap_or(default.threshold),
            confidence_scale: self.confidence_scale.unwrap_or(default.confidence_scale),
            tint_offset: self.tint_offset.unwrap_or(default.tint_offset),
            window_sum: self.window_sum.unwrap_or(default.window_sum),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
