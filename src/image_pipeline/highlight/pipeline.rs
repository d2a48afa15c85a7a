use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    HighlightConfig, PipelineError, Result,
    analysis::{AdaptiveHighlightDetector, build_integral, extract_luminance},
    frame::{FrameDecoder, RawFrame, Yuv420Decoder},
    highlight::PipelineTimings,
    raster::Raster,
    render::{composite_highlights, normalize_orientation, tint_background},
};

/// Per-frame highlight pipeline: decode, detect dark local-contrast spots,
/// paint them over a tinted backdrop and rotate for display.
///
/// Holds only configuration; every buffer lives for a single call.
pub struct HighlightPipeline<D: FrameDecoder> {
    decoder: D,
    config: HighlightConfig,
}

impl HighlightPipeline<Yuv420Decoder> {
    pub fn new(config: HighlightConfig) -> Result<Self> {
        Self::with_custom(Yuv420Decoder, config)
    }
}

impl<D: FrameDecoder> HighlightPipeline<D> {
    pub fn with_custom(decoder: D, config: HighlightConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { decoder, config })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Frame dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Processes one frame into a display-ready raster.
    ///
    /// The frame is consumed and its plane buffers are dropped as soon as it
    /// has been decoded. On error no raster is produced.
    pub fn process(&self, frame: RawFrame) -> Result<Raster> {
        let mut timings = PipelineTimings::new();
        self.run(frame, &mut timings)
    }

    pub fn process_with_timings(&self, frame: RawFrame) -> Result<(Raster, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let output = self.run(frame, &mut timings)?;
        timings.log_summary();
        Ok((output, timings))
    }

    #[instrument(
        skip(self, frame, timings),
        fields(width = frame.width, height = frame.height, rotation = frame.rotation_degrees)
    )]
    fn run(&self, frame: RawFrame, timings: &mut PipelineTimings) -> Result<Raster> {
        {
            let _span = tracing::info_span!("validate_dimensions").entered();
            self.validate_dimensions(frame.width, frame.height)?;
        }

        let original = {
            let _span = tracing::info_span!("decode_frame").entered();
            timings.measure("decode_frame", || self.decoder.decode(&frame))?
        };
        let rotation = frame.rotation_degrees;
        drop(frame);

        let output = self.render_timed(&original, rotation as f32, timings);
        debug!(
            width = output.width,
            height = output.height,
            "Frame processed"
        );
        Ok(output)
    }

    /// Runs every stage after decoding on an already decoded raster.
    pub fn render(&self, original: &Raster, rotation_degrees: f32) -> Raster {
        let mut timings = PipelineTimings::new();
        self.render_timed(original, rotation_degrees, &mut timings)
    }

    fn render_timed(
        &self,
        original: &Raster,
        rotation_degrees: f32,
        timings: &mut PipelineTimings,
    ) -> Raster {
        let luminance = {
            let _span = tracing::info_span!("extract_luminance").entered();
            timings.measure("extract_luminance", || extract_luminance(original))
        };

        let integral = {
            let _span = tracing::info_span!("build_integral").entered();
            timings.measure("build_integral", || build_integral(&luminance))
        };

        let mut composite = {
            let _span = tracing::info_span!("tint_background").entered();
            timings.measure("tint_background", || {
                tint_background(original, self.config.tint_offset)
            })
        };

        {
            let _span = tracing::info_span!("composite_highlights").entered();
            let detector = AdaptiveHighlightDetector::new(
                original.width,
                self.config.block_size_ratio,
                self.config.threshold,
                self.config.confidence_scale,
                self.config.window_sum,
            );
            let painted = timings.measure("composite_highlights", || {
                composite_highlights(&mut composite, &luminance, &integral, &detector)
            });
            debug!(
                painted,
                half_window = detector.half_window(),
                "Highlights composited"
            );
        }
        drop(integral);
        drop(luminance);

        let _span = tracing::info_span!("normalize_orientation", degrees = rotation_degrees).entered();
        timings.measure("normalize_orientation", || {
            normalize_orientation(composite, rotation_degrees)
        })
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HighlightConfig) -> Result<()> {
        config.validate()?;
        info!("Highlight pipeline reconfigured: {:?}", config);
        self.config = config;
        Ok(())
    }
}
