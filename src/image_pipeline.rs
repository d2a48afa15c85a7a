//! Image processing pipeline module
//!
//! This module turns captured camera frames into highlight overlays: dark
//! spots that stand out from their surroundings are painted in a
//! blue-red-yellow gradient over a blue-tinted grayscale copy of the frame.

pub mod analysis;
pub mod common;
pub mod frame;
pub mod highlight;
pub mod raster;
pub mod render;
pub mod worker;

pub use common::{
    PipelineError,
    Result,
};

pub use frame::{
    FrameDecoder,
    Plane,
    RawFrame,
    Yuv420Decoder,
};

pub use raster::{
    IntegralField,
    LuminanceField,
    Raster,
};

pub use analysis::{
    AdaptiveHighlightDetector,
    HighlightDecision,
    WindowSum,
};

pub use highlight::{
    HighlightConfig,
    HighlightConfigBuilder,
    HighlightPipeline,
    PipelineTimings,
};

pub use worker::{
    FrameSubmitter,
    FrameWorker,
    WorkerStats,
};
