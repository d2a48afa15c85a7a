//! Camera frame decoding module
//!
//! This module turns planar luma/chroma frames into RGBA rasters.

mod decoder;
mod yuv420_decoder;
pub mod types;

pub use decoder::FrameDecoder;
pub use yuv420_decoder::Yuv420Decoder;
pub use types::{Plane, RawFrame};
