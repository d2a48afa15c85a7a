use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::types::RawFrame;
use crate::image_pipeline::raster::Raster;

pub trait FrameDecoder {
    fn decode(&self, frame: &RawFrame) -> Result<Raster>;
}
