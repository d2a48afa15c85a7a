use crate::image_pipeline::raster::{LuminanceField, Raster};

const RED_WEIGHT: f32 = 0.299;
const GREEN_WEIGHT: f32 = 0.587;
const BLUE_WEIGHT: f32 = 0.114;

#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let l = RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32;
    l.round().clamp(0.0, 255.0) as u8
}

/// Reduces an RGBA raster to its perceptual luminance. Alpha is ignored.
pub fn extract_luminance(raster: &Raster) -> LuminanceField {
    let data = raster
        .data
        .chunks_exact(Raster::CHANNELS)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect();

    LuminanceField {
        width: raster.width,
        height: raster.height,
        data,
    }
}
