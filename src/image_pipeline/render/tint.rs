use crate::image_pipeline::raster::Raster;

const RED_WEIGHT: f32 = 0.33;
const GREEN_WEIGHT: f32 = 0.59;
const BLUE_WEIGHT: f32 = 0.11;

/// Blue-tinted grayscale copy of `raster`: `(g, g, g + blue_offset)` with
/// every channel clamped to `[0, 255]`. Alpha is carried over.
pub fn tint_background(raster: &Raster, blue_offset: u8) -> Raster {
    let mut data = Vec::with_capacity(raster.data.len());
    for px in raster.data.chunks_exact(Raster::CHANNELS) {
        let gray = RED_WEIGHT * px[0] as f32 + GREEN_WEIGHT * px[1] as f32 + BLUE_WEIGHT * px[2] as f32;
        let base = gray.round().clamp(0.0, 255.0) as u8;
        let blue = (gray + blue_offset as f32).round().clamp(0.0, 255.0) as u8;
        data.extend_from_slice(&[base, base, blue, px[3]]);
    }

    Raster {
        width: raster.width,
        height: raster.height,
        data,
    }
}
