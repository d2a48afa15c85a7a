//! Rotation of the composited raster into display orientation.
//!
//! Angles are clockwise in screen coordinates (y down). Multiples of 90°
//! are exact pixel permutations; any other angle is resampled bilinearly
//! about the image centre into a canvas of the original size, so corners
//! rotated outside it are lost and uncovered pixels are left transparent.

use tracing::debug;
use crate::image_pipeline::raster::Raster;

fn rotated_90(src: &Raster) -> Raster {
    let mut out = Raster::new(src.height, src.width);
    for y in 0..src.height {
        for x in 0..src.width {
            // (x, y) -> (height - 1 - y, x)
            out.set_pixel(src.height - 1 - y, x, src.pixel(x, y));
        }
    }
    out
}

fn rotated_180(src: &Raster) -> Raster {
    let mut out = Raster::new(src.width, src.height);
    for y in 0..src.height {
        for x in 0..src.width {
            out.set_pixel(src.width - 1 - x, src.height - 1 - y, src.pixel(x, y));
        }
    }
    out
}

fn rotated_270(src: &Raster) -> Raster {
    let mut out = Raster::new(src.height, src.width);
    for y in 0..src.height {
        for x in 0..src.width {
            // (x, y) -> (y, width - 1 - x)
            out.set_pixel(y, src.width - 1 - x, src.pixel(x, y));
        }
    }
    out
}

fn lerp(a: u8, b: u8, t: f32) -> f32 {
    a as f32 + (b as f32 - a as f32) * t
}

fn sample_bilinear(src: &Raster, fx: f32, fy: f32) -> [u8; 4] {
    let max_x = (src.width - 1) as f32;
    let max_y = (src.height - 1) as f32;
    let fx = fx.clamp(0.0, max_x);
    let fy = fy.clamp(0.0, max_y);

    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(src.width - 1);
    let y1 = (y0 + 1).min(src.height - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = lerp(p00[c], p10[c], tx);
        let bottom = lerp(p01[c], p11[c], tx);
        out[c] = (top + (bottom - top) * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn rotated_arbitrary(src: &Raster, degrees: f32) -> Raster {
    let mut out = Raster::new(src.width, src.height);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let cx = src.width as f32 / 2.0;
    let cy = src.height as f32 / 2.0;

    for y in 0..out.height {
        for x in 0..out.width {
            // Inverse map the destination pixel centre back into the source.
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let sx = cx + dx * cos + dy * sin;
            let sy = cy - dx * sin + dy * cos;

            if sx < 0.0 || sy < 0.0 || sx >= src.width as f32 || sy >= src.height as f32 {
                continue;
            }
            out.set_pixel(x, y, sample_bilinear(src, sx - 0.5, sy - 0.5));
        }
    }
    out
}

/// Rotates `raster` clockwise by `degrees`.
///
/// A zero (or full-turn) rotation hands the input back without copying.
/// Non-finite angles are treated as zero.
pub fn normalize_orientation(raster: Raster, degrees: f32) -> Raster {
    if !degrees.is_finite() || raster.pixel_count() == 0 {
        return raster;
    }
    let angle = degrees.rem_euclid(360.0);
    debug!("Rotating {}x{} raster by {} degrees", raster.width, raster.height, angle);

    if angle == 0.0 || angle == 360.0 {
        raster
    } else if angle == 90.0 {
        rotated_90(&raster)
    } else if angle == 180.0 {
        rotated_180(&raster)
    } else if angle == 270.0 {
        rotated_270(&raster)
    } else {
        rotated_arbitrary(&raster, angle)
    }
}
