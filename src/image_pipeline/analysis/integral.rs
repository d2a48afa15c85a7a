use crate::image_pipeline::raster::{IntegralField, LuminanceField};

/// Builds the summed-area table: a prefix sum along each row, accumulated
/// onto the row above.
pub fn build_integral(luminance: &LuminanceField) -> IntegralField {
    let width = luminance.width;
    let height = luminance.height;
    let mut data = vec![0u64; width * height];

    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            let i = y * width + x;
            row_sum += luminance.data[i] as u64;
            data[i] = if y == 0 {
                row_sum
            } else {
                row_sum + data[i - width]
            };
        }
    }

    IntegralField {
        width,
        height,
        data,
    }
}
