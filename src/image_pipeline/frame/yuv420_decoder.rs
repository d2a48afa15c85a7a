//! YUV 4:2:0 frame decoder.
//!
//! Handles both planar (I420, pixel stride 1) and semi-planar (NV12/NV21
//! views, pixel stride 2) chroma layouts, with row padding. Conversion is
//! full-range BT.601, matching what a JFIF encode/decode of the frame yields.

use tracing::debug;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::decoder::FrameDecoder;
use crate::image_pipeline::frame::types::{Plane, RawFrame};
use crate::image_pipeline::raster::Raster;

pub struct Yuv420Decoder;

const OPAQUE: u8 = 255;

fn check_plane(name: &str, plane: &Plane, cols: usize, rows: usize) -> Result<()> {
    if plane.pixel_stride == 0 {
        return Err(PipelineError::DecodeError(format!(
            "{} plane has zero pixel stride",
            name
        )));
    }
    let overflow = || {
        PipelineError::DecodeError(format!(
            "{} plane strides (row {}, pixel {}) overflow for {}x{} samples",
            name, plane.row_stride, plane.pixel_stride, cols, rows
        ))
    };
    let row_span = plane.row_span(cols).ok_or_else(overflow)?;
    if plane.row_stride < row_span {
        return Err(PipelineError::DecodeError(format!(
            "{} plane row stride {} is shorter than a row of {} samples",
            name, plane.row_stride, cols
        )));
    }
    let needed = plane.required_len(cols, rows).ok_or_else(overflow)?;
    if plane.data.len() < needed {
        return Err(PipelineError::DecodeError(format!(
            "{} plane has {} bytes, {}x{} samples need {}",
            name,
            plane.data.len(),
            cols,
            rows,
            needed
        )));
    }
    Ok(())
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Full-range BT.601 YCbCr to RGB.
#[inline]
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32;
    let cb = u as f32 - 128.0;
    let cr = v as f32 - 128.0;
    [
        to_channel(y + 1.402 * cr),
        to_channel(y - 0.344_136 * cb - 0.714_136 * cr),
        to_channel(y + 1.772 * cb),
    ]
}

impl FrameDecoder for Yuv420Decoder {
    /// Decodes a 4:2:0 frame into an opaque RGBA raster.
    ///
    /// Every output pixel `(x, y)` takes its luma from `(x, y)` in the luma
    /// plane and its chroma from `(x / 2, y / 2)` in the chroma planes.
    ///
    /// # Errors
    ///
    /// * `PipelineError::DecodeError` - a plane is too short or its strides
    ///   cannot address the samples implied by the frame dimensions
    fn decode(&self, frame: &RawFrame) -> Result<Raster> {
        let width = frame.width;
        let height = frame.height;
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        let (chroma_w, chroma_h) = frame.chroma_dimensions();

        debug!(
            "Decoding {}x{} frame: luma stride {}, chroma strides {}/{} (pixel {}/{})",
            width,
            height,
            frame.y.row_stride,
            frame.u.row_stride,
            frame.v.row_stride,
            frame.u.pixel_stride,
            frame.v.pixel_stride
        );

        check_plane("Y", &frame.y, width, height)?;
        check_plane("U", &frame.u, chroma_w, chroma_h)?;
        check_plane("V", &frame.v, chroma_w, chroma_h)?;

        let mut data = Vec::with_capacity(width * height * Raster::CHANNELS);
        for row in 0..height {
            let chroma_row = row / 2;
            for col in 0..width {
                let chroma_col = col / 2;
                let [r, g, b] = yuv_to_rgb(
                    frame.y.sample(col, row),
                    frame.u.sample(chroma_col, chroma_row),
                    frame.v.sample(chroma_col, chroma_row),
                );
                data.extend_from_slice(&[r, g, b, OPAQUE]);
            }
        }

        Ok(Raster {
            width,
            height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(width: usize, height: usize, y: u8, u: u8, v: u8) -> RawFrame {
        let (cw, ch) = (width.div_ceil(2), height.div_ceil(2));
        RawFrame {
            width,
            height,
            y: Plane::packed(vec![y; width * height], width),
            u: Plane::packed(vec![u; cw * ch], cw),
            v: Plane::packed(vec![v; cw * ch], cw),
            rotation_degrees: 0,
        }
    }

    #[test]
    fn test_neutral_chroma_is_gray() {
        let raster = Yuv420Decoder.decode(&uniform_frame(4, 2, 100, 128, 128)).unwrap();
        assert_eq!(raster.width, 4);
        assert_eq!(raster.height, 2);
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(raster.pixel(x, y), [100, 100, 100, 255]);
            }
        }
    }

    #[test]
    fn test_primary_conversion() {
        // Pure red in full-range BT.601 is roughly Y=76, Cb=85, Cr=255.
        let [r, g, b] = yuv_to_rgb(76, 85, 255);
        assert!(r >= 250);
        assert!(g <= 5);
        assert!(b <= 5);
    }

    #[test]
    fn test_odd_dimensions_round_chroma_up() {
        let raster = Yuv420Decoder.decode(&uniform_frame(5, 3, 10, 128, 128)).unwrap();
        assert_eq!(raster.pixel_count(), 15);
        assert_eq!(raster.pixel(4, 2), [10, 10, 10, 255]);
    }

    #[test]
    fn test_luma_maps_one_to_one() {
        let mut frame = uniform_frame(4, 4, 0, 128, 128);
        frame.y.data[2 * 4 + 3] = 200;
        let raster = Yuv420Decoder.decode(&frame).unwrap();
        assert_eq!(raster.pixel(3, 2), [200, 200, 200, 255]);
        assert_eq!(raster.pixel(2, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_padded_and_interleaved_planes() {
        // 4x2 frame, luma rows padded to 6 bytes, chroma interleaved VU with
        // the last sample of the final row omitted (as camera buffers do).
        let y = Plane {
            data: vec![50, 50, 50, 50, 0, 0, 50, 50, 50, 50],
            row_stride: 6,
            pixel_stride: 1,
        };
        let vu = vec![128u8, 128, 128];
        let v = Plane { data: vu.clone(), row_stride: 4, pixel_stride: 2 };
        let u = Plane { data: vu, row_stride: 4, pixel_stride: 2 };
        let frame = RawFrame { width: 4, height: 2, y, u, v, rotation_degrees: 0 };

        let raster = Yuv420Decoder.decode(&frame).unwrap();
        assert_eq!(raster.pixel(3, 1), [50, 50, 50, 255]);
    }

    #[test]
    fn test_short_luma_plane_fails() {
        let mut frame = uniform_frame(4, 4, 0, 128, 128);
        frame.y.data.truncate(15);
        let result = Yuv420Decoder.decode(&frame);
        assert!(matches!(result, Err(PipelineError::DecodeError(_))));
    }

    #[test]
    fn test_short_chroma_plane_fails() {
        let mut frame = uniform_frame(4, 4, 0, 128, 128);
        frame.v.data.truncate(3);
        assert!(matches!(Yuv420Decoder.decode(&frame), Err(PipelineError::DecodeError(_))));
    }

    #[test]
    fn test_bad_stride_fails() {
        let mut frame = uniform_frame(4, 4, 0, 128, 128);
        frame.y.row_stride = 3;
        assert!(matches!(Yuv420Decoder.decode(&frame), Err(PipelineError::DecodeError(_))));
    }

    #[test]
    fn test_huge_pixel_stride_fails() {
        let mut frame = uniform_frame(4, 4, 0, 128, 128);
        frame.u.pixel_stride = usize::MAX;
        assert!(matches!(Yuv420Decoder.decode(&frame), Err(PipelineError::DecodeError(_))));
    }

    #[test]
    fn test_huge_row_stride_fails() {
        let mut frame = uniform_frame(4, 4, 0, 128, 128);
        frame.y.row_stride = usize::MAX / 2;
        assert!(matches!(Yuv420Decoder.decode(&frame), Err(PipelineError::DecodeError(_))));

        frame.y.row_stride = usize::MAX;
        assert!(matches!(Yuv420Decoder.decode(&frame), Err(PipelineError::DecodeError(_))));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let frame = uniform_frame(0, 4, 0, 128, 128);
        assert!(matches!(
            Yuv420Decoder.decode(&frame),
            Err(PipelineError::InvalidDimensions(0, 4))
        ));
    }
}
