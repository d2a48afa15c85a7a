//! Captured frame types

const NEUTRAL_CHROMA: u8 = 128;

/// One sample plane of a captured frame.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Plane bytes, possibly padded at the end of each row
    pub data: Vec<u8>,
    /// Distance in bytes between the starts of consecutive rows
    pub row_stride: usize,
    /// Distance in bytes between consecutive samples within a row
    /// (2 for interleaved chroma)
    pub pixel_stride: usize,
}

impl Plane {
    /// A tightly packed plane: `row_stride == width`, `pixel_stride == 1`.
    pub fn packed(data: Vec<u8>, width: usize) -> Self {
        Self {
            data,
            row_stride: width,
            pixel_stride: 1,
        }
    }

    /// Bytes spanned by one row of `cols` samples, `None` on overflow.
    pub fn row_span(&self, cols: usize) -> Option<usize> {
        if cols == 0 {
            return Some(0);
        }
        (cols - 1).checked_mul(self.pixel_stride)?.checked_add(1)
    }

    /// Bytes needed to address `cols × rows` samples with this plane's
    /// strides, `None` when the strides overflow the address space.
    pub fn required_len(&self, cols: usize, rows: usize) -> Option<usize> {
        if cols == 0 || rows == 0 {
            return Some(0);
        }
        (rows - 1)
            .checked_mul(self.row_stride)?
            .checked_add(self.row_span(cols)?)
    }

    #[inline]
    pub fn sample(&self, col: usize, row: usize) -> u8 {
        self.data[row * self.row_stride + col * self.pixel_stride]
    }
}

/// A 4:2:0 frame as delivered by the capture source.
///
/// Consumed by the pipeline; plane buffers are released as soon as the
/// frame has been decoded.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Full resolution luma plane
    pub y: Plane,
    /// Blue-difference chroma plane at half resolution in both axes
    pub u: Plane,
    /// Red-difference chroma plane at half resolution in both axes
    pub v: Plane,
    /// Clockwise rotation needed to display the frame upright
    pub rotation_degrees: i32,
}

impl RawFrame {
    /// Builds a grayscale frame from packed luma samples, with neutral chroma.
    pub fn from_luma(width: usize, height: usize, luma: Vec<u8>, rotation_degrees: i32) -> Self {
        let (chroma_w, chroma_h) = (width.div_ceil(2), height.div_ceil(2));
        Self {
            width,
            height,
            y: Plane::packed(luma, width),
            u: Plane::packed(vec![NEUTRAL_CHROMA; chroma_w * chroma_h], chroma_w),
            v: Plane::packed(vec![NEUTRAL_CHROMA; chroma_w * chroma_h], chroma_w),
            rotation_degrees,
        }
    }

    /// Dimensions of each chroma plane for this frame.
    pub fn chroma_dimensions(&self) -> (usize, usize) {
        (self.width.div_ceil(2), self.height.div_ceil(2))
    }
}
