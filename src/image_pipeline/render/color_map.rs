//! Blue → red → yellow gradient for highlight confidence.

const MIDPOINT: f32 = 0.5;

#[inline]
fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Maps a confidence in `[0, 1]` onto the three-stop gradient.
///
/// Out-of-range input is clamped first; NaN is treated as zero.
pub fn confidence_to_color(confidence: f32) -> [u8; 3] {
    let c = if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    };

    if c < MIDPOINT {
        let t = c / MIDPOINT;
        [channel(255.0 * t), 0, channel(255.0 * (1.0 - t))]
    } else {
        let t = (c - MIDPOINT) / MIDPOINT;
        [255, channel(255.0 * t), 0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_stops() {
        assert_eq!(confidence_to_color(0.0), [0, 0, 255]);
        assert_eq!(confidence_to_color(0.5), [255, 0, 0]);
        assert_eq!(confidence_to_color(1.0), [255, 255, 0]);
    }

    #[test]
    fn test_quarter_points_round() {
        assert_eq!(confidence_to_color(0.25), [128, 0, 128]);
        assert_eq!(confidence_to_color(0.75), [255, 128, 0]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(confidence_to_color(-3.0), [0, 0, 255]);
        assert_eq!(confidence_to_color(7.5), [255, 255, 0]);
        assert_eq!(confidence_to_color(f32::NAN), [0, 0, 255]);
    }

    #[test]
    fn test_channels_monotonic_per_half() {
        let mut previous = confidence_to_color(0.0);
        for step in 1..=100 {
            let c = step as f32 / 100.0;
            let color = confidence_to_color(c);
            if c < 0.5 {
                assert!(color[0] >= previous[0]);
                assert_eq!(color[1], 0);
                assert!(color[2] <= previous[2]);
            } else {
                assert_eq!(color[0], 255);
                assert!(color[1] >= previous[1]);
                assert_eq!(color[2], 0);
            }
            // Continuity: no channel jumps by more than one step's worth.
            if c != 0.5 {
                for ch in 0..3 {
                    assert!((color[ch] as i32 - previous[ch] as i32).abs() <= 6);
                }
            }
            previous = color;
        }
    }
}
