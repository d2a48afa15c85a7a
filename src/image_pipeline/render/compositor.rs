use crate::image_pipeline::analysis::AdaptiveHighlightDetector;
use crate::image_pipeline::raster::{IntegralField, LuminanceField, Raster};
use crate::image_pipeline::render::color_map::confidence_to_color;

/// Paints every highlight pixel onto `backdrop` in a single in-place pass.
///
/// Decisions are made on `luminance`/`integral`, which must describe the
/// undecorated frame and match the backdrop's dimensions. Returns the number
/// of pixels painted.
pub fn composite_highlights(
    backdrop: &mut Raster,
    luminance: &LuminanceField,
    integral: &IntegralField,
    detector: &AdaptiveHighlightDetector,
) -> usize {
    debug_assert_eq!(backdrop.width, luminance.width);
    debug_assert_eq!(backdrop.height, luminance.height);

    let mut painted = 0;
    for y in 0..backdrop.height {
        for x in 0..backdrop.width {
            let decision = detector.decide(luminance, integral, x, y);
            if decision.is_highlight {
                let [r, g, b] = confidence_to_color(decision.confidence);
                backdrop.set_pixel(x, y, [r, g, b, 255]);
                painted += 1;
            }
        }
    }
    painted
}
