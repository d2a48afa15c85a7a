//! Detection stages: luminance reduction, summed-area table and the
//! adaptive local-contrast detector.

pub mod detector;
pub mod integral;
pub mod luminance;

pub use detector::{AdaptiveHighlightDetector, HighlightDecision, WindowSum};
pub use integral::build_integral;
pub use luminance::extract_luminance;
