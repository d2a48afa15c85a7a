//! Output stages: gradient mapping, backdrop tint, layer composition and
//! orientation correction.

pub mod color_map;
pub mod compositor;
pub mod orientation;
pub mod tint;

pub use color_map::confidence_to_color;
pub use compositor::composite_highlights;
pub use orientation::normalize_orientation;
pub use tint::tint_background;
