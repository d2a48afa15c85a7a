//! In-memory pixel buffers shared by every pipeline stage.

pub mod types;

pub use types::{IntegralField, LuminanceField, Raster};
