mod types;
mod pipeline;
mod timing;


pub use types::{HighlightConfig, HighlightConfigBuilder};
pub use pipeline::HighlightPipeline;
pub use timing::{PipelineTimings, StageTiming};
