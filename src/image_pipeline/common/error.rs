use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to decode frame: {0}")]
    DecodeError(String),

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("Frame worker has shut down")]
    WorkerClosed,

    #[error("Frame worker failed: {0}")]
    WorkerFailed(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
