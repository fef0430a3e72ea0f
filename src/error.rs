use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unrecognized bar payload: {0}")]
    Format(String),

    #[error("drawing surface error: {0}")]
    Surface(String),
}
