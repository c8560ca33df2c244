use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors surfaced by configuration, gesture input and renderer backends.
///
/// Data problems (invalid points, malformed rows, empty charts) never produce
/// an error; they are filtered out or rendered as a fallback frame.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
