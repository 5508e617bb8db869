use tabview_frame::FrameError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownsampleError {
    /// A byte-size expression could not be parsed, or asks for more than we render inline.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("selected row {index} is out of range for a table with {row_count} rows")]
    IndexOutOfRange { index: i64, row_count: usize },

    #[error("selected rows must be integers, got {0}")]
    NonIntegerIndex(String),

    #[error("invalid row selection: {0}")]
    InvalidSelection(String),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("table backend error: {0}")]
    Backend(String),
}

pub type DownsampleResult<T> = Result<T, DownsampleError>;
