use crate::types::ColumnType;
use thiserror::Error;

/// Errors raised while building or reducing a [`crate::ColumnarFrame`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("row has {actual} values, schema expects {expected}")]
    RowLengthMismatch { expected: usize, actual: usize },

    #[error("column {column} stores {expected:?} values, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error("column {column} has {actual} values, frame has {expected} rows")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("row {index} out of bounds for frame with {len} rows")]
    RowOutOfBounds { index: usize, len: usize },

    #[error("column {index} out of bounds for frame with {len} columns")]
    ColumnOutOfBounds { index: usize, len: usize },
}

pub type FrameResult<T> = Result<T, FrameError>;
