//! Downsampling of tables before they are shipped to a client-side table widget.
//!
//! A rendered table has to respect three independent budgets: a row count, a column count and an
//! approximate byte size. [`downsample`] reduces a table until it fits all of them, keeping the
//! head and the tail of each axis, and reports what it did in a human-readable warning.
//! [`SelectionTranslator`] maps selected row indices between the full and the downsampled table.
//!
//! Tables plug in through [`TableBackend`]; implementations are provided for
//! [`tabview_frame::ColumnarFrame`], the row-major [`RowTable`] and (with the `arrow` feature)
//! Arrow `RecordBatch`es.

#![forbid(unsafe_code)]

mod backend;
mod downsample;
mod error;
mod options;
mod selection;
mod shrink;
mod size;

pub use crate::backend::{RowTable, TableBackend};
pub use crate::downsample::{
    downsample, downsample_with_options, head_tail_indices, DownsampleLimits, Downsampled,
    PLACEHOLDER,
};
pub use crate::error::{DownsampleError, DownsampleResult};
pub use crate::options::DownsampleOptions;
pub use crate::selection::{
    selected_rows_from_json, to_downsampled_space, to_full_space, SelectionTranslator,
    MAX_LISTED_HIDDEN_ROWS,
};
pub use crate::shrink::shrink_towards_target_aspect_ratio;
pub use crate::size::{parse_byte_limit, ByteLimit};
