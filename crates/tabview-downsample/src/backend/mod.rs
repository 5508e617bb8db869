use crate::error::DownsampleResult;
use tabview_frame::ColumnarFrame;

#[cfg(feature = "arrow")]
mod arrow;
mod rows;

pub use rows::RowTable;

/// Storage abstraction for tables the downsampler can reduce.
///
/// The downsampler relies on this trait to:
/// - read the table shape and an approximate byte footprint
/// - gather a subset of rows or columns into a *new* table (the receiver is never mutated)
/// - build the one-cell placeholder returned when nothing fits the byte budget
pub trait TableBackend: Clone {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;

    /// Approximate size of the table in bytes. Only needs to be consistent for one backend.
    fn estimated_bytes(&self) -> usize;

    fn take_rows(&self, rows: &[usize]) -> DownsampleResult<Self>;
    fn take_columns(&self, columns: &[usize]) -> DownsampleResult<Self>;

    /// A one-row, one-column table holding `value`, named after the first column if any.
    fn placeholder(&self, value: &str) -> DownsampleResult<Self>;
}

impl TableBackend for ColumnarFrame {
    fn row_count(&self) -> usize {
        ColumnarFrame::row_count(self)
    }

    fn column_count(&self) -> usize {
        ColumnarFrame::column_count(self)
    }

    fn estimated_bytes(&self) -> usize {
        self.estimated_size_bytes()
    }

    fn take_rows(&self, rows: &[usize]) -> DownsampleResult<Self> {
        Ok(ColumnarFrame::take_rows(self, rows)?)
    }

    fn take_columns(&self, columns: &[usize]) -> DownsampleResult<Self> {
        Ok(ColumnarFrame::take_columns(self, columns)?)
    }

    fn placeholder(&self, value: &str) -> DownsampleResult<Self> {
        let name = self.column_names().next().unwrap_or_default();
        Ok(ColumnarFrame::single_cell(name, value))
    }
}
