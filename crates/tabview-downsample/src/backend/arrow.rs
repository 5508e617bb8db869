use crate::backend::TableBackend;
use crate::error::{DownsampleError, DownsampleResult};
use arrow_array::{Array, ArrayRef, RecordBatch, StringArray, UInt64Array};
use arrow_data::ArrayData;
use arrow_schema::{ArrowError, DataType, Field, Schema};
use std::sync::Arc;

fn backend_error(err: ArrowError) -> DownsampleError {
    DownsampleError::Backend(err.to_string())
}

impl TableBackend for RecordBatch {
    fn row_count(&self) -> usize {
        self.num_rows()
    }

    fn column_count(&self) -> usize {
        self.num_columns()
    }

    fn estimated_bytes(&self) -> usize {
        // Record batches are often zero-copy slices of larger buffers; only charge the bytes the
        // visible rows actually reference.
        self.columns()
            .iter()
            .map(|column| {
                let data: ArrayData = column.to_data();
                data.get_slice_memory_size()
                    .unwrap_or_else(|_| column.get_array_memory_size())
            })
            .sum()
    }

    fn take_rows(&self, rows: &[usize]) -> DownsampleResult<Self> {
        let indices = UInt64Array::from_iter_values(rows.iter().map(|&idx| idx as u64));
        arrow_select::take::take_record_batch(self, &indices).map_err(backend_error)
    }

    fn take_columns(&self, columns: &[usize]) -> DownsampleResult<Self> {
        self.project(columns).map_err(backend_error)
    }

    fn placeholder(&self, value: &str) -> DownsampleResult<Self> {
        let name = self
            .schema()
            .fields()
            .first()
            .map(|field| field.name().clone())
            .unwrap_or_default();
        let schema = Schema::new(vec![Field::new(name, DataType::Utf8, false)]);
        let column: ArrayRef = Arc::new(StringArray::from(vec![value]));
        RecordBatch::try_new(Arc::new(schema), vec![column]).map_err(backend_error)
    }
}
