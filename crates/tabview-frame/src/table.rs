#![forbid(unsafe_code)]

use crate::bitmap::BitVec;
use crate::error::{FrameError, FrameResult};
use crate::types::{ColumnType, Value};
use std::sync::Arc;

/// Bytes charged per string value for its offset slot.
const STRING_OFFSET_BYTES: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ColumnData {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Boolean(BitVec),
    String(Vec<Arc<str>>),
}

impl ColumnData {
    fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int64 => ColumnData::Int64(Vec::new()),
            ColumnType::Float64 => ColumnData::Float64(Vec::new()),
            ColumnType::Boolean => ColumnData::Boolean(BitVec::new()),
            ColumnType::String => ColumnData::String(Vec::new()),
        }
    }

    fn gather(&self, indices: &[usize]) -> Self {
        match self {
            ColumnData::Int64(v) => ColumnData::Int64(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Float64(v) => {
                ColumnData::Float64(indices.iter().map(|&i| v[i]).collect())
            }
            ColumnData::Boolean(v) => ColumnData::Boolean(v.gather(indices)),
            ColumnData::String(v) => {
                ColumnData::String(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// A single typed column. Null slots hold a default value and are masked by `validity`.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    schema: ColumnSchema,
    data: ColumnData,
    validity: BitVec,
}

impl Column {
    fn new(schema: ColumnSchema) -> Self {
        let data = ColumnData::empty(schema.column_type);
        Self {
            schema,
            data,
            validity: BitVec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.schema.column_type
    }

    pub fn len(&self) -> usize {
        self.validity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validity.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.validity.count_zeros()
    }

    pub fn get(&self, row: usize) -> Value {
        if row >= self.len() || !self.validity.get(row) {
            return Value::Null;
        }
        match &self.data {
            ColumnData::Int64(v) => Value::Int(v[row]),
            ColumnData::Float64(v) => Value::Number(v[row]),
            ColumnData::Boolean(v) => Value::Boolean(v.get(row)),
            ColumnData::String(v) => Value::String(v[row].clone()),
        }
    }

    fn push(&mut self, value: &Value) -> FrameResult<()> {
        match (&mut self.data, value) {
            (ColumnData::Int64(v), Value::Null) => v.push(0),
            (ColumnData::Float64(v), Value::Null) => v.push(0.0),
            (ColumnData::Boolean(v), Value::Null) => v.push(false),
            (ColumnData::String(v), Value::Null) => v.push(Arc::from("")),
            (ColumnData::Int64(v), Value::Int(x)) => v.push(*x),
            (ColumnData::Float64(v), Value::Number(x)) => v.push(*x),
            // Integers widen into float columns.
            (ColumnData::Float64(v), Value::Int(x)) => v.push(*x as f64),
            (ColumnData::Boolean(v), Value::Boolean(x)) => v.push(*x),
            (ColumnData::String(v), Value::String(x)) => v.push(x.clone()),
            (_, other) => {
                return Err(FrameError::TypeMismatch {
                    column: self.schema.name.clone(),
                    expected: self.schema.column_type,
                    actual: other.column_type().unwrap_or_default(),
                });
            }
        }
        self.validity.push(!value.is_null());
        Ok(())
    }

    fn gather(&self, indices: &[usize]) -> Self {
        Self {
            schema: self.schema.clone(),
            data: self.data.gather(indices),
            validity: self.validity.gather(indices),
        }
    }

    /// Approximate footprint of this column in an Arrow-style layout.
    ///
    /// The validity bitmap is only charged when the column actually contains nulls.
    pub fn estimated_size_bytes(&self) -> usize {
        let len = self.len();
        let values = match &self.data {
            ColumnData::Int64(_) | ColumnData::Float64(_) => {
                len * self.schema.column_type.fixed_width().unwrap_or(8)
            }
            ColumnData::Boolean(v) => v.packed_size_bytes(),
            ColumnData::String(v) => {
                len * STRING_OFFSET_BYTES + v.iter().map(|s| s.len()).sum::<usize>()
            }
        };
        let validity = if self.validity.all_true() {
            0
        } else {
            self.validity.packed_size_bytes()
        };
        values + validity
    }
}

/// An eager, immutable columnar frame.
///
/// Columns are reference counted so projections (`take_columns`) share storage with the source
/// frame; row reductions always gather into fresh buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnarFrame {
    schema: Vec<ColumnSchema>,
    columns: Vec<Arc<Column>>,
    rows: usize,
}

impl ColumnarFrame {
    /// A frame with the given schema and no rows.
    pub fn empty(schema: Vec<ColumnSchema>) -> Self {
        ColumnarFrameBuilder::new(schema).finalize()
    }

    /// Build a frame from column-major values.
    pub fn from_columns(schema: Vec<ColumnSchema>, values: Vec<Vec<Value>>) -> FrameResult<Self> {
        if schema.len() != values.len() {
            return Err(FrameError::RowLengthMismatch {
                expected: schema.len(),
                actual: values.len(),
            });
        }
        let rows = values.first().map(Vec::len).unwrap_or(0);

        let mut columns = Vec::with_capacity(schema.len());
        for (column_schema, column_values) in schema.iter().zip(values) {
            if column_values.len() != rows {
                return Err(FrameError::ColumnLengthMismatch {
                    column: column_schema.name.clone(),
                    expected: rows,
                    actual: column_values.len(),
                });
            }
            let mut column = Column::new(column_schema.clone());
            for value in &column_values {
                column.push(value)?;
            }
            columns.push(Arc::new(column));
        }

        Ok(Self {
            schema,
            columns,
            rows,
        })
    }

    /// A one-row, one-column string frame holding `value`.
    pub fn single_cell(name: impl Into<String>, value: impl Into<Arc<str>>) -> Self {
        let schema = ColumnSchema::new(name, ColumnType::String);
        let column = Column {
            schema: schema.clone(),
            data: ColumnData::String(vec![value.into()]),
            validity: BitVec::with_len_all_true(1),
        };
        Self {
            schema: vec![schema],
            columns: vec![Arc::new(column)],
            rows: 1,
        }
    }

    pub fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.schema.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col).map(Arc::as_ref)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Value {
        let Some(column) = self.columns.get(col) else {
            return Value::Null;
        };
        if row >= self.rows {
            return Value::Null;
        }
        column.get(row)
    }

    pub fn column_values(&self, col: usize) -> Option<Vec<Value>> {
        let column = self.columns.get(col)?;
        Some((0..self.rows).map(|row| column.get(row)).collect())
    }

    pub fn row_values(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.rows {
            return None;
        }
        Some(self.columns.iter().map(|c| c.get(row)).collect())
    }

    /// Gather the rows at `indices` (in order, duplicates allowed) into a new frame.
    pub fn take_rows(&self, indices: &[usize]) -> FrameResult<Self> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.rows) {
            return Err(FrameError::RowOutOfBounds {
                index,
                len: self.rows,
            });
        }

        Ok(Self {
            schema: self.schema.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Arc::new(c.gather(indices)))
                .collect(),
            rows: indices.len(),
        })
    }

    /// Project the columns at `indices` (in order) into a new frame.
    pub fn take_columns(&self, indices: &[usize]) -> FrameResult<Self> {
        let len = self.columns.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(FrameError::ColumnOutOfBounds { index, len });
        }

        Ok(Self {
            schema: indices.iter().map(|&i| self.schema[i].clone()).collect(),
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            // A frame without columns has no rows to show.
            rows: if indices.is_empty() { 0 } else { self.rows },
        })
    }

    pub fn estimated_size_bytes(&self) -> usize {
        self.columns.iter().map(|c| c.estimated_size_bytes()).sum()
    }
}

/// Row-at-a-time builder for [`ColumnarFrame`].
#[derive(Debug)]
pub struct ColumnarFrameBuilder {
    schema: Vec<ColumnSchema>,
    columns: Vec<Column>,
    rows: usize,
}

impl ColumnarFrameBuilder {
    pub fn new(schema: Vec<ColumnSchema>) -> Self {
        let columns = schema.iter().cloned().map(Column::new).collect();
        Self {
            schema,
            columns,
            rows: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Append one row. On error the builder is left unchanged.
    pub fn append_row(&mut self, row: &[Value]) -> FrameResult<()> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowLengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        // Type-check the whole row first so a rejected row never leaves columns uneven.
        for (column, value) in self.columns.iter().zip(row) {
            let compatible = match (column.column_type(), value) {
                (_, Value::Null) => true,
                (ColumnType::Float64, Value::Int(_)) => true,
                (expected, value) => value.column_type() == Some(expected),
            };
            if !compatible {
                return Err(FrameError::TypeMismatch {
                    column: column.name().to_string(),
                    expected: column.column_type(),
                    actual: value.column_type().unwrap_or_default(),
                });
            }
        }

        for (column, value) in self.columns.iter_mut().zip(row) {
            column.push(value)?;
        }
        self.rows += 1;
        Ok(())
    }

    pub fn finalize(self) -> ColumnarFrame {
        ColumnarFrame {
            schema: self.schema,
            columns: self.columns.into_iter().map(Arc::new).collect(),
            rows: self.rows,
        }
    }
}
