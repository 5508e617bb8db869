use crate::backend::TableBackend;
use crate::error::DownsampleResult;
use tabview_frame::{FrameError, Value};

/// Bytes charged per cell for its value slot; string payloads are added on top.
const CELL_SLOT_BYTES: usize = 8;

/// A row-major in-memory table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowTable {
    pub fn new(columns: Vec<impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(
        columns: Vec<impl Into<String>>,
        rows: Vec<Vec<Value>>,
    ) -> DownsampleResult<Self> {
        let mut table = Self::new(columns);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> DownsampleResult<()> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowLengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            }
            .into());
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row)?.get(col)
    }

    pub fn column_values(&self, col: usize) -> Option<Vec<Value>> {
        if col >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().map(|row| row[col].clone()).collect())
    }
}

impl TableBackend for RowTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn estimated_bytes(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|value| CELL_SLOT_BYTES + value.as_str().map_or(0, str::len))
            .sum()
    }

    fn take_rows(&self, rows: &[usize]) -> DownsampleResult<Self> {
        let len = self.rows.len();
        let rows = rows
            .iter()
            .map(|&idx| {
                self.rows
                    .get(idx)
                    .cloned()
                    .ok_or(FrameError::RowOutOfBounds { index: idx, len })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    fn take_columns(&self, columns: &[usize]) -> DownsampleResult<Self> {
        let len = self.columns.len();
        if let Some(&index) = columns.iter().find(|&&idx| idx >= len) {
            return Err(FrameError::ColumnOutOfBounds { index, len }.into());
        }

        Ok(Self {
            columns: columns.iter().map(|&idx| self.columns[idx].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| columns.iter().map(|&idx| row[idx].clone()).collect())
                .collect(),
        })
    }

    fn placeholder(&self, value: &str) -> DownsampleResult<Self> {
        let name = self.columns.first().cloned().unwrap_or_default();
        Ok(Self {
            columns: vec![name],
            rows: vec![vec![Value::from(value)]],
        })
    }
}
