use crate::backend::TableBackend;
use crate::error::DownsampleResult;
use crate::options::DownsampleOptions;
use crate::shrink::shrink_towards_target_aspect_ratio;
use crate::size::ByteLimit;
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Cell value of the one-cell table returned when not even a single cell fits the byte budget.
pub const PLACEHOLDER: &str = "...";

/// Row, column and byte budgets for a rendered table. `0` disables a limit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownsampleLimits {
    pub max_rows: usize,
    pub max_columns: usize,
    pub max_bytes: ByteLimit,
}

impl DownsampleLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: impl Into<ByteLimit>) -> Self {
        self.max_bytes = max_bytes.into();
        self
    }
}

/// Outcome of [`downsample`].
///
/// `table` borrows the input when no reduction was needed. `warning` is empty unless the table
/// lost rows or columns.
#[derive(Debug)]
pub struct Downsampled<'a, T: Clone> {
    pub table: Cow<'a, T>,
    pub warning: String,
}

impl<T: Clone> Downsampled<'_, T> {
    pub fn is_downsampled(&self) -> bool {
        !self.warning.is_empty()
    }

    pub fn into_owned(self) -> T {
        self.table.into_owned()
    }
}

/// Indices kept when `len` items are cut down to `keep`: the first `ceil(keep / 2)` and the last
/// `floor(keep / 2)`.
pub fn head_tail_indices(len: usize, keep: usize) -> Vec<usize> {
    if keep >= len {
        return (0..len).collect();
    }
    let tail = keep / 2;
    let head = keep - tail;
    (0..head).chain(len - tail..len).collect()
}

/// Reduce `table` until it fits `limits`.
///
/// Rows and columns over their caps are cut with [`head_tail_indices`]. If the result is still
/// larger than the byte budget, new row/column caps are derived with
/// [`shrink_towards_target_aspect_ratio`] and the caps are applied again, until the estimate fits.
/// Rows or columns lost to rounding are then added back while the budget still holds them.
/// When the budget cannot hold a single cell, the result is a one-cell table holding
/// [`PLACEHOLDER`].
///
/// Only a malformed byte limit (or a failing backend) produces an error.
pub fn downsample<'a, T: TableBackend>(
    table: &'a T,
    limits: &DownsampleLimits,
) -> DownsampleResult<Downsampled<'a, T>> {
    let max_bytes = limits.max_bytes.resolve()?;
    let org_rows = table.row_count();
    let org_columns = table.column_count();

    let reduced = reduce(table, limits.max_rows, limits.max_columns, max_bytes)?;
    let rows = reduced.row_count();
    let columns = reduced.column_count();
    if rows >= org_rows && columns >= org_columns {
        return Ok(Downsampled {
            table: reduced,
            warning: String::new(),
        });
    }

    let mut reasons = Vec::new();
    if limits.max_rows > 0 && org_rows > limits.max_rows {
        reasons.push(format!("maxRows={}", limits.max_rows));
    }
    if limits.max_columns > 0 && org_columns > limits.max_columns {
        reasons.push(format!("maxColumns={}", limits.max_columns));
    }
    if max_bytes > 0 && table.estimated_bytes() > max_bytes {
        reasons.push(format!("maxBytes={}", limits.max_bytes));
    }

    let warning = format!(
        "downsampled from {org_rows}x{org_columns} to {rows}x{columns} as it exceeded {}",
        reasons.join(" and ")
    );
    debug!("{warning}");
    Ok(Downsampled {
        table: reduced,
        warning,
    })
}

/// [`downsample`] with the limits carried by `options`.
pub fn downsample_with_options<'a, T: TableBackend>(
    table: &'a T,
    options: &DownsampleOptions,
) -> DownsampleResult<Downsampled<'a, T>> {
    downsample(table, &options.limits())
}

fn reduce<T: TableBackend>(
    table: &T,
    mut max_rows: usize,
    mut max_columns: usize,
    max_bytes: usize,
) -> DownsampleResult<Cow<'_, T>> {
    let row_cap = capped_len(table.row_count(), max_rows);
    let column_cap = capped_len(table.column_count(), max_columns);
    let mut current = Cow::Borrowed(table);
    // Fixed on the first byte-driven pass so later passes keep aiming at the caller's shape.
    let mut target_aspect_ratio: Option<f64> = None;

    loop {
        let current_rows = current.row_count();
        if max_rows > 0 && current_rows > max_rows {
            debug!("keeping {max_rows} of {current_rows} rows");
            current = Cow::Owned(current.take_rows(&head_tail_indices(current_rows, max_rows))?);
        }

        let current_columns = current.column_count();
        if max_columns > 0 && current_columns > max_columns {
            debug!("keeping {max_columns} of {current_columns} columns");
            current = Cow::Owned(
                current.take_columns(&head_tail_indices(current_columns, max_columns))?,
            );
        }

        if max_bytes == 0 {
            return Ok(current);
        }
        let bytes = current.estimated_bytes();
        if bytes <= max_bytes {
            return match target_aspect_ratio {
                Some(target) => {
                    grow_within_budget(table, current, (row_cap, column_cap), max_bytes, target)
                }
                None => Ok(current),
            };
        }

        let target = *target_aspect_ratio.get_or_insert_with(|| {
            if max_rows > 0 && max_columns > 0 {
                max_rows as f64 / max_columns as f64
            } else {
                1.0
            }
        });

        let current_rows = current.row_count();
        let current_columns = current.column_count();
        let (mut rows, mut columns) = shrink_towards_target_aspect_ratio(
            current_rows,
            current_columns,
            max_bytes as f64 / bytes as f64,
            target,
        );
        // Every pass must lose at least one row or column, even when rounding says otherwise.
        if rows >= current_rows && columns >= current_columns {
            if current_rows >= current_columns {
                rows = current_rows.saturating_sub(1);
            } else {
                columns = current_columns.saturating_sub(1);
            }
        }
        debug!(
            "{current_rows}x{current_columns} table takes {bytes} bytes, over the {max_bytes} byte budget; shrinking to {rows}x{columns}"
        );

        if rows == 0 || columns == 0 {
            debug!("byte budget of {max_bytes} cannot hold a single cell");
            return Ok(Cow::Owned(current.placeholder(PLACEHOLDER)?));
        }
        max_rows = rows;
        max_columns = columns;
    }
}

fn capped_len(len: usize, cap: usize) -> usize {
    if cap > 0 {
        len.min(cap)
    } else {
        len
    }
}

/// Byte-driven passes round both axes down, which can leave up to half the budget unused. Add
/// rows or columns back one at a time, the one nearest the target shape first, while the result
/// still fits.
///
/// Successive head+tail cuts compose, so every candidate is cut straight from `table`.
fn grow_within_budget<'a, T: TableBackend>(
    table: &'a T,
    mut fitted: Cow<'a, T>,
    (row_cap, column_cap): (usize, usize),
    max_bytes: usize,
    target_aspect_ratio: f64,
) -> DownsampleResult<Cow<'a, T>> {
    loop {
        let rows = fitted.row_count();
        let columns = fitted.column_count();
        let mut candidates = Vec::with_capacity(2);
        if rows < row_cap {
            candidates.push((rows + 1, columns));
        }
        if columns < column_cap {
            candidates.push((rows, columns + 1));
        }
        candidates.sort_by(|a, b| {
            aspect_distance(*a, target_aspect_ratio)
                .total_cmp(&aspect_distance(*b, target_aspect_ratio))
        });

        let mut grown = None;
        for (candidate_rows, candidate_columns) in candidates {
            let candidate = table
                .take_rows(&head_tail_indices(table.row_count(), candidate_rows))?
                .take_columns(&head_tail_indices(table.column_count(), candidate_columns))?;
            if candidate.estimated_bytes() <= max_bytes {
                grown = Some(candidate);
                break;
            }
        }
        match grown {
            Some(candidate) => fitted = Cow::Owned(candidate),
            None => {
                debug!("settled on {rows}x{columns} within the {max_bytes} byte budget");
                return Ok(fitted);
            }
        }
    }
}

fn aspect_distance((rows, columns): (usize, usize), target_aspect_ratio: f64) -> f64 {
    (rows as f64 / columns as f64 / target_aspect_ratio).ln().abs()
}

#[cfg(test)]
mod tests {
    use super::head_tail_indices;

    #[test]
    fn head_tail_prefers_the_head_for_odd_budgets() {
        assert_eq!(head_tail_indices(17, 3), vec![0, 1, 16]);
        assert_eq!(head_tail_indices(10, 4), vec![0, 1, 8, 9]);
        assert_eq!(head_tail_indices(10, 1), vec![0]);
    }

    #[test]
    fn head_tail_keeps_everything_when_within_budget() {
        assert_eq!(head_tail_indices(3, 3), vec![0, 1, 2]);
        assert_eq!(head_tail_indices(2, 5), vec![0, 1]);
        assert!(head_tail_indices(0, 0).is_empty());
    }
}
