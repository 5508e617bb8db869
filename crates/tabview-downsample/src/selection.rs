//! Row selection across downsampling.
//!
//! A downsampled table keeps the first `ceil(n / 2)` and the last `floor(n / 2)` of its `n`
//! rendered rows. Selected rows therefore live in one of two index spaces: the full table, or
//! the downsampled table shown to the user. [`SelectionTranslator`] is the only place where
//! indices cross between them.
//!
//! Rows of the full table that fall in the dropped middle window have no image in the
//! downsampled table. They are left out of the translated selection and reported with a
//! `log::warn!`.

use crate::error::{DownsampleError, DownsampleResult};
use log::warn;
use std::collections::BTreeSet;

/// Hidden rows listed by name in a warning before the list is elided.
pub const MAX_LISTED_HIDDEN_ROWS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionTranslator {
    full_row_count: usize,
    downsampled_row_count: usize,
    warn_on_hidden_rows: bool,
}

impl SelectionTranslator {
    pub fn new(full_row_count: usize, downsampled_row_count: usize) -> Self {
        Self {
            full_row_count,
            downsampled_row_count,
            warn_on_hidden_rows: true,
        }
    }

    pub fn with_hidden_row_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_hidden_rows = enabled;
        self
    }

    pub fn full_row_count(&self) -> usize {
        self.full_row_count
    }

    pub fn downsampled_row_count(&self) -> usize {
        self.downsampled_row_count
    }

    pub fn is_downsampled(&self) -> bool {
        self.downsampled_row_count < self.full_row_count
    }

    fn head_len(&self) -> usize {
        self.downsampled_row_count - self.downsampled_row_count / 2
    }

    fn offset(&self) -> usize {
        self.full_row_count - self.downsampled_row_count
    }

    /// The half-open window `[bottom_limit, top_limit)` of full-table rows that are not rendered.
    ///
    /// Empty (`bottom_limit == top_limit`) when the table was not downsampled.
    pub fn hidden_window(&self) -> (usize, usize) {
        if !self.is_downsampled() {
            return (self.full_row_count, self.full_row_count);
        }
        let bottom_limit = self.head_len();
        let top_limit = self.full_row_count - (self.downsampled_row_count - bottom_limit);
        (bottom_limit, top_limit)
    }

    /// Map full-table row indices to rows of the downsampled table.
    ///
    /// Every index must lie in `[0, full_row_count)`. Indices inside [`Self::hidden_window`] are
    /// dropped (and, unless disabled, reported with a warning).
    pub fn to_downsampled_space<I>(&self, selected: I) -> DownsampleResult<BTreeSet<usize>>
    where
        I: IntoIterator<Item = i64>,
    {
        let selected = validate_rows(selected, self.full_row_count)?;
        if !self.is_downsampled() {
            return Ok(selected);
        }

        let (bottom_limit, top_limit) = self.hidden_window();
        let offset = self.offset();
        let mut rows = BTreeSet::new();
        let mut hidden = Vec::new();
        for row in selected {
            if row < bottom_limit {
                rows.insert(row);
            } else if row >= top_limit {
                rows.insert(row - offset);
            } else {
                hidden.push(row);
            }
        }

        if self.warn_on_hidden_rows {
            if let Some(message) = self.hidden_rows_warning(&hidden) {
                warn!("{message}");
            }
        }
        Ok(rows)
    }

    /// Map rows of the downsampled table back to full-table row indices.
    ///
    /// Every index must lie in `[0, downsampled_row_count)`.
    pub fn to_full_space<I>(&self, selected: I) -> DownsampleResult<BTreeSet<usize>>
    where
        I: IntoIterator<Item = i64>,
    {
        let row_count = self.downsampled_row_count.min(self.full_row_count);
        let selected = validate_rows(selected, row_count)?;
        if !self.is_downsampled() {
            return Ok(selected);
        }

        let head_len = self.head_len();
        let offset = self.offset();
        Ok(selected
            .into_iter()
            .map(|row| if row < head_len { row } else { row + offset })
            .collect())
    }

    /// The selected full-table rows that have no image in the downsampled table, in order.
    pub fn hidden_rows<I>(&self, selected: I) -> DownsampleResult<Vec<usize>>
    where
        I: IntoIterator<Item = i64>,
    {
        let selected = validate_rows(selected, self.full_row_count)?;
        let (bottom_limit, top_limit) = self.hidden_window();
        Ok(selected
            .into_iter()
            .filter(|row| (bottom_limit..top_limit).contains(row))
            .collect())
    }

    /// Human-readable explanation for selected rows that cannot be rendered, `None` if there are
    /// none.
    pub fn hidden_rows_warning(&self, hidden: &[usize]) -> Option<String> {
        if hidden.is_empty() {
            return None;
        }

        let mut listed: Vec<String> = hidden
            .iter()
            .take(MAX_LISTED_HIDDEN_ROWS)
            .map(ToString::to_string)
            .collect();
        if hidden.len() > MAX_LISTED_HIDDEN_ROWS {
            listed.push("...".to_string());
        }

        let (bottom_limit, top_limit) = self.hidden_window();
        Some(format!(
            "Only {} of the original {} rows are rendered, so these selected rows cannot be shown: [{}]. \
             No row with an index in [{bottom_limit}, {top_limit}) can be selected; \
             raise maxBytes or maxRows to render more rows.",
            self.downsampled_row_count,
            self.full_row_count,
            listed.join(", "),
        ))
    }
}

/// [`SelectionTranslator::to_downsampled_space`] with hidden-row warnings enabled.
pub fn to_downsampled_space<I>(
    selected: I,
    full_row_count: usize,
    downsampled_row_count: usize,
) -> DownsampleResult<BTreeSet<usize>>
where
    I: IntoIterator<Item = i64>,
{
    SelectionTranslator::new(full_row_count, downsampled_row_count).to_downsampled_space(selected)
}

/// [`SelectionTranslator::to_full_space`].
pub fn to_full_space<I>(
    selected: I,
    full_row_count: usize,
    downsampled_row_count: usize,
) -> DownsampleResult<BTreeSet<usize>>
where
    I: IntoIterator<Item = i64>,
{
    SelectionTranslator::new(full_row_count, downsampled_row_count).to_full_space(selected)
}

/// Read a row selection sent by a client, e.g. `[0, 5, 12]`.
///
/// Non-integer entries fail with [`DownsampleError::NonIntegerIndex`]; anything but an array
/// fails with [`DownsampleError::InvalidSelection`]. Range checks happen during translation.
pub fn selected_rows_from_json(value: &serde_json::Value) -> DownsampleResult<Vec<i64>> {
    let items = value.as_array().ok_or_else(|| {
        DownsampleError::InvalidSelection(format!("expected a list of row indices, got {value}"))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_i64()
                .ok_or_else(|| DownsampleError::NonIntegerIndex(item.to_string()))
        })
        .collect()
}

fn validate_rows<I>(selected: I, row_count: usize) -> DownsampleResult<BTreeSet<usize>>
where
    I: IntoIterator<Item = i64>,
{
    selected
        .into_iter()
        .map(|index| {
            usize::try_from(index)
                .ok()
                .filter(|&row| row < row_count)
                .ok_or(DownsampleError::IndexOutOfRange { index, row_count })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::SelectionTranslator;

    #[test]
    fn hidden_window_matches_the_head_tail_split() {
        let translator = SelectionTranslator::new(100, 5);
        // rows 0..3 and 98..100 are rendered
        assert_eq!(translator.hidden_window(), (3, 98));
        assert_eq!(SelectionTranslator::new(10, 10).hidden_window(), (10, 10));
    }
}
