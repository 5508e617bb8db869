use crate::downsample::DownsampleLimits;
use crate::error::{DownsampleError, DownsampleResult};
use crate::selection::SelectionTranslator;
use crate::size::ByteLimit;
use serde::{Deserialize, Serialize};

/// Rendering options that control downsampling.
///
/// Serialized with camelCase keys (`maxRows`, `maxColumns`, `maxBytes`,
/// `warnOnSelectedRowsNotRendered`), the same names used in downsampling warnings. Missing keys
/// take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownsampleOptions {
    pub max_rows: usize,
    pub max_columns: usize,
    pub max_bytes: ByteLimit,
    pub warn_on_selected_rows_not_rendered: bool,
}

impl Default for DownsampleOptions {
    fn default() -> Self {
        Self {
            max_rows: 0,
            max_columns: 200,
            max_bytes: ByteLimit::Expr("64KB".to_string()),
            warn_on_selected_rows_not_rendered: true,
        }
    }
}

impl DownsampleOptions {
    /// Parse options from JSON and check the byte limit.
    pub fn from_json(json: &str) -> DownsampleResult<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|err| DownsampleError::Configuration(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Surface a malformed byte limit now rather than on the first render.
    pub fn validate(&self) -> DownsampleResult<()> {
        self.max_bytes.resolve().map(|_| ())
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

    pub fn with_selected_row_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_selected_rows_not_rendered = enabled;
        self
    }

    pub fn limits(&self) -> DownsampleLimits {
        DownsampleLimits {
            max_rows: self.max_rows,
            max_columns: self.max_columns,
            max_bytes: self.max_bytes.clone(),
        }
    }

    pub fn translator(
        &self,
        full_row_count: usize,
        downsampled_row_count: usize,
    ) -> SelectionTranslator {
        SelectionTranslator::new(full_row_count, downsampled_row_count)
            .with_hidden_row_warnings(self.warn_on_selected_rows_not_rendered)
    }
}
