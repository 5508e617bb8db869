use crate::error::{DownsampleError, DownsampleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A byte budget, either as a raw number of bytes or as a size expression such as `"64KB"`.
///
/// `0` disables the byte limit. The original expression is kept so warnings can quote it back
/// to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteLimit {
    Bytes(u64),
    Fractional(f64),
    Expr(String),
}

impl ByteLimit {
    pub fn unlimited() -> Self {
        ByteLimit::Bytes(0)
    }

    /// Resolve the limit into a byte count; see [`parse_byte_limit`].
    pub fn resolve(&self) -> DownsampleResult<usize> {
        parse_byte_limit(self)
    }
}

impl Default for ByteLimit {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl fmt::Display for ByteLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteLimit::Bytes(n) => write!(f, "{n}"),
            ByteLimit::Fractional(n) => write!(f, "{n}"),
            ByteLimit::Expr(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ByteLimit {
    fn from(value: u64) -> Self {
        ByteLimit::Bytes(value)
    }
}

impl From<u32> for ByteLimit {
    fn from(value: u32) -> Self {
        ByteLimit::Bytes(u64::from(value))
    }
}

impl From<usize> for ByteLimit {
    fn from(value: usize) -> Self {
        ByteLimit::Bytes(value as u64)
    }
}

impl From<f64> for ByteLimit {
    fn from(value: f64) -> Self {
        ByteLimit::Fractional(value)
    }
}

impl From<&str> for ByteLimit {
    fn from(value: &str) -> Self {
        ByteLimit::Expr(value.to_string())
    }
}

impl From<String> for ByteLimit {
    fn from(value: String) -> Self {
        ByteLimit::Expr(value)
    }
}

const KB: f64 = (1u64 << 10) as f64;
const MB: f64 = (1u64 << 20) as f64;

/// Convert a byte limit into a number of bytes.
///
/// Numbers are taken as-is (fractions are truncated). Strings accept the case-sensitive suffixes
/// `B`, `KB` (2^10) and `MB` (2^20), or no suffix at all. `GB` is refused: tables that large are
/// not meant to be embedded in a page.
pub fn parse_byte_limit(limit: &ByteLimit) -> DownsampleResult<usize> {
    match limit {
        ByteLimit::Bytes(n) => Ok(usize::try_from(*n).unwrap_or(usize::MAX)),
        ByteLimit::Fractional(n) => bytes_from_f64(*n, limit),
        ByteLimit::Expr(expr) => parse_size_expr(expr, limit),
    }
}

fn parse_size_expr(expr: &str, limit: &ByteLimit) -> DownsampleResult<usize> {
    let (number, multiplier) = if let Some(number) = expr.strip_suffix("KB") {
        (number, KB)
    } else if let Some(number) = expr.strip_suffix("MB") {
        (number, MB)
    } else if expr.ends_with("GB") {
        return Err(DownsampleError::Configuration(format!(
            "refusing to render {expr:?} inline; use a KB or MB limit"
        )));
    } else if let Some(number) = expr.strip_suffix('B') {
        (number, 1.0)
    } else {
        (expr, 1.0)
    };

    let value: f64 = number.trim().parse().map_err(|_| {
        DownsampleError::Configuration(format!("invalid byte size expression {expr:?}"))
    })?;
    bytes_from_f64(value * multiplier, limit)
}

fn bytes_from_f64(value: f64, limit: &ByteLimit) -> DownsampleResult<usize> {
    if !value.is_finite() || value < 0.0 {
        return Err(DownsampleError::Configuration(format!(
            "byte limit must be a finite, non-negative size, got {limit}"
        )));
    }
    // `as` truncates towards zero and saturates at usize::MAX.
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_echoes_the_user_expression() {
        assert_eq!(ByteLimit::from("64KB").to_string(), "64KB");
        assert_eq!(ByteLimit::from(1000u64).to_string(), "1000");
        assert_eq!(ByteLimit::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn untagged_deserialization_picks_the_right_variant() {
        let parsed: Vec<ByteLimit> = serde_json::from_str(r#"[65536, 1.5, "1MB", -3]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ByteLimit::Bytes(65536),
                ByteLimit::Fractional(1.5),
                ByteLimit::Expr("1MB".to_string()),
                ByteLimit::Fractional(-3.0),
            ]
        );
    }
}
