/// Compute new `(rows, columns)` whose product is about `shrink_factor` times the current one,
/// moving the aspect ratio `rows / columns` towards `target_aspect_ratio`.
///
/// The axis that is too long relative to the target is shrunk first (but never by more than
/// `shrink_factor` on its own); then both axes shrink by a common factor so that the overall
/// reduction is exactly `shrink_factor`. Neither per-axis factor exceeds 1, so the result never
/// grows. Dimensions are rounded down, which can return `0`: callers treat that as "nothing fits".
///
/// `shrink_factor` is expected in `(0, 1]` and `target_aspect_ratio` to be positive.
pub fn shrink_towards_target_aspect_ratio(
    rows: usize,
    columns: usize,
    shrink_factor: f64,
    target_aspect_ratio: f64,
) -> (usize, usize) {
    let aspect_ratio = rows as f64 / columns as f64;

    // `f64::max` ignores NaN, so degenerate 0x0 inputs collapse to `shrink_factor` here.
    let mut row_shrink_factor = (target_aspect_ratio / aspect_ratio).max(shrink_factor).min(1.0);
    let mut column_shrink_factor = (aspect_ratio / target_aspect_ratio)
        .max(shrink_factor)
        .min(1.0);

    let common_shrink_factor =
        (shrink_factor / (row_shrink_factor * column_shrink_factor)).sqrt();
    row_shrink_factor *= common_shrink_factor;
    column_shrink_factor *= common_shrink_factor;

    (
        (rows as f64 * row_shrink_factor) as usize,
        (columns as f64 * column_shrink_factor) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::shrink_towards_target_aspect_ratio;

    #[test]
    fn square_tables_shrink_evenly() {
        assert_eq!(
            shrink_towards_target_aspect_ratio(100, 100, 0.25, 1.0),
            (50, 50)
        );
    }

    #[test]
    fn empty_axes_collapse_to_zero() {
        assert_eq!(shrink_towards_target_aspect_ratio(0, 10, 0.5, 1.0).0, 0);
        assert_eq!(shrink_towards_target_aspect_ratio(10, 0, 0.5, 1.0).1, 0);
        let (rows, columns) = shrink_towards_target_aspect_ratio(0, 0, 0.5, 1.0);
        assert_eq!(rows * columns, 0);
    }
}
