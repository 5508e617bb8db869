#![cfg(feature = "arrow")]

use arrow_array::{Array, ArrayRef, Int64Array, RecordBatch, StringArray};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabview_downsample::{downsample, DownsampleLimits, TableBackend, PLACEHOLDER};

fn int_batch(rows: i64) -> RecordBatch {
    let x: ArrayRef = Arc::new(Int64Array::from_iter_values(0..rows));
    let y: ArrayRef = Arc::new(Int64Array::from_iter_values((0..rows).map(|v| v * 10)));
    RecordBatch::try_from_iter(vec![("x", x), ("y", y)]).unwrap()
}

fn int_values(batch: &RecordBatch, col: usize) -> Vec<i64> {
    batch
        .column(col)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap()
        .values()
        .to_vec()
}

#[test]
fn record_batches_keep_head_and_tail_rows() {
    let batch = int_batch(17);
    let result = downsample(&batch, &DownsampleLimits::unlimited().with_max_rows(3)).unwrap();

    assert_eq!(int_values(&result.table, 0), vec![0, 1, 16]);
    assert_eq!(int_values(&result.table, 1), vec![0, 10, 160]);
    assert_eq!(
        result.warning,
        "downsampled from 17x2 to 3x2 as it exceeded maxRows=3"
    );
}

#[test]
fn sliced_batches_are_charged_for_visible_rows_only() {
    let batch = int_batch(1_000);
    let slice = batch.slice(0, 10);
    assert!(slice.estimated_bytes() < batch.estimated_bytes());
    assert_eq!(slice.estimated_bytes(), 10 * 2 * 8);
}

#[test]
fn record_batches_fit_the_byte_budget() {
    let batch = int_batch(1_000);
    let result =
        downsample(&batch, &DownsampleLimits::unlimited().with_max_bytes("1KB")).unwrap();

    assert!(result.table.estimated_bytes() <= 1024);
    assert!(result.table.estimated_bytes() > 512);
    assert!(result.warning.ends_with("maxBytes=1KB"), "{}", result.warning);
}

#[test]
fn unfittable_batches_become_a_placeholder() {
    let batch = int_batch(1);
    let result = downsample(&batch, &DownsampleLimits::unlimited().with_max_bytes(1u64)).unwrap();

    assert_eq!(result.table.num_rows(), 1);
    assert_eq!(result.table.num_columns(), 1);
    assert_eq!(result.table.schema().field(0).name(), "x");
    let cell = result
        .table
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
        .value(0)
        .to_string();
    assert_eq!(cell, PLACEHOLDER);
}
