//! Eager in-memory columnar frames for Tabview.
//!
//! This crate focuses on:
//! - Typed column storage with a validity bitmap per column.
//! - Index-based reductions (`take_rows` / `take_columns`) that always build a new frame, so the
//!   source stays available for full-data operations.
//! - A cheap byte-size estimate used to budget how much of a frame gets shipped to a client.

#![forbid(unsafe_code)]

mod bitmap;
mod error;
mod table;
mod types;

pub use crate::bitmap::BitVec;
pub use crate::error::{FrameError, FrameResult};
pub use crate::table::{Column, ColumnSchema, ColumnarFrame, ColumnarFrameBuilder};
pub use crate::types::{ColumnType, Value};
