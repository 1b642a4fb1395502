//! Inference helpers for column kinds and distribution statistics.

mod statistical;

pub use statistical::{infer_kind, parse_cell, quantile_sorted, ratio, Quartiles};
