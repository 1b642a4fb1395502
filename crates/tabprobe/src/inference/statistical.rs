//! Statistical helpers: column kind detection and order statistics.

use crate::input::DataTable;
use crate::schema::{Cell, ColumnKind};

/// Infer the kind of a column from its raw values.
///
/// A column with no present values is [`ColumnKind::Unknown`]; a column
/// whose every present value parses as a number is numeric; anything else is
/// categorical.
pub fn infer_kind(values: &[&str]) -> ColumnKind {
    let mut present = values.iter().filter(|v| !DataTable::is_null_value(v)).peekable();

    if present.peek().is_none() {
        return ColumnKind::Unknown;
    }

    if present.all(|v| parse_number(v).is_some()) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Convert a raw value into a cell of the given kind.
pub fn parse_cell(value: &str, kind: ColumnKind) -> Cell {
    if DataTable::is_null_value(value) {
        return Cell::Missing;
    }

    match kind {
        ColumnKind::Numeric => parse_number(value).map(Cell::Number).unwrap_or(Cell::Missing),
        ColumnKind::Categorical => Cell::Text(value.to_string()),
        ColumnKind::Unknown => Cell::Missing,
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// First and third quartiles of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Compute quartiles with linear interpolation between closest ranks.
    /// Returns `None` for an empty sample.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            q1: quantile_sorted(&sorted, 0.25),
            q3: quantile_sorted(&sorted, 0.75),
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Tukey fences `(q1 - k*iqr, q3 + k*iqr)`.
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }
}

/// Quantile of an ascending sample, interpolating linearly between ranks.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] + (values[upper] - values[lower]) * weight
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
