//! Scoring from precomputed dataset metrics.
//!
//! This is the coarse, shape-only score: row count, missing-cell share and
//! duplicate-row share. It needs no table, so callers that already know the
//! numbers can score without uploading data.

use serde::{Deserialize, Serialize};

use crate::inference::ratio;
use crate::schema::Table;

/// Rows below which a dataset is considered too small.
pub const MIN_ROWS: usize = 100;
/// Missing-cell share above which a penalty applies.
pub const MAX_MISSING_RATIO: f64 = 0.3;
/// Duplicate-row share above which a penalty applies.
pub const MAX_DUPLICATE_RATIO: f64 = 0.1;
/// Score at or above which a dataset is fit for modeling.
pub const OK_FOR_MODEL_SCORE: u8 = 70;

const FEW_ROWS_PENALTY: u32 = 20;
const MAX_MISSING_PENALTY: u32 = 40;
const MAX_DUPLICATE_PENALTY: u32 = 30;

/// Dataset-shape metrics fed into [`score_metrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetrics {
    pub n_rows: usize,
    pub n_cols: usize,
    pub missing_ratio: f64,
    #[serde(default)]
    pub duplicate_ratio: f64,
}

impl DatasetMetrics {
    /// Derive the metrics from a loaded table.
    pub fn from_table(table: &Table) -> Self {
        let cells = table.row_count() * table.column_count();
        Self {
            n_rows: table.row_count(),
            n_cols: table.column_count(),
            missing_ratio: ratio(table.missing_count(), cells),
            duplicate_ratio: ratio(table.duplicate_row_count(), table.row_count()),
        }
    }
}

/// Boolean flags raised by the metrics score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsFlags {
    pub too_few_rows: bool,
    pub too_many_missing: bool,
    pub too_many_duplicates: bool,
}

/// Result of [`score_metrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsScore {
    pub quality_score: u8,
    pub ok_for_model: bool,
    pub flags: MetricsFlags,
    pub metadata: DatasetMetrics,
}

/// Points deducted for a missing-cell share, if it crosses the limit.
pub fn missing_penalty(missing_ratio: f64) -> Option<u32> {
    (missing_ratio > MAX_MISSING_RATIO).then(|| scaled_penalty(missing_ratio, MAX_MISSING_PENALTY))
}

/// Points deducted for a duplicate-row share, if it crosses the limit.
pub fn duplicate_penalty(duplicate_ratio: f64) -> Option<u32> {
    (duplicate_ratio > MAX_DUPLICATE_RATIO)
        .then(|| scaled_penalty(duplicate_ratio, MAX_DUPLICATE_PENALTY))
}

fn scaled_penalty(share: f64, cap: u32) -> u32 {
    ((share * 100.0).floor() as u32).min(cap)
}

/// Score a dataset from its shape metrics alone.
pub fn score_metrics(metrics: DatasetMetrics) -> MetricsScore {
    let too_few_rows = metrics.n_rows < MIN_ROWS;
    let missing = missing_penalty(metrics.missing_ratio);
    let duplicates = duplicate_penalty(metrics.duplicate_ratio);

    let deducted = if too_few_rows { FEW_ROWS_PENALTY } else { 0 }
        + missing.unwrap_or(0)
        + duplicates.unwrap_or(0);
    let quality_score = 100u32.saturating_sub(deducted) as u8;

    MetricsScore {
        quality_score,
        ok_for_model: quality_score >= OK_FOR_MODEL_SCORE,
        flags: MetricsFlags {
            too_few_rows,
            too_many_missing: missing.is_some(),
            too_many_duplicates: duplicates.is_some(),
        },
        metadata: metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn metrics(n_rows: usize, missing_ratio: f64, duplicate_ratio: f64) -> DatasetMetrics {
        DatasetMetrics {
            n_rows,
            n_cols: 5,
            missing_ratio,
            duplicate_ratio,
        }
    }

    #[test]
    fn test_clean_dataset_scores_100() {
        let score = score_metrics(metrics(1000, 0.0, 0.0));

        assert_eq!(score.quality_score, 100);
        assert!(score.ok_for_model);
        assert!(!score.flags.too_few_rows);
    }

    #[test]
    fn test_few_rows_penalty() {
        let score = score_metrics(metrics(10, 0.0, 0.0));

        assert_eq!(score.quality_score, 80);
        assert!(score.flags.too_few_rows);
        assert!(score.ok_for_model);
    }

    #[test]
    fn test_missing_penalty_is_capped() {
        assert_eq!(missing_penalty(0.3), None);
        assert_eq!(missing_penalty(0.35), Some(35));
        assert_eq!(missing_penalty(0.9), Some(40));
    }

    #[test]
    fn test_duplicate_penalty_is_capped() {
        assert_eq!(duplicate_penalty(0.1), None);
        assert_eq!(duplicate_penalty(0.2), Some(20));
        assert_eq!(duplicate_penalty(0.75), Some(30));
    }

    #[test]
    fn test_worst_case_not_ok_for_model() {
        let score = score_metrics(metrics(5, 1.0, 1.0));

        assert_eq!(score.quality_score, 10);
        assert!(!score.ok_for_model);
        assert!(score.flags.too_many_missing);
        assert!(score.flags.too_many_duplicates);
    }

    #[test]
    fn test_from_table() {
        let table = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(1.0), None, Some(2.0)]),
            Column::categorical("b", vec![Some("x"), Some("x"), None, None]),
        ])
        .unwrap();

        let metrics = DatasetMetrics::from_table(&table);

        assert_eq!(metrics.n_rows, 4);
        assert_eq!(metrics.n_cols, 2);
        assert_eq!(metrics.missing_ratio, 3.0 / 8.0);
        assert_eq!(metrics.duplicate_ratio, 0.25);
    }

    #[test]
    fn test_from_empty_table() {
        let metrics = DatasetMetrics::from_table(&Table::empty());

        assert_eq!(metrics.missing_ratio, 0.0);
        assert_eq!(metrics.duplicate_ratio, 0.0);
    }
}
