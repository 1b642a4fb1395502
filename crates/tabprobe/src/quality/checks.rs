//! The per-column quality checks.
//!
//! Each check scans the columns it applies to and returns one finding per
//! flagged column, in table order. Checks never fail: every ratio with a zero
//! denominator is 0.0.

use tracing::debug;

use super::config::QualityConfig;
use super::report::{
    HighCardinalityFinding, IdDuplicateFinding, ImbalanceFinding, MissingFinding, OutlierFinding,
    ZeroFinding,
};
use crate::inference::{ratio, Quartiles};
use crate::schema::{Column, Table};

/// Minimum present values for quartiles to be trusted.
pub const MIN_OUTLIER_SAMPLE: usize = 10;
/// Share of outlying rows above which a column is flagged.
pub const OUTLIER_SHARE_LIMIT: f64 = 0.05;

/// Columns holding exactly one distinct present value.
pub fn constant_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.distinct_count() == 1)
        .inspect(|c| debug!(column = c.name(), "constant column"))
        .map(|c| c.name().to_string())
        .collect()
}

/// Categorical columns with more distinct values than the threshold.
pub fn high_cardinality(table: &Table, config: &QualityConfig) -> Vec<HighCardinalityFinding> {
    let threshold = config.high_cardinality_threshold;

    categorical(table)
        .filter_map(|c| {
            let unique_count = c.distinct_count();
            (unique_count > threshold).then(|| {
                debug!(column = c.name(), unique_count, threshold, "high cardinality");
                HighCardinalityFinding {
                    column: c.name().to_string(),
                    unique_count,
                    threshold,
                }
            })
        })
        .collect()
}

/// Identifier-named columns with repeated values.
pub fn id_duplicates(table: &Table) -> Vec<IdDuplicateFinding> {
    table
        .columns()
        .iter()
        .filter(|c| c.is_identifier_like())
        .filter_map(|c| {
            let duplicate_count = c.duplicate_occurrences();
            (duplicate_count > 0).then(|| {
                debug!(column = c.name(), duplicate_count, "duplicate identifiers");
                IdDuplicateFinding {
                    column: c.name().to_string(),
                    duplicate_count,
                    total: c.len(),
                }
            })
        })
        .collect()
}

/// Numeric columns whose share of exact zeros exceeds the threshold.
pub fn many_zeros(table: &Table, config: &QualityConfig) -> Vec<ZeroFinding> {
    let threshold = config.zero_threshold;

    numeric(table)
        .filter_map(|c| {
            let zeros = c.numbers().filter(|&n| n == 0.0).count();
            let zero_ratio = ratio(zeros, table.row_count());
            (zero_ratio > threshold).then(|| {
                debug!(column = c.name(), zero_ratio, threshold, "many zeros");
                ZeroFinding {
                    column: c.name().to_string(),
                    zero_ratio,
                    threshold,
                }
            })
        })
        .collect()
}

/// Columns whose share of missing cells exceeds the threshold.
pub fn missing_values(table: &Table, config: &QualityConfig) -> Vec<MissingFinding> {
    let threshold = config.min_missing_share;

    table
        .columns()
        .iter()
        .filter_map(|c| {
            let missing_count = c.missing_count();
            let missing_ratio = ratio(missing_count, table.row_count());
            (missing_ratio > threshold).then(|| MissingFinding {
                column: c.name().to_string(),
                missing_count,
                missing_ratio,
                threshold,
            })
        })
        .collect()
}

/// Numeric columns where more than 5% of rows fall outside the Tukey fences.
///
/// Columns with fewer than ten present values, or with a zero IQR, are
/// skipped.
pub fn outliers(table: &Table, config: &QualityConfig) -> Vec<OutlierFinding> {
    numeric(table)
        .filter_map(|c| outlier_finding(c, table.row_count(), config.outlier_threshold))
        .collect()
}

fn outlier_finding(column: &Column, row_count: usize, multiplier: f64) -> Option<OutlierFinding> {
    let values: Vec<f64> = column.numbers().collect();
    if values.len() < MIN_OUTLIER_SAMPLE {
        return None;
    }

    let quartiles = Quartiles::from_values(values.iter().copied())?;
    if quartiles.iqr() == 0.0 {
        return None;
    }

    let (lower_bound, upper_bound) = quartiles.fences(multiplier);
    let outliers_count = values
        .iter()
        .filter(|&&v| v < lower_bound || v > upper_bound)
        .count();
    let outliers_ratio = ratio(outliers_count, row_count);

    if outliers_ratio <= OUTLIER_SHARE_LIMIT {
        return None;
    }

    debug!(
        column = column.name(),
        outliers_count, outliers_ratio, lower_bound, upper_bound, "outliers"
    );
    Some(OutlierFinding {
        column: column.name().to_string(),
        outliers_count,
        outliers_ratio,
        lower_bound,
        upper_bound,
        threshold: multiplier,
    })
}

/// Categorical columns dominated by a single value.
///
/// Columns with fewer than two distinct values are left to the constant
/// column check. The share is taken over present values only.
pub fn imbalanced_categories(table: &Table, config: &QualityConfig) -> Vec<ImbalanceFinding> {
    let threshold = config.imbalance_threshold;

    categorical(table)
        .filter_map(|c| {
            let counts = c.value_counts();
            if counts.len() < 2 {
                return None;
            }

            let present: usize = counts.values().sum();
            // First-seen value wins a tie.
            let (dominant, dominant_count) = counts
                .iter()
                .fold(None, |best: Option<(&str, usize)>, (&value, &count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((value, count)),
                })?;
            let dominant_ratio = ratio(dominant_count, present);

            (dominant_ratio > threshold).then(|| {
                debug!(column = c.name(), dominant, dominant_ratio, "imbalanced categories");
                ImbalanceFinding {
                    column: c.name().to_string(),
                    dominant_category: dominant.to_string(),
                    dominant_ratio,
                    threshold,
                    unique_categories: counts.len(),
                }
            })
        })
        .collect()
}

fn numeric(table: &Table) -> impl Iterator<Item = &Column> {
    table.columns().iter().filter(|c| c.kind().is_numeric())
}

fn categorical(table: &Table) -> impl Iterator<Item = &Column> {
    table.columns().iter().filter(|c| c.kind().is_categorical())
}
