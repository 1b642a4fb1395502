//! Runs the quality checks and aggregates them into a scored report.

use tracing::info;

use super::checks;
use super::config::QualityConfig;
use super::metrics::{duplicate_penalty, missing_penalty};
use super::report::{Penalty, QualityCheck, QualityReport};
use crate::inference::ratio;
use crate::schema::Table;

/// Starting score before any deduction.
const MAX_SCORE: i64 = 100;

/// Quality heuristics engine.
///
/// Holds only its configuration; [`QualityEngine::analyze`] is a pure
/// function of the table and that configuration.
#[derive(Debug, Clone, Default)]
pub struct QualityEngine {
    config: QualityConfig,
}

impl QualityEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds.
    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Run every check over the table and build the report.
    pub fn analyze(&self, table: &Table) -> QualityReport {
        let config = &self.config;
        let mut report = QualityReport::clean(table.row_count(), table.column_count());
        let mut penalties = Vec::new();

        report.constant_columns = checks::constant_columns(table);
        charge(&mut penalties, QualityCheck::ConstantColumn, &report.constant_columns);

        report.high_cardinality_columns = checks::high_cardinality(table, config);
        charge(
            &mut penalties,
            QualityCheck::HighCardinality,
            report.high_cardinality_columns.iter().map(|f| &f.column),
        );

        let id_duplicates = checks::id_duplicates(table);
        charge(
            &mut penalties,
            QualityCheck::IdDuplicates,
            id_duplicates.iter().map(|f| &f.column),
        );
        report.duplicate_id_info = id_duplicates
            .into_iter()
            .map(|f| (f.column.clone(), f))
            .collect();

        report.zero_columns = checks::many_zeros(table, config);
        charge(
            &mut penalties,
            QualityCheck::ManyZeros,
            report.zero_columns.iter().map(|f| &f.column),
        );

        // Informational: no penalty.
        report.columns_with_missing = checks::missing_values(table, config);

        report.outlier_columns = checks::outliers(table, config);
        charge(
            &mut penalties,
            QualityCheck::Outliers,
            report.outlier_columns.iter().map(|f| &f.column),
        );

        report.imbalanced_columns = checks::imbalanced_categories(table, config);
        charge(
            &mut penalties,
            QualityCheck::CategoryImbalance,
            report.imbalanced_columns.iter().map(|f| &f.column),
        );

        report.missing_count = table.missing_count();
        report.duplicate_count = table.duplicate_row_count();

        if config.dataset_penalties {
            let cells = table.row_count() * table.column_count();
            if let Some(points) = missing_penalty(ratio(report.missing_count, cells)) {
                penalties.push(dataset_penalty(QualityCheck::DatasetMissing, points));
            }
            if let Some(points) =
                duplicate_penalty(ratio(report.duplicate_count, table.row_count()))
            {
                penalties.push(dataset_penalty(QualityCheck::DatasetDuplicates, points));
            }
        }

        report.has_constant_columns = !report.constant_columns.is_empty();
        report.has_high_cardinality = !report.high_cardinality_columns.is_empty();
        report.has_id_duplicates = !report.duplicate_id_info.is_empty();
        report.has_many_zeros = !report.zero_columns.is_empty();
        report.has_missing = report.missing_count > 0;
        report.has_duplicates = report.duplicate_count > 0;
        report.has_outliers = !report.outlier_columns.is_empty();
        report.has_imbalanced_categories = !report.imbalanced_columns.is_empty();

        let deducted: i64 = penalties.iter().map(|p| i64::from(p.points)).sum();
        report.quality_score = (MAX_SCORE - deducted).clamp(0, MAX_SCORE) as u8;
        report.penalties = penalties;

        info!(
            rows = report.row_count,
            columns = report.column_count,
            findings = report.finding_count(),
            score = report.quality_score,
            "quality analysis complete"
        );

        report
    }
}

fn charge<'a>(
    penalties: &mut Vec<Penalty>,
    check: QualityCheck,
    columns: impl IntoIterator<Item = &'a String>,
) {
    penalties.extend(columns.into_iter().map(|column| Penalty {
        check,
        column: Some(column.clone()),
        points: check.column_penalty(),
    }));
}

fn dataset_penalty(check: QualityCheck, points: u32) -> Penalty {
    Penalty {
        check,
        column: None,
        points,
    }
}
