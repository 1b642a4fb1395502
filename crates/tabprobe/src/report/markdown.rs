//! Markdown report writer.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TabprobeError};
use crate::quality::{QualityConfig, QualityReport};
use crate::schema::{ColumnKind, Table};
use crate::stats::BasicStats;

/// File name of the report inside the output directory.
pub const REPORT_FILE_NAME: &str = "report.md";

/// Presentation options that do not affect the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    /// Echoed in the parameters section; histograms are not rendered.
    pub max_hist_columns: usize,
    /// Number of most frequent values listed per categorical column.
    pub top_k_categories: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "EDA Report".to_string(),
            max_hist_columns: 5,
            top_k_categories: 10,
        }
    }
}

/// A Markdown rendering of one analysis.
///
/// Rendering goes through [`fmt::Display`]; [`MarkdownReport::write_to`]
/// places the result in `<out_dir>/report.md`.
pub struct MarkdownReport<'a> {
    table: &'a Table,
    stats: &'a BasicStats,
    quality: &'a QualityReport,
    config: &'a QualityConfig,
    options: &'a ReportOptions,
}

impl<'a> MarkdownReport<'a> {
    pub fn new(
        table: &'a Table,
        stats: &'a BasicStats,
        quality: &'a QualityReport,
        config: &'a QualityConfig,
        options: &'a ReportOptions,
    ) -> Self {
        Self {
            table,
            stats,
            quality,
            config,
            options,
        }
    }

    /// Write the report, creating `out_dir` if needed, and return its path.
    pub fn write_to(&self, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir).map_err(|e| TabprobeError::io(out_dir, e))?;

        let path = out_dir.join(REPORT_FILE_NAME);
        fs::write(&path, self.to_string()).map_err(|e| TabprobeError::io(&path, e))?;

        info!(path = %path.display(), "wrote markdown report");
        Ok(path)
    }

    fn write_statistics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Dataset Statistics\n")?;
        writeln!(f, "- Rows: {}", self.stats.row_count)?;
        writeln!(f, "- Columns: {}", self.stats.column_count)?;
        writeln!(
            f,
            "- Numeric columns: {}",
            self.stats.count_of(ColumnKind::Numeric)
        )?;
        writeln!(
            f,
            "- Categorical columns: {}\n",
            self.stats.count_of(ColumnKind::Categorical)
        )?;

        if !self.stats.columns.is_empty() {
            writeln!(f, "| Column | Kind |")?;
            writeln!(f, "|--------|------|")?;
            for column in &self.stats.columns {
                writeln!(f, "| {} | {} |", table_cell(&column.name), column.kind)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_quality(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.quality;
        writeln!(f, "## Data Quality Assessment\n")?;
        writeln!(f, "- Quality score: {}/100", q.quality_score)?;
        writeln!(f, "- Has missing values: {}", q.has_missing)?;
        writeln!(f, "- Missing count: {}", q.missing_count)?;
        writeln!(f, "- Has duplicates: {}", q.has_duplicates)?;
        writeln!(f, "- Duplicate count: {}\n", q.duplicate_count)?;

        if !q.penalties.is_empty() {
            writeln!(f, "| Check | Column | Points |")?;
            writeln!(f, "|-------|--------|--------|")?;
            for penalty in &q.penalties {
                writeln!(
                    f,
                    "| {} | {} | -{} |",
                    penalty.check.label(),
                    table_cell(penalty.column.as_deref().unwrap_or("(dataset)")),
                    penalty.points
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_core_heuristics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.quality;
        writeln!(f, "## Quality Heuristics\n")?;

        if q.has_constant_columns {
            writeln!(
                f,
                "- **Constant columns detected**: {}",
                q.constant_columns.join(", ")
            )?;
        } else {
            writeln!(f, "- No constant columns found")?;
        }

        if q.has_high_cardinality {
            writeln!(
                f,
                "- **High cardinality columns** (> {} unique values): {}",
                self.config.high_cardinality_threshold,
                q.high_cardinality_names().join(", ")
            )?;
        } else {
            writeln!(f, "- No high cardinality categorical columns")?;
        }

        if q.has_id_duplicates {
            writeln!(f, "- **ID duplicates found**:")?;
            for info in q.duplicate_id_info.values() {
                writeln!(
                    f,
                    "  - {}: {} duplicates out of {} rows",
                    info.column, info.duplicate_count, info.total
                )?;
            }
        } else {
            writeln!(f, "- No duplicated identifiers")?;
        }

        if q.has_many_zeros {
            writeln!(
                f,
                "- **Many zero values detected** (> {}):",
                percent(self.config.zero_threshold, 0)
            )?;
            for finding in &q.zero_columns {
                writeln!(f, "  - {}: {} zeros", finding.column, percent(finding.zero_ratio, 1))?;
            }
        } else {
            writeln!(f, "- No columns dominated by zeros")?;
        }

        if q.columns_with_missing.is_empty() {
            writeln!(
                f,
                "- No columns above {} missing",
                percent(self.config.min_missing_share, 0)
            )?;
        } else {
            writeln!(
                f,
                "- **Columns with missing values** (> {}):",
                percent(self.config.min_missing_share, 0)
            )?;
            for finding in &q.columns_with_missing {
                writeln!(
                    f,
                    "  - {}: {} missing ({})",
                    finding.column,
                    finding.missing_count,
                    percent(finding.missing_ratio, 1)
                )?;
            }
        }
        writeln!(f)
    }

    fn write_extended_heuristics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.quality;
        writeln!(f, "## Extended Heuristics\n")?;

        if q.has_outliers {
            writeln!(
                f,
                "- **Outliers detected** (IQR multiplier: {}):",
                self.config.outlier_threshold
            )?;
            for finding in &q.outlier_columns {
                writeln!(
                    f,
                    "  - {}: {} outliers ({}) outside [{:.2}, {:.2}]",
                    finding.column,
                    finding.outliers_count,
                    percent(finding.outliers_ratio, 1),
                    finding.lower_bound,
                    finding.upper_bound
                )?;
            }
        } else {
            writeln!(f, "- No significant outliers detected")?;
        }

        if q.has_imbalanced_categories {
            writeln!(
                f,
                "- **Imbalanced categories detected** (threshold: {}):",
                percent(self.config.imbalance_threshold, 0)
            )?;
            for finding in &q.imbalanced_columns {
                writeln!(
                    f,
                    "  - {}: '{}' is {} of data",
                    finding.column,
                    finding.dominant_category,
                    percent(finding.dominant_ratio, 1)
                )?;
            }
        } else {
            writeln!(f, "- Categories are reasonably balanced")?;
        }
        writeln!(f)
    }

    fn write_top_categories(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categorical: Vec<_> = self
            .table
            .columns()
            .iter()
            .filter(|c| c.kind().is_categorical())
            .collect();
        if categorical.is_empty() {
            return Ok(());
        }

        writeln!(f, "## Top Categories\n")?;
        for column in categorical {
            writeln!(f, "### {}\n", column.name())?;
            writeln!(f, "| Value | Count |")?;
            writeln!(f, "|-------|-------|")?;
            for (value, count) in column.top_values(self.options.top_k_categories) {
                writeln!(f, "| {} | {} |", table_cell(value), count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_parameters(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.config;
        writeln!(f, "## Report Parameters\n")?;
        writeln!(f, "- Max histogram columns: {}", self.options.max_hist_columns)?;
        writeln!(f, "- Top categories shown: {}", self.options.top_k_categories)?;
        writeln!(f, "- Missing values threshold: {}", percent(c.min_missing_share, 0))?;
        writeln!(f, "- High cardinality threshold: {}", c.high_cardinality_threshold)?;
        writeln!(f, "- Zero values threshold: {}", percent(c.zero_threshold, 0))?;
        writeln!(f, "- Outlier IQR multiplier: {}", c.outlier_threshold)?;
        writeln!(f, "- Imbalance threshold: {}", percent(c.imbalance_threshold, 0))?;
        writeln!(f, "- Dataset penalties: {}", c.dataset_penalties)?;
        writeln!(f, "- Generated by tabprobe v{}", env!("CARGO_PKG_VERSION"))
    }
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}\n", self.options.title)?;
        self.write_statistics(f)?;
        self.write_quality(f)?;
        self.write_core_heuristics(f)?;
        self.write_extended_heuristics(f)?;
        self.write_top_categories(f)?;
        self.write_parameters(f)
    }
}

fn percent(share: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, share * 100.0)
}

/// Text safe to place inside a Markdown table cell.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
