//! tabprobe: descriptive statistics and data-quality heuristics for tabular data.
//!
//! A delimited file is loaded into an immutable [`Table`] whose columns carry
//! an inferred [`ColumnKind`]. [`BasicStats`] summarizes its shape and the
//! [`QualityEngine`] runs a fixed set of column-level heuristics (constant
//! columns, high cardinality, duplicated identifiers, zero prevalence,
//! missing values, IQR outliers, category imbalance) and folds them into a
//! [`QualityReport`] with a score between 0 and 100.
//!
//! # Example
//!
//! ```no_run
//! use tabprobe::Analyzer;
//!
//! let result = Analyzer::new().analyze("data.csv").unwrap();
//!
//! println!("Rows: {}", result.stats.row_count);
//! println!("Score: {}", result.quality.quality_score);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod quality;
pub mod report;
pub mod schema;
pub mod stats;

mod analyzer;

pub use crate::analyzer::{load, AnalysisResult, Analyzer, AnalyzerConfig};
pub use error::{Result, TabprobeError};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use quality::{
    score_metrics, DatasetMetrics, MetricsScore, QualityConfig, QualityEngine, QualityReport,
};
pub use report::{MarkdownReport, ReportOptions};
pub use schema::{Cell, Column, ColumnKind, Table};
pub use stats::BasicStats;
