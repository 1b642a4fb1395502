//! Data-quality heuristics.
//!
//! Each check in [`checks`] inspects one aspect of a [`Table`](crate::Table)
//! and returns typed findings. [`QualityEngine`] runs them in a fixed order,
//! charges a per-column penalty for each finding and folds the result into a
//! [`QualityReport`] with a score in `[0, 100]`.

pub mod checks;
mod config;
mod engine;
pub mod metrics;
mod report;

pub use config::QualityConfig;
pub use engine::QualityEngine;
pub use metrics::{score_metrics, DatasetMetrics, MetricsFlags, MetricsScore};
pub use report::{
    HighCardinalityFinding, IdDuplicateFinding, ImbalanceFinding, MissingFinding,
    OutlierFinding, Penalty, QualityCheck, QualityReport, ZeroFinding,
};
