//! Thresholds that parametrize the quality checks.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabprobeError};

/// Configuration for one quality analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Maximum distinct values of a categorical column before it is flagged.
    pub high_cardinality_threshold: usize,
    /// Maximum tolerated share of zeros in a numeric column.
    pub zero_threshold: f64,
    /// Share of missing cells above which a column is reported.
    pub min_missing_share: f64,
    /// IQR multiplier defining the Tukey fences.
    pub outlier_threshold: f64,
    /// Share of the most frequent category above which a column is imbalanced.
    pub imbalance_threshold: f64,
    /// Whether dataset-wide missing cells and duplicate rows lower the score.
    pub dataset_penalties: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_cardinality_threshold: 50,
            zero_threshold: 0.3,
            min_missing_share: 0.1,
            outlier_threshold: 1.5,
            imbalance_threshold: 0.9,
            dataset_penalties: false,
        }
    }
}

impl QualityConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| TabprobeError::io(path, e))?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("zero_threshold", self.zero_threshold),
            ("min_missing_share", self.min_missing_share),
            ("imbalance_threshold", self.imbalance_threshold),
        ];

        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(TabprobeError::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if !self.outlier_threshold.is_finite() || self.outlier_threshold < 0.0 {
            return Err(TabprobeError::Config(format!(
                "outlier_threshold must be a non-negative number, got {}",
                self.outlier_threshold
            )));
        }

        Ok(())
    }
}
