//! One-call analysis: load a file, compute stats, run the quality engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::quality::{DatasetMetrics, QualityConfig, QualityEngine, QualityReport};
use crate::schema::Table;
use crate::stats::BasicStats;

/// Configuration for an [`Analyzer`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub parser: ParserConfig,
    pub quality: QualityConfig,
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    pub stats: BasicStats,
    pub metrics: DatasetMetrics,
    pub quality: QualityReport,
}

/// Loads tables and runs every analysis over them.
pub struct Analyzer {
    parser: Parser,
    engine: QualityEngine,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom configuration.
    ///
    /// The quality thresholds are not checked here; [`Analyzer::analyze`]
    /// validates them before touching the file.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            engine: QualityEngine::with_config(config.quality),
        }
    }

    pub fn quality_config(&self) -> &QualityConfig {
        self.engine.config()
    }

    /// Load a file and analyze it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        self.engine.config().validate()?;

        let (data, source) = self.parser.parse_file(path)?;
        let table = Table::from_data_table(&data);

        let (stats, metrics, quality) = self.analyze_table(&table);

        info!(
            file = %source.file,
            rows = stats.row_count,
            columns = stats.column_count,
            score = quality.quality_score,
            "analyzed data file"
        );

        Ok(AnalysisResult {
            source,
            stats,
            metrics,
            quality,
        })
    }

    /// Analyze a table that is already in memory.
    pub fn analyze_table(&self, table: &Table) -> (BasicStats, DatasetMetrics, QualityReport) {
        (
            BasicStats::compute(table),
            DatasetMetrics::from_table(table),
            self.engine.analyze(table),
        )
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a delimited file into a [`Table`] with the default parser settings.
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    let (data, _) = Parser::new().parse_file(path)?;
    Ok(Table::from_data_table(&data))
}
