//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabprobe::QualityConfig;

/// tabprobe: statistics and data-quality checks for tabular files
#[derive(Parser)]
#[command(name = "tabprobe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a short overview of a dataset and its quality flags
    Overview {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write a Markdown report for a dataset
    Report {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory the report is written to
        #[arg(long, default_value = "reports")]
        out_dir: PathBuf,

        /// Report title
        #[arg(long, default_value = "EDA Report")]
        title: String,

        /// Maximum number of histogram columns (recorded in the report)
        #[arg(long, default_value = "5")]
        max_hist_columns: usize,

        /// Most frequent values listed per categorical column
        #[arg(long, default_value = "10")]
        top_k_categories: usize,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Largest accepted upload, in MiB
        #[arg(
            long,
            default_value = "256",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        max_upload_mb: u32,
    },
}

/// Quality thresholds that override the configuration file.
#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// JSON file with quality thresholds
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Share of missing cells above which a column is reported
    #[arg(long)]
    pub min_missing_share: Option<f64>,

    /// Distinct values above which a categorical column is flagged
    #[arg(long)]
    pub high_cardinality_threshold: Option<usize>,

    /// Share of zeros above which a numeric column is flagged
    #[arg(long)]
    pub zero_threshold: Option<f64>,

    /// IQR multiplier for outlier fences
    #[arg(long)]
    pub outlier_threshold: Option<f64>,

    /// Dominant-category share above which a column is flagged
    #[arg(long)]
    pub imbalance_threshold: Option<f64>,

    /// Deduct score points for dataset-wide missing cells and duplicate rows
    #[arg(long, overrides_with = "no_dataset_penalties")]
    pub dataset_penalties: bool,

    /// Turn dataset-wide penalties off, even if the configuration file enables them
    #[arg(long, overrides_with = "dataset_penalties")]
    pub no_dataset_penalties: bool,
}

impl ThresholdArgs {
    /// Defaults, then the configuration file, then explicit flags.
    pub fn to_config(&self) -> tabprobe::Result<QualityConfig> {
        let mut config = match &self.config {
            Some(path) => QualityConfig::load(path)?,
            None => QualityConfig::default(),
        };

        if let Some(value) = self.min_missing_share {
            config.min_missing_share = value;
        }
        if let Some(value) = self.high_cardinality_threshold {
            config.high_cardinality_threshold = value;
        }
        if let Some(value) = self.zero_threshold {
            config.zero_threshold = value;
        }
        if let Some(value) = self.outlier_threshold {
            config.outlier_threshold = value;
        }
        if let Some(value) = self.imbalance_threshold {
            config.imbalance_threshold = value;
        }
        if self.dataset_penalties {
            config.dataset_penalties = true;
        } else if self.no_dataset_penalties {
            config.dataset_penalties = false;
        }

        config.validate()?;
        Ok(config)
    }
}
