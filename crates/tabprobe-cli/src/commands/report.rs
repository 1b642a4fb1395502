//! Report command - write a Markdown report for a dataset.

use std::path::PathBuf;

use colored::Colorize;
use tabprobe::{load, Analyzer, AnalyzerConfig, MarkdownReport, ReportOptions};

use crate::cli::ThresholdArgs;

pub fn run(
    file: PathBuf,
    out_dir: PathBuf,
    title: String,
    max_hist_columns: usize,
    top_k_categories: usize,
    thresholds: ThresholdArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = thresholds.to_config()?;
    let table = load(&file)?;

    let analyzer = Analyzer::with_config(AnalyzerConfig {
        quality: config,
        ..AnalyzerConfig::default()
    });
    let (stats, _, quality) = analyzer.analyze_table(&table);

    let options = ReportOptions {
        title,
        max_hist_columns,
        top_k_categories,
    };
    let path = MarkdownReport::new(
        &table,
        &stats,
        &quality,
        analyzer.quality_config(),
        &options,
    )
    .write_to(&out_dir)?;

    println!(
        "{} {} (quality score {}/100)",
        "Report written to".green().bold(),
        path.display(),
        quality.quality_score
    );

    Ok(())
}
