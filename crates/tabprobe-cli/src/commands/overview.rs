//! Overview command - print shape, dataset counts and quality flags.

use std::path::PathBuf;

use colored::Colorize;
use tabprobe::{AnalysisResult, Analyzer};

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let result = Analyzer::new().analyze(&file)?;
    print_overview(&result);
    Ok(())
}

fn print_overview(result: &AnalysisResult) {
    let stats = &result.stats;
    let quality = &result.quality;

    println!("{} {}", "Overview of".cyan().bold(), result.source.file.white());
    println!();
    println!("Rows:    {}", stats.row_count.to_string().white().bold());
    println!("Columns: {}", stats.column_count.to_string().white().bold());
    for column in &stats.columns {
        println!("  {:<24} {}", column.name, column.kind.to_string().dimmed());
    }
    println!();

    println!("{}", "Dataset:".yellow().bold());
    println!("  Missing cells:  {}", quality.missing_count);
    println!("  Duplicate rows: {}", quality.duplicate_count);
    println!();

    println!("{}", "Quality flags:".yellow().bold());
    flag("Constant columns", quality.has_constant_columns, &quality.constant_columns);
    flag(
        "High cardinality",
        quality.has_high_cardinality,
        &quality.high_cardinality_names(),
    );
    flag(
        "Duplicate identifiers",
        quality.has_id_duplicates,
        &quality.duplicate_id_info.keys().collect::<Vec<_>>(),
    );
    flag(
        "Many zeros",
        quality.has_many_zeros,
        &quality.zero_columns.iter().map(|f| &f.column).collect::<Vec<_>>(),
    );
    flag(
        "Missing values",
        !quality.columns_with_missing.is_empty(),
        &quality
            .columns_with_missing
            .iter()
            .map(|f| &f.column)
            .collect::<Vec<_>>(),
    );
    flag(
        "Outliers",
        quality.has_outliers,
        &quality.outlier_columns.iter().map(|f| &f.column).collect::<Vec<_>>(),
    );
    flag(
        "Imbalanced categories",
        quality.has_imbalanced_categories,
        &quality
            .imbalanced_columns
            .iter()
            .map(|f| &f.column)
            .collect::<Vec<_>>(),
    );
    println!();

    let score = quality.quality_score.to_string();
    let score = match quality.quality_score {
        80..=100 => score.green(),
        50..=79 => score.yellow(),
        _ => score.red(),
    };
    println!("Quality score: {}/100", score.bold());
}

fn flag<S: AsRef<str>>(label: &str, raised: bool, columns: &[S]) {
    if raised {
        let names: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
        println!("  {} {:<22} {}", "✗".red(), label, names.join(", "));
    } else {
        println!("  {} {}", "✓".green(), label);
    }
}
