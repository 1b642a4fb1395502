//! Integration tests for tabprobe.

use std::fmt::Write as _;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use tabprobe::quality::QualityCheck;
use tabprobe::{
    load, score_metrics, Analyzer, AnalyzerConfig, ColumnKind, DatasetMetrics, MarkdownReport,
    QualityConfig, ReportOptions, TabprobeError,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn analyzer_with(quality: QualityConfig) -> Analyzer {
    Analyzer::with_config(AnalyzerConfig {
        quality,
        ..AnalyzerConfig::default()
    })
}

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_load_infers_kinds() {
    let content = "id,name,score,active,notes\n\
                   1,Alice,3.5,true,\n\
                   2,Bob,NA,false,\n\
                   3,Carol,4.0,true,\n";
    let file = create_test_file(content);

    let table = load(file.path()).expect("Load failed");

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_names(), vec!["id", "name", "score", "active", "notes"]);
    let kinds: Vec<ColumnKind> = table.columns().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ColumnKind::Numeric,
            ColumnKind::Categorical,
            ColumnKind::Numeric,
            ColumnKind::Categorical,
            ColumnKind::Unknown,
        ]
    );
    assert_eq!(table.missing_count(), 4);
}

#[test]
fn test_load_tsv_with_null_tokens() {
    let content = "sample\tvalue\n\
                   a\t1\n\
                   b\tnull\n\
                   c\tN/A\n\
                   d\t#N/A\n";
    let file = create_test_file(content);

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.source.format, "tsv");
    assert_eq!(result.quality.missing_count, 3);
    assert_eq!(result.quality.columns_with_missing[0].column, "value");
    assert_eq!(result.quality.columns_with_missing[0].missing_ratio, 0.75);
}

#[test]
fn test_null_tokens_are_case_sensitive() {
    let content = "status\nNone\nnone\nNA\nna\n  \n";
    let file = create_test_file(content);

    let table = load(file.path()).expect("Load failed");

    assert_eq!(table.columns()[0].kind(), ColumnKind::Categorical);
    assert_eq!(table.missing_count(), 2);
}

#[test]
fn test_header_only_file_is_empty_table() {
    let file = create_test_file("id,value\n");

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.stats.row_count, 0);
    assert_eq!(result.stats.column_count, 2);
    assert_eq!(result.quality.quality_score, 100);
    assert_eq!(result.quality.finding_count(), 0);
}

#[test]
fn test_empty_file_is_error() {
    let file = create_test_file("");

    let result = Analyzer::new().analyze(file.path());

    assert!(matches!(result, Err(TabprobeError::EmptyData(_))));
}

#[test]
fn test_source_metadata() {
    let file = create_test_file("a,b\n1,2\n");

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");

    assert!(result.source.hash.starts_with("sha256:"));
    assert_eq!(result.source.size_bytes, 8);
    assert_eq!(result.source.column_count, 2);
}

// =============================================================================
// Quality Scenarios
// =============================================================================

#[test]
fn test_id_duplicates_scenario() {
    let content = "id,value\n1,10\n2,20\n1,30\n4,40\n5,50\n";
    let file = create_test_file(content);

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");
    let quality = &result.quality;

    assert!(quality.has_id_duplicates);
    assert_eq!(quality.duplicate_id_info["id"].duplicate_count, 1);
    assert_eq!(quality.duplicate_id_info["id"].total, 5);
    assert!(!quality.has_constant_columns);
    assert_eq!(quality.quality_score, 85);
}

#[test]
fn test_repeated_headers_keep_their_findings() {
    let file = create_test_file("id,id\n1,7\n1,7\n2,8\n");

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");
    let quality = &result.quality;

    assert_eq!(result.stats.column_names(), vec!["id", "id.1"]);
    assert_eq!(quality.duplicate_id_info.len(), 2);
    assert_eq!(quality.duplicate_id_info["id"].duplicate_count, 1);
    assert_eq!(quality.duplicate_id_info["id.1"].duplicate_count, 1);
    assert_eq!(quality.finding_count(), quality.penalties.len());
    assert_eq!(quality.quality_score, 70);
}

#[test]
fn test_zero_threshold_scenario() {
    let content = "amount\n0\n0\n0\n0\n0\n0\n0\n1\n2\n3\n";
    let file = create_test_file(content);

    let flagged = analyzer_with(QualityConfig {
        zero_threshold: 0.5,
        ..QualityConfig::default()
    })
    .analyze(file.path())
    .expect("Analysis failed");

    assert!(flagged.quality.has_many_zeros);
    assert_eq!(flagged.quality.zero_columns[0].zero_ratio, 0.7);
    assert_eq!(flagged.quality.zero_columns[0].threshold, 0.5);

    let clean = analyzer_with(QualityConfig {
        zero_threshold: 0.8,
        ..QualityConfig::default()
    })
    .analyze(file.path())
    .expect("Analysis failed");

    assert!(!clean.quality.has_many_zeros);
}

#[test]
fn test_imbalanced_category() {
    let mut content = String::from("category\n");
    for i in 0..100 {
        writeln!(content, "{}", if i < 95 { "retail" } else { "wholesale" }).unwrap();
    }
    let file = create_test_file(&content);

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");
    let finding = &result.quality.imbalanced_columns[0];

    assert_eq!(finding.dominant_category, "retail");
    assert!((finding.dominant_ratio - 0.95).abs() < 1e-12);
    assert_eq!(finding.unique_categories, 2);
    assert_eq!(result.quality.quality_score, 94);
}

#[test]
fn test_high_cardinality_category() {
    let mut content = String::from("code\n");
    for i in 0..60 {
        writeln!(content, "c{}", i).unwrap();
    }
    let file = create_test_file(&content);

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(result.quality.high_cardinality_names(), vec!["code"]);
    assert_eq!(result.quality.high_cardinality_columns[0].unique_count, 60);

    let relaxed = analyzer_with(QualityConfig {
        high_cardinality_threshold: 60,
        ..QualityConfig::default()
    })
    .analyze(file.path())
    .expect("Analysis failed");

    assert!(!relaxed.quality.has_high_cardinality);
}

#[test]
fn test_outliers_detected() {
    let mut content = String::from("latency\n");
    for i in 1..=18 {
        writeln!(content, "{}", i).unwrap();
    }
    content.push_str("-500\n500\n");
    let file = create_test_file(&content);

    let result = Analyzer::new().analyze(file.path()).expect("Analysis failed");
    let finding = &result.quality.outlier_columns[0];

    assert_eq!(finding.column, "latency");
    assert_eq!(finding.outliers_count, 2);
    assert_eq!(finding.outliers_ratio, 0.1);
    assert_eq!(finding.threshold, 1.5);
}

#[test]
fn test_dataset_penalties_switch() {
    let content = "a,b\n1,2\n1,2\n3,4\n,\n,\n5,6\n";
    let file = create_test_file(content);

    let informational = Analyzer::new().analyze(file.path()).expect("Analysis failed");
    assert_eq!(informational.quality.duplicate_count, 2);
    assert!(informational.quality.has_duplicates);
    assert_eq!(informational.quality.quality_score, 100);

    let penalized = analyzer_with(QualityConfig {
        dataset_penalties: true,
        ..QualityConfig::default()
    })
    .analyze(file.path())
    .expect("Analysis failed");

    let checks: Vec<QualityCheck> = penalized.quality.penalties.iter().map(|p| p.check).collect();
    assert_eq!(
        checks,
        vec![QualityCheck::DatasetMissing, QualityCheck::DatasetDuplicates]
    );
    assert_eq!(penalized.quality.quality_score, 37);
}

// =============================================================================
// Metrics Scoring
// =============================================================================

#[test]
fn test_metrics_from_loaded_table() {
    let content = "a,b\n1,x\n1,x\n2,\n";
    let file = create_test_file(content);

    let table = load(file.path()).expect("Load failed");
    let score = score_metrics(DatasetMetrics::from_table(&table));

    assert!(score.flags.too_few_rows);
    assert!(score.flags.too_many_duplicates);
    assert!(!score.flags.too_many_missing);
    // -20 for size, -30 for a duplicate share of one third
    assert_eq!(score.quality_score, 50);
    assert!(!score.ok_for_model);
}

// =============================================================================
// Report Generation
// =============================================================================

#[test]
fn test_markdown_report_end_to_end() {
    let content = "user_id,plan,mrr\n\
                   u1,free,0\n\
                   u2,free,0\n\
                   u2,pro,49\n\
                   u4,free,0\n";
    let file = create_test_file(content);
    let out = TempDir::new().expect("Failed to create temp dir");

    let table = load(file.path()).expect("Load failed");
    let analyzer = Analyzer::new();
    let (stats, _, quality) = analyzer.analyze_table(&table);
    let options = ReportOptions {
        title: "Subscriptions".to_string(),
        ..ReportOptions::default()
    };

    let path = MarkdownReport::new(&table, &stats, &quality, analyzer.quality_config(), &options)
        .write_to(out.path().join("reports"))
        .expect("Report failed");

    let markdown = std::fs::read_to_string(path).expect("Failed to read report");
    assert!(markdown.starts_with("# Subscriptions\n"));
    assert!(markdown.contains("user_id: 1 duplicates out of 4 rows"));
    assert!(markdown.contains("mrr: 75.0% zeros"));
    assert!(markdown.contains("| free | 3 |"));
}
