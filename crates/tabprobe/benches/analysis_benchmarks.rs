//! Quality analysis benchmarks.
//!
//! Run with: cargo bench -p tabprobe --bench analysis_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabprobe::quality::checks;
use tabprobe::{BasicStats, Column, QualityConfig, QualityEngine, Table};

/// Build a table with one column per heuristic so every pass has work.
fn generate_table(rows: usize) -> Table {
    let distinct_ids = (rows - rows / 20).max(1);
    let ids: Vec<Option<f64>> = (0..rows).map(|i| Some((i % distinct_ids) as f64)).collect();
    let amounts: Vec<Option<f64>> = (0..rows)
        .map(|i| match i % 10 {
            0..=3 => Some(0.0),
            9 if i % 50 == 9 => Some(10_000.0),
            _ => Some((i % 97) as f64),
        })
        .collect();
    let segments: Vec<Option<String>> = (0..rows)
        .map(|i| match i % 20 {
            0 => Some(format!("segment_{}", i % 7)),
            1 => None,
            _ => Some("retail".to_string()),
        })
        .collect();
    let codes: Vec<Option<String>> = (0..rows).map(|i| Some(format!("C{:05}", i))).collect();
    let flags = vec![Some("yes"); rows];

    Table::new(vec![
        Column::numeric("order_id", ids),
        Column::numeric("amount", amounts),
        Column::categorical("segment", segments),
        Column::categorical("code", codes),
        Column::categorical("flag", flags),
    ])
    .unwrap()
}

/// Benchmark the full engine at several table sizes.
fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    let engine = QualityEngine::with_config(QualityConfig {
        dataset_penalties: true,
        ..QualityConfig::default()
    });

    for rows in [1_000, 10_000, 100_000] {
        let table = generate_table(rows);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| black_box(engine.analyze(table)))
        });
    }

    group.finish();
}

/// Benchmark individual passes to see which dominate.
fn bench_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("passes");
    let table = generate_table(50_000);
    let config = QualityConfig::default();

    group.bench_function("basic_stats", |b| b.iter(|| black_box(BasicStats::compute(&table))));
    group.bench_function("id_duplicates", |b| {
        b.iter(|| black_box(checks::id_duplicates(&table)))
    });
    group.bench_function("outliers", |b| {
        b.iter(|| black_box(checks::outliers(&table, &config)))
    });
    group.bench_function("imbalance", |b| {
        b.iter(|| black_box(checks::imbalanced_categories(&table, &config)))
    });
    group.bench_function("duplicate_rows", |b| {
        b.iter(|| black_box(table.duplicate_row_count()))
    });

    group.finish();
}

criterion_group!(benches, bench_full_analysis, bench_passes);
criterion_main!(benches);
