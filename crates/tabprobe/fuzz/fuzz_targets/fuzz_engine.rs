//! Fuzz target for the quality engine over generated tables and thresholds.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabprobe::{Column, QualityConfig, QualityEngine, Table};

#[derive(Debug, Arbitrary)]
enum FuzzColumn {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    rows: u8,
    columns: Vec<FuzzColumn>,
    high_cardinality_threshold: u8,
    zero_threshold: f64,
    min_missing_share: f64,
    outlier_threshold: f64,
    imbalance_threshold: f64,
    dataset_penalties: bool,
}

fuzz_target!(|input: FuzzInput| {
    let rows = usize::from(input.rows);
    let columns = input
        .columns
        .into_iter()
        .take(16)
        .enumerate()
        .map(|(i, column)| match column {
            FuzzColumn::Numeric(mut cells) => {
                // The loader never produces NaN.
                for cell in cells.iter_mut() {
                    if cell.is_some_and(f64::is_nan) {
                        *cell = None;
                    }
                }
                cells.resize(rows, None);
                Column::numeric(format!("id_{}", i), cells)
            }
            FuzzColumn::Text(mut cells) => {
                cells.resize(rows, None);
                Column::categorical(format!("col_{}", i), cells)
            }
        })
        .collect();
    let Ok(table) = Table::new(columns) else {
        return;
    };

    let config = QualityConfig {
        high_cardinality_threshold: usize::from(input.high_cardinality_threshold),
        zero_threshold: input.zero_threshold,
        min_missing_share: input.min_missing_share,
        outlier_threshold: input.outlier_threshold,
        imbalance_threshold: input.imbalance_threshold,
        dataset_penalties: input.dataset_penalties,
    };
    if config.validate().is_err() {
        return;
    }

    let report = QualityEngine::with_config(config).analyze(&table);
    assert!(report.quality_score <= 100);
    assert_eq!(report.row_count, table.row_count());
});
