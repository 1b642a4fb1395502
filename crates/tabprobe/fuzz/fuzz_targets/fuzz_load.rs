//! Fuzz target for loading and analyzing arbitrary files.
//!
//! The loader may reject input, but anything it accepts must analyze
//! without panicking and score within bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;
use tabprobe::{Analyzer, Parser, Table};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(mut temp_file) = tempfile::NamedTempFile::new() else {
        return;
    };
    if temp_file.write_all(data).is_err() {
        return;
    }

    if let Ok((data_table, _)) = Parser::new().parse_file(temp_file.path()) {
        let table = Table::from_data_table(&data_table);
        let (stats, _, quality) = Analyzer::new().analyze_table(&table);

        assert_eq!(stats.row_count, table.row_count());
        assert!(quality.quality_score <= 100);
    }
});
