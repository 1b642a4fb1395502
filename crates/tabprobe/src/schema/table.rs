//! In-memory table of typed columns.

use std::collections::HashSet;

use super::column::Column;
use super::types::CellKey;
use crate::error::{Result, TabprobeError};
use crate::input::DataTable;

/// An immutable table: ordered named columns sharing one row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a table from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        if let Some(column) = columns.iter().find(|c| c.len() != row_count) {
            return Err(TabprobeError::Shape(format!(
                "column '{}' has {} rows, expected {}",
                column.name(),
                column.len(),
                row_count
            )));
        }

        Ok(Self { columns, row_count })
    }

    /// A table with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a typed table from parsed string data, inferring each column's
    /// kind once.
    pub fn from_data_table(data: &DataTable) -> Self {
        let columns = data
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| Column::from_raw(name.clone(), data.column_values(idx)))
            .collect();

        Self {
            columns,
            row_count: data.row_count(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Total number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Number of rows equal in every cell to an earlier row.
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(self.row_count);
        (0..self.row_count)
            .filter(|&row| {
                let key: Vec<CellKey<'_>> = self
                    .columns
                    .iter()
                    .map(|c| c.cells()[row].key())
                    .collect();
                !seen.insert(key)
            })
            .count()
    }
}
