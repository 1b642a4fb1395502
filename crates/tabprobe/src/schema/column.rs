//! Typed column storage.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::types::{Cell, ColumnKind};
use crate::inference;

/// A named column whose cells all agree with its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Cell>,
}

impl Column {
    /// Build a column from raw string values, inferring its kind.
    pub fn from_raw<'a>(name: impl Into<String>, values: impl IntoIterator<Item = &'a str>) -> Self {
        let values: Vec<&str> = values.into_iter().collect();
        let kind = inference::infer_kind(&values);
        let cells = values
            .iter()
            .map(|v| inference::parse_cell(v, kind))
            .collect();

        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Build a numeric column; `None` marks a missing cell.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let kind = if values.iter().any(Option::is_some) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Unknown
        };
        let cells = values
            .into_iter()
            .map(|v| v.map(Cell::Number).unwrap_or(Cell::Missing))
            .collect();

        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Build a categorical column; `None` marks a missing cell.
    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let kind = if values.iter().any(Option::is_some) {
            ColumnKind::Categorical
        } else {
            ColumnKind::Unknown
        };
        let cells = values
            .into_iter()
            .map(|v| v.map(|s| Cell::Text(s.into())).unwrap_or(Cell::Missing))
            .collect();

        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, missing ones included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the column name marks it as an identifier.
    pub fn is_identifier_like(&self) -> bool {
        self.name.to_lowercase().contains("id")
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Number of distinct present values.
    pub fn distinct_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.is_missing())
            .map(Cell::key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of cells equal to an earlier cell of the column, where missing
    /// cells are equal to each other.
    pub fn duplicate_occurrences(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.cells.len());
        self.cells.iter().filter(|c| !seen.insert(c.key())).count()
    }

    /// Present numeric values in row order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(Cell::as_number)
    }

    /// Frequency of each present text value, in first-seen order.
    pub fn value_counts(&self) -> IndexMap<&str, usize> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in self.cells.iter().filter_map(Cell::as_text) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Text values sorted by descending frequency; ties keep first-seen order.
    pub fn top_values(&self, k: usize) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self.value_counts().into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(k);
        counts
    }
}
