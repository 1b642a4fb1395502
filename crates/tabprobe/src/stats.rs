//! Basic dataset statistics: shape and per-column kinds.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnKind, Table};

/// Name and inferred kind of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
}

/// Shape of a table and the kind of each of its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicStats {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
}

impl BasicStats {
    /// Compute basic statistics for a table.
    pub fn compute(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|c| ColumnSummary {
                name: c.name().to_string(),
                kind: c.kind(),
            })
            .collect();

        Self {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
        }
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns of the given kind.
    pub fn count_of(&self, kind: ColumnKind) -> usize {
        self.columns.iter().filter(|c| c.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn test_basic_stats() {
        let table = Table::new(vec![
            Column::numeric("id", vec![Some(1.0), Some(2.0)]),
            Column::categorical("name", vec![Some("a"), None]),
            Column::numeric("empty", vec![None, None]),
        ])
        .unwrap();

        let stats = BasicStats::compute(&table);

        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.column_count, 3);
        assert_eq!(stats.column_names(), vec!["id", "name", "empty"]);
        assert_eq!(stats.columns[0].kind, ColumnKind::Numeric);
        assert_eq!(stats.columns[1].kind, ColumnKind::Categorical);
        assert_eq!(stats.columns[2].kind, ColumnKind::Unknown);
        assert_eq!(stats.count_of(ColumnKind::Numeric), 1);
    }

    #[test]
    fn test_basic_stats_empty_table() {
        let stats = BasicStats::compute(&Table::empty());

        assert_eq!(stats.row_count, 0);
        assert_eq!(stats.column_count, 0);
        assert!(stats.columns.is_empty());
    }
}
