//! Findings and the aggregate quality report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The heuristic that produced a finding or a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCheck {
    ConstantColumn,
    HighCardinality,
    IdDuplicates,
    ManyZeros,
    MissingValues,
    Outliers,
    CategoryImbalance,
    DatasetMissing,
    DatasetDuplicates,
}

impl QualityCheck {
    /// Score points deducted per flagged column. Dataset-level checks carry a
    /// ratio-dependent penalty instead and report 0 here.
    pub fn column_penalty(&self) -> u32 {
        match self {
            QualityCheck::ConstantColumn => 10,
            QualityCheck::HighCardinality => 5,
            QualityCheck::IdDuplicates => 15,
            QualityCheck::ManyZeros => 8,
            QualityCheck::MissingValues => 0,
            QualityCheck::Outliers => 7,
            QualityCheck::CategoryImbalance => 6,
            QualityCheck::DatasetMissing | QualityCheck::DatasetDuplicates => 0,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            QualityCheck::ConstantColumn => "Constant column",
            QualityCheck::HighCardinality => "High cardinality",
            QualityCheck::IdDuplicates => "Duplicate identifiers",
            QualityCheck::ManyZeros => "Many zero values",
            QualityCheck::MissingValues => "Missing values",
            QualityCheck::Outliers => "Outliers",
            QualityCheck::CategoryImbalance => "Imbalanced categories",
            QualityCheck::DatasetMissing => "Dataset missing cells",
            QualityCheck::DatasetDuplicates => "Dataset duplicate rows",
        }
    }
}

/// Points deducted from the score by one finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub check: QualityCheck,
    /// Column the penalty is tied to; `None` for dataset-level penalties.
    pub column: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighCardinalityFinding {
    pub column: String,
    pub unique_count: usize,
    pub threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdDuplicateFinding {
    pub column: String,
    /// Cells equal to an earlier cell of the column.
    pub duplicate_count: usize,
    /// Cells in the column.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroFinding {
    pub column: String,
    pub zero_ratio: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingFinding {
    pub column: String,
    pub missing_count: usize,
    pub missing_ratio: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierFinding {
    pub column: String,
    pub outliers_count: usize,
    pub outliers_ratio: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// IQR multiplier used for the fences.
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceFinding {
    pub column: String,
    pub dominant_category: String,
    pub dominant_ratio: f64,
    pub threshold: f64,
    pub unique_categories: usize,
}

/// Result of running every quality check over a table.
///
/// All fields are always present; a check with no hits leaves its list empty
/// and its flag `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub row_count: usize,
    pub column_count: usize,
    /// Bounded score in `[0, 100]`; 100 means nothing was flagged.
    pub quality_score: u8,

    pub has_constant_columns: bool,
    pub has_high_cardinality: bool,
    pub has_id_duplicates: bool,
    pub has_many_zeros: bool,
    pub has_missing: bool,
    pub has_duplicates: bool,
    pub has_outliers: bool,
    pub has_imbalanced_categories: bool,

    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<HighCardinalityFinding>,
    pub duplicate_id_info: IndexMap<String, IdDuplicateFinding>,
    pub zero_columns: Vec<ZeroFinding>,
    pub columns_with_missing: Vec<MissingFinding>,
    pub outlier_columns: Vec<OutlierFinding>,
    pub imbalanced_columns: Vec<ImbalanceFinding>,

    /// Missing cells across the whole table.
    pub missing_count: usize,
    /// Rows equal to an earlier row.
    pub duplicate_count: usize,

    /// Every deduction applied to the score, in evaluation order.
    pub penalties: Vec<Penalty>,
}

impl QualityReport {
    /// Report for a table with nothing flagged.
    pub fn clean(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
            quality_score: 100,
            has_constant_columns: false,
            has_high_cardinality: false,
            has_id_duplicates: false,
            has_many_zeros: false,
            has_missing: false,
            has_duplicates: false,
            has_outliers: false,
            has_imbalanced_categories: false,
            constant_columns: Vec::new(),
            high_cardinality_columns: Vec::new(),
            duplicate_id_info: IndexMap::new(),
            zero_columns: Vec::new(),
            columns_with_missing: Vec::new(),
            outlier_columns: Vec::new(),
            imbalanced_columns: Vec::new(),
            missing_count: 0,
            duplicate_count: 0,
            penalties: Vec::new(),
        }
    }

    /// Names of the high-cardinality columns.
    pub fn high_cardinality_names(&self) -> Vec<&str> {
        self.high_cardinality_columns
            .iter()
            .map(|f| f.column.as_str())
            .collect()
    }

    /// Total points deducted before clamping.
    pub fn total_penalty(&self) -> u32 {
        self.penalties.iter().map(|p| p.points).sum()
    }

    /// Number of column-level findings that carry a penalty.
    pub fn finding_count(&self) -> usize {
        self.constant_columns.len()
            + self.high_cardinality_columns.len()
            + self.duplicate_id_info.len()
            + self.zero_columns.len()
            + self.outlier_columns.len()
            + self.imbalanced_columns.len()
    }
}
