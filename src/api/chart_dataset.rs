use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CellRange, CellValue, ColumnId, ColumnRef};

use super::ExtractionIssue;

/// One row read from the grid.
///
/// Category values are already coerced to strings; field values are raw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRow {
    pub categories: IndexMap<ColumnId, String>,
    pub fields: IndexMap<ColumnId, CellValue>,
}

impl ExtractedRow {
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&str> {
        self.categories.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&CellValue> {
        self.fields.get(id)
    }
}

/// One aggregate record per distinct category tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedRow {
    pub categories: IndexMap<ColumnId, String>,
    /// Aggregate per field column.
    pub fields: IndexMap<ColumnId, CellValue>,
    /// Number of extracted rows folded into this group.
    pub child_count: usize,
}

impl GroupedRow {
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&str> {
        self.categories.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&CellValue> {
        self.fields.get(id)
    }
}

/// Rows of a dataset, either as read or grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ChartRows {
    Flat(Vec<ExtractedRow>),
    Grouped(Vec<GroupedRow>),
}

impl ChartRows {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(rows) => rows.len(),
            Self::Grouped(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    #[must_use]
    pub fn as_flat(&self) -> Option<&[ExtractedRow]> {
        match self {
            Self::Flat(rows) => Some(rows),
            Self::Grouped(_) => None,
        }
    }

    #[must_use]
    pub fn as_grouped(&self) -> Option<&[GroupedRow]> {
        match self {
            Self::Flat(_) => None,
            Self::Grouped(rows) => Some(rows),
        }
    }
}

impl Default for ChartRows {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

/// Tabular data ready for a chart.
///
/// `col_ids`, `col_display_names` and `field_cols` are positionally aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub cell_range: CellRange,
    pub col_ids: Vec<ColumnId>,
    pub col_display_names: Vec<String>,
    pub cols_mapped: IndexMap<ColumnId, ColumnRef>,
    pub field_cols: Vec<ColumnRef>,
    pub category_cols: Vec<ColumnRef>,
    pub rows: ChartRows,
}

/// Outcome of one extraction: the dataset plus advisory issues.
///
/// Issues never prevent a dataset from being produced; the caller decides
/// whether a dataset with issues is usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartExtraction {
    pub dataset: ChartDataset,
    pub issues: Vec<ExtractionIssue>,
}

impl ChartExtraction {
    /// Issues rendered as human-readable messages, in the order raised.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (ChartDataset, Vec<ExtractionIssue>) {
        (self.dataset, self.issues)
    }
}
