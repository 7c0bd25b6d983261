use serde::{Deserialize, Serialize};

use super::column::ColumnRef;

/// Position of a row within the grid's displayed row model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowPosition {
    pub row_index: usize,
}

impl RowPosition {
    #[must_use]
    pub fn new(row_index: usize) -> Self {
        Self { row_index }
    }
}

/// Rectangular cell selection: ordered columns plus a row span.
///
/// Either end of the span may be omitted; the range resolver then falls back
/// to the first or last row of the row source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    pub columns: Vec<ColumnRef>,
    #[serde(default)]
    pub start_row: Option<RowPosition>,
    #[serde(default)]
    pub end_row: Option<RowPosition>,
}

impl CellRange {
    #[must_use]
    pub fn new(columns: Vec<ColumnRef>) -> Self {
        Self {
            columns,
            start_row: None,
            end_row: None,
        }
    }

    /// Sets both ends of the row span, in selection order.
    #[must_use]
    pub fn with_rows(mut self, start_row: usize, end_row: usize) -> Self {
        self.start_row = Some(RowPosition::new(start_row));
        self.end_row = Some(RowPosition::new(end_row));
        self
    }
}
