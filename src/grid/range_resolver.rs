use crate::core::{CellRange, RowPosition};

use super::{RangeResolver, RowSource};

/// Resolves range rows against a row source.
///
/// A missing start resolves to the first row and a missing end to the last
/// row. Ends are ordered, so a range dragged upward covers the same span as
/// one dragged downward.
#[derive(Debug)]
pub struct GridRangeResolver<'a, S: RowSource> {
    rows: &'a S,
}

impl<'a, S: RowSource> GridRangeResolver<'a, S> {
    #[must_use]
    pub fn new(rows: &'a S) -> Self {
        Self { rows }
    }

    fn last_row(&self) -> RowPosition {
        RowPosition::new(self.rows.row_count().saturating_sub(1))
    }

    fn ends(&self, range: &CellRange) -> (RowPosition, RowPosition) {
        let start = range.start_row.unwrap_or(RowPosition::new(0));
        let end = range.end_row.unwrap_or_else(|| self.last_row());
        if end < start { (end, start) } else { (start, end) }
    }
}

impl<S: RowSource> RangeResolver for GridRangeResolver<'_, S> {
    fn start_row_of(&self, range: &CellRange) -> RowPosition {
        self.ends(range).0
    }

    fn end_row_of(&self, range: &CellRange) -> RowPosition {
        self.ends(range).1
    }
}
