mod in_memory_grid;
mod range_resolver;

pub use in_memory_grid::{InMemoryGrid, RowNode};
pub use range_resolver::GridRangeResolver;

pub use crate::core::Aggregator;
use crate::core::{CellRange, CellValue, ColumnRef, RowPosition};

/// Read access to the host grid's column model.
pub trait ColumnModel {
    /// Displayed columns in display order.
    fn all_displayed_columns(&self) -> &[ColumnRef];

    /// Display name of `column` for the given purpose (for example `"chart"`).
    fn display_name_for(&self, column: &ColumnRef, purpose: &str) -> Option<String>;
}

/// Read access to the rows currently displayed after filtering and sorting.
pub trait RowSource {
    type Row;

    fn row_count(&self) -> usize;

    fn row_at(&self, index: usize) -> Option<&Self::Row>;
}

/// Resolves the value a column shows for one row.
pub trait ValueResolver<Row: ?Sized> {
    fn value_of(&self, column: &ColumnRef, row: &Row) -> CellValue;
}

/// Resolves the nominal first and last row of a cell range.
pub trait RangeResolver {
    fn start_row_of(&self, range: &CellRange) -> RowPosition;

    fn end_row_of(&self, range: &CellRange) -> RowPosition;
}

/// Collaborators one extraction reads from.
///
/// Everything is borrowed immutably; extraction never mutates grid state.
pub struct GridServices<'g, S: RowSource> {
    pub columns: &'g dyn ColumnModel,
    pub rows: &'g S,
    pub values: &'g dyn ValueResolver<S::Row>,
    pub ranges: &'g dyn RangeResolver,
    pub aggregator: &'g dyn Aggregator,
}

impl<'g, S: RowSource> GridServices<'g, S> {
    #[must_use]
    pub fn new(
        columns: &'g dyn ColumnModel,
        rows: &'g S,
        values: &'g dyn ValueResolver<S::Row>,
        ranges: &'g dyn RangeResolver,
        aggregator: &'g dyn Aggregator,
    ) -> Self {
        Self {
            columns,
            rows,
            values,
            ranges,
            aggregator,
        }
    }
}

impl<S: RowSource> Clone for GridServices<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: RowSource> Copy for GridServices<'_, S> {}
