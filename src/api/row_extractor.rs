use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{CellRange, ColumnRef};
use crate::grid::{GridServices, RowSource};

use super::ExtractionIssue;
use super::chart_dataset::ExtractedRow;
use super::extraction_diagnostics::ExtractionDiagnostics;

/// Row span of a range after clamping to the live row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First row position read.
    pub start: usize,
    /// Number of rows read; zero when the span is empty or fully clipped.
    pub len: usize,
}

impl RowSpan {
    /// Clamps `[start, end]` to a row source holding `row_count` rows.
    ///
    /// Filtering can shrink the row model below the extent of a range, so
    /// the span never reaches past the last live row.
    #[must_use]
    pub fn clamp(start: usize, end: usize, row_count: usize) -> Self {
        let Some(model_last_row) = row_count.checked_sub(1) else {
            return Self { start, len: 0 };
        };
        let range_last_row = end.min(model_last_row);
        let len = if start > range_last_row {
            0
        } else {
            range_last_row - start + 1
        };
        Self { start, len }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    pub fn positions(self) -> impl Iterator<Item = usize> {
        self.start..self.start + self.len
    }
}

pub(crate) fn resolve_row_span<S: RowSource>(
    range: &CellRange,
    services: &GridServices<'_, S>,
) -> RowSpan {
    let start = services.ranges.start_row_of(range).row_index;
    let end = services.ranges.end_row_of(range).row_index;
    let row_count = services.rows.row_count();
    let span = RowSpan::clamp(start, end, row_count);
    debug!(
        start,
        end,
        row_count,
        rows_in_span = span.len,
        "resolved range row span"
    );
    span
}

pub(crate) fn extract_rows<S: RowSource>(
    range: &CellRange,
    services: &GridServices<'_, S>,
    category_cols: &[ColumnRef],
    field_cols: &[ColumnRef],
    diagnostics: &mut ExtractionDiagnostics,
) -> Vec<ExtractedRow> {
    let span = resolve_row_span(range, services);
    if span.is_empty() {
        diagnostics.add(ExtractionIssue::NoRows);
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(span.len);
    for position in span.positions() {
        let Some(row) = services.rows.row_at(position) else {
            warn!(position, "row source has no row inside the clamped span; skipping");
            continue;
        };

        let mut categories = IndexMap::with_capacity(category_cols.len());
        for col in category_cols {
            let value = services.values.value_of(col, row);
            categories.insert(col.id().clone(), value.to_category_string());
        }

        let mut fields = IndexMap::with_capacity(field_cols.len());
        for col in field_cols {
            fields.insert(col.id().clone(), services.values.value_of(col, row));
        }

        trace!(position, "extracted row");
        rows.push(ExtractedRow { categories, fields });
    }
    rows
}
