use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ColumnId, ColumnRef};
use crate::grid::ColumnModel;

use super::ExtractionIssue;
use super::extraction_diagnostics::ExtractionDiagnostics;

/// Field (value) columns of a range plus their aligned chart metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldColumns {
    pub cols: Vec<ColumnRef>,
    pub col_ids: Vec<ColumnId>,
    pub col_display_names: Vec<String>,
    pub cols_mapped: IndexMap<ColumnId, ColumnRef>,
}

/// Range columns that may be charted as values and are still displayed.
///
/// Columns that left the displayed set (for example after toggling pivot
/// mode) are dropped. Range order is kept.
#[must_use]
pub fn select_field_columns(range_cols: &[ColumnRef], displayed: &[ColumnRef]) -> Vec<ColumnRef> {
    range_cols
        .iter()
        .filter(|col| col.is_value() && displayed.contains(col))
        .cloned()
        .collect()
}

/// Dimension columns used as chart categories.
///
/// Every displayed dimension in the range is taken, in range order. When the
/// range holds none, only the first displayed dimension of the whole grid is
/// taken.
#[must_use]
pub fn select_category_columns(
    range_cols: &[ColumnRef],
    displayed: &[ColumnRef],
) -> Vec<ColumnRef> {
    let is_dimension = |col: &ColumnRef| col.is_dimension() && displayed.contains(col);

    let from_range: Vec<ColumnRef> = range_cols
        .iter()
        .filter(|col| is_dimension(*col))
        .cloned()
        .collect();
    if !from_range.is_empty() {
        return from_range;
    }

    displayed
        .iter()
        .find(|col| is_dimension(*col))
        .cloned()
        .into_iter()
        .collect()
}

pub(crate) fn classify_field_columns(
    range_cols: &[ColumnRef],
    columns: &dyn ColumnModel,
    display_name_purpose: &str,
    diagnostics: &mut ExtractionDiagnostics,
) -> FieldColumns {
    let cols = select_field_columns(range_cols, columns.all_displayed_columns());
    if cols.is_empty() {
        diagnostics.add(ExtractionIssue::NoValueColumns);
    }

    let mut fields = FieldColumns {
        col_ids: Vec::with_capacity(cols.len()),
        col_display_names: Vec::with_capacity(cols.len()),
        cols_mapped: IndexMap::with_capacity(cols.len()),
        cols: Vec::new(),
    };
    for col in &cols {
        let display_name = columns
            .display_name_for(col, display_name_purpose)
            .unwrap_or_default();
        fields.col_ids.push(col.id().clone());
        fields.col_display_names.push(display_name);
        fields.cols_mapped.insert(col.id().clone(), col.clone());
    }
    fields.cols = cols;

    debug!(
        range_columns = range_cols.len(),
        field_columns = fields.cols.len(),
        "classified field columns"
    );
    fields
}

pub(crate) fn classify_category_columns(
    range_cols: &[ColumnRef],
    columns: &dyn ColumnModel,
) -> Vec<ColumnRef> {
    let category_cols = select_category_columns(range_cols, columns.all_displayed_columns());
    debug!(
        category_columns = category_cols.len(),
        "classified category columns"
    );
    category_cols
}
