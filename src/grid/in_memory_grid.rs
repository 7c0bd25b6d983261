use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CellValue, ColumnId, ColumnRef};

use super::{ColumnModel, RowSource, ValueResolver};

/// One displayed row: a stable id plus its backing data keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowNode {
    pub id: String,
    pub data: IndexMap<String, CellValue>,
}

impl RowNode {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.data.insert(field.into(), value.into());
        self
    }
}

/// Headless grid holding columns and rows in memory.
///
/// Implements every read-only collaborator contract, so extraction can run
/// in tests, benches and hosts without a live grid.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGrid {
    columns: Vec<ColumnRef>,
    displayed: Vec<ColumnRef>,
    rows: Vec<RowNode>,
}

impl InMemoryGrid {
    /// Creates a grid; every column starts displayed.
    #[must_use]
    pub fn new(columns: Vec<ColumnRef>, rows: Vec<RowNode>) -> Self {
        Self {
            displayed: columns.clone(),
            columns,
            rows,
        }
    }

    /// Grid with no columns and `count` empty rows.
    #[must_use]
    pub fn with_row_count(count: usize) -> Self {
        let rows = (0..count).map(|i| RowNode::new(i.to_string())).collect();
        Self::new(Vec::new(), rows)
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    /// Keeps only rows matching `keep`, the way a grid filter shrinks the row model.
    pub fn retain_rows(&mut self, keep: impl FnMut(&RowNode) -> bool) {
        self.rows.retain(keep);
    }

    /// Shows or hides a column; displayed order follows column order.
    pub fn set_column_visible(&mut self, id: &ColumnId, visible: bool) {
        self.displayed = self
            .columns
            .iter()
            .filter(|column| {
                if column.id() == id {
                    visible
                } else {
                    self.displayed.contains(column)
                }
            })
            .cloned()
            .collect();
    }
}

impl ColumnModel for InMemoryGrid {
    fn all_displayed_columns(&self) -> &[ColumnRef] {
        &self.displayed
    }

    fn display_name_for(&self, column: &ColumnRef, _purpose: &str) -> Option<String> {
        let column = self
            .columns
            .iter()
            .find(|candidate| *candidate == column)
            .unwrap_or(column);
        match &column.header_name {
            Some(header_name) => Some(header_name.clone()),
            None => {
                let humanized = camel_case_to_human_text(column.data_key());
                (!humanized.is_empty()).then_some(humanized)
            }
        }
    }
}

impl RowSource for InMemoryGrid {
    type Row = RowNode;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_at(&self, index: usize) -> Option<&RowNode> {
        self.rows.get(index)
    }
}

impl ValueResolver<RowNode> for InMemoryGrid {
    fn value_of(&self, column: &ColumnRef, row: &RowNode) -> CellValue {
        row.data.get(column.data_key()).cloned().unwrap_or_default()
    }
}

/// `athleteAge` becomes `Athlete Age`.
fn camel_case_to_human_text(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for (i, ch) in key.chars().enumerate() {
        if ch == '_' || ch == '-' || ch == '.' {
            if !out.ends_with(' ') && !out.is_empty() {
                out.push(' ');
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            out.push(' ');
        }
        if i == 0 || out.ends_with(' ') {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
    }
    out.trim_end().to_owned()
}
