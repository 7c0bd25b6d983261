use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{AggFunc, Aggregator, CellValue, ColumnId, ColumnRef};

use super::chart_dataset::{ChartRows, ExtractedRow, GroupedRow};

/// Ordered category values identifying one group.
type GroupKey = SmallVec<[String; 4]>;

struct GroupBuilder {
    categories: IndexMap<ColumnId, String>,
    children: Vec<ExtractedRow>,
}

/// Groups rows by their category tuple and aggregates every field column.
///
/// Grouping happens only when there is at least one category column and an
/// aggregation directive is present; otherwise the rows are returned as
/// flat rows unchanged. Groups keep the order in which their tuple was first
/// seen. Each field is aggregated with `group_agg_func`, whatever function the
/// directive names.
#[must_use]
pub fn group_rows_by_category(
    rows: Vec<ExtractedRow>,
    category_cols: &[ColumnRef],
    field_cols: &[ColumnRef],
    agg_func: Option<&AggFunc>,
    aggregator: &dyn Aggregator,
    group_agg_func: &str,
) -> ChartRows {
    if category_cols.is_empty() || agg_func.is_none() {
        debug!(rows = rows.len(), "category grouping skipped");
        return ChartRows::Flat(rows);
    }

    let input_rows = rows.len();
    let mut groups: IndexMap<GroupKey, GroupBuilder> = IndexMap::new();
    for row in rows {
        let key: GroupKey = category_cols
            .iter()
            .map(|col| row.category(col.id().as_str()).unwrap_or_default().to_owned())
            .collect();
        groups
            .entry(key)
            .or_insert_with(|| GroupBuilder {
                categories: row.categories.clone(),
                children: Vec::new(),
            })
            .children
            .push(row);
    }

    let grouped: Vec<GroupedRow> = groups
        .into_values()
        .map(|group| aggregate_group(group, field_cols, aggregator, group_agg_func))
        .collect();

    debug!(
        input_rows,
        groups = grouped.len(),
        agg_func = group_agg_func,
        "grouped rows by category"
    );
    ChartRows::Grouped(grouped)
}

fn aggregate_group(
    group: GroupBuilder,
    field_cols: &[ColumnRef],
    aggregator: &dyn Aggregator,
    group_agg_func: &str,
) -> GroupedRow {
    let mut fields = IndexMap::with_capacity(field_cols.len());
    for col in field_cols {
        let values: Vec<CellValue> = group
            .children
            .iter()
            .map(|child| child.field(col.id().as_str()).cloned().unwrap_or_default())
            .collect();
        fields.insert(
            col.id().clone(),
            aggregator.aggregate(&values, group_agg_func),
        );
    }
    GroupedRow {
        categories: group.categories,
        fields,
        child_count: group.children.len(),
    }
}
