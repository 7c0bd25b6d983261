use range_chart::api::{
    ChartDatasource, ChartExtraction, ChartRows, ExtractionIssue, RangeChartConfig,
    RangeChartDatasource, extract,
};
use range_chart::ChartDataError;
use range_chart::core::{
    AggFunc, AggFuncRegistry, CellRange, CellValue, ColumnCapabilities, ColumnId, ColumnRef,
};
use range_chart::grid::{GridRangeResolver, GridServices, InMemoryGrid, RowNode, RowSource};

fn country() -> ColumnRef {
    ColumnRef::row_group("country").with_header_name("Country")
}

fn sport() -> ColumnRef {
    ColumnRef::row_group("sport")
}

fn athlete() -> ColumnRef {
    ColumnRef::new("athlete")
}

fn gold() -> ColumnRef {
    ColumnRef::value("gold").with_header_name("Gold")
}

fn silver() -> ColumnRef {
    ColumnRef::value("silver")
}

fn medal_row(
    id: usize,
    athlete: &str,
    country: &str,
    sport: &str,
    gold: f64,
    silver: f64,
) -> RowNode {
    RowNode::new(id.to_string())
        .with_value("athlete", athlete)
        .with_value("country", country)
        .with_value("sport", sport)
        .with_value("gold", gold)
        .with_value("silver", silver)
}

fn grid() -> InMemoryGrid {
    InMemoryGrid::new(
        vec![athlete(), country(), sport(), gold(), silver()],
        vec![
            medal_row(0, "Phelps", "US", "Swimming", 8.0, 0.0),
            medal_row(1, "Coughlin", "US", "Swimming", 1.0, 2.0),
            medal_row(2, "Hoy", "UK", "Cycling", 3.0, 0.0),
            medal_row(3, "Adlington", "UK", "Swimming", 2.0, 0.0),
            medal_row(4, "Lochte", "US", "Swimming", 2.0, 2.0),
        ],
    )
}

fn extract_from(
    grid: &InMemoryGrid,
    range: &CellRange,
    agg_func: Option<&AggFunc>,
    config: &RangeChartConfig,
) -> ChartExtraction {
    let ranges = GridRangeResolver::new(grid);
    let aggregator = AggFuncRegistry::new();
    let services = GridServices::new(grid, grid, grid, &ranges, &aggregator);
    extract(range, agg_func, services, config)
}

fn sum() -> AggFunc {
    AggFunc::named("sum")
}

#[test]
fn groups_rows_by_category_and_sums_each_group() {
    let grid = InMemoryGrid::new(
        vec![ColumnRef::row_group("colA"), ColumnRef::value("colB")],
        vec![
            RowNode::new("0").with_value("colA", "x").with_value("colB", 1.0),
            RowNode::new("1").with_value("colA", "x").with_value("colB", 2.0),
            RowNode::new("2").with_value("colA", "y").with_value("colB", 10.0),
            RowNode::new("3").with_value("colA", "y").with_value("colB", 20.0),
        ],
    );
    let range = CellRange::new(grid.columns().to_vec()).with_rows(0, 3);

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    assert!(extraction.issues.is_empty());
    let groups = extraction.dataset.rows.as_grouped().expect("grouped rows");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category("colA"), Some("x"));
    assert_eq!(groups[0].field("colB"), Some(&CellValue::number(3.0)));
    assert_eq!(groups[0].child_count, 2);
    assert_eq!(groups[1].category("colA"), Some("y"));
    assert_eq!(groups[1].field("colB"), Some(&CellValue::number(30.0)));
    assert_eq!(groups[1].child_count, 2);
}

#[test]
fn range_without_value_column_reports_issue_and_empty_fields() {
    let grid = grid();
    let range = CellRange::new(vec![athlete(), country()]).with_rows(0, 4);

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    assert!(extraction.dataset.field_cols.is_empty());
    assert!(extraction.dataset.col_ids.is_empty());
    assert!(extraction.dataset.cols_mapped.is_empty());
    assert_eq!(extraction.issues, [ExtractionIssue::NoValueColumns]);
    assert_eq!(
        extraction.error_messages(),
        ["No value column in selected range."]
    );
}

#[test]
fn range_past_filtered_rows_yields_no_rows_issue() {
    let mut grid = grid();
    grid.retain_rows(|row| row.id.parse::<usize>().is_ok_and(|id| id < 3));
    let range = CellRange::new(vec![country(), gold()]).with_rows(5, 10);

    let extraction = extract_from(&grid, &range, None, &RangeChartConfig::default());

    assert_eq!(extraction.issues, [ExtractionIssue::NoRows]);
    assert!(
        extraction
            .error_messages()
            .contains(&"No rows in selected range.".to_owned())
    );
    assert_eq!(extraction.dataset.rows, ChartRows::Flat(Vec::new()));
}

#[test]
fn range_end_is_clamped_to_live_rows() {
    let mut grid = grid();
    grid.retain_rows(|row| row.data.get("country") == Some(&CellValue::text("US")));
    let range = CellRange::new(vec![athlete(), gold()]).with_rows(1, 4);

    let extraction = extract_from(&grid, &range, None, &RangeChartConfig::default());

    assert!(extraction.issues.is_empty());
    let rows = extraction.dataset.rows.as_flat().expect("flat rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].field("gold"), Some(&CellValue::number(1.0)));
    assert_eq!(rows[1].field("gold"), Some(&CellValue::number(2.0)));
}

#[test]
fn missing_aggregation_directive_keeps_flat_rows() {
    let grid = grid();
    let range = CellRange::new(vec![country(), gold()]).with_rows(0, 4);

    let extraction = extract_from(&grid, &range, None, &RangeChartConfig::default());

    assert!(!extraction.dataset.rows.is_grouped());
    let rows = extraction.dataset.rows.as_flat().expect("flat rows");
    assert_eq!(rows.len(), 5);
    let countries: Vec<_> = rows.iter().filter_map(|row| row.category("country")).collect();
    assert_eq!(countries, ["US", "US", "UK", "UK", "US"]);
    assert_eq!(rows[0].field("gold"), Some(&CellValue::number(8.0)));
}

#[test]
fn fallback_takes_only_first_displayed_dimension() {
    let grid = grid();
    let range = CellRange::new(vec![athlete(), gold()]).with_rows(0, 4);

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    let category_ids: Vec<_> = extraction
        .dataset
        .category_cols
        .iter()
        .map(|col| col.id().as_str())
        .collect();
    assert_eq!(category_ids, ["country"]);
    let groups = extraction.dataset.rows.as_grouped().expect("grouped rows");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].field("gold"), Some(&CellValue::number(11.0)));
    assert_eq!(groups[1].field("gold"), Some(&CellValue::number(5.0)));
}

#[test]
fn multi_level_grouping_keeps_first_seen_order() {
    let grid = grid();
    let range = CellRange::new(vec![sport(), country(), gold(), silver()]).with_rows(0, 4);

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    let groups = extraction.dataset.rows.as_grouped().expect("grouped rows");
    let keys: Vec<(&str, &str)> = groups
        .iter()
        .map(|group| {
            (
                group.category("sport").unwrap_or_default(),
                group.category("country").unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        [("Swimming", "US"), ("Cycling", "UK"), ("Swimming", "UK")]
    );
    assert_eq!(groups[0].child_count, 3);
    assert_eq!(groups[0].field("gold"), Some(&CellValue::number(11.0)));
    assert_eq!(groups[0].field("silver"), Some(&CellValue::number(4.0)));
    let children: usize = groups.iter().map(|group| group.child_count).sum();
    assert_eq!(children, 5);
}

#[test]
fn field_metadata_is_aligned_with_range_order() {
    let grid = grid();
    let range = CellRange::new(vec![silver(), country(), gold()]).with_rows(0, 1);

    let dataset = extract_from(&grid, &range, None, &RangeChartConfig::default()).dataset;

    assert_eq!(
        dataset.col_ids,
        [ColumnId::new("silver"), ColumnId::new("gold")]
    );
    assert_eq!(dataset.col_display_names, ["Silver", "Gold"]);
    assert_eq!(dataset.cols_mapped.len(), 2);
    for (id, field_col) in dataset.col_ids.iter().zip(&dataset.field_cols) {
        assert_eq!(field_col.id(), id);
        assert_eq!(dataset.cols_mapped.get(id), Some(field_col));
    }
    assert_eq!(dataset.cell_range, range);
}

#[test]
fn hidden_value_column_is_not_charted() {
    let mut grid = grid();
    grid.set_column_visible(&ColumnId::new("silver"), false);
    let range = CellRange::new(vec![country(), gold(), silver()]).with_rows(0, 4);

    let dataset = extract_from(&grid, &range, None, &RangeChartConfig::default()).dataset;

    assert_eq!(dataset.col_ids, [ColumnId::new("gold")]);
    let rows = dataset.rows.as_flat().expect("flat rows");
    assert!(rows.iter().all(|row| row.field("silver").is_none()));
}

#[test]
fn category_values_are_coerced_to_strings() {
    let year = ColumnRef::new("year").with_capabilities(ColumnCapabilities::pivot());
    let grid = InMemoryGrid::new(
        vec![year.clone(), gold()],
        vec![
            RowNode::new("0").with_value("year", 2008.0).with_value("gold", 1.0),
            RowNode::new("1").with_value("gold", 2.0),
            RowNode::new("2")
                .with_value("year", CellValue::Json(serde_json::json!({"nested": true})))
                .with_value("gold", 3.0),
        ],
    );
    let range = CellRange::new(vec![year, gold()]).with_rows(0, 2);

    let extraction = extract_from(&grid, &range, None, &RangeChartConfig::default());

    let rows = extraction.dataset.rows.as_flat().expect("flat rows");
    let years: Vec<_> = rows.iter().filter_map(|row| row.category("year")).collect();
    assert_eq!(years, ["2008", "", ""]);
}

#[test]
fn absent_and_non_numeric_values_sum_without_failing() {
    let grid = InMemoryGrid::new(
        vec![country(), gold()],
        vec![
            RowNode::new("0").with_value("country", "US").with_value("gold", "n/a"),
            RowNode::new("1").with_value("country", "US"),
            RowNode::new("2").with_value("country", "UK").with_value("gold", 4.0),
        ],
    );
    let range = CellRange::new(vec![country(), gold()]).with_rows(0, 2);

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    let groups = extraction.dataset.rows.as_grouped().expect("grouped rows");
    assert_eq!(groups[0].field("gold"), Some(&CellValue::Empty));
    assert_eq!(groups[1].field("gold"), Some(&CellValue::number(4.0)));
}

#[test]
fn directive_gates_grouping_but_configured_function_is_applied() {
    let grid = grid();
    let range = CellRange::new(vec![country(), gold()]).with_rows(0, 4);
    let max_directive = AggFunc::named("max");

    let default_config = extract_from(
        &grid,
        &range,
        Some(&max_directive),
        &RangeChartConfig::default(),
    );
    let groups = default_config.dataset.rows.as_grouped().expect("grouped rows");
    assert_eq!(groups[0].field("gold"), Some(&CellValue::number(11.0)));

    let custom_directive = AggFunc::custom(|_| CellValue::text("ignored"));
    let max_config = RangeChartConfig::default().with_group_agg_func("max");
    let overridden = extract_from(&grid, &range, Some(&custom_directive), &max_config);
    let groups = overridden.dataset.rows.as_grouped().expect("grouped rows");
    assert_eq!(groups[0].field("gold"), Some(&CellValue::number(8.0)));
    assert_eq!(groups[1].field("gold"), Some(&CellValue::number(3.0)));
}

#[test]
fn upward_selection_covers_same_rows() {
    let grid = grid();
    let down = CellRange::new(vec![athlete(), gold()]).with_rows(1, 3);
    let up = CellRange::new(vec![athlete(), gold()]).with_rows(3, 1);

    let down = extract_from(&grid, &down, None, &RangeChartConfig::default());
    let up = extract_from(&grid, &up, None, &RangeChartConfig::default());

    assert_eq!(down.dataset.rows, up.dataset.rows);
    assert_eq!(up.dataset.rows.len(), 3);
}

#[test]
fn empty_grid_reports_both_issues_in_order() {
    let grid = InMemoryGrid::default();
    let range = CellRange::new(Vec::new());

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    assert_eq!(
        extraction.issues,
        [ExtractionIssue::NoValueColumns, ExtractionIssue::NoRows]
    );
    assert!(extraction.dataset.rows.is_empty());
}

#[test]
fn datasource_exposes_issues_of_latest_extraction() {
    let grid = grid();
    let ranges = GridRangeResolver::new(&grid);
    let aggregator = AggFuncRegistry::new();
    let services = GridServices::new(&grid, &grid, &grid, &ranges, &aggregator);

    let mut without_values = RangeChartDatasource::new(
        services,
        CellRange::new(vec![country()]).with_rows(0, 4),
        Some(sum()),
    );
    assert!(without_values.errors().is_empty());
    let dataset = without_values.chart_data();
    assert!(dataset.field_cols.is_empty());
    assert_eq!(without_values.errors(), [ExtractionIssue::NoValueColumns]);

    let mut charted = RangeChartDatasource::new(
        services,
        CellRange::new(vec![country(), gold()]).with_rows(0, 4),
        Some(sum()),
    )
    .with_config(RangeChartConfig::default().with_display_name_purpose("chart"))
    .expect("valid config");
    let dataset = charted.chart_data();
    assert!(charted.errors().is_empty());
    assert_eq!(dataset.rows.len(), 2);
    assert_eq!(charted.extract().dataset, dataset);
}

#[test]
fn datasource_rejects_blank_group_agg_func() {
    let grid = grid();
    let ranges = GridRangeResolver::new(&grid);
    let aggregator = AggFuncRegistry::new();
    let services = GridServices::new(&grid, &grid, &grid, &ranges, &aggregator);

    let result = RangeChartDatasource::new(
        services,
        CellRange::new(vec![country(), gold()]).with_rows(0, 4),
        Some(sum()),
    )
    .with_config(RangeChartConfig::default().with_group_agg_func("  "));

    assert!(matches!(result, Err(ChartDataError::InvalidConfig(_))));
}

#[test]
fn huge_range_start_yields_no_rows_issue() {
    let grid = grid();
    let start = 1_usize << 63;
    let range = CellRange::new(vec![country(), gold()]).with_rows(start, start + 5);

    let extraction = extract_from(&grid, &range, Some(&sum()), &RangeChartConfig::default());

    assert_eq!(extraction.issues, [ExtractionIssue::NoRows]);
    assert!(extraction.dataset.rows.is_empty());
}

#[test]
fn unbounded_range_end_reads_every_live_row() {
    let grid = grid();
    let range = CellRange::new(vec![athlete(), gold()]).with_rows(0, usize::MAX);

    let extraction = extract_from(&grid, &range, None, &RangeChartConfig::default());

    assert!(extraction.issues.is_empty());
    assert_eq!(extraction.dataset.rows.len(), 5);
}

/// Row source that reports a full row count but has a hole at one position.
struct SparseRows {
    rows: Vec<RowNode>,
    missing: usize,
}

impl RowSource for SparseRows {
    type Row = RowNode;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_at(&self, index: usize) -> Option<&RowNode> {
        if index == self.missing {
            return None;
        }
        self.rows.get(index)
    }
}

#[test]
fn absent_row_inside_span_is_skipped_without_issue() {
    let grid = grid();
    let rows = SparseRows {
        rows: (0..grid.row_count())
            .filter_map(|position| grid.row_at(position).cloned())
            .collect(),
        missing: 2,
    };
    let ranges = GridRangeResolver::new(&rows);
    let aggregator = AggFuncRegistry::new();
    let services = GridServices::new(&grid, &rows, &grid, &ranges, &aggregator);
    let range = CellRange::new(vec![country(), gold()]).with_rows(0, 4);

    let extraction = extract(&range, Some(&sum()), services, &RangeChartConfig::default());

    assert!(extraction.issues.is_empty());
    let groups = extraction.dataset.rows.as_grouped().expect("grouped rows");
    let produced: usize = groups.iter().map(|group| group.child_count).sum();
    assert_eq!(produced, 4);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category("country"), Some("US"));
    assert_eq!(groups[0].child_count, 3);
    assert_eq!(groups[0].field("gold"), Some(&CellValue::number(11.0)));
    // Hoy (UK, 3 gold) sits at the missing position.
    assert_eq!(groups[1].category("country"), Some("UK"));
    assert_eq!(groups[1].child_count, 1);
    assert_eq!(groups[1].field("gold"), Some(&CellValue::number(2.0)));
}
