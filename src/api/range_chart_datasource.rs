use tracing::{debug, debug_span};

use crate::core::{AggFunc, CellRange};
use crate::error::ChartDataResult;
use crate::grid::{GridServices, RowSource};

use super::category_grouping::group_rows_by_category;
use super::column_classifier::{classify_category_columns, classify_field_columns};
use super::extraction_diagnostics::ExtractionDiagnostics;
use super::row_extractor::extract_rows;
use super::{ChartDataset, ChartExtraction, ExtractionIssue, RangeChartConfig};

/// Source of chart data that reports issues of its latest extraction.
pub trait ChartDatasource {
    fn chart_data(&mut self) -> ChartDataset;

    fn errors(&self) -> &[ExtractionIssue];
}

/// Extracts chart data for one cell range from a grid.
///
/// Holds no state between extractions apart from the issues of the latest
/// run, which [`ChartDatasource::errors`] exposes.
pub struct RangeChartDatasource<'g, S: RowSource> {
    services: GridServices<'g, S>,
    cell_range: CellRange,
    agg_func: Option<AggFunc>,
    config: RangeChartConfig,
    last_issues: Vec<ExtractionIssue>,
}

impl<'g, S: RowSource> RangeChartDatasource<'g, S> {
    #[must_use]
    pub fn new(
        services: GridServices<'g, S>,
        cell_range: CellRange,
        agg_func: Option<AggFunc>,
    ) -> Self {
        Self {
            services,
            cell_range,
            agg_func,
            config: RangeChartConfig::default(),
            last_issues: Vec::new(),
        }
    }

    /// Replaces the extraction settings after validating them.
    pub fn with_config(mut self, config: RangeChartConfig) -> ChartDataResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    #[must_use]
    pub fn cell_range(&self) -> &CellRange {
        &self.cell_range
    }

    #[must_use]
    pub fn agg_func(&self) -> Option<&AggFunc> {
        self.agg_func.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &RangeChartConfig {
        &self.config
    }

    /// Runs the full extraction against the current grid state.
    #[must_use]
    pub fn extract(&self) -> ChartExtraction {
        extract(
            &self.cell_range,
            self.agg_func.as_ref(),
            self.services,
            &self.config,
        )
    }
}

impl<S: RowSource> ChartDatasource for RangeChartDatasource<'_, S> {
    fn chart_data(&mut self) -> ChartDataset {
        let (dataset, issues) = self.extract().into_parts();
        self.last_issues = issues;
        dataset
    }

    fn errors(&self) -> &[ExtractionIssue] {
        &self.last_issues
    }
}

/// Classifies columns, reads the range rows and groups them by category.
///
/// Never fails: conditions that make the dataset unusable are reported as
/// issues next to a best-effort, possibly empty, dataset.
#[must_use]
pub fn extract<S: RowSource>(
    cell_range: &CellRange,
    agg_func: Option<&AggFunc>,
    services: GridServices<'_, S>,
    config: &RangeChartConfig,
) -> ChartExtraction {
    let span = debug_span!("range_chart_extract", range_columns = cell_range.columns.len());
    let _entered = span.enter();

    let mut diagnostics = ExtractionDiagnostics::default();

    let fields = classify_field_columns(
        &cell_range.columns,
        services.columns,
        &config.display_name_purpose,
        &mut diagnostics,
    );
    let category_cols = classify_category_columns(&cell_range.columns, services.columns);

    let rows = extract_rows(
        cell_range,
        &services,
        &category_cols,
        &fields.cols,
        &mut diagnostics,
    );
    let rows = group_rows_by_category(
        rows,
        &category_cols,
        &fields.cols,
        agg_func,
        services.aggregator,
        &config.group_agg_func,
    );

    let issues = diagnostics.into_issues();
    debug!(
        field_columns = fields.cols.len(),
        category_columns = category_cols.len(),
        rows = rows.len(),
        grouped = rows.is_grouped(),
        issues = issues.len(),
        "chart extraction finished"
    );

    ChartExtraction {
        dataset: ChartDataset {
            cell_range: cell_range.clone(),
            col_ids: fields.col_ids,
            col_display_names: fields.col_display_names,
            cols_mapped: fields.cols_mapped,
            field_cols: fields.cols,
            category_cols,
            rows,
        },
        issues,
    }
}
