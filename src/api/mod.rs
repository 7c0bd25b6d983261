mod category_grouping;
mod chart_dataset;
mod column_classifier;
mod extraction_diagnostics;
mod json_contract;
mod range_chart_config;
mod range_chart_datasource;
mod row_extractor;

pub use category_grouping::group_rows_by_category;
pub use chart_dataset::{ChartDataset, ChartExtraction, ChartRows, ExtractedRow, GroupedRow};
pub use column_classifier::{FieldColumns, select_category_columns, select_field_columns};
pub use extraction_diagnostics::ExtractionIssue;
pub use json_contract::{CHART_DATASET_JSON_SCHEMA_V1, ChartDatasetJsonContractV1};
pub use range_chart_config::RangeChartConfig;
pub use range_chart_datasource::{ChartDatasource, RangeChartDatasource, extract};
pub use row_extractor::RowSpan;
