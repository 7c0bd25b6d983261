//! range-chart: chart datasets from a grid's selected cell range.
//!
//! Extraction reads the host grid through narrow read-only contracts
//! (`grid`), classifies range columns into categories and values, reads the
//! rows of the range and, when asked to aggregate, groups them by category.

pub mod api;
pub mod core;
pub mod error;
pub mod grid;
pub mod telemetry;

pub use api::{ChartDataset, ChartExtraction, RangeChartConfig, RangeChartDatasource, extract};
pub use error::{ChartDataError, ChartDataResult};
