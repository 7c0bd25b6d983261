use thiserror::Error;

pub type ChartDataResult<T> = Result<T, ChartDataError>;

#[derive(Debug, Error)]
pub enum ChartDataError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown aggregation function: {name}")]
    UnknownAggFunc { name: String },
}
