use serde::{Deserialize, Serialize};

use crate::error::{ChartDataError, ChartDataResult};

use super::ChartDataset;

pub const CHART_DATASET_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatasetJsonContractV1 {
    pub schema_version: u32,
    pub dataset: ChartDataset,
}

impl ChartDataset {
    pub fn to_json_pretty(&self) -> ChartDataResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartDataError::InvalidData(format!("failed to serialize chart dataset json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartDataResult<String> {
        let payload = ChartDatasetJsonContractV1 {
            schema_version: CHART_DATASET_JSON_SCHEMA_V1,
            dataset: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartDataError::InvalidData(format!(
                "failed to serialize chart dataset contract v1: {e}"
            ))
        })
    }

    /// Parses either a bare dataset or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartDataResult<Self> {
        if let Ok(dataset) = serde_json::from_str::<ChartDataset>(input) {
            return Ok(dataset);
        }
        let payload: ChartDatasetJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartDataError::InvalidData(format!("failed to parse chart dataset json payload: {e}"))
        })?;
        if payload.schema_version != CHART_DATASET_JSON_SCHEMA_V1 {
            return Err(ChartDataError::InvalidData(format!(
                "unsupported chart dataset schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.dataset)
    }
}
