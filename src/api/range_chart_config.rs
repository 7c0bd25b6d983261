use serde::{Deserialize, Serialize};

use crate::error::{ChartDataError, ChartDataResult};

/// Extraction settings.
///
/// Serializable so hosts can persist chart setup alongside their grid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeChartConfig {
    /// Purpose tag passed to the column model when resolving display names.
    #[serde(default = "default_display_name_purpose")]
    pub display_name_purpose: String,
    /// Function applied to every field column of every group.
    #[serde(default = "default_group_agg_func")]
    pub group_agg_func: String,
}

impl RangeChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            display_name_purpose: default_display_name_purpose(),
            group_agg_func: default_group_agg_func(),
        }
    }

    #[must_use]
    pub fn with_display_name_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.display_name_purpose = purpose.into();
        self
    }

    #[must_use]
    pub fn with_group_agg_func(mut self, name: impl Into<String>) -> Self {
        self.group_agg_func = name.into();
        self
    }

    pub fn validate(&self) -> ChartDataResult<()> {
        if self.group_agg_func.trim().is_empty() {
            return Err(ChartDataError::InvalidConfig(
                "group_agg_func must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartDataResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartDataError::InvalidConfig(format!("failed to parse range chart config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartDataResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartDataError::InvalidConfig(format!("failed to serialize range chart config: {e}"))
        })
    }
}

impl Default for RangeChartConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_display_name_purpose() -> String {
    "chart".to_owned()
}

fn default_group_agg_func() -> String {
    "sum".to_owned()
}
