use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{ChartDataError, ChartDataResult};

use super::cell_value::CellValue;

/// Signature shared by built-in and host-registered aggregation functions.
pub type AggFn = Arc<dyn Fn(&[CellValue]) -> CellValue + Send + Sync>;

/// Names of the built-in aggregation functions.
pub const BUILTIN_AGG_FUNC_NAMES: [&str; 7] = ["sum", "min", "max", "count", "avg", "first", "last"];

/// Aggregation directive supplied with a chart request.
///
/// Grouping only checks that a directive is present; the function applied
/// to groups comes from `RangeChartConfig::group_agg_func`.
#[derive(Clone)]
pub enum AggFunc {
    Named(String),
    Custom(AggFn),
}

impl AggFunc {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn custom(func: impl Fn(&[CellValue]) -> CellValue + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(func))
    }
}

impl fmt::Debug for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for AggFunc {
    fn from(value: &str) -> Self {
        Self::named(value)
    }
}

/// Contract for the collaborator that folds a value sequence into one aggregate.
///
/// Implementations must not panic on empty or non-numeric input.
pub trait Aggregator {
    fn aggregate(&self, values: &[CellValue], func_name: &str) -> CellValue;
}

/// Name-keyed aggregation functions with the built-ins preinstalled.
#[derive(Clone)]
pub struct AggFuncRegistry {
    funcs: IndexMap<String, AggFn>,
}

impl AggFuncRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut funcs: IndexMap<String, AggFn> = IndexMap::new();
        funcs.insert("sum".to_owned(), Arc::new(agg_sum));
        funcs.insert("min".to_owned(), Arc::new(agg_min));
        funcs.insert("max".to_owned(), Arc::new(agg_max));
        funcs.insert("count".to_owned(), Arc::new(agg_count));
        funcs.insert("avg".to_owned(), Arc::new(agg_avg));
        funcs.insert("first".to_owned(), Arc::new(agg_first));
        funcs.insert("last".to_owned(), Arc::new(agg_last));
        Self { funcs }
    }

    /// Registers a host function; built-in names cannot be replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&[CellValue]) -> CellValue + Send + Sync + 'static,
    ) -> ChartDataResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ChartDataError::InvalidData(
                "aggregation function name must not be empty".to_owned(),
            ));
        }
        if BUILTIN_AGG_FUNC_NAMES.contains(&name.as_str()) {
            return Err(ChartDataError::InvalidData(format!(
                "aggregation function `{name}` is built in and cannot be replaced"
            )));
        }
        self.funcs.insert(name, Arc::new(func));
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    pub fn get(&self, name: &str) -> ChartDataResult<&AggFn> {
        self.funcs
            .get(name)
            .ok_or_else(|| ChartDataError::UnknownAggFunc {
                name: name.to_owned(),
            })
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }
}

impl Default for AggFuncRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AggFuncRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggFuncRegistry")
            .field("funcs", &self.funcs.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Aggregator for AggFuncRegistry {
    fn aggregate(&self, values: &[CellValue], func_name: &str) -> CellValue {
        match self.get(func_name) {
            Ok(func) => func(values),
            Err(err) => {
                warn!(error = %err, "aggregating to empty value");
                CellValue::Empty
            }
        }
    }
}

fn numbers(values: &[CellValue]) -> impl Iterator<Item = f64> + '_ {
    values.iter().filter_map(CellValue::as_number)
}

fn agg_sum(values: &[CellValue]) -> CellValue {
    numbers(values)
        .reduce(|acc, value| acc + value)
        .map_or(CellValue::Empty, CellValue::Number)
}

fn agg_min(values: &[CellValue]) -> CellValue {
    numbers(values)
        .reduce(f64::min)
        .map_or(CellValue::Empty, CellValue::Number)
}

fn agg_max(values: &[CellValue]) -> CellValue {
    numbers(values)
        .reduce(f64::max)
        .map_or(CellValue::Empty, CellValue::Number)
}

fn agg_count(values: &[CellValue]) -> CellValue {
    CellValue::Number(values.len() as f64)
}

fn agg_avg(values: &[CellValue]) -> CellValue {
    let (sum, count) = numbers(values).fold((0.0, 0_usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        return CellValue::Empty;
    }
    CellValue::Number(sum / count as f64)
}

fn agg_first(values: &[CellValue]) -> CellValue {
    values.first().cloned().unwrap_or_default()
}

fn agg_last(values: &[CellValue]) -> CellValue {
    values.last().cloned().unwrap_or_default()
}
