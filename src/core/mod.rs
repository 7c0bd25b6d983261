pub mod aggregation;
pub mod cell_value;
pub mod column;
pub mod range;

pub use aggregation::{AggFn, AggFunc, AggFuncRegistry, Aggregator, BUILTIN_AGG_FUNC_NAMES};
pub use cell_value::CellValue;
pub use column::{ColumnCapabilities, ColumnId, ColumnRef};
pub use range::{CellRange, RowPosition};
