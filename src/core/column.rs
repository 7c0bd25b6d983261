use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a grid column; keys every extracted row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Capability flags a column definition declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCapabilities {
    /// Column values may be aggregated and charted as a field.
    #[serde(default)]
    pub enable_value: bool,
    /// Column may act as a row-group dimension.
    #[serde(default)]
    pub enable_row_group: bool,
    /// Column may act as a pivot dimension.
    #[serde(default)]
    pub enable_pivot: bool,
}

impl ColumnCapabilities {
    #[must_use]
    pub fn value() -> Self {
        Self {
            enable_value: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn row_group() -> Self {
        Self {
            enable_row_group: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pivot() -> Self {
        Self {
            enable_pivot: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_dimension(self) -> bool {
        self.enable_row_group || self.enable_pivot
    }
}

/// Handle to one column of the host grid's column model.
///
/// Two references denote the same column iff their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRef {
    pub id: ColumnId,
    /// Header shown by the grid; column models usually derive display names from it.
    #[serde(default)]
    pub header_name: Option<String>,
    /// Key of the backing row data this column reads, when it differs from `id`.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub capabilities: ColumnCapabilities,
}

impl ColumnRef {
    #[must_use]
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            header_name: None,
            field: None,
            capabilities: ColumnCapabilities::default(),
        }
    }

    /// Column eligible to be charted as a value.
    #[must_use]
    pub fn value(id: impl Into<ColumnId>) -> Self {
        Self::new(id).with_capabilities(ColumnCapabilities::value())
    }

    /// Column eligible to act as a row-group category.
    #[must_use]
    pub fn row_group(id: impl Into<ColumnId>) -> Self {
        Self::new(id).with_capabilities(ColumnCapabilities::row_group())
    }

    #[must_use]
    pub fn with_header_name(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = Some(header_name.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: ColumnCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Row data key this column reads.
    #[must_use]
    pub fn data_key(&self) -> &str {
        self.field.as_deref().unwrap_or(self.id.as_str())
    }

    #[must_use]
    pub fn is_value(&self) -> bool {
        self.capabilities.enable_value
    }

    #[must_use]
    pub fn is_dimension(&self) -> bool {
        self.capabilities.is_dimension()
    }
}

impl PartialEq for ColumnRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ColumnRef {}
