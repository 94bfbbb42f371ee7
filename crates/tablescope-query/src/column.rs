//! Column metadata reported by `SHOW COLUMNS`.

use serde::{Deserialize, Serialize};

/// Type families the filter dialog treats as numeric.
const NUMERIC_TYPES: &[&str] = &[
    "int",
    "integer",
    "bigint",
    "decimal",
    "float",
    "double",
    "real",
    "numeric",
    "bit",
    "tinyint",
    "smallint",
    "mediumint",
    "year",
];

/// One column of an introspected table.
///
/// Snapshots are replaced wholesale on every introspection call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared type as reported by the server, e.g. `int(11) unsigned`.
    #[serde(rename = "type")]
    pub column_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    pub primary: bool,
    /// Default value, if any.
    pub default: Option<String>,
    /// Extra attributes such as `auto_increment`.
    pub extra: String,
}

impl ColumnInfo {
    /// Returns true for integer, fixed and floating point types.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        is_numeric_type(&self.column_type)
    }
}

/// Returns true when a MySQL column type belongs to a numeric family.
///
/// Case, display width and trailing attributes are ignored, so `INT`,
/// `int(11)` and `bigint unsigned zerofill` all match.
#[must_use]
pub fn is_numeric_type(column_type: &str) -> bool {
    let base = column_type
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    NUMERIC_TYPES.contains(&base.as_str())
}
