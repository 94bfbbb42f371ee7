//! Error types for the browser controller.

use tablescope_bridge::BridgeError;
use thiserror::Error;

use crate::filter::Relation;

/// Why a filter draft could not become a condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The column is not part of the current table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The relation does not apply to the column's type.
    #[error("relation `{relation}` is not allowed on column `{column}`")]
    RelationNotAllowed {
        /// Column name.
        column: String,
        /// Rejected relation.
        relation: Relation,
    },

    /// A numeric column was given a value that is not a number.
    #[error("`{value}` is not a number (column `{column}`)")]
    InvalidNumber {
        /// Column name.
        column: String,
        /// Rejected input.
        value: String,
    },

    /// The relation symbol is not recognised.
    #[error("unknown relation: {0}")]
    UnknownRelation(String),
}

/// Errors from [`Browser`](crate::Browser) operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The bridge reported a failure.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A filter draft was rejected.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The operation needs a selected table.
    #[error("no table selected")]
    NoTableSelected,
}

/// Result type alias for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
