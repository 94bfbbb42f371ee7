//! # tablescope-query
//!
//! Declarative query specifications for browsing MySQL tables, and the
//! compiler that renders them as a single `SELECT` statement.
//!
//! This crate provides:
//! - [`QuerySpec`], [`ConditionSpec`] and [`OrderSpec`], the filter model
//!   shared by the session, the bridge and the browser state
//! - [`compile`], a pure and deterministic SQL renderer
//! - The introspection statements a session issues (`SHOW TABLES`, ...)
//! - [`ColumnInfo`], [`Row`] and [`Value`] for schema metadata and results
//!
//! ## Building a query
//!
//! ```rust
//! use tablescope_query::{compile, ConditionRange, ConditionSpec, OrderSpec, QuerySpec};
//!
//! let spec = QuerySpec::new("t_students")
//!     .columns(&["ID", "Name"])
//!     .condition(ConditionSpec::range("ID", ConditionRange::between(1.0, 2.0)))
//!     .condition(ConditionSpec::fuzzy("Name", "A%"))
//!     .order_by(OrderSpec::desc("ID"));
//!
//! assert_eq!(
//!     compile(&spec),
//!     "SELECT ID, Name FROM t_students WHERE ID >= 1 AND ID <= 2 AND Name LIKE 'A%' ORDER BY ID DESC;"
//! );
//! ```
//!
//! ## Trust boundary
//!
//! Table and field names are interpolated verbatim. They are expected to
//! come from the schema the session introspected, never from free text.
//! String literals are single-quoted without escaping unless the compiler
//! is configured with [`QuoteStyle::Escaped`].

pub mod column;
pub mod compile;
pub mod spec;
pub mod statement;
pub mod value;

pub use column::{is_numeric_type, ColumnInfo};
pub use compile::{compile, QuoteStyle, SelectCompiler};
pub use spec::{
    ConditionError, ConditionRange, ConditionSpec, Direction, Literal, OrderSpec, Predicate,
    QuerySpec, RangeEndpoint,
};
pub use value::{Row, Value};
