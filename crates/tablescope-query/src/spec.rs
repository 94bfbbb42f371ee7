//! Declarative query model.
//!
//! A [`QuerySpec`] names a table, an optional column projection, a list of
//! AND-ed [`ConditionSpec`]s and an ordered list of [`OrderSpec`]s. There is
//! no OR, grouping or nesting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal compared for equality by [`Predicate::Exact`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Boolean literal, rendered unquoted.
    Bool(bool),
    /// Integer literal, rendered unquoted.
    Int(i64),
    /// Floating point literal, rendered unquoted.
    Float(f64),
    /// String literal, rendered single-quoted.
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

/// One bound of a [`ConditionRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeEndpoint {
    /// Bound value.
    pub value: f64,
    /// Whether the bound itself matches. Defaults to `true`.
    #[serde(default = "included_by_default")]
    pub included: bool,
}

const fn included_by_default() -> bool {
    true
}

impl RangeEndpoint {
    /// Creates a bound that matches its own value.
    #[must_use]
    pub const fn inclusive(value: f64) -> Self {
        Self {
            value,
            included: true,
        }
    }

    /// Creates a bound that excludes its own value.
    #[must_use]
    pub const fn exclusive(value: f64) -> Self {
        Self {
            value,
            included: false,
        }
    }
}

/// A numeric interval. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionRange {
    /// Lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RangeEndpoint>,
    /// Upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RangeEndpoint>,
}

impl ConditionRange {
    /// Creates an interval with both bounds included.
    #[must_use]
    pub const fn between(start: f64, end: f64) -> Self {
        Self {
            start: Some(RangeEndpoint::inclusive(start)),
            end: Some(RangeEndpoint::inclusive(end)),
        }
    }

    /// `>= value`
    #[must_use]
    pub const fn at_least(value: f64) -> Self {
        Self {
            start: Some(RangeEndpoint::inclusive(value)),
            end: None,
        }
    }

    /// `> value`
    #[must_use]
    pub const fn greater_than(value: f64) -> Self {
        Self {
            start: Some(RangeEndpoint::exclusive(value)),
            end: None,
        }
    }

    /// `<= value`
    #[must_use]
    pub const fn at_most(value: f64) -> Self {
        Self {
            start: None,
            end: Some(RangeEndpoint::inclusive(value)),
        }
    }

    /// `< value`
    #[must_use]
    pub const fn less_than(value: f64) -> Self {
        Self {
            start: None,
            end: Some(RangeEndpoint::exclusive(value)),
        }
    }

    /// Replaces the lower bound.
    #[must_use]
    pub const fn start(mut self, endpoint: RangeEndpoint) -> Self {
        self.start = Some(endpoint);
        self
    }

    /// Replaces the upper bound.
    #[must_use]
    pub const fn end(mut self, endpoint: RangeEndpoint) -> Self {
        self.end = Some(endpoint);
        self
    }

    /// Returns true when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// The comparison a [`ConditionSpec`] applies to its field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field = literal`
    Exact(Literal),
    /// `field LIKE 'pattern'`; wildcards are part of the pattern.
    Fuzzy(String),
    /// One or two inequality comparisons.
    Range(ConditionRange),
}

/// A single filter on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub struct ConditionSpec {
    /// Field the predicate applies to.
    pub field: String,
    /// The comparison.
    pub predicate: Predicate,
    /// Label shown to the operator. Never affects the generated SQL.
    pub display: Option<String>,
}

impl ConditionSpec {
    /// Creates a condition with the given predicate.
    pub fn new(field: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            field: field.into(),
            predicate,
            display: None,
        }
    }

    /// Creates an equality condition.
    pub fn exact(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(field, Predicate::Exact(value.into()))
    }

    /// Creates a `LIKE` condition.
    pub fn fuzzy(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, Predicate::Fuzzy(pattern.into()))
    }

    /// Creates a range condition.
    pub fn range(field: impl Into<String>, range: ConditionRange) -> Self {
        Self::new(field, Predicate::Range(range))
    }

    /// Attaches a display label.
    #[must_use]
    pub fn with_display(mut self, label: impl Into<String>) -> Self {
        self.display = Some(label.into());
        self
    }
}

/// Rejection reasons when decoding a [`ConditionSpec`] from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// None of `exact`, `fuzzy` or `range` was given.
    #[error("condition on `{0}` has no exact, fuzzy or range predicate")]
    MissingPredicate(String),

    /// More than one of `exact`, `fuzzy` or `range` was given.
    #[error("condition on `{0}` sets more than one of exact, fuzzy and range")]
    AmbiguousPredicate(String),
}

/// Wire form of a condition: `{field, exact | fuzzy | range, sql?}`.
#[derive(Serialize, Deserialize)]
struct RawCondition {
    field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fuzzy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<ConditionRange>,
    #[serde(default, rename = "sql", skip_serializing_if = "Option::is_none")]
    display: Option<String>,
}

impl TryFrom<RawCondition> for ConditionSpec {
    type Error = ConditionError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let predicate = match (raw.exact, raw.fuzzy, raw.range) {
            (Some(value), None, None) => Predicate::Exact(value),
            (None, Some(pattern), None) => Predicate::Fuzzy(pattern),
            (None, None, Some(range)) => Predicate::Range(range),
            (None, None, None) => return Err(ConditionError::MissingPredicate(raw.field)),
            _ => return Err(ConditionError::AmbiguousPredicate(raw.field)),
        };
        Ok(Self {
            field: raw.field,
            predicate,
            display: raw.display,
        })
    }
}

impl From<ConditionSpec> for RawCondition {
    fn from(spec: ConditionSpec) -> Self {
        let mut raw = Self {
            field: spec.field,
            exact: None,
            fuzzy: None,
            range: None,
            display: spec.display,
        };
        match spec.predicate {
            Predicate::Exact(value) => raw.exact = Some(value),
            Predicate::Fuzzy(pattern) => raw.fuzzy = Some(pattern),
            Predicate::Range(range) => raw.range = Some(range),
        }
        raw
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort key. Earlier keys take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Field to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default, rename = "type", alias = "direction")]
    pub direction: Direction,
}

impl OrderSpec {
    /// Creates a sort key.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Creates an ascending sort key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Creates a descending sort key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// Declarative description of a `SELECT` over one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Table to select from.
    pub table: String,
    /// Projection; empty selects every column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// Filters, AND-ed in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionSpec>,
    /// Sort keys, primary first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<OrderSpec>,
}

impl QuerySpec {
    /// Creates a spec selecting every row and column of `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: vec![],
            conditions: vec![],
            order: vec![],
        }
    }

    /// Sets the projection.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Appends a condition.
    #[must_use]
    pub fn condition(mut self, condition: ConditionSpec) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Appends several conditions.
    #[must_use]
    pub fn conditions(mut self, conditions: impl IntoIterator<Item = ConditionSpec>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Appends a sort key.
    #[must_use]
    pub fn order_by(mut self, order: OrderSpec) -> Self {
        self.order.push(order);
        self
    }

    /// Renders the spec with the default compiler.
    #[must_use]
    pub fn to_sql(&self) -> String {
        crate::compile::compile(self)
    }
}
