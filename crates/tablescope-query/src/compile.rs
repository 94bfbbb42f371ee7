//! Rendering of a [`QuerySpec`] as one SQL `SELECT` statement.
//!
//! The compiler is pure and total: every structurally valid spec renders,
//! and rendering the same spec twice yields the same bytes. Clauses appear
//! in the order they were given; nothing is reordered or deduplicated.

use crate::spec::{ConditionRange, ConditionSpec, Literal, OrderSpec, Predicate, QuerySpec};

/// How string and pattern literals are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Wrap in single quotes, leave embedded quotes alone.
    #[default]
    Verbatim,
    /// Wrap in single quotes and double any embedded single quote.
    Escaped,
}

/// Compiles query specs into SQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectCompiler {
    quote_style: QuoteStyle,
}

impl SelectCompiler {
    /// Creates a compiler with [`QuoteStyle::Verbatim`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quote_style: QuoteStyle::Verbatim,
        }
    }

    /// Sets the literal quoting style.
    #[must_use]
    pub const fn quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Renders `spec` as `SELECT ... FROM ... [WHERE ...] [ORDER BY ...];`.
    #[must_use]
    pub fn compile(&self, spec: &QuerySpec) -> String {
        let mut sql = String::from("SELECT ");

        if spec.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&spec.columns.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(&spec.table);

        let clauses = self.where_clauses(&spec.conditions);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if !spec.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_clause(&spec.order));
        }

        sql.push(';');
        sql
    }

    /// Renders every condition into its comparison clauses, in order.
    ///
    /// A range condition contributes zero, one or two clauses.
    #[must_use]
    pub fn where_clauses(&self, conditions: &[ConditionSpec]) -> Vec<String> {
        let mut clauses = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let field = condition.field.as_str();
            match &condition.predicate {
                Predicate::Exact(Literal::Text(text)) => {
                    clauses.push(format!("{field} = {}", self.quote(text)));
                }
                Predicate::Exact(literal) => clauses.push(format!("{field} = {literal}")),
                Predicate::Fuzzy(pattern) => {
                    clauses.push(format!("{field} LIKE {}", self.quote(pattern)));
                }
                Predicate::Range(range) => range_clauses(field, range, &mut clauses),
            }
        }
        clauses
    }

    fn quote(&self, text: &str) -> String {
        match self.quote_style {
            QuoteStyle::Verbatim => format!("'{text}'"),
            QuoteStyle::Escaped => {
                let escaped = text.replace('\'', "''");
                format!("'{escaped}'")
            }
        }
    }
}

fn range_clauses(field: &str, range: &ConditionRange, clauses: &mut Vec<String>) {
    if let Some(start) = range.start {
        let op = if start.included { ">=" } else { ">" };
        clauses.push(format!("{field} {op} {}", start.value));
    }
    if let Some(end) = range.end {
        let op = if end.included { "<=" } else { "<" };
        clauses.push(format!("{field} {op} {}", end.value));
    }
}

fn order_clause(order: &[OrderSpec]) -> String {
    order
        .iter()
        .map(|o| format!("{} {}", o.field, o.direction))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders `spec` with the default (verbatim) compiler.
#[must_use]
pub fn compile(spec: &QuerySpec) -> String {
    SelectCompiler::new().compile(spec)
}
