//! Filter drafting for the "apply filter" dialog.
//!
//! The operator picks a column, a relation and a value. Numeric columns take
//! comparisons, other columns take equality or a `LIKE` pattern. A valid
//! draft becomes a [`ConditionSpec`] carrying the chip label shown in the
//! filter bar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tablescope_query::{ColumnInfo, ConditionRange, ConditionSpec, Literal, RangeEndpoint};

use crate::error::FilterError;

/// Relations offered by the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `like`
    #[serde(rename = "like")]
    Like,
}

const NUMERIC_RELATIONS: &[Relation] = &[
    Relation::Eq,
    Relation::Lt,
    Relation::Gt,
    Relation::Le,
    Relation::Ge,
];

const TEXT_RELATIONS: &[Relation] = &[Relation::Eq, Relation::Like];

impl Relation {
    /// Returns the symbol shown in the dialog.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Self::Eq),
            "<" => Ok(Self::Lt),
            ">" => Ok(Self::Gt),
            "<=" => Ok(Self::Le),
            ">=" => Ok(Self::Ge),
            other if other.eq_ignore_ascii_case("like") => Ok(Self::Like),
            other => Err(FilterError::UnknownRelation(other.to_string())),
        }
    }
}

/// Relations the dialog enables for a column.
///
/// Numeric columns allow every comparison but `like`; other columns allow
/// `=` and `like`.
pub const fn allowed_relations(numeric: bool) -> &'static [Relation] {
    if numeric {
        NUMERIC_RELATIONS
    } else {
        TEXT_RELATIONS
    }
}

/// A filter as entered in the dialog, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDraft {
    /// Column name.
    pub column: String,
    /// Chosen relation.
    pub relation: Relation,
    /// Raw input.
    pub value: String,
}

impl FilterDraft {
    /// Creates a draft.
    pub fn new(column: impl Into<String>, relation: Relation, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            relation,
            value: value.into(),
        }
    }

    /// Validates the draft against the table's columns and builds the
    /// labelled condition.
    pub fn into_condition(self, columns: &[ColumnInfo]) -> Result<ConditionSpec, FilterError> {
        let info = columns
            .iter()
            .find(|c| c.name == self.column)
            .ok_or_else(|| FilterError::UnknownColumn(self.column.clone()))?;
        let numeric = info.is_numeric();

        if !allowed_relations(numeric).contains(&self.relation) {
            return Err(FilterError::RelationNotAllowed {
                column: self.column,
                relation: self.relation,
            });
        }

        let condition = match self.relation {
            Relation::Like => {
                let label = format!("{} ~ {}", self.column, self.value);
                ConditionSpec::fuzzy(self.column, self.value).with_display(label)
            }
            Relation::Eq if numeric => {
                let literal = parse_literal(&self.column, &self.value)?;
                let label = format!("{} = {}", self.column, literal);
                ConditionSpec::exact(self.column, literal).with_display(label)
            }
            Relation::Eq => {
                let label = format!("{} = {}", self.column, self.value);
                ConditionSpec::exact(self.column, self.value).with_display(label)
            }
            relation => {
                let bound = parse_number(&self.column, &self.value)?;
                let range = match relation {
                    Relation::Lt => ConditionRange::less_than(bound),
                    Relation::Le => ConditionRange::at_most(bound),
                    Relation::Gt => ConditionRange::greater_than(bound),
                    _ => ConditionRange::at_least(bound),
                };
                let label = format!("{} ~ {}", self.column, range_label(&range));
                ConditionSpec::range(self.column, range).with_display(label)
            }
        };
        Ok(condition)
    }
}

/// Interval notation for a range, e.g. `[20, 40)` or `(20, ∞)`.
pub fn range_label(range: &ConditionRange) -> String {
    let lower = match range.start {
        Some(RangeEndpoint {
            value,
            included: true,
        }) => format!("[{value}"),
        Some(RangeEndpoint { value, .. }) => format!("({value}"),
        None => String::from("(-∞"),
    };
    let upper = match range.end {
        Some(RangeEndpoint {
            value,
            included: true,
        }) => format!("{value}]"),
        Some(RangeEndpoint { value, .. }) => format!("{value})"),
        None => String::from("∞)"),
    };
    format!("{lower}, {upper}")
}

fn parse_number(column: &str, value: &str) -> Result<f64, FilterError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FilterError::InvalidNumber {
            column: column.to_string(),
            value: value.to_string(),
        })
}

fn parse_literal(column: &str, value: &str) -> Result<Literal, FilterError> {
    match value.trim().parse::<i64>() {
        Ok(n) => Ok(Literal::Int(n)),
        Err(_) => parse_number(column, value).map(Literal::Float),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescope_query::Predicate;

    fn columns() -> Vec<ColumnInfo> {
        let column = |name: &str, ty: &str| ColumnInfo {
            name: name.to_string(),
            column_type: ty.to_string(),
            nullable: false,
            primary: false,
            default: None,
            extra: String::new(),
        };
        vec![
            column("Class", "int(11)"),
            column("Department", "varchar(32)"),
            column("Age", "tinyint unsigned"),
            column("Score", "decimal(5,2)"),
        ]
    }

    #[test]
    fn test_allowed_relations() {
        assert!(!allowed_relations(true).contains(&Relation::Like));
        assert_eq!(allowed_relations(false), &[Relation::Eq, Relation::Like]);
    }

    #[test]
    fn test_relation_symbols() {
        for relation in allowed_relations(true).iter().chain(&[Relation::Like]) {
            assert_eq!(relation.as_str().parse::<Relation>().unwrap(), *relation);
        }
        assert_eq!("LIKE".parse::<Relation>().unwrap(), Relation::Like);
        assert!(matches!(
            "!=".parse::<Relation>(),
            Err(FilterError::UnknownRelation(_))
        ));
    }

    #[test]
    fn test_draft_wire_form() {
        let draft: FilterDraft =
            serde_json::from_str(r#"{"column":"Age","relation":"<=","value":"40"}"#).unwrap();
        assert_eq!(draft, FilterDraft::new("Age", Relation::Le, "40"));
        assert_eq!(serde_json::to_string(&Relation::Like).unwrap(), r#""like""#);
    }

    #[test]
    fn test_numeric_equality() {
        let condition = FilterDraft::new("Class", Relation::Eq, "2137101")
            .into_condition(&columns())
            .unwrap();
        assert_eq!(condition.predicate, Predicate::Exact(Literal::Int(2_137_101)));
        assert_eq!(condition.display.as_deref(), Some("Class = 2137101"));
    }

    #[test]
    fn test_decimal_equality() {
        let condition = FilterDraft::new("Score", Relation::Eq, " 9.5 ")
            .into_condition(&columns())
            .unwrap();
        assert_eq!(condition.predicate, Predicate::Exact(Literal::Float(9.5)));
    }

    #[test]
    fn test_text_equality_is_a_string() {
        let condition = FilterDraft::new("Department", Relation::Eq, "2137")
            .into_condition(&columns())
            .unwrap();
        assert_eq!(condition.predicate, Predicate::Exact(Literal::from("2137")));
    }

    #[test]
    fn test_like_label() {
        let condition = FilterDraft::new("Department", Relation::Like, "213710%")
            .into_condition(&columns())
            .unwrap();
        assert_eq!(condition.predicate, Predicate::Fuzzy("213710%".into()));
        assert_eq!(condition.display.as_deref(), Some("Department ~ 213710%"));
    }

    #[test]
    fn test_comparison_labels() {
        let label = |relation| {
            FilterDraft::new("Age", relation, "20")
                .into_condition(&columns())
                .unwrap()
                .display
                .unwrap()
        };
        assert_eq!(label(Relation::Gt), "Age ~ (20, ∞)");
        assert_eq!(label(Relation::Ge), "Age ~ [20, ∞)");
        assert_eq!(label(Relation::Lt), "Age ~ (-∞, 20)");
        assert_eq!(label(Relation::Le), "Age ~ (-∞, 20]");
    }

    #[test]
    fn test_comparison_compiles() {
        let condition = FilterDraft::new("Age", Relation::Gt, "20")
            .into_condition(&columns())
            .unwrap();
        let sql = tablescope_query::QuerySpec::new("t").condition(condition).to_sql();
        assert_eq!(sql, "SELECT * FROM t WHERE Age > 20;");
    }

    #[test]
    fn test_range_label_both_bounds() {
        let range = ConditionRange::at_least(20.0).end(RangeEndpoint::exclusive(40.0));
        assert_eq!(range_label(&range), "[20, 40)");
    }

    #[test]
    fn test_rejections() {
        let columns = columns();
        assert_eq!(
            FilterDraft::new("Nope", Relation::Eq, "1").into_condition(&columns),
            Err(FilterError::UnknownColumn("Nope".into()))
        );
        assert!(matches!(
            FilterDraft::new("Age", Relation::Like, "2%").into_condition(&columns),
            Err(FilterError::RelationNotAllowed { .. })
        ));
        assert!(matches!(
            FilterDraft::new("Department", Relation::Lt, "2").into_condition(&columns),
            Err(FilterError::RelationNotAllowed { .. })
        ));
        assert!(matches!(
            FilterDraft::new("Age", Relation::Ge, "twenty").into_condition(&columns),
            Err(FilterError::InvalidNumber { .. })
        ));
        assert!(matches!(
            FilterDraft::new("Age", Relation::Eq, "inf").into_condition(&columns),
            Err(FilterError::InvalidNumber { .. })
        ));
    }
}
