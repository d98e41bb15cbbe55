//! Document matching against filter conditions.

use std::cmp::Ordering;

use garnet_types::{Document, Filter, MatchCondition};
use serde_json::Value;

use crate::error::{QueryError, Result};

/// Returns whether a document satisfies every condition in the filter.
///
/// An empty filter matches every document.
///
/// # Errors
///
/// Returns [`QueryError::UnsupportedOperator`] for unknown `$` operators
/// and [`QueryError::InvalidOperand`] for malformed operands. Errors are
/// surfaced rather than treated as non-matches, so a bad mandatory filter
/// fails loudly instead of silently widening or narrowing results.
pub fn matches_filter(document: &Document, filter: &Filter) -> Result<bool> {
    for (field, condition) in filter.iter() {
        if !matches_condition(document.get(field.as_str()), condition)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_condition(field_value: Option<&Value>, condition: &MatchCondition) -> Result<bool> {
    let Some(operators) = condition.as_operators() else {
        // Bare value: equality against a present field.
        return Ok(field_value == Some(condition.as_value()));
    };

    for (operator, operand) in operators {
        if !apply_operator(field_value, operator, operand)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn apply_operator(field_value: Option<&Value>, operator: &str, operand: &Value) -> Result<bool> {
    match operator {
        "$eq" => Ok(field_value == Some(operand)),
        // An absent field is "not equal", matching document-store behavior.
        "$ne" => Ok(field_value != Some(operand)),
        "$gt" => Ok(ordering(field_value, operand).is_some_and(Ordering::is_gt)),
        "$gte" => Ok(ordering(field_value, operand).is_some_and(Ordering::is_ge)),
        "$lt" => Ok(ordering(field_value, operand).is_some_and(Ordering::is_lt)),
        "$lte" => Ok(ordering(field_value, operand).is_some_and(Ordering::is_le)),
        "$in" => {
            let candidates = operand_array(operator, operand)?;
            Ok(field_value.is_some_and(|v| candidates.contains(v)))
        }
        "$nin" => {
            let candidates = operand_array(operator, operand)?;
            Ok(!field_value.is_some_and(|v| candidates.contains(v)))
        }
        "$exists" => match operand {
            Value::Bool(expected) => Ok(field_value.is_some() == *expected),
            other => Err(QueryError::InvalidOperand {
                operator: operator.to_string(),
                reason: format!("expected boolean, got {other}"),
            }),
        },
        unknown => Err(QueryError::UnsupportedOperator(unknown.to_string())),
    }
}

fn operand_array<'a>(operator: &str, operand: &'a Value) -> Result<&'a Vec<Value>> {
    operand.as_array().ok_or_else(|| QueryError::InvalidOperand {
        operator: operator.to_string(),
        reason: "expected array of candidate values".to_string(),
    })
}

/// Ordering between a (present) field value and an operand.
///
/// Numbers compare by value, strings lexicographically. ISO-8601 timestamps
/// stored as strings therefore order chronologically. Absent fields and
/// cross-type comparisons have no ordering and never satisfy a range
/// operator.
fn ordering(field_value: Option<&Value>, operand: &Value) -> Option<Ordering> {
    match (field_value?, operand) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().expect("test doc must be an object").clone()
    }

    fn filter(value: serde_json::Value) -> Filter {
        Filter::from_value(value).expect("test filter must be an object")
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(matches_filter(&doc(json!({"a": 1})), &Filter::new()).unwrap());
        assert!(matches_filter(&Document::new(), &Filter::new()).unwrap());
    }

    #[test]
    fn test_bare_value_equality() {
        let f = filter(json!({"tenant": "acme"}));
        assert!(matches_filter(&doc(json!({"tenant": "acme"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"tenant": "globex"})), &f).unwrap());
        // Absent field never satisfies equality.
        assert!(!matches_filter(&doc(json!({"other": 1})), &f).unwrap());
    }

    #[test]
    fn test_date_range_on_iso_strings() {
        let f = filter(json!({"eventDateTime": {"$gt": "2020-05-10", "$lt": "2020-05-11"}}));

        assert!(matches_filter(&doc(json!({"eventDateTime": "2020-05-10T14:30:00Z"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"eventDateTime": "2020-05-09T23:59:59Z"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"eventDateTime": "2020-05-12T00:00:00Z"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"action": "login"})), &f).unwrap());
    }

    #[test]
    fn test_numeric_ranges() {
        let f = filter(json!({"severity": {"$gte": 3}}));
        assert!(matches_filter(&doc(json!({"severity": 3})), &f).unwrap());
        assert!(matches_filter(&doc(json!({"severity": 7.5})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"severity": 2})), &f).unwrap());
        // Cross-type comparison has no ordering.
        assert!(!matches_filter(&doc(json!({"severity": "high"})), &f).unwrap());
    }

    #[test]
    fn test_ne_matches_absent_field() {
        let f = filter(json!({"tenant": {"$ne": "acme"}}));
        assert!(matches_filter(&doc(json!({"tenant": "globex"})), &f).unwrap());
        assert!(matches_filter(&doc(json!({"other": 1})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"tenant": "acme"})), &f).unwrap());
    }

    #[test]
    fn test_in_and_nin() {
        let f = filter(json!({"action": {"$in": ["login", "logout"]}}));
        assert!(matches_filter(&doc(json!({"action": "login"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"action": "delete"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({})), &f).unwrap());

        let f = filter(json!({"action": {"$nin": ["delete"]}}));
        assert!(matches_filter(&doc(json!({"action": "login"})), &f).unwrap());
        assert!(matches_filter(&doc(json!({})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"action": "delete"})), &f).unwrap());
    }

    #[test]
    fn test_exists() {
        let f = filter(json!({"tenant": {"$exists": true}}));
        assert!(matches_filter(&doc(json!({"tenant": null})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({})), &f).unwrap());

        let f = filter(json!({"tenant": {"$exists": false}}));
        assert!(matches_filter(&doc(json!({})), &f).unwrap());
    }

    #[test]
    fn test_unknown_operator_is_an_error() {
        let f = filter(json!({"tenant": {"$regex": "ac.*"}}));
        let err = matches_filter(&doc(json!({"tenant": "acme"})), &f).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedOperator(op) if op == "$regex"));
    }

    #[test]
    fn test_invalid_operands_are_errors() {
        let f = filter(json!({"action": {"$in": "login"}}));
        assert!(matches!(
            matches_filter(&doc(json!({"action": "login"})), &f).unwrap_err(),
            QueryError::InvalidOperand { .. }
        ));

        let f = filter(json!({"tenant": {"$exists": "yes"}}));
        assert!(matches!(
            matches_filter(&doc(json!({"tenant": 1})), &f).unwrap_err(),
            QueryError::InvalidOperand { .. }
        ));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let f = filter(json!({"tenant": "acme", "action": "login"}));
        assert!(matches_filter(&doc(json!({"tenant": "acme", "action": "login"})), &f).unwrap());
        assert!(!matches_filter(&doc(json!({"tenant": "acme", "action": "logout"})), &f).unwrap());
    }
}
