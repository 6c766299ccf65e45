//! Filter predicates over entity columns.
//!
//! A [`Filter`] is the typed replacement for an ad-hoc lambda predicate: it can
//! be rendered into a parameterized SQL `WHERE` clause by the Postgres
//! repositories, or evaluated directly against an entity with
//! [`Filter::matches`]. Both interpretations follow SQL semantics for `NULL`.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::repository::Entity;

/// A nullable, typed column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Option<i64>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
}

impl Value {
    /// Whether the value is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Int(v) => v.is_none(),
            Value::Text(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    /// Compare two non-null values of the same kind.
    ///
    /// Returns `None` when either side is null or the kinds differ.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(Some(a)), Value::Int(Some(b))) => Some(a.cmp(b)),
            (Value::Text(Some(a)), Value::Text(Some(b))) => Some(a.cmp(b)),
            (Value::Date(Some(a)), Value::Date(Some(b))) => Some(a.cmp(b)),
            (Value::Timestamp(Some(a)), Value::Timestamp(Some(b))) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(Some(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(Some(i64::from(v)))
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Some(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(Some(v))
    }
}

impl From<Option<NaiveDate>> for Value {
    fn from(v: Option<NaiveDate>) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(Some(v))
    }
}

/// Predicate over the columns of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value` (`IS NULL` for a null value)
    Eq(&'static str, Value),
    /// `column <> value` (`IS NOT NULL` for a null value)
    NotEq(&'static str, Value),
    /// Case-insensitive text equality
    EqIgnoreCase(&'static str, String),
    /// `column IN (values)`; an empty list matches nothing
    In(&'static str, Vec<Value>),
    /// All of; an empty list matches everything
    And(Vec<Filter>),
    /// Any of; an empty list matches nothing
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq(column, value.into())
    }

    pub fn not_eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter::NotEq(column, value.into())
    }

    pub fn eq_ignore_case(column: &'static str, value: impl Into<String>) -> Self {
        Filter::EqIgnoreCase(column, value.into())
    }

    pub fn is_in<I, V>(column: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In(column, values.into_iter().map(Into::into).collect())
    }

    /// Matches every row.
    pub fn all() -> Self {
        Filter::And(Vec::new())
    }

    /// Conjunction with another filter, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::And(mut a), Filter::And(b)) => {
                a.extend(b);
                Filter::And(a)
            }
            (Filter::And(mut a), b) => {
                a.push(b);
                Filter::And(a)
            }
            (a, Filter::And(mut b)) => {
                b.insert(0, a);
                Filter::And(b)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Every column name referenced by this filter.
    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            Filter::Eq(c, _) | Filter::NotEq(c, _) | Filter::EqIgnoreCase(c, _) | Filter::In(c, _) => {
                vec![*c]
            }
            Filter::And(fs) | Filter::Or(fs) => fs.iter().flat_map(Filter::columns).collect(),
        }
    }

    /// Evaluate the filter against a loaded entity.
    ///
    /// Unknown columns never match.
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        match self {
            Filter::Eq(column, value) => match entity.value(column) {
                Some(actual) if value.is_null() => actual.is_null(),
                Some(actual) => actual.compare(value) == Some(Ordering::Equal),
                None => false,
            },
            Filter::NotEq(column, value) => match entity.value(column) {
                Some(actual) if value.is_null() => !actual.is_null(),
                Some(actual) => matches!(actual.compare(value), Some(o) if o != Ordering::Equal),
                None => false,
            },
            Filter::EqIgnoreCase(column, expected) => match entity.value(column) {
                Some(Value::Text(Some(actual))) => actual.to_lowercase() == expected.to_lowercase(),
                _ => false,
            },
            Filter::In(column, values) => match entity.value(column) {
                Some(actual) => values
                    .iter()
                    .any(|v| actual.compare(v) == Some(Ordering::Equal)),
                None => false,
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(entity)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(entity)),
        }
    }
}
