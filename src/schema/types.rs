//! Column types and the values they coerce to.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Semantic type of a column, declared in the vertex type row or inline in
/// an edge triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Date,
    Boolean,
    String,
    /// The vertex's primary label; never stored as a property.
    Label,
}

impl ColumnType {
    /// Comma separated list of every supported type name.
    pub fn supported_list() -> String {
        ColumnType::iter()
            .map(|ty| ty.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parses a declared type token, ignoring surrounding whitespace and case.
    pub fn parse_declared(token: &str) -> Option<ColumnType> {
        ColumnType::from_str(&token.trim().to_lowercase()).ok()
    }
}

/// A coerced value, bound to a query out of band.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Date(DateTime<Utc>),
    Boolean(bool),
    Text(String),
}

impl PropertyValue {
    /// The JSON value bound to the query parameter.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Dates are sent as RFC 3339 strings with millisecond precision in UTC.
impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Number(n) => serializer.serialize_f64(*n),
            PropertyValue::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            PropertyValue::Boolean(b) => serializer.serialize_bool(*b),
            PropertyValue::Text(s) => serializer.serialize_str(s),
        }
    }
}
