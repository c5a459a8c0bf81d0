//! Raw string to typed value coercion.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::types::{ColumnType, PropertyValue};
use crate::error_handling::TypeCoercionError;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerces `raw` to the value of `ty`.
///
/// `column` only names the value in the error. `Label` coerces like `String`;
/// callers decide whether a label is allowed where they use it.
///
/// # Errors
///
/// Returns `TypeCoercionError::InvalidValue` when `raw` does not parse as `ty`.
pub fn coerce(column: &str, ty: ColumnType, raw: &str) -> Result<PropertyValue, TypeCoercionError> {
    let trimmed = raw.trim();
    let invalid = || TypeCoercionError::InvalidValue {
        column: column.to_string(),
        ty,
        value: raw.to_string(),
    };

    match ty {
        ColumnType::Numeric => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(PropertyValue::Number)
            .ok_or_else(invalid),
        ColumnType::Date => parse_date(trimmed).map(PropertyValue::Date).ok_or_else(invalid),
        ColumnType::Boolean => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(PropertyValue::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(PropertyValue::Boolean(false))
            } else {
                Err(invalid())
            }
        }
        ColumnType::String | ColumnType::Label => Ok(PropertyValue::Text(trimmed.to_string())),
    }
}

/// Parses a calendar date or date-time; naive values are taken as UTC.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}
