//! Scalar values carried by term and range clauses.
//!
//! # Examples
//!
//! ```
//! use pike::query::FieldValue;
//!
//! let text = FieldValue::from("浣熊");
//! assert_eq!(text.as_text(), Some("浣熊"));
//!
//! let price = FieldValue::from(1.5);
//! assert_eq!(price.as_f64(), Some(1.5));
//! ```

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// A value compared against a document field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// DateTime value
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Get the value as text if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a boolean if it is a boolean value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a timestamp if it is a datetime value.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Name of the value type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::DateTime(_) => "datetime",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::DateTime(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from("a"), FieldValue::Text("a".to_string()));
        assert_eq!(FieldValue::from(10), FieldValue::Integer(10));
        assert_eq!(FieldValue::from(1.5), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from(true).as_boolean(), Some(true));
        assert_eq!(FieldValue::from(10).as_f64(), Some(10.0));
        assert_eq!(FieldValue::from("a").as_f64(), None);
    }

    #[test]
    fn test_datetime_display() {
        let dt = Utc.with_ymd_and_hms(2022, 2, 2, 0, 0, 0).unwrap();
        let value = FieldValue::from(dt);
        assert_eq!(value.to_string(), "2022-02-02T00:00:00.000Z");
        assert_eq!(value.type_name(), "datetime");
    }
}
