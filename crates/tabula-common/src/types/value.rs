//! Runtime values.
//!
//! This module defines the `Value` type which represents a typed value
//! both as a query literal and as a result cell.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A typed runtime value.
///
/// `Value` is used in two places: as the literal operand of a query
/// predicate, and as a cell of a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Date (year, month, day).
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Creates a NULL value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Creates a boolean value.
    pub fn boolean(v: bool) -> Self {
        Value::Boolean(v)
    }

    /// Creates an integer value.
    pub fn int(v: i64) -> Self {
        Value::Integer(v)
    }

    /// Creates a floating point value.
    pub fn float(v: f64) -> Self {
        Value::Float(v)
    }

    /// Creates a string value.
    pub fn string(v: impl Into<String>) -> Self {
        Value::String(v.into())
    }

    /// Creates a binary value.
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(v.into())
    }

    /// Creates a date value.
    pub fn date(v: NaiveDate) -> Self {
        Value::Date(v)
    }

    /// Creates a timestamp value.
    pub fn timestamp(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }

    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value kind renders as a quoted SQL literal.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Value::String(_) | Value::Date(_) | Value::Time(_) | Value::Timestamp(_)
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_null() {
        assert!(Value::null().is_null());
        assert!(!Value::int(0).is_null());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(Value::string("hello").to_string(), "hello");
        assert_eq!(Value::bytes(vec![0xde, 0xad]).to_string(), "0xdead");

        let date = NaiveDate::from_ymd_opt(1989, 4, 17).unwrap();
        assert_eq!(Value::date(date).to_string(), "1989-04-17");
        let ts = date.and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(Value::timestamp(ts).to_string(), "1989-04-17 00:00:00");
    }

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(7i32), Value::Integer(7));
        assert_eq!(Value::from("x"), Value::String("x".into()));
    }

    #[test]
    fn test_textual_kinds() {
        assert!(Value::string("s").is_textual());
        assert!(Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_textual());
        assert!(!Value::int(1).is_textual());
        assert!(!Value::Null.is_textual());
    }

    #[test]
    fn test_serde_round_trip() {
        let value = Value::string("Quality Assurance");
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
