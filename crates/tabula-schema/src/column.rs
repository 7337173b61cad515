//! Column metadata.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared reference to a column.
///
/// Columns are owned by their table and referenced (never owned) by
/// select items, predicates, and relationships.
pub type ColumnRef = Arc<Column>;

/// Declared SQL type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Boolean type.
    Boolean,
    /// 8-bit signed integer.
    TinyInt,
    /// 16-bit signed integer.
    SmallInt,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    BigInt,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Arbitrary precision decimal.
    Decimal {
        /// Total number of digits.
        precision: Option<u8>,
        /// Digits after the decimal point.
        scale: Option<u8>,
    },
    /// Fixed-length string.
    Char(Option<u32>),
    /// Variable-length string.
    Varchar(Option<u32>),
    /// Unlimited text.
    Text,
    /// Binary data.
    Blob,
    /// Date (year, month, day).
    Date,
    /// Time (hour, minute, second).
    Time,
    /// Timestamp (date + time).
    Timestamp,
}

impl ColumnType {
    /// Returns true for numeric types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::TinyInt
                | ColumnType::SmallInt
                | ColumnType::Int
                | ColumnType::BigInt
                | ColumnType::Float
                | ColumnType::Double
                | ColumnType::Decimal { .. }
        )
    }

    /// Returns true for character types.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ColumnType::Char(_) | ColumnType::Varchar(_) | ColumnType::Text
        )
    }

    /// Returns true for date and time types.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ColumnType::Date | ColumnType::Time | ColumnType::Timestamp
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => write!(f, "BOOLEAN"),
            ColumnType::TinyInt => write!(f, "TINYINT"),
            ColumnType::SmallInt => write!(f, "SMALLINT"),
            ColumnType::Int => write!(f, "INT"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => write!(f, "DECIMAL({},{})", p, s),
                (Some(p), None) => write!(f, "DECIMAL({})", p),
                _ => write!(f, "DECIMAL"),
            },
            ColumnType::Char(len) => match len {
                Some(n) => write!(f, "CHAR({})", n),
                None => write!(f, "CHAR"),
            },
            ColumnType::Varchar(len) => match len {
                Some(n) => write!(f, "VARCHAR({})", n),
                None => write!(f, "VARCHAR"),
            },
            ColumnType::Text => write!(f, "TEXT"),
            ColumnType::Blob => write!(f, "BLOB"),
            ColumnType::Date => write!(f, "DATE"),
            ColumnType::Time => write!(f, "TIME"),
            ColumnType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

/// A column in a table.
///
/// A column knows its owning table by name and its ordinal position
/// within that table. Instances are created through [`TableBuilder`]
/// which stamps both.
///
/// [`TableBuilder`]: crate::TableBuilder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    ordinal: usize,
    table: String,
    remarks: Option<String>,
}

impl Column {
    pub(crate) fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        nullable: bool,
        ordinal: usize,
        table: impl Into<String>,
        remarks: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable,
            ordinal,
            table: table.into(),
            remarks,
        }
    }

    /// The column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Whether the column allows NULL values.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Zero-based position of the column within its table.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Name of the owning table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Free-form remarks, if any.
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_predicates() {
        assert!(ColumnType::Int.is_numeric());
        assert!(ColumnType::Decimal {
            precision: Some(10),
            scale: Some(2)
        }
        .is_numeric());
        assert!(ColumnType::Varchar(Some(255)).is_text());
        assert!(ColumnType::Timestamp.is_temporal());
        assert!(!ColumnType::Blob.is_text());
    }

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Int.to_string(), "INT");
        assert_eq!(ColumnType::Varchar(Some(30)).to_string(), "VARCHAR(30)");
        assert_eq!(
            ColumnType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .to_string(),
            "DECIMAL(10,2)"
        );
    }

    #[test]
    fn test_column_display() {
        let column = Column::new("EMP_NO", ColumnType::Int, false, 0, "EMPLOYEE", None);
        assert_eq!(column.to_string(), "EMPLOYEE.EMP_NO");
        assert_eq!(column.ordinal(), 0);
        assert_eq!(column.table(), "EMPLOYEE");
    }
}
