//! Core error types.
//!
//! Provides error types for all metadata, query, style, rendering, and
//! result operations.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors.
///
/// These codes can be used for programmatic error handling and
/// are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // General errors (0x0000 - 0x00FF)
    /// Unknown or unspecified error.
    Unknown = 0x0000,
    /// Operation not supported.
    NotSupported = 0x0001,

    // Metadata errors (0x0100 - 0x01FF)
    /// Table not found.
    TableNotFound = 0x0100,
    /// Column not found.
    ColumnNotFound = 0x0101,
    /// Relationship not found.
    RelationshipNotFound = 0x0102,
    /// Relationship construction violated an invariant.
    InvalidRelationship = 0x0103,
    /// Schema construction violated an invariant.
    InvalidSchema = 0x0104,

    // Query errors (0x0200 - 0x02FF)
    /// Query is structurally invalid.
    InvalidQuery = 0x0200,
    /// Join is invalid for the given relationship or sides.
    InvalidJoin = 0x0201,
    /// Column is not bound to any table in the query.
    UnboundColumn = 0x0202,

    // Style errors (0x0300 - 0x03FF)
    /// Style construction arguments were out of range.
    InvalidStyle = 0x0300,

    // Rendering errors (0x0400 - 0x04FF)
    /// Dialect cannot express the requested pagination.
    UnsupportedPagination = 0x0400,

    // Result errors (0x0500 - 0x05FF)
    /// Result column count did not match the query shape.
    ResultShape = 0x0500,
    /// Backend execution failed.
    Execution = 0x0501,
    /// Row index past the end of a materialized dataset.
    RowOutOfRange = 0x0502,
}

impl ErrorCode {
    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match (*self as u16) >> 8 {
            0x00 => "General",
            0x01 => "Metadata",
            0x02 => "Query",
            0x03 => "Style",
            0x04 => "Rendering",
            0x05 => "Result",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The main error type for Tabula.
///
/// This enum covers all errors that can occur while building schema
/// metadata, constructing queries and styles, rendering SQL, and reading
/// results. Each variant carries enough context to be actionable without
/// re-deriving state.
///
/// # Example
///
/// ```rust
/// use tabula_common::error::{TabulaError, TabulaResult};
///
/// fn lookup(name: &str) -> TabulaResult<()> {
///     Err(TabulaError::TableNotFound {
///         schema: "employee".into(),
///         table: name.into(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
pub enum TabulaError {
    // ==========================================================================
    // General Errors
    // ==========================================================================
    /// Operation not supported by this object.
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation.
        operation: String,
    },

    // ==========================================================================
    // Metadata Errors
    // ==========================================================================
    /// Table not found during a metadata lookup.
    #[error("table '{table}' not found in schema '{schema}'")]
    TableNotFound {
        /// The schema that was searched.
        schema: String,
        /// The missing table.
        table: String,
    },

    /// Column not found during a metadata lookup.
    #[error("column '{column}' not found in table '{table}'")]
    ColumnNotFound {
        /// The missing column.
        column: String,
        /// The table that was searched.
        table: String,
    },

    /// No relationship exists between two tables.
    #[error("no relationship between tables '{left}' and '{right}'")]
    RelationshipNotFound {
        /// One side of the requested pair.
        left: String,
        /// The other side of the requested pair.
        right: String,
    },

    /// Relationship construction violated an invariant.
    #[error("invalid relationship: {reason}")]
    InvalidRelationship {
        /// What was violated.
        reason: String,
    },

    /// Schema construction violated an invariant.
    #[error("invalid schema: {reason}")]
    InvalidSchema {
        /// What was violated.
        reason: String,
    },

    // ==========================================================================
    // Query Errors
    // ==========================================================================
    /// The query is structurally invalid.
    #[error("invalid query: {reason}")]
    InvalidQuery {
        /// What was violated.
        reason: String,
    },

    /// A join could not be formed from the given sides and condition.
    #[error("invalid join: {reason}")]
    InvalidJoin {
        /// What was violated.
        reason: String,
    },

    /// A referenced column does not belong to any table in the query.
    #[error("column '{column}' of table '{table}' is not bound to any FROM item")]
    UnboundColumn {
        /// The unbound column.
        column: String,
        /// The table the column belongs to.
        table: String,
    },

    // ==========================================================================
    // Style Errors
    // ==========================================================================
    /// Style construction arguments were out of range.
    #[error("invalid style: {reason}")]
    InvalidStyle {
        /// What was violated.
        reason: String,
    },

    // ==========================================================================
    // Rendering Errors
    // ==========================================================================
    /// The dialect cannot express the requested pagination.
    #[error("dialect '{dialect}' cannot express pagination: {reason}")]
    UnsupportedPagination {
        /// The target dialect.
        dialect: String,
        /// What was requested.
        reason: String,
    },

    // ==========================================================================
    // Result Errors
    // ==========================================================================
    /// The cursor yielded a row whose arity does not match the query.
    #[error("result shape mismatch: expected {expected} columns, got {actual}")]
    ResultShape {
        /// Columns expected from the select items.
        expected: usize,
        /// Columns actually produced by the cursor.
        actual: usize,
    },

    /// The backend failed while executing a statement.
    ///
    /// The original cause is preserved for diagnostics and is never
    /// interpreted by the core.
    #[error("query execution failed: {source}")]
    Execution {
        /// The backend-specific cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A row index was past the end of a materialized dataset.
    #[error("row index {index} is out of range for a dataset of {count} rows")]
    RowOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of rows in the dataset.
        count: usize,
    },
}

impl TabulaError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotSupported { .. } => ErrorCode::NotSupported,
            Self::TableNotFound { .. } => ErrorCode::TableNotFound,
            Self::ColumnNotFound { .. } => ErrorCode::ColumnNotFound,
            Self::RelationshipNotFound { .. } => ErrorCode::RelationshipNotFound,
            Self::InvalidRelationship { .. } => ErrorCode::InvalidRelationship,
            Self::InvalidSchema { .. } => ErrorCode::InvalidSchema,
            Self::InvalidQuery { .. } => ErrorCode::InvalidQuery,
            Self::InvalidJoin { .. } => ErrorCode::InvalidJoin,
            Self::UnboundColumn { .. } => ErrorCode::UnboundColumn,
            Self::InvalidStyle { .. } => ErrorCode::InvalidStyle,
            Self::UnsupportedPagination { .. } => ErrorCode::UnsupportedPagination,
            Self::ResultShape { .. } => ErrorCode::ResultShape,
            Self::Execution { .. } => ErrorCode::Execution,
            Self::RowOutOfRange { .. } => ErrorCode::RowOutOfRange,
        }
    }

    /// Returns true if this error is caller misuse caught at build or
    /// render time. Such errors never corrupt shared state and are always
    /// recoverable by the caller.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuery { .. }
                | Self::InvalidJoin { .. }
                | Self::UnboundColumn { .. }
                | Self::InvalidStyle { .. }
                | Self::InvalidRelationship { .. }
                | Self::InvalidSchema { .. }
        )
    }

    /// Creates a not-supported error.
    #[must_use]
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported {
            operation: operation.into(),
        }
    }

    /// Creates an invalid-query error.
    #[must_use]
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Creates an invalid-join error.
    #[must_use]
    pub fn invalid_join(reason: impl Into<String>) -> Self {
        Self::InvalidJoin {
            reason: reason.into(),
        }
    }

    /// Creates an invalid-style error.
    #[must_use]
    pub fn invalid_style(reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            reason: reason.into(),
        }
    }

    /// Creates an invalid-relationship error.
    #[must_use]
    pub fn invalid_relationship(reason: impl Into<String>) -> Self {
        Self::InvalidRelationship {
            reason: reason.into(),
        }
    }

    /// Creates an invalid-schema error.
    #[must_use]
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Wraps an opaque backend failure.
    #[must_use]
    pub fn execution(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Execution {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = TabulaError::TableNotFound {
            schema: "employee".into(),
            table: "MISSING".into(),
        };
        assert_eq!(err.code(), ErrorCode::TableNotFound);
        assert_eq!(err.code().category(), "Metadata");
    }

    #[test]
    fn test_error_display() {
        let err = TabulaError::UnboundColumn {
            column: "HIRE_DATE".into(),
            table: "EMPLOYEE".into(),
        };
        assert_eq!(
            err.to_string(),
            "column 'HIRE_DATE' of table 'EMPLOYEE' is not bound to any FROM item"
        );
    }

    #[test]
    fn test_usage_errors() {
        assert!(TabulaError::invalid_query("no from items").is_usage_error());
        assert!(TabulaError::invalid_style("bad channel").is_usage_error());
        assert!(!TabulaError::not_supported("random access").is_usage_error());
    }

    #[test]
    fn test_code_categories() {
        assert_eq!(ErrorCode::InvalidStyle.category(), "Style");
        assert_eq!(ErrorCode::UnsupportedPagination.category(), "Rendering");
        assert_eq!(ErrorCode::ResultShape.category(), "Result");
        assert_eq!(ErrorCode::Execution.as_u16(), 0x0501);
    }

    #[test]
    fn test_execution_preserves_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "socket closed");
        let err = TabulaError::execution(io_err);
        assert_eq!(err.code(), ErrorCode::Execution);
        let source = std::error::Error::source(&err).expect("cause preserved");
        assert!(source.to_string().contains("socket closed"));
    }
}
