//! Select items.

use std::fmt;

use tabula_common::Value;
use tabula_schema::ColumnRef;

/// An aggregate function applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    /// COUNT
    Count,
    /// SUM
    Sum,
    /// AVG
    Avg,
    /// MIN
    Min,
    /// MAX
    Max,
}

impl AggregateFunc {
    /// The SQL keyword for this function.
    pub fn keyword(&self) -> &'static str {
        match self {
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
        }
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// What a select item projects.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectExpr {
    /// A plain column reference.
    Column(ColumnRef),
    /// An aggregate function of a column.
    Aggregate {
        /// The function.
        func: AggregateFunc,
        /// The column it is applied to.
        column: ColumnRef,
    },
    /// A constant value.
    Value(Value),
}

impl SelectExpr {
    /// The column this expression references, if any.
    pub fn column(&self) -> Option<&ColumnRef> {
        match self {
            SelectExpr::Column(column) | SelectExpr::Aggregate { column, .. } => Some(column),
            SelectExpr::Value(_) => None,
        }
    }
}

/// A single projected column, aggregate, or constant in a query's
/// result shape, with an optional alias.
///
/// Aliases are carried verbatim; the renderer emits them unquoted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    expr: SelectExpr,
    alias: Option<String>,
}

impl SelectItem {
    /// Projects a column.
    pub fn column(column: &ColumnRef) -> Self {
        Self {
            expr: SelectExpr::Column(column.clone()),
            alias: None,
        }
    }

    /// Projects an aggregate of a column.
    pub fn aggregate(func: AggregateFunc, column: &ColumnRef) -> Self {
        Self {
            expr: SelectExpr::Aggregate {
                func,
                column: column.clone(),
            },
            alias: None,
        }
    }

    /// Projects a constant value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            expr: SelectExpr::Value(value.into()),
            alias: None,
        }
    }

    /// Sets the alias. An empty alias is treated as no alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = if alias.is_empty() { None } else { Some(alias) };
        self
    }

    /// The projected expression.
    pub fn expr(&self) -> &SelectExpr {
        &self.expr
    }

    /// The alias, if present.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The label a consumer should use for this item's result column:
    /// the alias when present, the column name or function form
    /// otherwise.
    pub fn label(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        match &self.expr {
            SelectExpr::Column(column) => column.name().to_string(),
            SelectExpr::Aggregate { func, column } => {
                format!("{}({})", func.keyword(), column.name())
            }
            SelectExpr::Value(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_schema::{ColumnType, Table};

    fn hire_date() -> ColumnRef {
        let table = Table::builder("EMPLOYEE")
            .column("HIRE_DATE", ColumnType::Timestamp, false)
            .build()
            .unwrap();
        table.column("HIRE_DATE").unwrap().clone()
    }

    #[test]
    fn test_label_prefers_alias() {
        let item = SelectItem::column(&hire_date()).with_alias("hire-date");
        assert_eq!(item.label(), "hire-date");
        assert_eq!(item.alias(), Some("hire-date"));
    }

    #[test]
    fn test_label_falls_back_to_column_name() {
        let item = SelectItem::column(&hire_date());
        assert_eq!(item.label(), "HIRE_DATE");
        assert_eq!(item.alias(), None);
    }

    #[test]
    fn test_empty_alias_is_no_alias() {
        let item = SelectItem::column(&hire_date()).with_alias("");
        assert_eq!(item.alias(), None);
    }

    #[test]
    fn test_aggregate_label() {
        let item = SelectItem::aggregate(AggregateFunc::Max, &hire_date());
        assert_eq!(item.label(), "MAX(HIRE_DATE)");
    }

    #[test]
    fn test_value_item_has_no_column() {
        let item = SelectItem::value(1i64);
        assert!(item.expr().column().is_none());
    }
}
