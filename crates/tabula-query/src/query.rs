//! The query model.

use std::collections::HashSet;
use std::fmt;

use tabula_common::{TabulaError, TabulaResult};
use tabula_schema::{ColumnRef, TableRef};

use crate::dialect::Dialect;
use crate::from::FromItem;
use crate::predicate::Predicate;
use crate::render::SqlRenderer;
use crate::select::{SelectExpr, SelectItem};

/// Sort order of an ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// ASC
    Ascending,
    /// DESC
    Descending,
}

impl SortDirection {
    /// The SQL keyword for this direction.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A single ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub(crate) expr: SelectExpr,
    pub(crate) direction: SortDirection,
}

impl OrderByItem {
    /// Orders by an expression in the given direction.
    pub fn new(expr: SelectExpr, direction: SortDirection) -> Self {
        Self { expr, direction }
    }

    /// Orders by a column, ascending.
    pub fn asc(column: &ColumnRef) -> Self {
        Self::new(SelectExpr::Column(column.clone()), SortDirection::Ascending)
    }

    /// Orders by a column, descending.
    pub fn desc(column: &ColumnRef) -> Self {
        Self::new(SelectExpr::Column(column.clone()), SortDirection::Descending)
    }

    /// The ordered expression.
    pub fn expr(&self) -> &SelectExpr {
        &self.expr
    }

    /// The sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// A mutable specification of a SELECT statement.
///
/// A query accumulates from items, select items, filters, grouping,
/// ordering, and an optional row window through a fluent API; every
/// list preserves insertion order, and that order is emitted verbatim
/// by the renderer. A query has no identity beyond its contents.
///
/// Building is not thread-safe across concurrent mutators of the same
/// instance; concurrent callers build distinct queries.
///
/// # Example
///
/// ```ignore
/// let mut query = Query::new();
/// query
///     .from_table(&employee)
///     .select_column(&hire_date)
///     .max_rows(10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub(crate) from: Vec<FromItem>,
    pub(crate) select: Vec<SelectItem>,
    pub(crate) filter: Option<Predicate>,
    pub(crate) group_by: Vec<ColumnRef>,
    pub(crate) having: Option<Predicate>,
    pub(crate) order_by: Vec<OrderByItem>,
    pub(crate) max_rows: Option<u64>,
    pub(crate) first_row: Option<u64>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a from item.
    pub fn from(&mut self, item: FromItem) -> &mut Self {
        self.from.push(item);
        self
    }

    /// Appends a bare table as a from item.
    pub fn from_table(&mut self, table: &TableRef) -> &mut Self {
        self.from(FromItem::table(table))
    }

    /// Appends a select item.
    pub fn select(&mut self, item: SelectItem) -> &mut Self {
        self.select.push(item);
        self
    }

    /// Appends a plain column projection.
    pub fn select_column(&mut self, column: &ColumnRef) -> &mut Self {
        self.select(SelectItem::column(column))
    }

    /// Adds a filter predicate. Repeated calls accumulate with AND.
    pub fn filter(&mut self, predicate: Predicate) -> &mut Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Predicate::And(vec![existing, predicate]),
            None => predicate,
        });
        self
    }

    /// Appends a grouping column.
    pub fn group_by(&mut self, column: &ColumnRef) -> &mut Self {
        self.group_by.push(column.clone());
        self
    }

    /// Adds a having predicate. Repeated calls accumulate with AND.
    pub fn having(&mut self, predicate: Predicate) -> &mut Self {
        self.having = Some(match self.having.take() {
            Some(existing) => Predicate::And(vec![existing, predicate]),
            None => predicate,
        });
        self
    }

    /// Appends an ordering item.
    pub fn order_by(&mut self, item: OrderByItem) -> &mut Self {
        self.order_by.push(item);
        self
    }

    /// Caps the number of returned rows.
    pub fn max_rows(&mut self, max_rows: u64) -> &mut Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Sets the 1-based number of the first row to return.
    pub fn first_row(&mut self, first_row: u64) -> &mut Self {
        self.first_row = Some(first_row);
        self
    }

    /// The from items, in insertion order.
    pub fn from_items(&self) -> &[FromItem] {
        &self.from
    }

    /// The select items, in insertion order.
    pub fn select_items(&self) -> &[SelectItem] {
        &self.select
    }

    /// Every base-table name reachable from the from items.
    pub fn bound_tables(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        for item in &self.from {
            item.collect_table_names(&mut names);
        }
        names
    }

    /// Checks the structural invariants that must hold before the
    /// query can be rendered: at least one from item, a 1-based first
    /// row, and every referenced column bound to a table present in
    /// some from item.
    pub fn validate(&self) -> TabulaResult<()> {
        if self.from.is_empty() {
            return Err(TabulaError::invalid_query(
                "a query must reference at least one table",
            ));
        }
        if self.first_row == Some(0) {
            return Err(TabulaError::invalid_query("first row is 1-based"));
        }

        let bound = self.bound_tables();
        let check = |column: &ColumnRef| -> TabulaResult<()> {
            if bound.contains(column.table()) {
                Ok(())
            } else {
                Err(TabulaError::UnboundColumn {
                    column: column.name().to_string(),
                    table: column.table().to_string(),
                })
            }
        };

        for item in &self.select {
            if let Some(column) = item.expr().column() {
                check(column)?;
            }
        }
        for column in &self.group_by {
            check(column)?;
        }
        for item in &self.order_by {
            if let Some(column) = item.expr.column() {
                check(column)?;
            }
        }
        for predicate in [&self.filter, &self.having].into_iter().flatten() {
            let mut result = Ok(());
            predicate.for_each_column(&mut |column| {
                if result.is_ok() {
                    result = check(column);
                }
            });
            result?;
        }
        Ok(())
    }
}

impl fmt::Display for Query {
    /// A query prints as its canonical SQL text in the generic dialect.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match SqlRenderer::new(Dialect::generic()).render(self) {
            Ok(sql) => write!(f, "{}", sql),
            Err(err) => write!(f, "<invalid query: {}>", err),
        }
    }
}
