//! SQL rendering.
//!
//! Turns a [`Query`] into SQL text for one [`Dialect`]. Rendering is a
//! pure function: the same query and dialect always produce
//! byte-identical text. Identifiers are quoted unconditionally to
//! avoid reserved-word collisions; embedded quote characters are
//! escaped by doubling. Pagination is the single dialect-branching
//! point.

use tabula_common::{TabulaError, TabulaResult, Value};
use tabula_schema::ColumnRef;

use crate::dialect::{Dialect, PaginationIdiom};
use crate::from::{FromItem, JoinCondition};
use crate::predicate::{Operand, Predicate};
use crate::query::Query;
use crate::select::{SelectExpr, SelectItem};

/// Renders queries as SQL text for one dialect.
#[derive(Debug, Clone)]
pub struct SqlRenderer {
    dialect: Dialect,
}

#[derive(Debug, Default)]
struct Output {
    sql: String,
    params: Vec<Value>,
}

impl SqlRenderer {
    /// Creates a renderer for the given dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// The target dialect.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Renders the query as SQL text.
    ///
    /// With a bound-parameter dialect the text contains `?`
    /// placeholders; use [`render_with_params`] to also obtain the
    /// values in placeholder order.
    ///
    /// [`render_with_params`]: Self::render_with_params
    pub fn render(&self, query: &Query) -> TabulaResult<String> {
        self.render_with_params(query).map(|(sql, _)| sql)
    }

    /// Renders the query and collects literal operand values.
    ///
    /// With an inlining dialect the value list is empty. Explicit
    /// `Operand::Parameter` placeholders are always caller-bound and
    /// never appear in the returned list.
    pub fn render_with_params(&self, query: &Query) -> TabulaResult<(String, Vec<Value>)> {
        query.validate()?;
        let mut out = Output::default();
        self.write_query(query, &mut out)?;
        tracing::trace!(dialect = %self.dialect.name(), sql = %out.sql, "rendered query");
        Ok((out.sql, out.params))
    }

    fn write_query(&self, query: &Query, out: &mut Output) -> TabulaResult<()> {
        out.sql.push_str("SELECT ");
        self.write_pagination_prefix(query, out)?;

        if query.select.is_empty() {
            out.sql.push('*');
        } else {
            for (i, item) in query.select.iter().enumerate() {
                if i > 0 {
                    out.sql.push_str(", ");
                }
                self.write_select_item(item, out);
            }
        }

        out.sql.push_str(" FROM ");
        for (i, item) in query.from.iter().enumerate() {
            if i > 0 {
                out.sql.push_str(", ");
            }
            self.write_from_item(item, out)?;
        }

        if let Some(predicate) = &query.filter {
            out.sql.push_str(" WHERE ");
            self.write_predicate(predicate, out, false)?;
        }

        if !query.group_by.is_empty() {
            out.sql.push_str(" GROUP BY ");
            for (i, column) in query.group_by.iter().enumerate() {
                if i > 0 {
                    out.sql.push_str(", ");
                }
                out.sql.push_str(&self.qualified(column));
            }
        }

        if let Some(predicate) = &query.having {
            out.sql.push_str(" HAVING ");
            self.write_predicate(predicate, out, false)?;
        }

        if !query.order_by.is_empty() {
            out.sql.push_str(" ORDER BY ");
            for (i, item) in query.order_by.iter().enumerate() {
                if i > 0 {
                    out.sql.push_str(", ");
                }
                self.write_expr(&item.expr, out);
                out.sql.push(' ');
                out.sql.push_str(item.direction.keyword());
            }
        }

        self.write_pagination_suffix(query, out)
    }

    /// Offset derived from the 1-based first row.
    fn offset(query: &Query) -> u64 {
        query.first_row.map(|first| first - 1).unwrap_or(0)
    }

    fn unsupported_pagination(&self, reason: &str) -> TabulaError {
        TabulaError::UnsupportedPagination {
            dialect: self.dialect.name().to_string(),
            reason: reason.to_string(),
        }
    }

    fn write_pagination_prefix(&self, query: &Query, out: &mut Output) -> TabulaResult<()> {
        let offset = Self::offset(query);
        match self.dialect.pagination() {
            PaginationIdiom::Top => {
                if offset > 0 {
                    return Err(
                        self.unsupported_pagination("TOP cannot express a first-row offset")
                    );
                }
                if let Some(max_rows) = query.max_rows {
                    out.sql.push_str(&format!("TOP {} ", max_rows));
                }
            }
            PaginationIdiom::FirstSkip => {
                if let Some(max_rows) = query.max_rows {
                    out.sql.push_str(&format!("FIRST {} ", max_rows));
                }
                if offset > 0 {
                    out.sql.push_str(&format!("SKIP {} ", offset));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn write_pagination_suffix(&self, query: &Query, out: &mut Output) -> TabulaResult<()> {
        let offset = Self::offset(query);
        match self.dialect.pagination() {
            PaginationIdiom::LimitOffset => {
                if let Some(max_rows) = query.max_rows {
                    out.sql.push_str(&format!(" LIMIT {}", max_rows));
                }
                if offset > 0 {
                    out.sql.push_str(&format!(" OFFSET {}", offset));
                }
            }
            PaginationIdiom::OffsetFetch => {
                if query.max_rows.is_some() || offset > 0 {
                    out.sql.push_str(&format!(" OFFSET {} ROWS", offset));
                }
                if let Some(max_rows) = query.max_rows {
                    out.sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", max_rows));
                }
            }
            PaginationIdiom::None => {
                if query.max_rows.is_some() || offset > 0 {
                    return Err(self.unsupported_pagination("dialect has no pagination clause"));
                }
            }
            PaginationIdiom::Top | PaginationIdiom::FirstSkip => {}
        }
        Ok(())
    }

    fn write_select_item(&self, item: &SelectItem, out: &mut Output) {
        self.write_expr(item.expr(), out);
        if let Some(alias) = item.alias() {
            // Aliases are emitted verbatim and unquoted.
            out.sql.push_str(" AS ");
            out.sql.push_str(alias);
        }
    }

    fn write_expr(&self, expr: &SelectExpr, out: &mut Output) {
        match expr {
            SelectExpr::Column(column) => out.sql.push_str(&self.qualified(column)),
            SelectExpr::Aggregate { func, column } => {
                out.sql.push_str(func.keyword());
                out.sql.push('(');
                out.sql.push_str(&self.qualified(column));
                out.sql.push(')');
            }
            SelectExpr::Value(value) => out.sql.push_str(&Self::literal(value)),
        }
    }

    fn write_from_item(&self, item: &FromItem, out: &mut Output) -> TabulaResult<()> {
        match item {
            FromItem::Table(table) => {
                out.sql.push_str(&self.quote(table.name()));
            }
            FromItem::SubQuery { query, alias } => {
                query.validate()?;
                out.sql.push('(');
                self.write_query(query, out)?;
                out.sql.push_str(") ");
                out.sql.push_str(alias);
            }
            FromItem::Join {
                join_type,
                left,
                right,
                condition,
            } => {
                self.write_from_item(left, out)?;
                out.sql.push(' ');
                out.sql.push_str(join_type.keyword());
                out.sql.push_str(" JOIN ");
                self.write_from_item(right, out)?;
                out.sql.push_str(" ON ");
                match condition {
                    JoinCondition::Relationship(relationship) => {
                        for (i, (primary, foreign)) in relationship.column_pairs().enumerate() {
                            if i > 0 {
                                out.sql.push_str(" AND ");
                            }
                            out.sql.push_str(&self.qualified(primary));
                            out.sql.push_str(" = ");
                            out.sql.push_str(&self.qualified(foreign));
                        }
                    }
                    JoinCondition::Expr(predicate) => {
                        self.write_predicate(predicate, out, false)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write_predicate(
        &self,
        predicate: &Predicate,
        out: &mut Output,
        nested: bool,
    ) -> TabulaResult<()> {
        match predicate {
            Predicate::Compare {
                column,
                op,
                operand,
            } => {
                out.sql.push_str(&self.qualified(column));
                out.sql.push(' ');
                out.sql.push_str(op.sql_symbol());
                out.sql.push(' ');
                match operand {
                    Operand::Column(other) => out.sql.push_str(&self.qualified(other)),
                    Operand::Value(value) => {
                        if self.dialect.inlines_literals() {
                            out.sql.push_str(&Self::literal(value));
                        } else {
                            out.sql.push('?');
                            out.params.push(value.clone());
                        }
                    }
                    Operand::Parameter => out.sql.push('?'),
                }
            }
            Predicate::IsNull { column, negated } => {
                out.sql.push_str(&self.qualified(column));
                out.sql.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Predicate::And(children) | Predicate::Or(children) => {
                if children.is_empty() {
                    return Err(TabulaError::invalid_query("empty predicate group"));
                }
                let separator = match predicate {
                    Predicate::And(_) => " AND ",
                    _ => " OR ",
                };
                if nested {
                    out.sql.push('(');
                }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.sql.push_str(separator);
                    }
                    self.write_predicate(child, out, true)?;
                }
                if nested {
                    out.sql.push(')');
                }
            }
        }
        Ok(())
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote(&self, identifier: &str) -> String {
        let quote = self.dialect.quote_char();
        let mut quoted = String::with_capacity(identifier.len() + 2);
        quoted.push(quote);
        for c in identifier.chars() {
            quoted.push(c);
            if c == quote {
                quoted.push(quote);
            }
        }
        quoted.push(quote);
        quoted
    }

    fn qualified(&self, column: &ColumnRef) -> String {
        format!("{}.{}", self.quote(column.table()), self.quote(column.name()))
    }

    /// Renders an inlined literal, quoted and escaped by value kind.
    fn literal(value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Bytes(b) => {
                let mut hex = String::with_capacity(b.len() * 2);
                for byte in b {
                    hex.push_str(&format!("{:02x}", byte));
                }
                format!("X'{}'", hex)
            }
            Value::Date(d) => format!("DATE '{}'", d.format("%Y-%m-%d")),
            Value::Time(t) => format!("TIME '{}'", t.format("%H:%M:%S")),
            Value::Timestamp(ts) => format!("TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}
