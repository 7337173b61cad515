//! Execution facade.

use tabula_common::TabulaResult;
use tabula_query::{Dialect, Query, SqlRenderer};
use tabula_schema::SchemaRef;

use crate::cursor::{Connection, StyleSupplier};
use crate::dataset::DataSet;

/// Binds a schema, a connection, and one dialect together.
///
/// A data context renders queries for its dialect and executes them
/// through the connection collaborator, wrapping the resulting cursor
/// as a [`DataSet`]. Repeated execution of an identical query
/// re-renders and re-executes from scratch; the core caches nothing.
pub struct DataContext {
    schema: SchemaRef,
    connection: Box<dyn Connection>,
    renderer: SqlRenderer,
}

impl DataContext {
    /// Creates a context over a published schema and a live
    /// connection.
    pub fn new(schema: SchemaRef, connection: Box<dyn Connection>, dialect: Dialect) -> Self {
        Self {
            schema,
            connection,
            renderer: SqlRenderer::new(dialect),
        }
    }

    /// The schema queries are built against.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// The renderer used for this context's dialect.
    pub fn renderer(&self) -> &SqlRenderer {
        &self.renderer
    }

    /// Renders the query without executing it.
    pub fn render(&self, query: &Query) -> TabulaResult<String> {
        self.renderer.render(query)
    }

    /// Executes a query and returns a forward-only streaming dataset.
    pub fn execute(&mut self, query: &Query) -> TabulaResult<DataSet> {
        let cursor = self.run(query)?;
        Ok(DataSet::streaming(query.select_items().to_vec(), cursor))
    }

    /// Executes a query and materializes the whole result in memory.
    pub fn execute_materialized(&mut self, query: &Query) -> TabulaResult<DataSet> {
        let cursor = self.run(query)?;
        DataSet::materialized(query.select_items().to_vec(), cursor)
    }

    /// Executes a query with a style supplier attached to the result.
    pub fn execute_styled(
        &mut self,
        query: &Query,
        styles: Box<dyn StyleSupplier>,
    ) -> TabulaResult<DataSet> {
        Ok(self.execute(query)?.with_styles(styles))
    }

    fn run(&mut self, query: &Query) -> TabulaResult<Box<dyn crate::cursor::RowCursor>> {
        let (sql, params) = self.renderer.render_with_params(query)?;
        tracing::debug!(
            dialect = %self.renderer.dialect().name(),
            params = params.len(),
            %sql,
            "executing query"
        );
        self.connection.execute(&sql, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_common::{TabulaError, Value};
    use tabula_schema::{ColumnType, Schema, Table};

    use crate::cursor::{MemoryCursor, RowCursor};

    /// A stub backend that records the last statement it was handed.
    struct StubConnection {
        rows: Vec<Vec<Value>>,
        last_sql: std::rc::Rc<std::cell::RefCell<String>>,
    }

    impl Connection for StubConnection {
        fn execute(&mut self, sql: &str, _params: &[Value]) -> TabulaResult<Box<dyn RowCursor>> {
            *self.last_sql.borrow_mut() = sql.to_string();
            Ok(Box::new(MemoryCursor::new(self.rows.clone())))
        }
    }

    struct FailingConnection;

    impl Connection for FailingConnection {
        fn execute(&mut self, _sql: &str, _params: &[Value]) -> TabulaResult<Box<dyn RowCursor>> {
            Err(TabulaError::execution(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "backend went away",
            )))
        }
    }

    fn schema() -> SchemaRef {
        let employee = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .column("LAST_NAME", ColumnType::Varchar(Some(20)), false)
            .build()
            .unwrap();
        Schema::builder("employee").table(employee).build().unwrap()
    }

    #[test]
    fn test_execute_streams_rows_shaped_by_select_items() {
        let schema = schema();
        let employee = schema.table("EMPLOYEE").unwrap().clone();
        let last_sql = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
        let connection = StubConnection {
            rows: vec![vec![Value::int(2), Value::string("Nelson")]],
            last_sql: last_sql.clone(),
        };
        let mut context = DataContext::new(schema, Box::new(connection), Dialect::generic());

        let mut query = Query::new();
        query
            .from_table(&employee)
            .select_column(employee.column("EMP_NO").unwrap())
            .select_column(employee.column("LAST_NAME").unwrap());
        let mut data = context.execute(&query).unwrap();

        assert_eq!(
            *last_sql.borrow(),
            "SELECT \"EMPLOYEE\".\"EMP_NO\", \"EMPLOYEE\".\"LAST_NAME\" FROM \"EMPLOYEE\""
        );
        let row = data.next_row().unwrap().unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some(&Value::string("Nelson")));
        assert!(data.next_row().unwrap().is_none());
    }

    #[test]
    fn test_backend_failure_surfaces_as_execution_error() {
        let schema = schema();
        let employee = schema.table("EMPLOYEE").unwrap().clone();
        let mut context =
            DataContext::new(schema, Box::new(FailingConnection), Dialect::generic());
        let mut query = Query::new();
        query.from_table(&employee);
        let err = context.execute(&query).unwrap_err();
        assert!(matches!(err, TabulaError::Execution { .. }));
    }
}
