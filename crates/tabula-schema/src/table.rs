//! Table metadata.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tabula_common::{TabulaError, TabulaResult};

use crate::column::{Column, ColumnRef, ColumnType};

/// Shared reference to a table.
pub type TableRef = Arc<Table>;

/// Kind of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableType {
    /// A base table.
    Table,
    /// A view.
    View,
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableType::Table => write!(f, "TABLE"),
            TableType::View => write!(f, "VIEW"),
        }
    }
}

/// A table (or view) in a schema.
///
/// A table owns its columns; column lifetime is bound to the table's.
/// Columns are kept in stable ordinal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    table_type: TableType,
    remarks: Option<String>,
    columns: Vec<ColumnRef>,
}

impl Table {
    /// Starts building a table with the given name.
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name)
    }

    /// The table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table kind.
    pub fn table_type(&self) -> TableType {
        self.table_type
    }

    /// Free-form remarks, if any.
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// The columns of this table in ordinal order.
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    /// Fetches a column by name.
    pub fn column(&self, name: &str) -> TabulaResult<&ColumnRef> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TabulaError::ColumnNotFound {
                column: name.to_string(),
                table: self.name.clone(),
            })
    }

    /// Fetches a column by ordinal position.
    pub fn column_at(&self, ordinal: usize) -> TabulaResult<&ColumnRef> {
        self.columns
            .get(ordinal)
            .ok_or_else(|| TabulaError::ColumnNotFound {
                column: format!("#{}", ordinal),
                table: self.name.clone(),
            })
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.table_type)
    }
}

/// Builder for [`Table`].
///
/// Stamps each column with its ordinal position and owning-table name,
/// and rejects duplicate column names.
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    table_type: TableType,
    remarks: Option<String>,
    columns: Vec<(String, ColumnType, bool, Option<String>)>,
}

impl TableBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_type: TableType::Table,
            remarks: None,
            columns: Vec::new(),
        }
    }

    /// Sets the table kind.
    pub fn table_type(mut self, table_type: TableType) -> Self {
        self.table_type = table_type;
        self
    }

    /// Sets the remarks.
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Appends a column. Ordinals follow insertion order.
    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType, nullable: bool) -> Self {
        self.columns.push((name.into(), column_type, nullable, None));
        self
    }

    /// Appends a column with remarks.
    pub fn column_with_remarks(
        mut self,
        name: impl Into<String>,
        column_type: ColumnType,
        nullable: bool,
        remarks: impl Into<String>,
    ) -> Self {
        self.columns
            .push((name.into(), column_type, nullable, Some(remarks.into())));
        self
    }

    /// Validates and publishes the table.
    pub fn build(self) -> TabulaResult<TableRef> {
        for (i, (name, ..)) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|(other, ..)| other == name) {
                return Err(TabulaError::invalid_schema(format!(
                    "duplicate column '{}' in table '{}'",
                    name, self.name
                )));
            }
        }
        let columns = self
            .columns
            .into_iter()
            .enumerate()
            .map(|(ordinal, (name, column_type, nullable, remarks))| {
                Arc::new(Column::new(
                    name,
                    column_type,
                    nullable,
                    ordinal,
                    self.name.clone(),
                    remarks,
                ))
            })
            .collect();
        Ok(Arc::new(Table {
            name: self.name,
            table_type: self.table_type,
            remarks: self.remarks,
            columns,
        }))
    }
}
