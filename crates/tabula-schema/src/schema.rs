//! Schema metadata.

use std::fmt;
use std::sync::Arc;

use tabula_common::{CatalogConfig, TabulaError, TabulaResult};

use crate::relationship::{Relationship, RelationshipIndex};
use crate::table::{Table, TableRef};

/// Shared reference to a published schema.
///
/// Once built, the whole graph is immutable and safe for concurrent
/// read access without locking.
pub type SchemaRef = Arc<Schema>;

/// A named, ordered collection of tables plus their relationships.
#[derive(Debug)]
pub struct Schema {
    name: String,
    tables: Vec<TableRef>,
    relationships: Vec<Arc<Relationship>>,
    index: RelationshipIndex,
    config: CatalogConfig,
}

impl Schema {
    /// Starts building a schema with the given name.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// The schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tables of this schema, in declaration order.
    pub fn tables(&self) -> &[TableRef] {
        &self.tables
    }

    /// Fetches a table by name, honoring the configured matching policy.
    pub fn table(&self, name: &str) -> TabulaResult<&TableRef> {
        self.tables
            .iter()
            .find(|t| self.config.name_matching.matches(t.name(), name))
            .ok_or_else(|| TabulaError::TableNotFound {
                schema: self.name.clone(),
                table: name.to_string(),
            })
    }

    /// All relationships, in declaration order.
    pub fn relationships(&self) -> &[Arc<Relationship>] {
        &self.relationships
    }

    /// All relationships between two tables, in either direction.
    pub fn relationships_between(&self, a: &Table, b: &Table) -> &[Arc<Relationship>] {
        self.index.between(a.name(), b.name())
    }

    /// The first relationship between two tables.
    ///
    /// Fails with a relationship-not-found error when none exists.
    pub fn relationship(&self, a: &Table, b: &Table) -> TabulaResult<Arc<Relationship>> {
        self.relationships_between(a, b)
            .first()
            .cloned()
            .ok_or_else(|| TabulaError::RelationshipNotFound {
                left: a.name().to_string(),
                right: b.name().to_string(),
            })
    }

    /// The lookup configuration this schema was published with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema[{}, {} tables]", self.name, self.tables.len())
    }
}

/// Builder for [`Schema`].
///
/// Enforces table-name uniqueness (under the configured matching
/// policy) and requires relationships to reference tables present in
/// the schema. `build` publishes the graph as an immutable [`SchemaRef`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    tables: Vec<TableRef>,
    relationships: Vec<Relationship>,
    config: CatalogConfig,
}

impl SchemaBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            relationships: Vec::new(),
            config: CatalogConfig::default(),
        }
    }

    /// Sets the lookup configuration.
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a table.
    pub fn table(mut self, table: TableRef) -> Self {
        self.tables.push(table);
        self
    }

    /// Adds a relationship.
    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Validates and publishes the schema.
    pub fn build(self) -> TabulaResult<SchemaRef> {
        for (i, table) in self.tables.iter().enumerate() {
            if self.tables[..i]
                .iter()
                .any(|other| self.config.name_matching.matches(other.name(), table.name()))
            {
                return Err(TabulaError::invalid_schema(format!(
                    "duplicate table '{}' in schema '{}'",
                    table.name(),
                    self.name
                )));
            }
        }
        let table_known = |name: &str| self.tables.iter().any(|t| t.name() == name);
        for relationship in &self.relationships {
            for side in [
                relationship.primary_table().name(),
                relationship.foreign_table().name(),
            ] {
                if !table_known(side) {
                    return Err(TabulaError::invalid_schema(format!(
                        "relationship references table '{}' which is not in schema '{}'",
                        side, self.name
                    )));
                }
            }
        }

        let relationships: Vec<Arc<Relationship>> =
            self.relationships.into_iter().map(Arc::new).collect();
        let mut index = RelationshipIndex::default();
        for relationship in &relationships {
            index.insert(relationship.clone());
        }
        Ok(Arc::new(Schema {
            name: self.name,
            tables: self.tables,
            relationships,
            index,
            config: self.config,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn employee_schema() -> SchemaRef {
        let employee = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .column("DEPT_NO", ColumnType::Char(Some(3)), false)
            .build()
            .unwrap();
        let department = Table::builder("DEPARTMENT")
            .column("DEPT_NO", ColumnType::Char(Some(3)), false)
            .column("DEPARTMENT", ColumnType::Varchar(Some(25)), false)
            .column("MNGR_NO", ColumnType::Int, true)
            .build()
            .unwrap();
        let manages = Relationship::new(
            &employee,
            vec![employee.column("EMP_NO").unwrap().clone()],
            &department,
            vec![department.column("MNGR_NO").unwrap().clone()],
        )
        .unwrap();
        let works_in = Relationship::new(
            &department,
            vec![department.column("DEPT_NO").unwrap().clone()],
            &employee,
            vec![employee.column("DEPT_NO").unwrap().clone()],
        )
        .unwrap();
        Schema::builder("employee")
            .table(employee)
            .table(department)
            .relationship(manages)
            .relationship(works_in)
            .build()
            .unwrap()
    }

    #[test]
    fn test_table_lookup() {
        let schema = employee_schema();
        assert_eq!(schema.table("EMPLOYEE").unwrap().name(), "EMPLOYEE");
        assert!(schema.table("employee").is_err());
        assert!(schema.table("SALES").is_err());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let table = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .build()
            .unwrap();
        let schema = Schema::builder("employee")
            .config(CatalogConfig::case_insensitive())
            .table(table)
            .build()
            .unwrap();
        assert!(schema.table("employee").is_ok());
        assert!(schema.table("Employee").is_ok());
    }

    #[test]
    fn test_relationships_found_in_both_directions() {
        let schema = employee_schema();
        let employee = schema.table("EMPLOYEE").unwrap().clone();
        let department = schema.table("DEPARTMENT").unwrap().clone();
        assert_eq!(schema.relationships_between(&employee, &department).len(), 2);
        assert_eq!(schema.relationships_between(&department, &employee).len(), 2);
        let rel = schema.relationship(&department, &employee).unwrap();
        assert!(rel.connects("EMPLOYEE", "DEPARTMENT"));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let a = Table::builder("T")
            .column("A", ColumnType::Int, false)
            .build()
            .unwrap();
        let b = Table::builder("T")
            .column("B", ColumnType::Int, false)
            .build()
            .unwrap();
        let result = Schema::builder("s").table(a).table(b).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_relationship_must_reference_known_tables() {
        let employee = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .build()
            .unwrap();
        let department = Table::builder("DEPARTMENT")
            .column("MNGR_NO", ColumnType::Int, true)
            .build()
            .unwrap();
        let rel = Relationship::new(
            &employee,
            vec![employee.column("EMP_NO").unwrap().clone()],
            &department,
            vec![department.column("MNGR_NO").unwrap().clone()],
        )
        .unwrap();
        // DEPARTMENT is not added to the schema
        let result = Schema::builder("s").table(employee).relationship(rel).build();
        assert!(result.is_err());
    }
}
