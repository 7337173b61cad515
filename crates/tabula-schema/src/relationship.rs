//! Relationships between tables.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tabula_common::{TabulaError, TabulaResult};

use crate::column::ColumnRef;
use crate::table::TableRef;

/// A directed association between the column sets of two tables.
///
/// The primary and foreign column lists have the same length and
/// correspond pairwise. Every column belongs to its stated table; this
/// is enforced at construction time. Relationships are discovered or
/// declared externally and referenced (not owned) by queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    primary: TableRef,
    primary_columns: Vec<ColumnRef>,
    foreign: TableRef,
    foreign_columns: Vec<ColumnRef>,
}

impl Relationship {
    /// Creates a relationship from paired primary and foreign columns.
    ///
    /// Fails if the lists are empty, differ in length, or contain a
    /// column that does not belong to its stated table.
    pub fn new(
        primary: &TableRef,
        primary_columns: Vec<ColumnRef>,
        foreign: &TableRef,
        foreign_columns: Vec<ColumnRef>,
    ) -> TabulaResult<Self> {
        if primary_columns.is_empty() {
            return Err(TabulaError::invalid_relationship(
                "column lists must not be empty",
            ));
        }
        if primary_columns.len() != foreign_columns.len() {
            return Err(TabulaError::invalid_relationship(format!(
                "primary has {} columns but foreign has {}",
                primary_columns.len(),
                foreign_columns.len()
            )));
        }
        for column in &primary_columns {
            if column.table() != primary.name() {
                return Err(TabulaError::invalid_relationship(format!(
                    "column '{}' does not belong to primary table '{}'",
                    column,
                    primary.name()
                )));
            }
        }
        for column in &foreign_columns {
            if column.table() != foreign.name() {
                return Err(TabulaError::invalid_relationship(format!(
                    "column '{}' does not belong to foreign table '{}'",
                    column,
                    foreign.name()
                )));
            }
        }
        Ok(Self {
            primary: primary.clone(),
            primary_columns,
            foreign: foreign.clone(),
            foreign_columns,
        })
    }

    /// The primary-side table.
    pub fn primary_table(&self) -> &TableRef {
        &self.primary
    }

    /// Primary-side columns, in pair order.
    pub fn primary_columns(&self) -> &[ColumnRef] {
        &self.primary_columns
    }

    /// The foreign-side table.
    pub fn foreign_table(&self) -> &TableRef {
        &self.foreign
    }

    /// Foreign-side columns, in pair order.
    pub fn foreign_columns(&self) -> &[ColumnRef] {
        &self.foreign_columns
    }

    /// Iterates over corresponding (primary, foreign) column pairs.
    pub fn column_pairs(&self) -> impl Iterator<Item = (&ColumnRef, &ColumnRef)> {
        self.primary_columns.iter().zip(self.foreign_columns.iter())
    }

    /// Returns true if this relationship connects the two named tables,
    /// in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.primary.name() == a && self.foreign.name() == b)
            || (self.primary.name() == b && self.foreign.name() == a)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |columns: &[ColumnRef]| {
            columns
                .iter()
                .map(|c| c.name().to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(
            f,
            "{}({}) -> {}({})",
            self.primary.name(),
            names(&self.primary_columns),
            self.foreign.name(),
            names(&self.foreign_columns)
        )
    }
}

/// Non-owning index of relationships keyed by unordered table pairs.
///
/// Lookup by pair is O(1) and direction-agnostic; the owned
/// Schema -> Table -> Column tree stays acyclic.
#[derive(Debug, Default)]
pub(crate) struct RelationshipIndex {
    map: HashMap<(String, String), Vec<Arc<Relationship>>>,
}

impl RelationshipIndex {
    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    pub(crate) fn insert(&mut self, relationship: Arc<Relationship>) {
        let key = Self::key(
            relationship.primary_table().name(),
            relationship.foreign_table().name(),
        );
        self.map.entry(key).or_default().push(relationship);
    }

    pub(crate) fn between(&self, a: &str, b: &str) -> &[Arc<Relationship>] {
        self.map
            .get(&Self::key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::table::Table;

    fn tables() -> (TableRef, TableRef) {
        let employee = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .build()
            .unwrap();
        let department = Table::builder("DEPARTMENT")
            .column("DEPT_NO", ColumnType::Char(Some(3)), false)
            .column("MNGR_NO", ColumnType::Int, true)
            .build()
            .unwrap();
        (employee, department)
    }

    #[test]
    fn test_valid_relationship() {
        let (employee, department) = tables();
        let rel = Relationship::new(
            &employee,
            vec![employee.column("EMP_NO").unwrap().clone()],
            &department,
            vec![department.column("MNGR_NO").unwrap().clone()],
        )
        .unwrap();
        assert_eq!(rel.to_string(), "EMPLOYEE(EMP_NO) -> DEPARTMENT(MNGR_NO)");
        assert!(rel.connects("DEPARTMENT", "EMPLOYEE"));
        assert_eq!(rel.column_pairs().count(), 1);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let (employee, department) = tables();
        let result = Relationship::new(
            &employee,
            vec![employee.column("EMP_NO").unwrap().clone()],
            &department,
            vec![
                department.column("MNGR_NO").unwrap().clone(),
                department.column("DEPT_NO").unwrap().clone(),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_lists_rejected() {
        let (employee, department) = tables();
        assert!(Relationship::new(&employee, vec![], &department, vec![]).is_err());
    }

    #[test]
    fn test_foreign_column_must_belong_to_foreign_table() {
        let (employee, department) = tables();
        let result = Relationship::new(
            &employee,
            vec![employee.column("EMP_NO").unwrap().clone()],
            &department,
            // EMP_NO belongs to EMPLOYEE, not DEPARTMENT
            vec![employee.column("EMP_NO").unwrap().clone()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_index_is_direction_agnostic() {
        let (employee, department) = tables();
        let rel = Arc::new(
            Relationship::new(
                &employee,
                vec![employee.column("EMP_NO").unwrap().clone()],
                &department,
                vec![department.column("MNGR_NO").unwrap().clone()],
            )
            .unwrap(),
        );
        let mut index = RelationshipIndex::default();
        index.insert(rel);
        assert_eq!(index.between("EMPLOYEE", "DEPARTMENT").len(), 1);
        assert_eq!(index.between("DEPARTMENT", "EMPLOYEE").len(), 1);
        assert!(index.between("EMPLOYEE", "SALES").is_empty());
    }
}
