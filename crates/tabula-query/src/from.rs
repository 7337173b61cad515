//! From items.

use std::collections::HashSet;
use std::sync::Arc;

use tabula_common::{TabulaError, TabulaResult};
use tabula_schema::{Relationship, TableRef};

use crate::predicate::Predicate;
use crate::query::Query;

/// The kind of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// FULL JOIN.
    Full,
}

impl JoinType {
    /// The SQL keyword prefix for this join ("INNER", "LEFT", ...).
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Full => "FULL",
        }
    }
}

/// What a join's ON clause is derived from.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    /// Pairwise equality of a relationship's primary and foreign
    /// columns.
    Relationship(Arc<Relationship>),
    /// An explicit predicate.
    Expr(Predicate),
}

/// A query ingredient contributing rows: a bare table, a derived
/// sub-query, or a join of two from items.
#[derive(Debug, Clone, PartialEq)]
pub enum FromItem {
    /// A bare table reference.
    Table(TableRef),
    /// A derived sub-query with an alias.
    SubQuery {
        /// The inner query.
        query: Box<Query>,
        /// The alias the derived table is referenced by.
        alias: String,
    },
    /// A join of two from items.
    Join {
        /// The kind of join.
        join_type: JoinType,
        /// Left side.
        left: Box<FromItem>,
        /// Right side.
        right: Box<FromItem>,
        /// The ON condition.
        condition: JoinCondition,
    },
}

impl FromItem {
    /// A bare table.
    pub fn table(table: &TableRef) -> Self {
        FromItem::Table(table.clone())
    }

    /// A derived sub-query.
    pub fn sub_query(query: Query, alias: impl Into<String>) -> Self {
        FromItem::SubQuery {
            query: Box::new(query),
            alias: alias.into(),
        }
    }

    /// Joins two from items on a relationship.
    ///
    /// The relationship's two tables must each match one side of the
    /// join; fails with an invalid-join error otherwise.
    pub fn join(
        join_type: JoinType,
        left: FromItem,
        right: FromItem,
        relationship: Arc<Relationship>,
    ) -> TabulaResult<Self> {
        let left_tables = left.table_names();
        let right_tables = right.table_names();
        let primary = relationship.primary_table().name();
        let foreign = relationship.foreign_table().name();
        let straight = left_tables.contains(primary) && right_tables.contains(foreign);
        let reversed = left_tables.contains(foreign) && right_tables.contains(primary);
        if !straight && !reversed {
            return Err(TabulaError::invalid_join(format!(
                "relationship {} does not connect the joined items",
                relationship
            )));
        }
        Ok(FromItem::Join {
            join_type,
            left: Box::new(left),
            right: Box::new(right),
            condition: JoinCondition::Relationship(relationship),
        })
    }

    /// Joins two from items on an explicit predicate.
    pub fn join_on(join_type: JoinType, left: FromItem, right: FromItem, on: Predicate) -> Self {
        FromItem::Join {
            join_type,
            left: Box::new(left),
            right: Box::new(right),
            condition: JoinCondition::Expr(on),
        }
    }

    /// Joins a relationship's primary table to its foreign table.
    ///
    /// Renders as `<primary> <kind> JOIN <foreign> ON <pairs>`.
    pub fn relationship_join(join_type: JoinType, relationship: &Arc<Relationship>) -> Self {
        FromItem::Join {
            join_type,
            left: Box::new(FromItem::Table(relationship.primary_table().clone())),
            right: Box::new(FromItem::Table(relationship.foreign_table().clone())),
            condition: JoinCondition::Relationship(relationship.clone()),
        }
    }

    /// Every base-table name reachable from this item, recursing
    /// through joins and derived sub-queries.
    pub fn table_names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_table_names(&mut names);
        names
    }

    pub(crate) fn collect_table_names(&self, out: &mut HashSet<String>) {
        match self {
            FromItem::Table(table) => {
                out.insert(table.name().to_string());
            }
            FromItem::SubQuery { query, .. } => {
                for item in query.from_items() {
                    item.collect_table_names(out);
                }
            }
            FromItem::Join { left, right, .. } => {
                left.collect_table_names(out);
                right.collect_table_names(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_schema::{ColumnType, Table};

    fn fixtures() -> (TableRef, TableRef, Arc<Relationship>) {
        let employee = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .build()
            .unwrap();
        let department = Table::builder("DEPARTMENT")
            .column("MNGR_NO", ColumnType::Int, true)
            .build()
            .unwrap();
        let rel = Arc::new(
            Relationship::new(
                &employee,
                vec![employee.column("EMP_NO").unwrap().clone()],
                &department,
                vec![department.column("MNGR_NO").unwrap().clone()],
            )
            .unwrap(),
        );
        (employee, department, rel)
    }

    #[test]
    fn test_join_accepts_matching_relationship() {
        let (employee, department, rel) = fixtures();
        let join = FromItem::join(
            JoinType::Inner,
            FromItem::table(&employee),
            FromItem::table(&department),
            rel,
        )
        .unwrap();
        let names = join.table_names();
        assert!(names.contains("EMPLOYEE"));
        assert!(names.contains("DEPARTMENT"));
    }

    #[test]
    fn test_join_accepts_reversed_sides() {
        let (employee, department, rel) = fixtures();
        assert!(FromItem::join(
            JoinType::Left,
            FromItem::table(&department),
            FromItem::table(&employee),
            rel,
        )
        .is_ok());
    }

    #[test]
    fn test_join_rejects_unrelated_table() {
        let (employee, _, rel) = fixtures();
        let sales = Table::builder("SALES")
            .column("PO_NUMBER", ColumnType::Char(Some(8)), false)
            .build()
            .unwrap();
        let result = FromItem::join(
            JoinType::Inner,
            FromItem::table(&employee),
            FromItem::table(&sales),
            rel,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_relationship_join_sides() {
        let (_, _, rel) = fixtures();
        let join = FromItem::relationship_join(JoinType::Inner, &rel);
        match join {
            FromItem::Join { left, right, .. } => {
                assert_eq!(left.table_names().into_iter().collect::<Vec<_>>(), ["EMPLOYEE"]);
                assert_eq!(
                    right.table_names().into_iter().collect::<Vec<_>>(),
                    ["DEPARTMENT"]
                );
            }
            other => panic!("expected join, got {:?}", other),
        }
    }
}
