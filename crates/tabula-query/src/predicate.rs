//! Filter predicates.

use tabula_common::Value;
use tabula_schema::ColumnRef;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Equal.
    Eq,
    /// Not equal.
    NotEq,
    /// Less than.
    Lt,
    /// Less than or equal.
    LtEq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    GtEq,
    /// SQL LIKE.
    Like,
}

impl CompareOp {
    /// The SQL symbol for this operator.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Like => "LIKE",
        }
    }
}

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Another column.
    Column(ColumnRef),
    /// A typed literal value.
    Value(Value),
    /// A placeholder bound by the caller at execution time.
    Parameter,
}

/// A boolean filter expression over columns.
///
/// Predicates form a tree of comparisons combined with AND/OR. The
/// variant set is closed; the renderer handles every variant
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A comparison between a column and an operand.
    Compare {
        /// Left-hand column.
        column: ColumnRef,
        /// Operator.
        op: CompareOp,
        /// Right-hand side.
        operand: Operand,
    },
    /// An IS NULL / IS NOT NULL test.
    IsNull {
        /// The tested column.
        column: ColumnRef,
        /// True for IS NOT NULL.
        negated: bool,
    },
    /// Conjunction of sub-predicates.
    And(Vec<Predicate>),
    /// Disjunction of sub-predicates.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Builds a comparison predicate.
    pub fn compare(column: &ColumnRef, op: CompareOp, operand: Operand) -> Self {
        Predicate::Compare {
            column: column.clone(),
            op,
            operand,
        }
    }

    /// `column = value`
    pub fn eq(column: &ColumnRef, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Eq, Operand::Value(value.into()))
    }

    /// `column <> value`
    pub fn not_eq(column: &ColumnRef, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::NotEq, Operand::Value(value.into()))
    }

    /// `column < value`
    pub fn lt(column: &ColumnRef, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Lt, Operand::Value(value.into()))
    }

    /// `column <= value`
    pub fn lt_eq(column: &ColumnRef, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::LtEq, Operand::Value(value.into()))
    }

    /// `column > value`
    pub fn gt(column: &ColumnRef, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Gt, Operand::Value(value.into()))
    }

    /// `column >= value`
    pub fn gt_eq(column: &ColumnRef, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::GtEq, Operand::Value(value.into()))
    }

    /// `column LIKE value`
    pub fn like(column: &ColumnRef, pattern: impl Into<String>) -> Self {
        Self::compare(
            column,
            CompareOp::Like,
            Operand::Value(Value::string(pattern)),
        )
    }

    /// `column <op> other_column`
    pub fn column_compare(column: &ColumnRef, op: CompareOp, other: &ColumnRef) -> Self {
        Self::compare(column, op, Operand::Column(other.clone()))
    }

    /// `column <op> ?` — the value is bound by the caller at execution.
    pub fn parameter(column: &ColumnRef, op: CompareOp) -> Self {
        Self::compare(column, op, Operand::Parameter)
    }

    /// `column IS NULL`
    pub fn is_null(column: &ColumnRef) -> Self {
        Predicate::IsNull {
            column: column.clone(),
            negated: false,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: &ColumnRef) -> Self {
        Predicate::IsNull {
            column: column.clone(),
            negated: true,
        }
    }

    /// Conjunction of predicates.
    pub fn and(predicates: Vec<Predicate>) -> Self {
        Predicate::And(predicates)
    }

    /// Disjunction of predicates.
    pub fn or(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }

    /// Visits every column referenced by this predicate tree.
    pub(crate) fn for_each_column(&self, f: &mut impl FnMut(&ColumnRef)) {
        match self {
            Predicate::Compare {
                column, operand, ..
            } => {
                f(column);
                if let Operand::Column(other) = operand {
                    f(other);
                }
            }
            Predicate::IsNull { column, .. } => f(column),
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.for_each_column(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_schema::{ColumnType, Table};

    #[test]
    fn test_for_each_column_traverses_tree() {
        let table = Table::builder("EMPLOYEE")
            .column("EMP_NO", ColumnType::Int, false)
            .column("SALARY", ColumnType::Double, false)
            .build()
            .unwrap();
        let emp_no = table.column("EMP_NO").unwrap().clone();
        let salary = table.column("SALARY").unwrap().clone();

        let predicate = Predicate::and(vec![
            Predicate::gt(&salary, 50_000i64),
            Predicate::or(vec![
                Predicate::eq(&emp_no, 2i64),
                Predicate::is_not_null(&emp_no),
            ]),
        ]);

        let mut seen = Vec::new();
        predicate.for_each_column(&mut |c| seen.push(c.name().to_string()));
        assert_eq!(seen, vec!["SALARY", "EMP_NO", "EMP_NO"]);
    }

    #[test]
    fn test_sql_symbols() {
        assert_eq!(CompareOp::Eq.sql_symbol(), "=");
        assert_eq!(CompareOp::NotEq.sql_symbol(), "<>");
        assert_eq!(CompareOp::Like.sql_symbol(), "LIKE");
    }
}
