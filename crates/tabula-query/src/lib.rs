//! # tabula-query
//!
//! Dialect-independent query model and SQL rendering for Tabula.
//!
//! This crate implements:
//! - A mutable, fluent [`Query`] accumulator (select items, from items
//!   with join semantics, filters, grouping, ordering, pagination)
//! - A [`Dialect`] descriptor naming a target backend's rendering rules
//! - A pure [`SqlRenderer`] turning a query into SQL text
//!
//! Queries reference schema metadata by identity ([`ColumnRef`] /
//! [`TableRef`] from `tabula-schema`) and preserve insertion order
//! verbatim into rendered SQL, so identical input always yields
//! byte-identical text.
//!
//! [`ColumnRef`]: tabula_schema::ColumnRef
//! [`TableRef`]: tabula_schema::TableRef

#![warn(missing_docs)]
#![warn(clippy::all)]

mod dialect;
mod from;
mod predicate;
mod query;
mod render;
mod select;

pub use dialect::{Dialect, PaginationIdiom};
pub use from::{FromItem, JoinCondition, JoinType};
pub use predicate::{CompareOp, Operand, Predicate};
pub use query::{OrderByItem, Query, SortDirection};
pub use render::SqlRenderer;
pub use select::{AggregateFunc, SelectExpr, SelectItem};
