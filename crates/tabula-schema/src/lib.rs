//! # tabula-schema
//!
//! Immutable schema metadata for Tabula.
//!
//! This crate implements:
//! - Tables, columns, and their declared types
//! - Directed relationships between column sets of two tables
//! - Schema construction via a validating builder, published as an
//!   immutable, shareable graph
//!
//! Construction is external: a schema is populated once (from a live
//! backend or from static definitions) and is read-only afterwards, safe
//! for concurrent access from multiple queries.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod column;
mod relationship;
mod schema;
mod table;

pub use column::{Column, ColumnRef, ColumnType};
pub use relationship::Relationship;
pub use schema::{Schema, SchemaBuilder, SchemaRef};
pub use table::{Table, TableBuilder, TableRef, TableType};
