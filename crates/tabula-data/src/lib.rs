//! # tabula-data
//!
//! Tabular results and presentation styles for Tabula.
//!
//! This crate implements:
//! - The [`Style`] model: optional visual presentation of a single
//!   cell value, rendered to canonical CSS text
//! - [`Row`] and [`DataSet`]: the uniform tabular shape that
//!   normalizes heterogeneous driver outputs
//! - The [`Connection`] / [`RowCursor`] collaborator traits through
//!   which rendered SQL is executed, and the optional
//!   [`StyleSupplier`] collaborator for style-aware sources
//! - [`DataContext`]: the facade that renders a query for one dialect
//!   and executes it through a connection
//!
//! The core performs no I/O itself; all execution flows through the
//! collaborator traits.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod context;
mod cursor;
mod dataset;
mod row;
mod style;

pub use context::DataContext;
pub use cursor::{Connection, MemoryCursor, NoStyles, RowCursor, StyleSupplier};
pub use dataset::DataSet;
pub use row::Row;
pub use style::{Color, SizeUnit, Style, StyleBuilder, TextAlignment, NO_STYLE};
