//! Catalog configuration structures.

mod catalog;

pub use catalog::{CatalogConfig, NameMatching};
