//! # tabula-common
//!
//! Common types, errors, and configuration for Tabula.
//!
//! This crate provides the foundational types shared across all Tabula
//! components. It includes:
//!
//! - **Errors**: Unified error handling with [`TabulaError`]
//! - **Values**: The runtime [`Value`] type used for query literals and
//!   result cells
//! - **Config**: Catalog configuration structures
//!
//! ## Example
//!
//! ```rust
//! use tabula_common::types::Value;
//! use tabula_common::error::TabulaResult;
//!
//! fn example() -> TabulaResult<()> {
//!     let cell = Value::string("Quality Assurance");
//!     assert!(!cell.is_null());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::{CatalogConfig, NameMatching};
pub use error::{ErrorCode, TabulaError, TabulaResult};
pub use types::Value;
