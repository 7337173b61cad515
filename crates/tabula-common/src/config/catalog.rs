//! Catalog configuration.
//!
//! These structures define the configurable aspects of schema metadata
//! lookup.

use serde::{Deserialize, Serialize};

/// Name matching policy for metadata lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameMatching {
    /// Names must match exactly.
    CaseSensitive,
    /// Names match regardless of ASCII case.
    CaseInsensitive,
}

impl NameMatching {
    /// Returns true if the two names match under this policy.
    #[must_use]
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            NameMatching::CaseSensitive => a == b,
            NameMatching::CaseInsensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Catalog configuration.
///
/// Controls how a published schema resolves lookups by name.
///
/// # Example
///
/// ```rust
/// use tabula_common::config::CatalogConfig;
///
/// let config = CatalogConfig::default();
/// assert!(!config.is_case_insensitive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Policy applied when resolving tables by name.
    pub name_matching: NameMatching,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name_matching: NameMatching::CaseSensitive,
        }
    }
}

impl CatalogConfig {
    /// Creates a configuration with case-insensitive table lookup.
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self {
            name_matching: NameMatching::CaseInsensitive,
        }
    }

    /// Returns true if table lookup ignores ASCII case.
    #[must_use]
    pub fn is_case_insensitive(&self) -> bool {
        self.name_matching == NameMatching::CaseInsensitive
    }
}
