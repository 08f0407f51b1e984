//! Error types for catalog construction and sentient generation.
//!
//! Only structural problems surface here. Malformed cells fall back to
//! defaults and sparse catalogs produce smaller loadouts; neither is an error.

use thiserror::Error;

/// Which input table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Race,
    Gear,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Race => f.write_str("race"),
            TableKind::Gear => f.write_str("gear"),
        }
    }
}

/// Errors raised while building a catalog from a table.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// None of the accepted header variants for a required field is present.
    #[error("{table} table is missing required column '{column}'")]
    MissingRequiredColumn {
        table: TableKind,
        column: &'static str,
    },

    /// Table source could not be decoded at all.
    #[error("failed to parse table: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn missing_column(table: TableKind, column: &'static str) -> Self {
        Self::MissingRequiredColumn { table, column }
    }
}

/// Errors raised before a generation call draws any randomness.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("unknown rank '{0}'")]
    UnknownRank(String),

    #[error("race catalog is empty")]
    EmptyRaceCatalog,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
