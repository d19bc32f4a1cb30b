//! Error types for store operations.
//!
//! Separates the recoverable duplicate-name case from every other storage
//! failure so the front end can report the two differently.

use parlor_core::{NamedEntity, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with the same unique name already exists. Nothing was written.
    #[error("{entity} '{name}' already exists")]
    DuplicateName { entity: NamedEntity, name: String },

    /// Input rejected before the store was touched.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Any other SQLite failure, including foreign key violations.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Creating or dropping the schema failed.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StoreError {
    /// Returns `true` for [`StoreError::DuplicateName`].
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, Self::DuplicateName { .. })
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
