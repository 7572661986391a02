//! Store Errors
//!
//! Error types for data access operations.

use uuid::Uuid;

/// Errors that can occur in the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transaction references an unknown member
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    /// A stored value that the domain cannot represent
    #[error("Corrupt {collection} row {id}: {reason}")]
    CorruptRow {
        collection: &'static str,
        id: Uuid,
        reason: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
