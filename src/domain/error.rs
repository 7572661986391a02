//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::AmountError;

/// Domain-specific errors
///
/// These errors represent rejected form input and business rule failures.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A required field was absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field did not contain a number
    #[error("Field {field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A date field was not `YYYY-MM-DD`
    #[error("Field {field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// A number that parsed but breaks the amount rules
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Unknown transaction type
    #[error("Unknown transaction type: {0}")]
    InvalidTransactionType(String),

    /// An id field that is not a UUID
    #[error("Field {field} is not a valid id: {value:?}")]
    InvalidId { field: &'static str, value: String },
}

impl DomainError {
    /// The form field this error is about, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field)
            | Self::InvalidNumber { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::InvalidId { field, .. } => Some(*field),
            Self::InvalidTransactionType(_) => Some("type"),
            Self::InvalidAmount(_) => None,
        }
    }
}

impl From<AmountError> for DomainError {
    fn from(err: AmountError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}
