//! Form input parsing
//!
//! Every form field reaches the service as text. Numbers are classified as
//! missing, malformed or valid instead of being coerced to zero, and blank
//! optional fields become `None`.

use chrono::NaiveDate;
use std::str::FromStr;

use super::DomainError;

/// Date format used by the date inputs (`2026-03-31`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of reading a numeric form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericInput<T> {
    /// Field absent or blank
    Missing,
    /// Field present but not a number; keeps the raw text
    Malformed(String),
    /// Field parsed successfully
    Valid(T),
}

impl<T: FromStr> NumericInput<T> {
    /// Classify a raw form value.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => NumericInput::Missing,
            Some(text) => match text.parse::<T>() {
                Ok(value) => NumericInput::Valid(value),
                Err(_) => NumericInput::Malformed(text.to_string()),
            },
        }
    }
}

impl<T> NumericInput<T> {
    /// The field must be present and well formed.
    pub fn required(self, field: &'static str) -> Result<T, DomainError> {
        match self {
            NumericInput::Valid(value) => Ok(value),
            NumericInput::Missing => Err(DomainError::MissingField(field)),
            NumericInput::Malformed(value) => Err(DomainError::InvalidNumber { field, value }),
        }
    }

    /// The field may be blank, but if present it must be well formed.
    pub fn optional(self, field: &'static str) -> Result<Option<T>, DomainError> {
        match self {
            NumericInput::Valid(value) => Ok(Some(value)),
            NumericInput::Missing => Ok(None),
            NumericInput::Malformed(value) => Err(DomainError::InvalidNumber { field, value }),
        }
    }
}

/// A required text field: trimmed and non-empty.
pub fn required_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// An optional text field: blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An optional `YYYY-MM-DD` date field.
pub fn optional_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| DomainError::InvalidDate {
                field,
                value: text.to_string(),
            }),
    }
}

/// A required `YYYY-MM-DD` date field.
pub fn required_date(field: &'static str, value: &str) -> Result<NaiveDate, DomainError> {
    optional_date(field, Some(value))?.ok_or(DomainError::MissingField(field))
}
