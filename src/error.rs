//! Error types for the registry.

use crate::validate::FieldErrors;
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Record already exists with email = {0}")]
    DuplicateKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid birth date {birth_date}: minimal age is {minimal_age}")]
    AgeTooLow {
        birth_date: NaiveDate,
        minimal_age: u32,
    },

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl RegistryError {
    /// Whether the error was caused by caller input rather than the service.
    pub fn is_client_error(&self) -> bool {
        match self {
            RegistryError::MissingField(_)
            | RegistryError::DuplicateKey(_)
            | RegistryError::NotFound(_)
            | RegistryError::AgeTooLow { .. }
            | RegistryError::InvalidRange { .. }
            | RegistryError::Validation(_)
            | RegistryError::InvalidFormat(_) => true,
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::InvalidFormat(e.to_string())
    }
}

impl From<chrono::ParseError> for RegistryError {
    fn from(e: chrono::ParseError) -> Self {
        RegistryError::InvalidFormat(e.to_string())
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
