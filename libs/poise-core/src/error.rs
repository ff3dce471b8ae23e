//! Error types for the Poise core library

use crate::models::PersonRole;
use thiserror::Error;

/// Result type alias for Poise operations
pub type Result<T> = std::result::Result<T, PoiseError>;

/// Main error type for Poise operations
#[derive(Error, Debug)]
pub enum PoiseError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {role} ID: '{input}'")]
    InvalidPersonId { role: PersonRole, input: String },

    #[error("{role} not found: {id}")]
    PersonNotFound { role: PersonRole, id: i64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl PoiseError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error came from the store rather than from user input or the terminal
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Whether the interactive input stream has been exhausted
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}
