//! Error types for Gridbook

use thiserror::Error;

/// Result type alias for Gridbook operations
pub type Result<T> = std::result::Result<T, GridbookError>;

/// Main error type for Gridbook
#[derive(Error, Debug)]
pub enum GridbookError {
    #[error("Invalid {field}: '{value}' is not one of {allowed}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}

impl GridbookError {
    pub fn invalid_choice(field: &'static str, value: impl ToString, allowed: &'static str) -> Self {
        Self::InvalidChoice {
            field,
            value: value.to_string(),
            allowed,
        }
    }
}
