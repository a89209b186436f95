//! Bookmark form error types

use crate::service::ServiceError;
use crate::tokens::TokenError;
use thiserror::Error;

/// Reasons a bookmark form cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// URL field failed validation
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Tag list failed validation
    #[error("Tag error: {0}")]
    Token(#[from] TokenError),

    /// Tag resolution failed
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
