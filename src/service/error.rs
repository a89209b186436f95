//! Errors reported by the search and tag collaborators
//!
//! The core never retries a failed call. Retrying and surfacing failures to
//! the user belongs to the integration that owns the transport.

use thiserror::Error;

/// Failure of an external service call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but refused the request
    #[error("Request rejected: {0}")]
    Rejected(String),
}
