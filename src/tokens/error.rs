//! Token-specific error types
//!
//! - **`CapacityExceeded`**: the set already holds its maximum number of tokens.
//!   Surfaced to the user as a validation message; the rejected text stays
//!   in the staging buffer.
//! - **`IndexOutOfRange`**: a stale index was used to remove a token. This is
//!   a wiring defect, and the set is left untouched when it happens.

use thiserror::Error;

/// Errors raised by [`TokenSet`](super::TokenSet) mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Adding a token would exceed the maximum
    #[error("Too many tags. Max {max}.")]
    CapacityExceeded { max: usize },

    /// Index does not point at an existing token
    #[error("Tag index {index} out of range for {len} tags")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
