//! Tagbar - tag tokenizer and search-mode state machine
//!
//! This library turns raw keystrokes into an ordered, duplicate-free set of
//! tags and switches a single search box between title, full-text and tag
//! search without losing what the user typed.
//!
//! # Modules
//!
//! - [`tokens`]: bounded, ordered token set
//! - [`input`]: key decoding, key routing and the shared tag input core
//! - [`mode`]: search modes, cycling and `/x` command parsing
//! - [`reconcile`]: split/join on mode changes and search request issuing
//! - [`service`]: interfaces to the bookmark API and result dispatch
//! - [`surface`]: the search bar and new-bookmark form integrations
//! - [`config`]: TOML configuration
//!
//! All state is owned by the surface that mounted it and changes only in
//! response to explicit calls; nothing blocks and nothing is shared.

use thiserror::Error;

pub mod config;
pub mod input;
pub mod mode;
pub mod models;
pub mod reconcile;
pub mod service;
pub mod surface;
pub mod tokens;

#[cfg(test)]
pub mod testing;

pub use input::{Key, KeyOutcome};
pub use mode::Mode;
pub use reconcile::{SearchQuery, SearchRequest};
pub use surface::{BookmarkForm, SearchBar};
pub use tokens::{Token, TokenSet};

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum TagbarError {
    /// Token set error
    #[error("Token error: {0}")]
    TokenError(#[from] tokens::TokenError),
    /// External service error
    #[error("Service error: {0}")]
    ServiceError(#[from] service::ServiceError),
    /// Bookmark form error
    #[error("Form error: {0}")]
    FormError(#[from] surface::FormError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Invalid settings passed to a builder
    #[error("Failed to build: {0}")]
    BuildError(String),
}
