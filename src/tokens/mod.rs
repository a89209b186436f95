//! Token storage for tag-oriented inputs
//!
//! A [`TokenSet`] is the ordered, duplicate-free list of tags shown as pills
//! next to a tag input. Tokens keep insertion order (most recent last) and
//! the set never grows past its configured maximum.

pub mod error;
pub mod set;

pub use error::TokenError;
pub use set::{Token, TokenSet};
