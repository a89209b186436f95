//! Integrations of the tag input core
//!
//! - [`SearchBar`]: live search box cycling between title, full-text and tag
//!   search, with `/x` mode commands and split/join on mode changes
//! - [`BookmarkForm`]: create-bookmark form whose tag field always collects
//!   tokens and whose tags are resolved to ids on submit
//!
//! Both wrap a [`TokenInput`](crate::input::TokenInput) and add only what
//! their screen needs.

pub mod bookmark_form;
pub mod error;
pub mod search_bar;

pub use bookmark_form::{BookmarkForm, BookmarkFormBuilder};
pub use error::FormError;
pub use search_bar::{KeyResponse, SearchBar, SearchBarBuilder};
