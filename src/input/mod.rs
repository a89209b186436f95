//! Tag input core shared by the search bar and the bookmark form
//!
//! The state of a tag input is an explicit [`EditState`]: the staging buffer
//! holding the text typed for the next token, plus the committed
//! [`TokenSet`]. [`TokenInput`] owns one edit state, routes keystrokes
//! through a [`KeyRouter`] and applies default text editing to keys the
//! router lets through.
//!
//! ```
//! use tagbar::input::{Key, TokenInput};
//!
//! let mut input = TokenInput::builder().max_tokens(8).build()?;
//! for key in Key::typed("rust golang ") {
//!     input.handle_key(key, true);
//! }
//! assert_eq!(input.tokens().to_strings(), vec!["rust", "golang"]);
//! # Ok::<(), tagbar::TagbarError>(())
//! ```

pub mod key;
pub mod router;

pub use key::{CommitKey, Key};
pub use router::{KeyOutcome, KeyRouter};

use crate::TagbarError;
use crate::config::TagbarConfig;
use crate::tokens::{Token, TokenError, TokenSet};
use tracing::debug;

/// Staging buffer plus committed tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    staging: String,
    tokens: TokenSet,
}

impl EditState {
    /// Empty buffer and empty token set bounded by `max_tokens`
    #[must_use]
    pub const fn new(max_tokens: usize) -> Self {
        Self {
            staging: String::new(),
            tokens: TokenSet::new(max_tokens),
        }
    }

    #[must_use]
    pub fn staging(&self) -> &str {
        &self.staging
    }

    #[must_use]
    pub const fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// True when neither the buffer nor the token set holds anything
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.staging.trim().is_empty() && self.tokens.is_empty()
    }

    /// Apply a key's ordinary text-editing effect to the buffer
    ///
    /// Returns whether the buffer changed.
    pub fn apply_default(&mut self, key: Key) -> bool {
        match key {
            Key::Space => {
                self.staging.push(' ');
                true
            }
            Key::Char(c) => {
                self.staging.push(c);
                true
            }
            Key::Backspace => self.staging.pop().is_some(),
            Key::Enter | Key::Other => false,
        }
    }

    pub(crate) fn set_staging(&mut self, text: String) {
        self.staging = text;
    }

    pub(crate) const fn tokens_mut(&mut self) -> &mut TokenSet {
        &mut self.tokens
    }

    pub(crate) fn take_staging(&mut self) -> String {
        std::mem::take(&mut self.staging)
    }

    pub(crate) fn clear(&mut self) {
        self.staging.clear();
        self.tokens.clear();
    }
}

/// A single tag input: edit state, router and last validation error
#[derive(Debug, Clone)]
pub struct TokenInput {
    state: EditState,
    router: KeyRouter,
    last_error: Option<TokenError>,
}

impl TokenInput {
    /// Create a new builder for constructing a `TokenInput`
    #[must_use]
    pub fn builder() -> TokenInputBuilder {
        TokenInputBuilder::new()
    }

    /// Handle one keystroke
    ///
    /// With `tokenized` set the key goes through the router; otherwise every
    /// key is plain text editing. Keys that are not intercepted are applied
    /// to the staging buffer and reported as [`KeyOutcome::Edited`].
    pub fn handle_key(&mut self, key: Key, tokenized: bool) -> KeyOutcome {
        let outcome = if tokenized {
            let placeholder = EditState::new(self.max_tokens());
            let state = std::mem::replace(&mut self.state, placeholder);
            let (next, outcome) = self.router.route(key, state);
            self.state = next;
            outcome
        } else {
            KeyOutcome::PassThrough
        };

        let outcome = match outcome {
            KeyOutcome::PassThrough if self.state.apply_default(key) => KeyOutcome::Edited,
            other => other,
        };

        match &outcome {
            KeyOutcome::Rejected(e) => self.last_error = Some(e.clone()),
            KeyOutcome::Committed(_) | KeyOutcome::Restored(_) | KeyOutcome::Edited => {
                self.last_error = None;
            }
            KeyOutcome::Swallowed | KeyOutcome::PassThrough => {}
        }
        outcome
    }

    /// Replace the staging buffer with text reported by a host text widget
    pub fn set_staging(&mut self, text: impl Into<String>) {
        self.state.set_staging(text.into());
        self.last_error = None;
    }

    /// Remove the token at `index`, e.g. when its pill is clicked
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IndexOutOfRange` for a stale index; nothing changes.
    pub fn remove_tag(&mut self, index: usize) -> Result<Token, TokenError> {
        let removed = self.state.tokens_mut().remove_at(index)?;
        debug!(token = %removed, index, "removed tag");
        self.last_error = None;
        Ok(removed)
    }

    /// Empty the buffer and the token set
    pub fn reset(&mut self) {
        self.state.clear();
        self.last_error = None;
    }

    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    #[must_use]
    pub fn staging(&self) -> &str {
        self.state.staging()
    }

    #[must_use]
    pub const fn tokens(&self) -> &TokenSet {
        self.state.tokens()
    }

    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.state.tokens.max()
    }

    #[must_use]
    pub const fn router(&self) -> &KeyRouter {
        &self.router
    }

    /// Message for the most recent rejected commit, cleared by the next edit
    #[must_use]
    pub fn validation_message(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    pub(crate) const fn state_mut(&mut self) -> &mut EditState {
        &mut self.state
    }

    pub(crate) fn set_error(&mut self, error: Option<TokenError>) {
        self.last_error = error;
    }
}

/// Builder for `TokenInput`
///
/// ```
/// # use tagbar::input::{CommitKey, TokenInput};
/// let input = TokenInput::builder()
///     .max_tokens(4)
///     .commit_keys(vec![CommitKey::Enter])
///     .build()
///     .unwrap();
/// assert_eq!(input.max_tokens(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TokenInputBuilder {
    max_tokens: usize,
    commit_keys: Vec<CommitKey>,
}

impl TokenInputBuilder {
    /// Create a builder with the default settings (8 tags, space and enter)
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_tokens: crate::config::DEFAULT_MAX_TOKENS,
            commit_keys: CommitKey::defaults(),
        }
    }

    /// Take limits and commit keys from a loaded configuration
    #[must_use]
    pub fn from_config(config: &TagbarConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            commit_keys: config.commit_keys.clone(),
        }
    }

    #[must_use]
    pub const fn max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = max;
        self
    }

    #[must_use]
    pub fn commit_keys(mut self, keys: Vec<CommitKey>) -> Self {
        self.commit_keys = keys;
        self
    }

    /// Build the `TokenInput`
    ///
    /// # Errors
    ///
    /// Returns `TagbarError::BuildError` if the token limit is zero or no
    /// commit key is configured.
    pub fn build(self) -> Result<TokenInput, TagbarError> {
        if self.max_tokens == 0 {
            return Err(TagbarError::BuildError(
                "max_tokens must be at least 1".to_string(),
            ));
        }
        if self.commit_keys.is_empty() {
            return Err(TagbarError::BuildError(
                "at least one commit key is required".to_string(),
            ));
        }

        Ok(TokenInput {
            state: EditState::new(self.max_tokens),
            router: KeyRouter::new(self.commit_keys),
            last_error: None,
        })
    }
}

impl Default for TokenInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> TokenInput {
        TokenInput::builder().build().unwrap()
    }

    fn type_text(input: &mut TokenInput, text: &str, tokenized: bool) {
        for key in Key::typed(text) {
            input.handle_key(key, tokenized);
        }
    }

    #[test]
    fn test_builder_defaults() {
        let input = input();
        assert_eq!(input.max_tokens(), 8);
        assert_eq!(input.router().commit_keys(), CommitKey::defaults().as_slice());
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = TokenInput::builder().max_tokens(0).build();
        assert!(matches!(result, Err(TagbarError::BuildError(_))));
    }

    #[test]
    fn test_builder_rejects_missing_commit_keys() {
        let result = TokenInput::builder().commit_keys(vec![]).build();
        assert!(matches!(result, Err(TagbarError::BuildError(_))));
    }

    #[test]
    fn test_builder_from_config() {
        let config = TagbarConfig {
            max_tokens: 3,
            commit_keys: vec![CommitKey::Enter],
            ..TagbarConfig::default()
        };
        let input = TokenInputBuilder::from_config(&config).build().unwrap();
        assert_eq!(input.max_tokens(), 3);
        assert!(!input.router().is_commit(Key::Space));
    }

    #[test]
    fn test_typing_commits_tokens() {
        let mut input = input();
        type_text(&mut input, "rust  golang\n", true);

        assert_eq!(input.tokens().to_strings(), vec!["rust", "golang"]);
        assert_eq!(input.staging(), "");
    }

    #[test]
    fn test_free_text_keeps_spaces() {
        let mut input = input();
        type_text(&mut input, "foo bar", false);

        assert_eq!(input.staging(), "foo bar");
        assert!(input.tokens().is_empty());
    }

    #[test]
    fn test_backspace_edits_then_restores() {
        let mut input = input();
        type_text(&mut input, "a b ", true);
        type_text(&mut input, "c", true);

        assert_eq!(input.handle_key(Key::Backspace, true), KeyOutcome::Edited);
        assert_eq!(input.staging(), "");
        assert!(matches!(input.handle_key(Key::Backspace, true), KeyOutcome::Restored(_)));
        assert_eq!(input.staging(), "b");
        assert_eq!(input.tokens().to_strings(), vec!["a"]);
    }

    #[test]
    fn test_enter_in_free_text_does_nothing() {
        let mut input = input();
        assert_eq!(input.handle_key(Key::Enter, false), KeyOutcome::PassThrough);
        assert_eq!(input.staging(), "");
    }

    #[test]
    fn test_validation_message_lifecycle() {
        let mut input = TokenInput::builder().max_tokens(1).build().unwrap();
        type_text(&mut input, "a b ", true);

        assert_eq!(input.tokens().len(), 1);
        assert_eq!(input.staging(), "b");
        assert_eq!(input.validation_message().unwrap(), "Too many tags. Max 1.");

        input.handle_key(Key::Backspace, true);
        assert!(input.validation_message().is_none());
    }

    #[test]
    fn test_remove_tag() {
        let mut input = input();
        type_text(&mut input, "a b c ", true);

        assert_eq!(input.remove_tag(0).unwrap(), "a");
        assert_eq!(input.tokens().to_strings(), vec!["b", "c"]);
        assert!(input.remove_tag(5).is_err());
        assert_eq!(input.tokens().len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut input = input();
        type_text(&mut input, "a b", true);
        input.reset();
        assert!(input.state().is_blank());
    }
}
