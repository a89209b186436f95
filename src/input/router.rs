//! Keystroke routing for token-oriented inputs
//!
//! The router is a pure function of `(key, staging buffer, token set)`. It
//! takes the current [`EditState`] by value and hands back the next one
//! together with a [`KeyOutcome`] that tells the host whether to suppress
//! the key's default text-insertion effect.
//!
//! | Key              | Buffer              | Effect                                 |
//! |------------------|---------------------|----------------------------------------|
//! | commit key       | new, non-empty text | append each word, clear buffer         |
//! | commit key       | empty or duplicate  | swallowed, nothing changes             |
//! | backspace        | empty, tokens exist | pop last token back into the buffer    |
//! | backspace        | non-empty           | default editing                        |
//! | anything else    | any                 | default editing                        |

use super::EditState;
use super::key::{CommitKey, Key};
use crate::tokens::{Token, TokenError};
use tracing::{debug, trace};

/// What a keystroke did to the edit state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Buffer words became new tokens, in order
    Committed(Vec<Token>),
    /// Last token moved back into the empty buffer
    Restored(Token),
    /// Commit key on an empty or duplicate buffer; nothing changed
    Swallowed,
    /// Commit refused because the token set is full; the buffer keeps its text
    Rejected(TokenError),
    /// Key was not intercepted and should get its default editing behavior
    PassThrough,
    /// Default editing was applied to the buffer by [`TokenInput`](super::TokenInput)
    Edited,
}

impl KeyOutcome {
    /// Whether the host must cancel the key's default effect
    #[must_use]
    pub const fn suppresses_default(&self) -> bool {
        !matches!(self, Self::PassThrough | Self::Edited)
    }

    /// Whether the token set changed
    #[must_use]
    pub const fn changed_tokens(&self) -> bool {
        matches!(self, Self::Committed(_) | Self::Restored(_))
    }
}

/// Decides what each keystroke means for a tag input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRouter {
    commit_keys: Vec<CommitKey>,
}

impl KeyRouter {
    #[must_use]
    pub const fn new(commit_keys: Vec<CommitKey>) -> Self {
        Self { commit_keys }
    }

    #[must_use]
    pub fn commit_keys(&self) -> &[CommitKey] {
        &self.commit_keys
    }

    /// Whether `key` is configured to commit the buffer
    #[must_use]
    pub fn is_commit(&self, key: Key) -> bool {
        self.commit_keys.iter().any(|c| c.matches(key))
    }

    /// Route one keystroke against a token-oriented edit state
    ///
    /// Free-text modes must not call this; every key passes through there.
    #[must_use]
    pub fn route(&self, key: Key, mut state: EditState) -> (EditState, KeyOutcome) {
        if self.is_commit(key) {
            let outcome = commit(&mut state);
            return (state, outcome);
        }

        if key == Key::Backspace && state.staging.is_empty() {
            if let Some(token) = state.tokens.remove_last() {
                debug!(token = %token, "restored last tag into buffer");
                state.staging = token.to_string();
                return (state, KeyOutcome::Restored(token));
            }
        }

        (state, KeyOutcome::PassThrough)
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new(CommitKey::defaults())
    }
}

/// Commit every word of the buffer, all or nothing
///
/// The buffer can hold several words after a raw text change or a refused
/// split; each word becomes its own token.
fn commit(state: &mut EditState) -> KeyOutcome {
    let mut next = state.tokens.clone();
    let mut added = Vec::new();
    for word in state.staging.split_whitespace() {
        match next.append(word) {
            Ok(true) => added.extend(Token::parse(word)),
            Ok(false) => trace!(token = word, "duplicate tag swallowed"),
            Err(e) => {
                debug!(error = %e, "tag commit rejected");
                return KeyOutcome::Rejected(e);
            }
        }
    }

    if added.is_empty() {
        trace!("commit without new tags swallowed");
        return KeyOutcome::Swallowed;
    }
    state.tokens = next;
    state.staging.clear();
    debug!(added = added.len(), count = state.tokens.len(), "committed tags");
    KeyOutcome::Committed(added)
}
