//! Ordered, bounded, duplicate-free token collection

use super::error::TokenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A single committed tag: trimmed and never empty
///
/// Equality is exact and case-sensitive, so `Rust` and `rust` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Trim `raw` and wrap it, or `None` when nothing is left
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered set of tokens with a fixed upper bound
///
/// Only the key router and the mode reconciler mutate a `TokenSet`; surfaces
/// hand out shared references for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<Token>,
    max: usize,
}

impl TokenSet {
    /// Create an empty set holding at most `max` tokens
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self {
            tokens: Vec::new(),
            max,
        }
    }

    /// Append a token at the end
    ///
    /// Returns `Ok(true)` when the token was added and `Ok(false)` when the
    /// trimmed text was empty or already present (both are silent no-ops).
    ///
    /// # Errors
    ///
    /// Returns `TokenError::CapacityExceeded` if the set is already full.
    pub fn append(&mut self, raw: &str) -> Result<bool, TokenError> {
        let Some(token) = Token::parse(raw) else {
            return Ok(false);
        };
        if self.tokens.contains(&token) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(TokenError::CapacityExceeded { max: self.max });
        }
        self.tokens.push(token);
        Ok(true)
    }

    /// Remove the token at `index`, shifting later tokens left
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IndexOutOfRange` for a stale index; the set is
    /// left unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<Token, TokenError> {
        if index >= self.tokens.len() {
            return Err(TokenError::IndexOutOfRange {
                index,
                len: self.tokens.len(),
            });
        }
        Ok(self.tokens.remove(index))
    }

    /// Pop the most recent token
    pub fn remove_last(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// Replace every token at once
    ///
    /// Candidates go through the same trim, skip-empty and dedupe rules as
    /// [`append`](Self::append). The replacement is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::CapacityExceeded` when the deduplicated candidates
    /// outnumber the maximum; the previous tokens are kept.
    pub fn replace_all<I, S>(&mut self, candidates: I) -> Result<(), TokenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next: Vec<Token> = Vec::new();
        for candidate in candidates {
            let Some(token) = Token::parse(candidate.as_ref()) else {
                continue;
            };
            if next.contains(&token) {
                continue;
            }
            if next.len() == self.max {
                return Err(TokenError::CapacityExceeded { max: self.max });
            }
            next.push(token);
        }
        self.tokens = next;
        Ok(())
    }

    /// Drop every token
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Whether a token equal to the trimmed `raw` text is present
    #[must_use]
    pub fn contains(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        self.tokens.iter().any(|t| t.as_str() == trimmed)
    }

    /// Tokens joined with single spaces, oldest first
    #[must_use]
    pub fn join(&self) -> String {
        self.tokens
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tokens as owned strings, for request payloads
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tokens.len() >= self.max
    }

    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
