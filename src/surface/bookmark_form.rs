//! New-bookmark form with a tag field
//!
//! The tag field is always token-oriented: space or enter turns the typed
//! text into a tag pill, backspace on an empty field pulls the last pill back
//! for editing. Submitting resolves tag titles to persisted ids and produces
//! the [`NewBookmarkRequest`] to send.

use super::error::FormError;
use crate::TagbarError;
use crate::config::{DEFAULT_MIN_URL_LEN, TagbarConfig};
use crate::input::{CommitKey, Key, KeyOutcome, TokenInput, TokenInputBuilder};
use crate::models::NewBookmarkRequest;
use crate::service::TagResolver;
use crate::tokens::{Token, TokenError, TokenSet};
use tracing::{debug, warn};

/// Create-bookmark form state
#[derive(Debug, Clone)]
pub struct BookmarkForm {
    url: String,
    tags: TokenInput,
    min_url_len: usize,
}

impl BookmarkForm {
    /// Create a new builder for constructing a `BookmarkForm`
    #[must_use]
    pub fn builder() -> BookmarkFormBuilder {
        BookmarkFormBuilder::new()
    }

    /// Handle a keystroke in the tag field
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        self.tags.handle_key(key, true)
    }

    /// Replace the tag field text with what the host widget reports
    pub fn set_tag_text(&mut self, text: impl Into<String>) {
        self.tags.set_staging(text);
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Remove the tag at `index` (pill click)
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IndexOutOfRange` for a stale index; nothing changes.
    pub fn remove_tag(&mut self, index: usize) -> Result<Token, TokenError> {
        self.tags.remove_tag(index)
    }

    /// Check the URL; the tag list cannot exceed its limit
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidUrl` for an empty or too short URL.
    pub fn validate(&self) -> Result<(), FormError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FormError::InvalidUrl("Required".to_string()));
        }
        if url.chars().count() < self.min_url_len {
            return Err(FormError::InvalidUrl(format!(
                "Must be at least {} characters",
                self.min_url_len
            )));
        }
        Ok(())
    }

    /// Whether anything was entered since the last reset
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.url.is_empty() || !self.tags.state().is_blank()
    }

    /// Whether the submit button should be enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_dirty() && self.validate().is_ok()
    }

    /// Resolve tags and build the creation request
    ///
    /// Only committed tags are sent; text still in the tag field is not. The
    /// bookmark title defaults to its URL. On success the form is reset; on
    /// failure it is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if validation fails or the tag resolver fails.
    pub fn submit<R: TagResolver + ?Sized>(
        &mut self,
        resolver: &R,
    ) -> Result<NewBookmarkRequest, FormError> {
        self.validate()?;

        let titles = self.tags.tokens().to_strings();
        let tag_ids = if titles.is_empty() {
            Vec::new()
        } else {
            resolver
                .resolve_tags(&titles)
                .inspect_err(|e| warn!(error = %e, "tag resolution failed"))?
                .into_iter()
                .map(|tag| tag.id)
                .collect()
        };

        let url = self.url.trim().to_string();
        let request = NewBookmarkRequest {
            title: url.clone(),
            url,
            tag_ids,
        };
        debug!(url = %request.url, tags = request.tag_ids.len(), "bookmark form submitted");
        self.reset();
        Ok(request)
    }

    /// Clear the URL, the tag field and its tags
    pub fn reset(&mut self) {
        self.url.clear();
        self.tags.reset();
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text typed for the next tag
    #[must_use]
    pub fn tag_text(&self) -> &str {
        self.tags.staging()
    }

    #[must_use]
    pub const fn tags(&self) -> &TokenSet {
        self.tags.tokens()
    }

    #[must_use]
    pub fn validation_message(&self) -> Option<String> {
        self.tags.validation_message()
    }
}

/// Builder for `BookmarkForm`
#[derive(Debug, Clone)]
pub struct BookmarkFormBuilder {
    tags: TokenInputBuilder,
    min_url_len: usize,
}

impl BookmarkFormBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: TokenInputBuilder::new(),
            min_url_len: DEFAULT_MIN_URL_LEN,
        }
    }

    #[must_use]
    pub fn from_config(config: &TagbarConfig) -> Self {
        Self {
            tags: TokenInputBuilder::from_config(config),
            min_url_len: config.min_url_len,
        }
    }

    #[must_use]
    pub fn max_tokens(mut self, max: usize) -> Self {
        self.tags = self.tags.max_tokens(max);
        self
    }

    #[must_use]
    pub fn commit_keys(mut self, keys: Vec<CommitKey>) -> Self {
        self.tags = self.tags.commit_keys(keys);
        self
    }

    #[must_use]
    pub const fn min_url_len(mut self, len: usize) -> Self {
        self.min_url_len = len;
        self
    }

    /// Build the `BookmarkForm`
    ///
    /// # Errors
    ///
    /// Returns `TagbarError::BuildError` for an invalid tag field configuration.
    pub fn build(self) -> Result<BookmarkForm, TagbarError> {
        Ok(BookmarkForm {
            url: String::new(),
            tags: self.tags.build()?,
            min_url_len: self.min_url_len,
        })
    }
}

impl Default for BookmarkFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}
