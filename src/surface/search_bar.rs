//! Live search bar with mode cycling
//!
//! ```
//! use tagbar::input::Key;
//! use tagbar::mode::Mode;
//! use tagbar::reconcile::SearchQuery;
//! use tagbar::surface::SearchBar;
//!
//! let mut bar = SearchBar::builder().build()?;
//! bar.handle_input("foo bar");
//!
//! // Title -> Text -> Tag: the text is split into tags on entry
//! bar.cycle_mode();
//! let request = bar.cycle_mode();
//! assert_eq!(bar.mode(), Mode::TagSearch);
//! assert_eq!(
//!     request.query,
//!     SearchQuery::Tags(vec!["foo".to_string(), "bar".to_string()])
//! );
//! # Ok::<(), tagbar::TagbarError>(())
//! ```

use crate::TagbarError;
use crate::config::TagbarConfig;
use crate::input::{CommitKey, Key, KeyOutcome, TokenInput, TokenInputBuilder};
use crate::mode::{Mode, ModeCycle};
use crate::reconcile::{Reconciler, SearchRequest};
use crate::tokens::{TokenError, TokenSet};
use tracing::debug;

/// Outcome of a keystroke on the search bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub outcome: KeyOutcome,
    /// Search to run because the query changed
    pub request: Option<SearchRequest>,
}

impl KeyResponse {
    /// Whether the host must cancel the key's default effect
    #[must_use]
    pub const fn suppresses_default(&self) -> bool {
        self.outcome.suppresses_default()
    }
}

/// Search box interpreting its text as title, full-text or tag search
#[derive(Debug, Clone)]
pub struct SearchBar {
    input: TokenInput,
    cycle: ModeCycle,
    mode: Mode,
    reconciler: Reconciler,
}

impl SearchBar {
    /// Create a new builder for constructing a `SearchBar`
    #[must_use]
    pub fn builder() -> SearchBarBuilder {
        SearchBarBuilder::new()
    }

    /// Handle one keystroke
    ///
    /// In tag mode commit keys turn the typed text into a tag and backspace on
    /// an empty buffer pulls the last tag back for editing. In the other modes
    /// every key is ordinary text editing.
    pub fn handle_key(&mut self, key: Key) -> KeyResponse {
        let outcome = self.input.handle_key(key, self.mode.is_token_oriented());
        let request = self.settle();
        KeyResponse { outcome, request }
    }

    /// Handle a raw text change from the host's text widget
    ///
    /// A leading `/x` command switches mode (if `x` is a known sigil) and is
    /// stripped from the text either way.
    pub fn handle_input(&mut self, raw: &str) -> Option<SearchRequest> {
        let parsed = self.cycle.parse(raw, self.mode);
        if parsed.mode != self.mode {
            debug!(from = ?self.mode, to = ?parsed.mode, "mode selected by command");
            self.mode = parsed.mode;
        }
        self.input.set_staging(parsed.text);
        self.settle()
    }

    /// Advance to the next mode, always issuing one search
    pub fn cycle_mode(&mut self) -> SearchRequest {
        let next = self.cycle.next(self.mode);
        self.change_mode(next)
    }

    /// Switch to `mode`, always issuing one search
    pub fn change_mode(&mut self, mode: Mode) -> SearchRequest {
        self.mode = mode;
        let reconciled = self.reconciler.refresh(mode, self.input.state_mut());
        if let Some(e) = reconciled.error {
            self.input.set_error(Some(e));
        }
        reconciled.request
    }

    /// Remove the tag at `index` (pill click) and re-run the search
    ///
    /// # Errors
    ///
    /// Returns `TokenError::IndexOutOfRange` for a stale index; nothing changes.
    pub fn remove_tag(&mut self, index: usize) -> Result<Option<SearchRequest>, TokenError> {
        self.input.remove_tag(index)?;
        Ok(self.settle())
    }

    /// Clear text and tags; the mode is kept
    pub fn reset(&mut self) -> Option<SearchRequest> {
        self.input.reset();
        self.settle()
    }

    fn settle(&mut self) -> Option<SearchRequest> {
        let reconciled = self.reconciler.settle(self.mode, self.input.state_mut())?;
        if let Some(e) = reconciled.error {
            self.input.set_error(Some(e));
        }
        Some(reconciled.request)
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn staging(&self) -> &str {
        self.input.staging()
    }

    /// Tags shown as pills; always empty outside tag mode
    #[must_use]
    pub const fn tokens(&self) -> &TokenSet {
        self.input.tokens()
    }

    /// Button text for the current mode, e.g. `/t`
    #[must_use]
    pub fn mode_indicator(&self) -> String {
        self.cycle.indicator(self.mode)
    }

    #[must_use]
    pub const fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    #[must_use]
    pub fn validation_message(&self) -> Option<String> {
        self.input.validation_message()
    }

    /// Generation of the newest issued search
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.reconciler.generation()
    }
}

/// Builder for `SearchBar`
#[derive(Debug, Clone)]
pub struct SearchBarBuilder {
    input: TokenInputBuilder,
    initial_mode: Mode,
    cycle: Option<ModeCycle>,
    config: Option<TagbarConfig>,
}

impl SearchBarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: TokenInputBuilder::new(),
            initial_mode: Mode::default(),
            cycle: None,
            config: None,
        }
    }

    /// Take every setting from a loaded configuration
    #[must_use]
    pub fn from_config(config: &TagbarConfig) -> Self {
        Self {
            input: TokenInputBuilder::from_config(config),
            initial_mode: config.initial_mode,
            cycle: None,
            config: Some(config.clone()),
        }
    }

    #[must_use]
    pub fn max_tokens(mut self, max: usize) -> Self {
        self.input = self.input.max_tokens(max);
        self
    }

    #[must_use]
    pub fn commit_keys(mut self, keys: Vec<CommitKey>) -> Self {
        self.input = self.input.commit_keys(keys);
        self
    }

    #[must_use]
    pub const fn initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    #[must_use]
    pub const fn mode_cycle(mut self, cycle: ModeCycle) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// Build the `SearchBar`
    ///
    /// # Errors
    ///
    /// Returns `TagbarError::BuildError` for an invalid token limit, missing
    /// commit keys, or clashing sigils in the configuration.
    pub fn build(self) -> Result<SearchBar, TagbarError> {
        let cycle = match (self.cycle, &self.config) {
            (Some(cycle), _) => cycle,
            (None, Some(config)) => config.mode_cycle()?,
            (None, None) => ModeCycle::default(),
        };

        Ok(SearchBar {
            input: self.input.build()?,
            cycle,
            mode: self.initial_mode,
            reconciler: Reconciler::new(self.initial_mode),
        })
    }
}

impl Default for SearchBarBuilder {
    fn default() -> Self {
        Self::new()
    }
}
