//! Mode transition reconciliation
//!
//! When the search mode changes, the representation of the user's input has
//! to follow: free text becomes tokens when entering tag search (split), and
//! tokens collapse back into text when leaving it (join). The reconciler
//! performs that conversion once per mode change and then issues exactly one
//! search request so the displayed results are never stale.
//!
//! ```text
//!  FreeText(mode) ── enter tag mode, buffer non-empty ──▶ Split ──▶ Tags(tokens)
//!  Tags(mode)     ── leave tag mode, tokens exist     ──▶ Join  ──▶ Text(joined)
//!  any            ── buffer and tokens both empty     ──▶ Default (unfiltered)
//!  any            ── otherwise                        ──▶ current representation
//! ```
//!
//! Outside of mode changes, [`Reconciler::settle`] only issues a request when
//! the query actually differs from the last one issued.

pub mod request;

pub use request::{SearchQuery, SearchRequest};

use crate::input::EditState;
use crate::mode::Mode;
use crate::tokens::TokenError;
use tracing::{debug, warn};

/// Representation change applied on a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Buffer words became the token set
    Split,
    /// Tokens were joined back into the buffer
    Join,
    /// Nothing to convert
    None,
}

/// Result of settling the edit state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub transition: Transition,
    pub request: SearchRequest,
    /// Set when a split was refused because it would exceed the token limit
    pub error: Option<TokenError>,
}

/// Tracks the settled mode and the last issued query of one surface
#[derive(Debug, Clone)]
pub struct Reconciler {
    settled_mode: Mode,
    generation: u64,
    last_query: SearchQuery,
}

impl Reconciler {
    /// Start settled in `initial` mode with the unfiltered set on display
    #[must_use]
    pub const fn new(initial: Mode) -> Self {
        Self {
            settled_mode: initial,
            generation: 0,
            last_query: SearchQuery::Default,
        }
    }

    /// Mode of the last settled state
    #[must_use]
    pub const fn settled_mode(&self) -> Mode {
        self.settled_mode
    }

    /// Generation of the newest issued request, 0 before the first one
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn last_query(&self) -> &SearchQuery {
        &self.last_query
    }

    /// Settle `state` under `mode` after any mutation
    ///
    /// A mode different from the settled one runs the split/join transition
    /// exactly once and always issues a request. Without a mode change, a
    /// request is issued only when the query changed.
    pub fn settle(&mut self, mode: Mode, state: &mut EditState) -> Option<Reconciled> {
        if mode != self.settled_mode {
            return Some(self.transition(mode, state));
        }

        let query = SearchQuery::for_state(mode, state);
        if query == self.last_query {
            return None;
        }
        Some(Reconciled {
            transition: Transition::None,
            request: self.issue(query),
            error: None,
        })
    }

    /// Like [`settle`](Self::settle), but always issues a request
    pub fn refresh(&mut self, mode: Mode, state: &mut EditState) -> Reconciled {
        if mode != self.settled_mode {
            return self.transition(mode, state);
        }
        let query = SearchQuery::for_state(mode, state);
        Reconciled {
            transition: Transition::None,
            request: self.issue(query),
            error: None,
        }
    }

    /// Forget the displayed query so the next settle re-issues it
    pub fn invalidate(&mut self) {
        self.last_query = SearchQuery::Default;
    }

    fn transition(&mut self, to: Mode, state: &mut EditState) -> Reconciled {
        let from = std::mem::replace(&mut self.settled_mode, to);
        let mut error = None;

        let transition = if to.is_token_oriented()
            && !from.is_token_oriented()
            && !state.staging().trim().is_empty()
        {
            match split(state) {
                Ok(()) => Transition::Split,
                Err(e) => {
                    warn!(error = %e, "split refused, keeping text in buffer");
                    error = Some(e);
                    Transition::None
                }
            }
        } else if from.is_token_oriented() && !to.is_token_oriented() && !state.tokens().is_empty() {
            join(state);
            Transition::Join
        } else {
            Transition::None
        };

        debug!(?from, ?to, ?transition, "mode changed");
        let query = SearchQuery::for_state(to, state);
        Reconciled {
            transition,
            request: self.issue(query),
            error,
        }
    }

    fn issue(&mut self, query: SearchQuery) -> SearchRequest {
        self.generation += 1;
        self.last_query = query.clone();
        debug!(generation = self.generation, ?query, "issuing search");
        SearchRequest {
            generation: self.generation,
            query,
        }
    }
}

/// Move buffer words into the token set, clearing the buffer on success
fn split(state: &mut EditState) -> Result<(), TokenError> {
    let text = state.staging().to_string();
    state.tokens_mut().replace_all(text.split_whitespace())?;
    state.take_staging();
    Ok(())
}

/// Collapse tokens, plus any half-typed tag, into the buffer
fn join(state: &mut EditState) {
    let mut joined = state.tokens().join();
    let pending = state.take_staging();
    let pending = pending.trim();
    if !pending.is_empty() {
        joined.push(' ');
        joined.push_str(pending);
    }
    state.tokens_mut().clear();
    state.set_staging(joined);
}
