//! Search requests issued by the reconciler

use crate::input::EditState;
use crate::mode::Mode;
use serde::Serialize;

/// What to ask the search collaborators for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "query", rename_all = "snake_case")]
pub enum SearchQuery {
    /// Unfiltered result set
    Default,
    /// Title keyword search; holds the trimmed query text
    Title(String),
    /// Full-text search; holds the trimmed query text
    Text(String),
    /// Tag search over the committed tokens, in order; empty while the
    /// only input is uncommitted text
    Tags(Vec<String>),
}

impl SearchQuery {
    /// Query describing `state` when interpreted under `mode`
    ///
    /// Token-oriented modes search the committed tokens, which may be none
    /// while text is still pending; free-text modes look at the trimmed
    /// staging buffer. Only a blank state maps to [`SearchQuery::Default`].
    #[must_use]
    pub fn for_state(mode: Mode, state: &EditState) -> Self {
        if state.is_blank() {
            return Self::Default;
        }
        if mode.is_token_oriented() {
            return Self::Tags(state.tokens().to_strings());
        }

        let text = state.staging().trim();
        if text.is_empty() {
            return Self::Default;
        }
        match mode {
            Mode::TitleSearch => Self::Title(text.to_string()),
            Mode::TextSearch | Mode::TagSearch => Self::Text(text.to_string()),
        }
    }

    /// Mode this query belongs to, `None` for the unfiltered set
    #[must_use]
    pub const fn mode(&self) -> Option<Mode> {
        match self {
            Self::Default => None,
            Self::Title(_) => Some(Mode::TitleSearch),
            Self::Text(_) => Some(Mode::TextSearch),
            Self::Tags(_) => Some(Mode::TagSearch),
        }
    }

    /// Whitespace-separated keywords of a title query
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        match self {
            Self::Title(text) => text.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// A query stamped with the generation it was issued in
///
/// Generations grow by one per issued request. Hosts apply only the results
/// of the newest generation they issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: SearchQuery,
}
