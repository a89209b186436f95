//! Command-prefix parsing for raw search text

use super::{Mode, ModeCycle};

/// Raw search text split into a mode and the text left to search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Mode after applying any sigil; unchanged when none matched
    pub mode: Mode,
    /// Text to keep in the staging buffer
    pub text: String,
    /// Whether the text started with a `/x` command
    pub command: bool,
}

impl ParsedQuery {
    /// Trimmed text to send as the search query
    #[must_use]
    pub fn effective_query(&self) -> &str {
        self.text.trim()
    }
}

impl ModeCycle {
    /// Split `raw` into a mode and a query
    ///
    /// When the trimmed text is longer than one character and starts with the
    /// prefix, its second character selects the mode and both characters are
    /// dropped even if the sigil is unknown. Otherwise the text is kept as typed
    /// and `current` stays in effect.
    #[must_use]
    pub fn parse(&self, raw: &str, current: Mode) -> ParsedQuery {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();

        if trimmed.chars().count() > 1 && chars.next() == Some(self.prefix()) {
            let mode = chars
                .next()
                .and_then(|sigil| self.resolve_sigil(sigil))
                .unwrap_or(current);
            return ParsedQuery {
                mode,
                text: chars.as_str().trim().to_string(),
                command: true,
            };
        }

        ParsedQuery {
            mode: current,
            text: raw.to_string(),
            command: false,
        }
    }
}
