//! Search modes and the `/x` command prefix
//!
//! A search surface interprets its text in one of three modes, cycled in
//! ordinal order:
//!
//! | Ordinal | Mode          | Sigil | Label          |
//! |---------|---------------|-------|----------------|
//! | 0       | `TitleSearch` | `b`   | Title Search   |
//! | 1       | `TextSearch`  | `f`   | Text Search    |
//! | 2       | `TagSearch`   | `t`   | Tag Search     |
//!
//! Typing `/t rust` switches to tag search and leaves `rust` as the query.
//! Sigils and the prefix character are configurable through [`ModeCycle`].

pub mod parse;

pub use parse::ParsedQuery;

use crate::TagbarError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpretation of the search text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Keyword search over bookmark titles
    #[default]
    #[serde(rename = "title", alias = "title_search")]
    TitleSearch,
    /// Full-text search over bookmark content
    #[serde(rename = "text", alias = "text_search")]
    TextSearch,
    /// Search by a list of tags
    #[serde(rename = "tag", alias = "tag_search")]
    TagSearch,
}

impl Mode {
    /// Every mode in cycle order
    pub const ALL: [Self; 3] = [Self::TitleSearch, Self::TextSearch, Self::TagSearch];

    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::TitleSearch => 0,
            Self::TextSearch => 1,
            Self::TagSearch => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TitleSearch => "Title Search",
            Self::TextSearch => "Text Search",
            Self::TagSearch => "Tag Search",
        }
    }

    /// Whether the surface collects discrete tokens in this mode
    #[must_use]
    pub const fn is_token_oriented(self) -> bool {
        matches!(self, Self::TagSearch)
    }

    /// Default command sigil
    #[must_use]
    pub const fn default_sigil(self) -> char {
        match self {
            Self::TitleSearch => 'b',
            Self::TextSearch => 'f',
            Self::TagSearch => 't',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sigil assignment per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigilConfig {
    pub title: char,
    pub text: char,
    pub tag: char,
}

impl Default for SigilConfig {
    fn default() -> Self {
        Self {
            title: Mode::TitleSearch.default_sigil(),
            text: Mode::TextSearch.default_sigil(),
            tag: Mode::TagSearch.default_sigil(),
        }
    }
}

impl SigilConfig {
    #[must_use]
    pub const fn sigil(&self, mode: Mode) -> char {
        match mode {
            Mode::TitleSearch => self.title,
            Mode::TextSearch => self.text,
            Mode::TagSearch => self.tag,
        }
    }
}

/// Ordered mode set with its command prefix and sigils
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCycle {
    prefix: char,
    sigils: SigilConfig,
}

impl ModeCycle {
    pub const DEFAULT_PREFIX: char = '/';

    /// Build a cycle with custom sigils
    ///
    /// # Errors
    ///
    /// Returns `TagbarError::BuildError` if two modes share a sigil, a sigil
    /// is whitespace, or a sigil equals the prefix.
    pub fn new(prefix: char, sigils: SigilConfig) -> Result<Self, TagbarError> {
        if prefix.is_whitespace() {
            return Err(TagbarError::BuildError(
                "command prefix must not be whitespace".to_string(),
            ));
        }
        let chars = Mode::ALL.map(|m| sigils.sigil(m));
        for (i, c) in chars.iter().enumerate() {
            if c.is_whitespace() || *c == prefix {
                return Err(TagbarError::BuildError(format!(
                    "invalid sigil {c:?} for {}",
                    Mode::ALL[i]
                )));
            }
            if chars[..i].contains(c) {
                return Err(TagbarError::BuildError(format!(
                    "sigil {c:?} is assigned to more than one mode"
                )));
            }
        }
        Ok(Self { prefix, sigils })
    }

    /// Mode following `current`, wrapping after the last one
    #[must_use]
    pub const fn next(&self, current: Mode) -> Mode {
        Mode::ALL[(current.ordinal() + 1) % Mode::ALL.len()]
    }

    /// Mode bound to `sigil`, if any
    #[must_use]
    pub fn resolve_sigil(&self, sigil: char) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| self.sigils.sigil(*m) == sigil)
    }

    #[must_use]
    pub const fn sigil(&self, mode: Mode) -> char {
        self.sigils.sigil(mode)
    }

    #[must_use]
    pub const fn prefix(&self) -> char {
        self.prefix
    }

    /// Command text selecting `mode`, e.g. `/t`
    #[must_use]
    pub fn indicator(&self, mode: Mode) -> String {
        format!("{}{}", self.prefix, self.sigil(mode))
    }
}

impl Default for ModeCycle {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX,
            sigils: SigilConfig::default(),
        }
    }
}
