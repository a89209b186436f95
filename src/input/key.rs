//! Key decoding for raw key codes and terminal key events

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// A keystroke as seen by the tag input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Backspace,
    /// Printable character other than space
    Char(char),
    /// Anything the input does not care about (arrows, modifiers, ...)
    Other,
}

impl Key {
    pub const SPACE_CODE: u32 = 32;
    pub const ENTER_CODE: u32 = 13;
    pub const BACKSPACE_CODE: u32 = 8;

    /// Decode a browser-style key code
    ///
    /// Space, enter and backspace use their classic codes; any other
    /// printable code point becomes [`Key::Char`].
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::SPACE_CODE => Self::Space,
            Self::ENTER_CODE => Self::Enter,
            Self::BACKSPACE_CODE => Self::Backspace,
            other => char::from_u32(other)
                .filter(|c| !c.is_control())
                .map_or(Self::Other, Self::Char),
        }
    }

    /// Map a typed character, folding whitespace commit characters
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Self::Space,
            '\n' | '\r' => Self::Enter,
            c if c.is_control() => Self::Other,
            c => Self::Char(c),
        }
    }

    /// Keys for every character of `text`, handy for feeding typed words
    pub fn typed(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().map(Self::from_char)
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        if event.kind == KeyEventKind::Release {
            return Self::Other;
        }
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Self::Other;
        }
        match event.code {
            KeyCode::Char(c) => Self::from_char(c),
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            _ => Self::Other,
        }
    }
}

/// Keys allowed to commit the staging buffer as a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKey {
    Space,
    Enter,
}

impl CommitKey {
    #[must_use]
    pub const fn matches(self, key: Key) -> bool {
        matches!(
            (self, key),
            (Self::Space, Key::Space) | (Self::Enter, Key::Enter)
        )
    }

    /// Space and enter, the default commit keys
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::Space, Self::Enter]
    }
}
