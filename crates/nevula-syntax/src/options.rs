//! Switches for the optional markup extensions.

use serde::{Deserialize, Serialize};

/// Which optional constructs the parser recognizes.
///
/// Bold, italic, underline, strikethrough, code, codeblocks, custom
/// expressions, blockquotes and escapes are always recognized. A disabled
/// extension leaves its lexemes in the text as plain characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Bare `https://` links and `<https://...>` links.
    pub links: bool,
    /// Emoji glyphs and `:name:` references.
    pub emoji: bool,
    /// `[#rgb]` color markers.
    pub colors: bool,
    /// `||spoiler||` markers.
    pub spoilers: bool,
}

impl ParseOptions {
    /// Only the core constructs.
    pub const fn core() -> Self {
        Self {
            links: false,
            emoji: false,
            colors: false,
            spoilers: false,
        }
    }

    /// Every extension enabled.
    pub const fn all() -> Self {
        Self {
            links: true,
            emoji: true,
            colors: true,
            spoilers: true,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::all()
    }
}
