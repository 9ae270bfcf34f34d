//! # Lexer - Tokenizing Markup Source
//!
//! The first stage of parsing: finding every markup lexeme in the source with
//! one combined pattern, compiled once per process.
//!
//! ## Priority
//!
//! The pattern is an alternation of the entries in [`TOKEN_PARTS`]. The regex
//! engine reports the leftmost match, and when several entries match at the
//! same position the one declared first wins. The table order therefore
//! doubles as tie-break priority:
//!
//! - Newlines come first since they are the most frequent token.
//! - Escapes come before every lexeme they can escape.
//! - ```` ``` ```` comes before ` `` ` and `**` before `*`, so the wider
//!   lexeme wins at the same position.
//! - The keycap emoji `*️⃣` comes before every `*` lexeme.
//!
//! Text between lexemes is not tokenized at all. The resolver only needs the
//! positions of markup, and any gap between tokens is plain text.
//!
//! ```
//! use nevula_syntax::lexer::{lex, TokenKind};
//!
//! let kinds: Vec<_> = lex("**bold** text").iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![TokenKind::Bold, TokenKind::Bold]);
//! ```

use std::sync::OnceLock;

use regex::{CaptureLocations, Regex, RegexBuilder};

use crate::span::Span;

/// Token kinds recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Line ending (LF or CRLF)
    Newline,
    /// `\` followed by an escapable character
    Escape,
    /// ```` ``` ````
    Codeblock,
    /// ` `` `
    Code,
    /// `**`
    Bold,
    /// `__`
    Underline,
    /// `~~`
    Strikethrough,
    /// `||`
    Spoiler,
    /// `//` or `*`
    Italic,
    /// `<https://...>`
    LinkContained,
    /// `https://...`
    Link,
    /// `[#rgb]`, `[#rrggbb]` or the reset marker `[#]`
    Color,
    /// `[type:`
    CustomOpen,
    /// `]`
    CustomClose,
    /// `:name:`
    EmojiName,
    /// A Unicode emoji, including modifier, keycap, flag and ZWJ sequences
    Emoji,
}

/// Emoji sequences, longest forms first. Each `(?:...)` participant of a tag
/// or ZWJ sequence is a modifier pair, a presentation-selected emoji or a
/// bare emoji.
const EMOJI_SEQUENCE: &str = concat!(
    // tag sequences (subdivision flags)
    r"(?:\p{Emoji_Modifier_Base}\p{Emoji_Modifier}|\p{Emoji}\x{FE0F}|\p{Emoji})",
    r"[\x{E0020}-\x{E007E}]+\x{E007F}",
    // ZWJ sequences
    r"|(?:\p{Emoji_Modifier_Base}\p{Emoji_Modifier}|\p{Emoji}\x{FE0F}|\p{Emoji})",
    r"(?:\x{200D}(?:\p{Emoji_Modifier_Base}\p{Emoji_Modifier}|\p{Emoji}\x{FE0F}|\p{Emoji}))+",
    r"|\p{Regional_Indicator}\p{Regional_Indicator}",
    r"|\p{Emoji_Modifier_Base}\p{Emoji_Modifier}",
    r"|\p{Emoji}\x{FE0F}",
    r"|\p{Emoji_Presentation}",
    r"|\p{Extended_Pictographic}",
);

/// Keycaps start with an ASCII char that may also be markup.
const KEYCAP: &str = r"[0-9#*]\x{FE0F}\x{20E3}";

/// The lexeme table. Order is match priority; patterns must not contain
/// capturing groups since the group index identifies the kind.
const TOKEN_PARTS: &[(TokenKind, &str)] = &[
    (TokenKind::Newline, r"\r?\n"),
    (TokenKind::Escape, r"\\[\\*/_~`\[\]|<:]"),
    (TokenKind::Emoji, KEYCAP),
    (TokenKind::Codeblock, r"```"),
    (TokenKind::Code, r"``"),
    (TokenKind::Bold, r"\*\*"),
    (TokenKind::Underline, r"__"),
    (TokenKind::Strikethrough, r"~~"),
    (TokenKind::Spoiler, r"\|\|"),
    (TokenKind::Italic, r"//"),
    (TokenKind::Italic, r"\*"),
    (TokenKind::LinkContained, r"<https?://[^\s<>]+>"),
    (TokenKind::Link, r"https?://[^\s<>\[\]]+"),
    (TokenKind::Color, r"\[#(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})?\]"),
    (TokenKind::CustomOpen, r"\[(?:\w+|[^\s\w\]]):"),
    (TokenKind::CustomClose, r"\]"),
    (TokenKind::EmojiName, r":\w+:"),
    (TokenKind::Emoji, EMOJI_SEQUENCE),
];

/// Characters dropped from the end of a bare link. Sentence punctuation and
/// markup delimiters directly after a URL belong to the surrounding text.
/// A trailing `//` is dropped too, so it can close an italic.
const LINK_TRAILING: &[char] = &[
    '.', ',', ':', ';', '!', '?', ')', '\'', '"', '*', '_', '~', '|', '`',
];

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        let pattern = TOKEN_PARTS
            .iter()
            .map(|(_, part)| format!("({part})"))
            .collect::<Vec<_>>()
            .join("|");
        // The emoji classes compile to a large automaton.
        RegexBuilder::new(&pattern)
            .size_limit(64 * (1 << 20))
            .build()
            .expect("Invalid token regex")
    })
}

/// A lexed token with its kind, source text, and byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// Lex the input into the sequence of markup tokens, in source order.
///
/// Tokens never overlap. Text that is not markup produces no token.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let regex = token_regex();
    let mut locs = regex.capture_locations();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(m) = regex.captures_read_at(&mut locs, input, pos) {
        let kind = matched_kind(&locs);
        let mut span = Span::new(m.start(), m.end());

        if kind == TokenKind::Link {
            span.end = trim_link_end(input, span);
            pos = span.end;
            // Nothing left after the scheme once punctuation is dropped.
            if span.slice(input).ends_with("://") {
                continue;
            }
        } else {
            pos = span.end;
        }

        tokens.push(Token {
            kind,
            text: span.slice(input),
            span,
        });
    }

    tokens
}

/// Maps the capture group that participated in a match back to its kind.
///
/// # Panics
/// Panics if no group participated, which means [`TOKEN_PARTS`] and the
/// compiled pattern disagree.
fn matched_kind(locs: &CaptureLocations) -> TokenKind {
    (1..locs.len())
        .find(|&group| locs.get(group).is_some())
        .map(|group| TOKEN_PARTS[group - 1].0)
        .expect("token matched without a participating capture group")
}

fn trim_link_end(input: &str, span: Span) -> usize {
    let url = span.slice(input);
    let scheme_end = url.find("://").map_or(0, |i| i + "://".len());
    let mut trimmed = url.trim_end_matches(LINK_TRAILING);
    while let Some(rest) = trimmed.strip_suffix("//")
        && rest.len() >= scheme_end
    {
        trimmed = rest.trim_end_matches(LINK_TRAILING);
    }
    span.start + trimmed.len()
}
