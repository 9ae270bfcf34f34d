//! # Parser - Resolving Tokens Into Entities
//!
//! The resolver walks the token list once, left to right, keeping two pieces
//! of state:
//!
//! - a **marker stack** of opening delimiters that have not been closed yet
//! - a flat list of **completed entities**, in document order
//!
//! ## Symmetric markers
//!
//! `**`, `//`, `*`, `__`, `~~` and `||` open and close with the same lexeme.
//! When one arrives and a marker of the same kind and text is open, the pair
//! becomes an entity. Every completed entity inside the pair moves into its
//! children, and markers opened after the matched one are discarded: they can
//! no longer close without crossing the new entity. Otherwise the token is
//! pushed as a new marker.
//!
//! ```text
//! "**a //b** c//"
//!  ^^ open bold
//!      ^^ open italic
//!          ^^ close bold, drop italic
//!              ^^ open italic (never closed, stays text)
//! ```
//!
//! ## Raw zones
//!
//! Code, codeblocks and custom expressions search forward for their closer and
//! jump straight past it. Nothing between is parsed apart from escapes, which
//! become literal text children.
//!
//! ## Line constructs
//!
//! Blockquotes and colors are driven by line boundaries rather than tokens.
//! At the start of the document, at every newline and at the end, an open
//! blockquote closes, open colors close, and a new blockquote opens if the
//! next line starts with `"> "`.
//!
//! Unmatched delimiters never produce errors. They are left out of the tree
//! and show up as plain text once [`crate::add_text_spans`] fills the gaps.

mod marker;

use log::{debug, trace};

use crate::color::{Color, ColorError};
use crate::entity::{Entity, EntityKind};
use crate::lexer::{Token, TokenKind, lex};
use crate::options::ParseOptions;
use crate::span::{Span, contains_span, partition};
use marker::{Marker, MarkerKind};

/// The resolver state machine.
pub struct Parser<'t, 'input> {
    text: &'input str,
    tokens: &'t [Token<'input>],
    options: ParseOptions,
    markers: Vec<Marker<'input>>,
    entities: Vec<Entity>,
    /// Closer kinds already known not to appear after the cursor.
    exhausted: Vec<TokenKind>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(text: &'input str, tokens: &'t [Token<'input>], options: ParseOptions) -> Self {
        Self {
            text,
            tokens,
            options,
            markers: Vec::new(),
            entities: Vec::new(),
            exhausted: Vec::new(),
        }
    }

    /// Resolve every token and return the root text entity.
    pub fn parse(mut self) -> Entity {
        self.line_boundary(Span::empty(0));

        let mut pos = 0;
        while pos < self.tokens.len() {
            pos = self.token(pos);
        }

        let end = self.text.len();
        self.line_boundary(Span::empty(end));

        if !self.markers.is_empty() {
            debug!(
                "dropping {} unclosed markers: {:?}",
                self.markers.len(),
                self.markers.iter().map(|m| m.span).collect::<Vec<_>>()
            );
        }

        let span = Span::new(0, end);
        Entity::new(EntityKind::Text, span, span, self.entities)
    }

    /// Handle the token at `pos`, returning the position of the next token to
    /// look at.
    fn token(&mut self, pos: usize) -> usize {
        let token = self.tokens[pos];
        match token.kind {
            // newline is first because it's the most common token
            TokenKind::Newline => self.line_boundary(token.span),
            TokenKind::Bold => self.symmetric(MarkerKind::Bold, token),
            TokenKind::Italic => self.symmetric(MarkerKind::Italic, token),
            TokenKind::Underline => self.symmetric(MarkerKind::Underline, token),
            TokenKind::Strikethrough => self.symmetric(MarkerKind::Strikethrough, token),
            TokenKind::Spoiler => {
                if self.options.spoilers {
                    self.symmetric(MarkerKind::Spoiler, token);
                }
            }
            TokenKind::Color => {
                if self.options.colors {
                    self.color(token);
                }
            }
            TokenKind::Code => return self.code(pos),
            TokenKind::Codeblock => return self.codeblock(pos),
            TokenKind::CustomOpen => return self.custom(pos),
            // a closer with no opener is plain text
            TokenKind::CustomClose => {}
            TokenKind::Escape => self.push(escape(token)),
            TokenKind::Link => {
                if self.options.links {
                    self.push(Entity::atom(EntityKind::Link, token.span));
                }
            }
            TokenKind::LinkContained => {
                if self.options.links {
                    self.push(Entity::new(
                        EntityKind::Link,
                        shrink(token.span, 1),
                        token.span,
                        Vec::new(),
                    ));
                }
            }
            TokenKind::Emoji => {
                if self.options.emoji {
                    self.push(Entity::atom(EntityKind::Emoji, token.span));
                }
            }
            TokenKind::EmojiName => {
                if self.options.emoji {
                    self.push(Entity::new(
                        EntityKind::EmojiName,
                        shrink(token.span, 1),
                        token.span,
                        Vec::new(),
                    ));
                }
            }
        }
        pos + 1
    }

    fn push(&mut self, entity: Entity) {
        trace!(
            "{} at {:?}",
            entity.kind.name(),
            entity.outer_span.start..entity.outer_span.end
        );
        self.entities.push(entity);
    }

    fn symmetric(&mut self, kind: MarkerKind, token: Token<'input>) {
        let (can_open, can_close) = self.flanking(token);
        let found = self
            .markers
            .iter()
            .rposition(|m| m.is_closed_by(kind, token.text))
            .filter(|_| can_close);

        match found {
            Some(index) => {
                let marker = self.markers[index];
                self.close_colors(index + 1, token.span.start);
                let inner = Span::new(marker.span.end, token.span.start);
                let outer = Span::new(marker.span.start, token.span.end);
                self.complete(index, marker.entity_kind(), inner, outer);
            }
            None if can_open => self
                .markers
                .push(Marker::delimited(kind, token.span, token.text)),
            None => debug!(
                "{:?} at {:?} has nothing to close and cannot open",
                token.text,
                token.span.start..token.span.end
            ),
        }
    }

    /// Whether a symmetric token may open and may close a pair.
    ///
    /// A lone `*` must touch the text it wraps: it opens only when followed
    /// by a non-space character and closes only when preceded by one, so
    /// `2 * 3 * 4` stays text. Every other delimiter can do both.
    fn flanking(&self, token: Token<'input>) -> (bool, bool) {
        if token.text != "*" {
            return (true, true);
        }
        let before = self.text[..token.span.start].chars().next_back();
        let after = self.text[token.span.end..].chars().next();
        let touches = |c: Option<char>| c.is_some_and(|c| !c.is_whitespace());
        (touches(after), touches(before))
    }

    /// Close the marker at `index` as an entity, adopting every completed
    /// entity inside `outer` as its children.
    fn complete(&mut self, index: usize, kind: EntityKind, inner: Span, outer: Span) {
        let crossed = self.markers.len() - index - 1;
        if crossed > 0 {
            debug!(
                "{} at {:?} discards {crossed} markers opened inside it",
                kind.name(),
                outer.start..outer.end
            );
        }
        self.markers.truncate(index);

        let entities = std::mem::take(&mut self.entities);
        let (children, siblings) = partition(entities, |e| contains_span(outer, e.outer_span));
        self.entities = siblings;
        self.push(Entity::new(kind, inner, outer, children));
    }

    /// Close every color marker at or above `floor` so that it ends at `end`.
    ///
    /// Markers opened after a closed color are discarded with it.
    fn close_colors(&mut self, floor: usize, end: usize) {
        while let Some(index) = self.markers[floor..]
            .iter()
            .rposition(|m| m.kind == MarkerKind::Color)
            .map(|i| i + floor)
        {
            let marker = self.markers[index];
            let inner = Span::new(marker.span.end, end);
            let outer = Span::new(marker.span.start, end);
            self.complete(index, marker.entity_kind(), inner, outer);
        }
    }

    /// A color token switches color when the current color is the innermost
    /// open marker, and otherwise opens a nested color. `[#]` only closes.
    fn color(&mut self, token: Token<'input>) {
        if let Some(top) = self.markers.len().checked_sub(1)
            && self.markers[top].kind == MarkerKind::Color
        {
            self.close_colors(top, token.span.start);
        }

        let code = &token.text[1..token.text.len() - 1];
        match code.parse::<Color>() {
            Ok(color) => self.markers.push(Marker::color(token.span, color)),
            Err(ColorError::Empty) => {}
            Err(err) => debug!("ignoring color marker {:?}: {err}", token.text),
        }
    }

    /// Check the line boundary at `boundary`: close the open blockquote and
    /// colors, and open a blockquote if the next line is quoted.
    ///
    /// A blockquote owns the line breaks around it: its opening delimiter
    /// starts at the preceding break and its outer span ends after the
    /// following one. A break already owned by the quote closing here is not
    /// claimed again by the next quote.
    fn line_boundary(&mut self, boundary: Span) {
        let mut quote_start = boundary.start;

        if let Some(index) = self
            .markers
            .iter()
            .position(|m| m.kind == MarkerKind::Blockquote)
        {
            let marker = self.markers[index];
            self.close_colors(index + 1, boundary.start);
            let inner = Span::new(marker.span.end, boundary.start);
            let outer = Span::new(marker.span.start, boundary.end);
            self.complete(index, EntityKind::Blockquote, inner, outer);
            quote_start = boundary.end;
        }

        self.close_colors(0, boundary.start);

        if self.text[boundary.end..].starts_with(BLOCKQUOTE_PREFIX) {
            let prefix = Span::new(quote_start, boundary.end + BLOCKQUOTE_PREFIX.len());
            self.markers.push(Marker::blockquote(prefix));
        }
    }

    /// Find the first token of `kind` after `pos`.
    fn find_closer(&mut self, pos: usize, kind: TokenKind) -> Option<usize> {
        if self.exhausted.contains(&kind) {
            return None;
        }
        let found = self.tokens[pos + 1..]
            .iter()
            .position(|t| t.kind == kind)
            .map(|i| pos + 1 + i);
        if found.is_none() {
            // Searches only move forward, so later ones would fail too.
            self.exhausted.push(kind);
        }
        found
    }

    /// Escapes strictly between `open` and `close`, as literal text entities.
    fn escapes_between(&self, open: usize, close: usize) -> Vec<Entity> {
        self.tokens[open + 1..close]
            .iter()
            .filter(|t| t.kind == TokenKind::Escape)
            .map(|t| escape(*t))
            .collect()
    }

    /// Resolve a raw zone opened at `pos` and closed by the next `closer`.
    ///
    /// `build` receives the opening and closing tokens and returns the kind
    /// and inner span. Returns the position after the closer, or after the
    /// opener when there is no closer.
    fn raw_zone(
        &mut self,
        pos: usize,
        closer: TokenKind,
        build: impl FnOnce(&Self, Token<'input>, Token<'input>) -> (EntityKind, Span),
    ) -> usize {
        let open = self.tokens[pos];
        let Some(close_pos) = self.find_closer(pos, closer) else {
            debug!(
                "no closer for {:?} at {:?}",
                open.text,
                open.span.start..open.span.end
            );
            return pos + 1;
        };
        let close = self.tokens[close_pos];

        let (kind, inner) = build(&*self, open, close);
        let outer = Span::new(open.span.start, close.span.end);
        let children = self.escapes_between(pos, close_pos);
        self.push(Entity::new(kind, inner, outer, children));

        close_pos + 1
    }

    fn code(&mut self, pos: usize) -> usize {
        self.raw_zone(pos, TokenKind::Code, |_, open, close| {
            (EntityKind::Code, Span::new(open.span.end, close.span.start))
        })
    }

    fn codeblock(&mut self, pos: usize) -> usize {
        self.raw_zone(pos, TokenKind::Codeblock, |p, open, close| {
            let (lang, header_len) = p.codeblock_header(open.span.end);
            let inner = Span::new(open.span.end + header_len, close.span.start);
            (EntityKind::Codeblock { lang }, inner)
        })
    }

    fn custom(&mut self, pos: usize) -> usize {
        self.raw_zone(pos, TokenKind::CustomClose, |_, open, close| {
            // `[type:` minus the bracket and colon
            let expr_type = open.text[1..open.text.len() - 1].to_string();
            let inner = Span::new(open.span.end, close.span.start);
            (EntityKind::Custom { expr_type }, inner)
        })
    }

    /// Read the optional `lang` line after an opening fence.
    ///
    /// Returns the language (if the word is non-empty) and the byte length of
    /// the header including its line break. Without a line break directly
    /// after the word there is no header at all.
    fn codeblock_header(&self, from: usize) -> (Option<String>, usize) {
        let rest = &self.text[from..];
        let word_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let after = &rest[word_len..];
        let newline_len = if after.starts_with("\r\n") {
            2
        } else if after.starts_with('\n') {
            1
        } else {
            return (None, 0);
        };

        let word = &rest[..word_len];
        let lang = (!word.is_empty()).then(|| word.to_string());
        (lang, word_len + newline_len)
    }
}

const BLOCKQUOTE_PREFIX: &str = "> ";

/// An escape as a text entity whose content is the escaped character.
fn escape(token: Token<'_>) -> Entity {
    let inner = Span::new(token.span.start + 1, token.span.end);
    Entity::new(EntityKind::Text, inner, token.span, Vec::new())
}

/// `span` without `n` bytes on each side.
fn shrink(span: Span, n: usize) -> Span {
    Span::new(span.start + n, span.end - n)
}

/// Parse markup with every extension enabled.
///
/// Never fails: unmatched or malformed markup stays in the text. The result
/// is a root text entity covering the whole input; gaps between its
/// descendants are not filled, see [`crate::add_text_spans`].
pub fn parse_markup(text: &str) -> Entity {
    parse_markup_with(text, &ParseOptions::default())
}

/// Parse markup recognizing only the extensions enabled in `options`.
pub fn parse_markup_with(text: &str, options: &ParseOptions) -> Entity {
    let tokens = lex(text);
    Parser::new(text, &tokens, *options).parse()
}
