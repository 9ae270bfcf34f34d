//! The entity tree produced by the parser.

use serde::Serialize;

use crate::color::Color;
use crate::span::Span;

/// What an entity is, together with its kind-specific parameters.
///
/// The set is closed: renderers are expected to match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    /// Plain text. The document root, synthetic gap fillers and escaped
    /// characters are all text entities.
    Text,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    /// Inline code. Content is literal apart from escapes.
    Code,
    /// Fenced code. Content is literal apart from escapes.
    Codeblock {
        /// Language named on the opening fence line, if any.
        lang: Option<String>,
    },
    /// A single `> ` line.
    Blockquote,
    /// A `[type: ...]` expression. Content is literal apart from escapes.
    Custom {
        /// The text between `[` and `:`.
        expr_type: String,
    },
    /// A URL. For `<...>` links the inner span excludes the brackets.
    Link,
    /// An emoji glyph or glyph sequence.
    Emoji,
    /// A `:name:` emoji reference. The inner span is the name.
    EmojiName,
    /// Text colored from a color marker to the end of its line or enclosing
    /// entity.
    Color { color: Color },
}

impl EntityKind {
    /// A short name used in tree dumps.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Text => "Text",
            EntityKind::Bold => "Bold",
            EntityKind::Italic => "Italic",
            EntityKind::Underline => "Underline",
            EntityKind::Strikethrough => "Strikethrough",
            EntityKind::Spoiler => "Spoiler",
            EntityKind::Code => "Code",
            EntityKind::Codeblock { .. } => "Codeblock",
            EntityKind::Blockquote => "Blockquote",
            EntityKind::Custom { .. } => "Custom",
            EntityKind::Link => "Link",
            EntityKind::Emoji => "Emoji",
            EntityKind::EmojiName => "EmojiName",
            EntityKind::Color { .. } => "Color",
        }
    }
}

/// A node of the parsed tree.
///
/// `outer_span` includes the delimiters, `inner_span` is the content between
/// them. Children are in document order, each inside `inner_span`, and never
/// overlap one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    #[serde(flatten)]
    pub kind: EntityKind,
    pub inner_span: Span,
    pub outer_span: Span,
    pub children: Vec<Entity>,
}

impl Entity {
    pub fn new(kind: EntityKind, inner_span: Span, outer_span: Span, children: Vec<Entity>) -> Self {
        Self {
            kind,
            inner_span,
            outer_span,
            children,
        }
    }

    /// A childless text entity covering `span`.
    pub fn text(span: Span) -> Self {
        Self::new(EntityKind::Text, span, span, Vec::new())
    }

    /// A leaf with no delimiters: inner and outer spans are the same.
    pub fn atom(kind: EntityKind, span: Span) -> Self {
        Self::new(kind, span, span, Vec::new())
    }

    /// True for text entities without children.
    pub fn is_text_leaf(&self) -> bool {
        self.kind == EntityKind::Text && self.children.is_empty()
    }

    /// Visits this entity and all descendants, parents before children.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Entity)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Renders an indented one-line-per-entity view of the tree.
    ///
    /// Each line is `Kind@outer(inner)`, followed by kind parameters and, for
    /// leaves, the quoted inner text:
    ///
    /// ```text
    /// Text@0..8(0..8)
    ///   Bold@0..8(2..6)
    ///     Text@2..6(2..6) "bold"
    /// ```
    pub fn dump(&self, text: &str) -> String {
        let mut out = String::new();
        self.dump_into(text, 0, &mut out);
        out
    }

    fn dump_into(&self, text: &str, depth: usize, out: &mut String) {
        let params = match &self.kind {
            EntityKind::Codeblock { lang: Some(lang) } => format!(" lang={lang}"),
            EntityKind::Custom { expr_type } => format!(" type={expr_type}"),
            EntityKind::Color { color } => format!(" color={color}"),
            _ => String::new(),
        };
        let leaf = if self.children.is_empty() {
            format!(" {:?}", self.inner_span.slice(text))
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{}{}@{}..{}({}..{}){params}{leaf}\n",
            "  ".repeat(depth),
            self.kind.name(),
            self.outer_span.start,
            self.outer_span.end,
            self.inner_span.start,
            self.inner_span.end
        ));
        for child in &self.children {
            child.dump_into(text, depth + 1, out);
        }
    }
}
