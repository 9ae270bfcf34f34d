//! Open delimiters waiting for their closer.

use crate::color::Color;
use crate::entity::EntityKind;
use crate::span::Span;

/// The kinds of construct that can sit open on the marker stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Color,
    Blockquote,
}

/// Extra state a marker needs when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerData<'a> {
    None,
    /// The literal opening delimiter. Symmetric markers only close on the
    /// same text, so `//` never pairs with `*`.
    Delimiter(&'a str),
    /// The value parsed from a color marker.
    Color(Color),
}

/// An opening delimiter with no closer yet.
///
/// Markers that never close are dropped when the scan ends, leaving their
/// delimiter as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    pub kind: MarkerKind,
    /// Span of the opening delimiter.
    pub span: Span,
    pub data: MarkerData<'a>,
}

impl<'a> Marker<'a> {
    /// A symmetric marker opened by `delimiter`.
    pub fn delimited(kind: MarkerKind, span: Span, delimiter: &'a str) -> Self {
        Self {
            kind,
            span,
            data: MarkerData::Delimiter(delimiter),
        }
    }

    pub fn color(span: Span, color: Color) -> Self {
        Self {
            kind: MarkerKind::Color,
            span,
            data: MarkerData::Color(color),
        }
    }

    pub fn blockquote(span: Span) -> Self {
        Self {
            kind: MarkerKind::Blockquote,
            span,
            data: MarkerData::None,
        }
    }

    /// Whether a token of `kind` with text `delimiter` closes this marker.
    pub fn is_closed_by(&self, kind: MarkerKind, delimiter: &str) -> bool {
        self.kind == kind && self.data == MarkerData::Delimiter(delimiter)
    }

    /// The entity this marker becomes once closed.
    pub fn entity_kind(&self) -> EntityKind {
        match (self.kind, self.data) {
            (MarkerKind::Bold, _) => EntityKind::Bold,
            (MarkerKind::Italic, _) => EntityKind::Italic,
            (MarkerKind::Underline, _) => EntityKind::Underline,
            (MarkerKind::Strikethrough, _) => EntityKind::Strikethrough,
            (MarkerKind::Spoiler, _) => EntityKind::Spoiler,
            (MarkerKind::Blockquote, _) => EntityKind::Blockquote,
            (MarkerKind::Color, MarkerData::Color(color)) => EntityKind::Color { color },
            (MarkerKind::Color, data) => {
                unreachable!("color marker without a color value: {data:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn italic_delimiters_only_pair_with_themselves() {
        let marker = Marker::delimited(MarkerKind::Italic, Span::new(0, 2), "//");
        assert!(marker.is_closed_by(MarkerKind::Italic, "//"));
        assert!(!marker.is_closed_by(MarkerKind::Italic, "*"));
        assert!(!marker.is_closed_by(MarkerKind::Bold, "//"));
    }

    #[test]
    fn color_marker_carries_value_into_entity() {
        let color = Color::new(1, 2, 3);
        let marker = Marker::color(Span::new(0, 6), color);
        assert_eq!(marker.entity_kind(), EntityKind::Color { color });
    }

    #[test]
    fn blockquote_is_never_closed_by_a_token() {
        let marker = Marker::blockquote(Span::new(0, 2));
        assert!(!marker.is_closed_by(MarkerKind::Blockquote, "> "));
    }
}
