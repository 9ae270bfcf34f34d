//! Filling the gaps between parsed entities with explicit text.
//!
//! The parser only records markup. After [`add_text_spans`], every stretch of
//! an entity's content is covered by exactly one child, so a renderer can walk
//! children in order without consulting offsets.

use crate::entity::{Entity, EntityKind};
use crate::span::Span;

/// Insert text leaves into every gap between siblings, and before the first
/// and after the last child of each entity.
///
/// Entities with content but no children get a single text child covering
/// their inner span. Text leaves, including escapes, are returned unchanged.
/// Applying this to an already filled tree returns an equal tree.
pub fn add_text_spans(entity: Entity) -> Entity {
    let Entity {
        kind,
        inner_span,
        outer_span,
        children,
    } = entity;

    if children.is_empty() {
        if kind == EntityKind::Text || inner_span.is_empty() {
            return Entity::new(kind, inner_span, outer_span, children);
        }
        let children = vec![Entity::text(inner_span)];
        return Entity::new(kind, inner_span, outer_span, children);
    }

    let mut filled = Vec::with_capacity(children.len() * 2 + 1);
    let mut cursor = inner_span.start;
    for child in children {
        if child.outer_span.start > cursor {
            filled.push(Entity::text(Span::new(cursor, child.outer_span.start)));
        }
        cursor = child.outer_span.end;
        filled.push(add_text_spans(child));
    }
    if cursor < inner_span.end {
        filled.push(Entity::text(Span::new(cursor, inner_span.end)));
    }

    Entity::new(kind, inner_span, outer_span, filled)
}
