#![allow(dead_code)]

use nevula_syntax::{Entity, EntityKind, contains_span};

/// A filled tree reduced to kind names and leaf text.
#[derive(Debug, PartialEq, Eq)]
pub enum Slice<'a> {
    Text(&'a str),
    Node(&'static str, Vec<Slice<'a>>),
}

pub fn slices<'a>(text: &'a str, entity: &Entity) -> Slice<'a> {
    if entity.is_text_leaf() {
        return Slice::Text(entity.inner_span.slice(text));
    }
    Slice::Node(
        entity.kind.name(),
        entity.children.iter().map(|c| slices(text, c)).collect(),
    )
}

/// Inner text of every text leaf, in document order.
pub fn leaf_texts<'a>(text: &'a str, entity: &Entity) -> Vec<&'a str> {
    let mut out = Vec::new();
    entity.walk(&mut |e| {
        if e.is_text_leaf() {
            out.push(e.inner_span.slice(text));
        }
    });
    out
}

/// Writes each entity's delimiters around its children and each leaf's
/// outer slice. For a filled tree this is the source text.
pub fn reconstruct(text: &str, entity: &Entity) -> String {
    let mut out = String::new();
    reconstruct_into(text, entity, &mut out);
    out
}

fn reconstruct_into(text: &str, entity: &Entity, out: &mut String) {
    if entity.children.is_empty() {
        out.push_str(entity.outer_span.slice(text));
        return;
    }
    out.push_str(&text[entity.outer_span.start..entity.inner_span.start]);
    for child in &entity.children {
        reconstruct_into(text, child, out);
    }
    out.push_str(&text[entity.inner_span.end..entity.outer_span.end]);
}

/// Validates the structural invariants of a parsed tree.
///
/// Asserts that:
/// - The root is a text entity covering the whole input
/// - Every span is in bounds, on char boundaries, and inner lies within outer
/// - Every child lies within its parent's inner span
/// - Siblings are sorted and never overlap
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(text: &str, root: &Entity) {
    assert_eq!(root.kind, EntityKind::Text, "root must be text");
    assert_eq!(root.outer_span.start, 0, "root must start at 0");
    assert_eq!(root.outer_span.end, text.len(), "root must cover the input");
    check_entity(text, root);
}

fn check_entity(text: &str, entity: &Entity) {
    for span in [entity.inner_span, entity.outer_span] {
        assert!(
            span.start <= span.end && span.end <= text.len(),
            "span out of bounds: {span:?} (text len: {})",
            text.len()
        );
        assert!(
            text.is_char_boundary(span.start) && text.is_char_boundary(span.end),
            "span not on char boundaries: {span:?}"
        );
    }
    assert!(
        contains_span(entity.outer_span, entity.inner_span),
        "inner span {:?} not within outer span {:?}",
        entity.inner_span,
        entity.outer_span
    );

    for child in &entity.children {
        assert!(
            contains_span(entity.inner_span, child.outer_span),
            "{} at {:?} escapes its parent {} inner {:?}",
            child.kind.name(),
            child.outer_span,
            entity.kind.name(),
            entity.inner_span
        );
        check_entity(text, child);
    }
    for pair in entity.children.windows(2) {
        assert!(
            pair[0].outer_span.end <= pair[1].outer_span.start,
            "siblings overlap or are unsorted: {:?} then {:?}",
            pair[0].outer_span,
            pair[1].outer_span
        );
    }
}
