//! Byte ranges into the source text.

use std::ops::Range;

use serde::Serialize;

/// A byte range `[start, end)` into the source text.
///
/// Entities store spans rather than copied text; slicing the source with any
/// span reproduces the exact markup it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span sitting at `offset`.
    pub const fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The slice of `text` this span covers.
    ///
    /// # Panics
    /// Panics if the span is out of bounds or not on `char` boundaries, the
    /// same as indexing a `str` with a range.
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Checks if `outer` contains `inner`.
///
/// Containment is boundary-inclusive: a span contains itself, and a span
/// that shares either edge with `outer` is still inside it.
pub fn contains_span(outer: Span, inner: Span) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// Splits `items` into `(matching, rest)`, keeping the original order in both.
pub(crate) fn partition<T>(items: Vec<T>, mut pred: impl FnMut(&T) -> bool) -> (Vec<T>, Vec<T>) {
    let mut matching = Vec::new();
    let mut rest = Vec::new();
    for item in items {
        if pred(&item) {
            matching.push(item);
        } else {
            rest.push(item);
        }
    }
    (matching, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn contains_strictly_inner_span() {
        let large = Span::new(0, 10);
        let small = Span::new(5, 7);
        assert!(contains_span(large, small));
        assert!(!contains_span(small, large));
    }

    #[test]
    fn overlapping_spans_do_not_contain_each_other() {
        let left = Span::new(0, 5);
        let right = Span::new(3, 8);
        assert!(!contains_span(left, right));
        assert!(!contains_span(right, left));

        let large = Span::new(1, 6);
        assert!(!contains_span(large, left));
        assert!(!contains_span(large, right));
    }

    #[test]
    fn shared_edges_count_as_contained() {
        let outer = Span::new(2, 9);
        assert!(contains_span(outer, Span::new(2, 5)));
        assert!(contains_span(outer, Span::new(5, 9)));
        assert!(contains_span(outer, outer));
    }

    #[test]
    fn adjacent_spans_are_siblings() {
        let left = Span::new(0, 4);
        let right = Span::new(4, 8);
        assert!(!contains_span(left, right));
        assert!(!contains_span(right, left));
    }

    #[test]
    fn zero_width_span_on_boundary() {
        let outer = Span::new(3, 6);
        // Inclusive containment: an empty span on either edge is inside.
        assert!(contains_span(outer, Span::empty(3)));
        assert!(contains_span(outer, Span::empty(6)));
        assert!(!contains_span(outer, Span::empty(2)));
        assert!(!contains_span(outer, Span::empty(7)));
    }

    #[test]
    fn partition_keeps_order() {
        let nums = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let (evens, odds) = partition(nums, |n| n % 2 == 0);
        assert_eq!(evens, vec![2, 4, 6, 8, 10]);
        assert_eq!(odds, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn len_and_slice() {
        let text = "hello world";
        let span = Span::from(6..11);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.slice(text), "world");
        assert_eq!(Range::from(span), 6..11);
    }

    #[test]
    fn inverted_span_is_empty() {
        let span = Span { start: 5, end: 2 };
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }
}
