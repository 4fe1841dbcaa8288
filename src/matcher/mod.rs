//! Re-projects stored highlights onto scene text by content match.
//!
//! Offsets are byte offsets into the scene text and always sit on char
//! boundaries. Matching is case-insensitive per char, so a match covers
//! exactly as many chars as the record text. Chars compare equal when their
//! lowercase or uppercase mappings agree, which also pairs final sigma with
//! `Σ`. Multi-char foldings such as `ß` against `SS` never match.

use std::ops::Range;

use crate::geometry::Color;
use crate::highlight::{HighlightId, HighlightRecord};
use crate::taxonomy::ElementCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRange {
    pub start: usize,
    pub end: usize,
    pub color: Color,
    pub category: ElementCategory,
    pub record_id: HighlightId,
}

impl PaintRange {
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered, non-overlapping spans. Applying a range repaints whatever it covers.
#[derive(Debug, Clone, Default)]
pub struct PaintBuffer {
    spans: Vec<PaintRange>,
}

impl PaintBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, paint: PaintRange) {
        if paint.is_empty() {
            return;
        }
        let first = self.spans.partition_point(|span| span.end <= paint.start);
        let last = self.spans.partition_point(|span| span.start < paint.end);

        let mut replacement = Vec::with_capacity(3);
        if let Some(head) = self.spans.get(first).filter(|_| first < last) {
            if head.start < paint.start {
                replacement.push(PaintRange {
                    end: paint.start,
                    ..*head
                });
            }
        }
        replacement.push(paint);
        if let Some(tail) = last.checked_sub(1).filter(|&i| i >= first).map(|i| self.spans[i]) {
            if tail.end > paint.end {
                replacement.push(PaintRange {
                    start: paint.end,
                    ..tail
                });
            }
        }
        self.spans.splice(first..last, replacement);
    }

    pub fn into_spans(self) -> Vec<PaintRange> {
        self.spans
    }
}

/// Every non-overlapping occurrence of `needle`, scanning left to right.
pub fn occurrences(text: &str, needle: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }
    let mut cursor = 0;
    while let Some(hit) = find_from(text, needle, cursor) {
        cursor = hit.end;
        found.push(hit);
    }
    found
}

/// Paint instructions for one scene. Records are applied in the given
/// (insertion) order, so later records win where matches overlap.
pub fn paint_ranges(text: &str, records: &[HighlightRecord]) -> Vec<PaintRange> {
    let mut buffer = PaintBuffer::new();
    for record in records {
        let color = record.category.color();
        for hit in occurrences(text, &record.text) {
            buffer.apply(PaintRange {
                start: hit.start,
                end: hit.end,
                color,
                category: record.category,
                record_id: record.id,
            });
        }
    }
    buffer.into_spans()
}

fn find_from(text: &str, needle: &str, cursor: usize) -> Option<Range<usize>> {
    let rest = text.get(cursor..)?;
    rest.char_indices().find_map(|(offset, _)| {
        let start = cursor + offset;
        match_len_at(&text[start..], needle).map(|len| start..start + len)
    })
}

fn match_len_at(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for expected in needle.chars() {
        let (_, actual) = hay.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(index, _)| index))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}
