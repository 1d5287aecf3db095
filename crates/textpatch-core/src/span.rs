//! Spans, edits and edit batches.
//!
//! All offsets are plain `usize` values in whatever unit the producer used (see
//! [`crate::encoding::OffsetEncoding`]). Once handed to the applier they are interpreted as
//! character offsets (Unicode scalar values) into the buffer **before** any edit of the batch
//! is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open range `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    /// Inclusive start offset.
    pub start: usize,
    /// Number of units covered by the span.
    pub length: usize,
}

impl TextSpan {
    /// Create a span from a start offset and a length.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Create a span from a half-open `start..end` pair.
    ///
    /// If `end < start` the bounds are swapped.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        let (lo, hi) = (start.min(end), start.max(end));
        Self {
            start: lo,
            length: hi - lo,
        }
    }

    /// Exclusive end offset, or `None` if `start + length` overflows.
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.length)
    }

    /// Returns `true` if the span covers nothing (a pure insertion point).
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` if `offset` lies inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && self.end().is_none_or(|end| offset < end)
    }

    /// Returns `true` if both spans cover at least one common position.
    ///
    /// Empty spans never overlap anything; see [`crate::apply`] for how insertion points
    /// adjacent to replaced ranges are treated.
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let self_end = self.end().unwrap_or(usize::MAX);
        let other_end = other.end().unwrap_or(usize::MAX);
        self.start < other_end && other.start < self_end
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end() {
            Some(end) => write!(f, "{}..{}", self.start, end),
            None => write!(f, "{}+{}", self.start, self.length),
        }
    }
}

/// Replace the characters of `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextChange {
    /// The range being replaced.
    pub span: TextSpan,
    /// Replacement text (may be empty, may contain newlines).
    #[serde(rename = "newText", default)]
    pub new_text: String,
}

impl TextChange {
    /// Replace `length` units starting at `start`.
    pub fn replace(start: usize, length: usize, new_text: impl Into<String>) -> Self {
        Self {
            span: TextSpan::new(start, length),
            new_text: new_text.into(),
        }
    }

    /// Insert `new_text` before the unit at `offset`.
    pub fn insert(offset: usize, new_text: impl Into<String>) -> Self {
        Self::replace(offset, 0, new_text)
    }

    /// Delete `length` units starting at `start`.
    pub fn delete(start: usize, length: usize) -> Self {
        Self::replace(start, length, String::new())
    }

    /// Length of `new_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.new_text.chars().count()
    }
}

/// An ordered collection of edits computed against a single buffer snapshot.
///
/// Order is the producer's order. Formatting services conventionally emit edits in ascending
/// offset order, but nothing here relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditBatch(Vec<TextChange>);

impl EditBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode the JSON wire shape `[{ "span": { "start", "length" }, "newText" }, ...]`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Append an edit.
    pub fn push(&mut self, change: TextChange) {
        self.0.push(change);
    }

    /// Number of edits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the batch contains no edits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate edits in producer order.
    pub fn iter(&self) -> std::slice::Iter<'_, TextChange> {
        self.0.iter()
    }

    /// Borrow the edits as a slice.
    pub fn as_slice(&self) -> &[TextChange] {
        &self.0
    }

    /// Consume the batch.
    pub fn into_vec(self) -> Vec<TextChange> {
        self.0
    }
}

impl From<Vec<TextChange>> for EditBatch {
    fn from(edits: Vec<TextChange>) -> Self {
        Self(edits)
    }
}

impl FromIterator<TextChange> for EditBatch {
    fn from_iter<I: IntoIterator<Item = TextChange>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[TextChange]> for EditBatch {
    fn as_ref(&self) -> &[TextChange] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a EditBatch {
    type Item = &'a TextChange;
    type IntoIter = std::slice::Iter<'a, TextChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for EditBatch {
    type Item = TextChange;
    type IntoIter = std::vec::IntoIter<TextChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
