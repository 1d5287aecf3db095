//! Structured report of an applied edit batch.
//!
//! Consumers that track derived state (selections, highlights, "changed range" markers) need to
//! know what an apply actually did without diffing the before/after text. A [`TextDelta`] lists
//! the edits in **application order** (highest offset first).

use serde::{Deserialize, Serialize};

/// One edit as it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedEdit {
    /// Position of the edit in the caller's batch.
    pub index: usize,
    /// Start character offset in the original buffer. Every edit applied before this one lies
    /// to its right, so the offset was still valid when it was applied.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl AppliedEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-edit buffer.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }
}

/// What a successful apply did to a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Edits in application order.
    pub edits: Vec<AppliedEdit>,
}

impl TextDelta {
    /// Returns `true` if no edit was applied.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Changed `(start, end)` ranges in pre-edit character offsets, in ascending order.
    pub fn changed_ranges(&self) -> Vec<(usize, usize)> {
        self.edits
            .iter()
            .rev()
            .map(|edit| (edit.start, edit.end()))
            .collect()
    }

    /// Changed `(start, end)` ranges in post-edit character offsets, in ascending order.
    pub fn inserted_ranges(&self) -> Vec<(usize, usize)> {
        let mut shift: isize = 0;
        let mut out = Vec::with_capacity(self.edits.len());
        for edit in self.edits.iter().rev() {
            let start = edit.start.saturating_add_signed(shift);
            out.push((start, start + edit.inserted_len()));
            shift += edit.inserted_len() as isize - edit.deleted_len() as isize;
        }
        out
    }
}
