//! The patch applier.
//!
//! Edits in a batch are expressed against the **original** buffer. Applying them in producer
//! order would require shifting every later offset by the length delta of every earlier edit.
//! Instead the applier sorts them by descending start offset: each edit then lies entirely to the
//! left of everything already applied, so its offsets are still valid as given.
//!
//! Two entry points are provided:
//! - [`PatchApplier::apply`] works on a copy of the buffer and commits only when the whole batch
//!   succeeded (atomic).
//! - [`PatchApplier::apply_in_place`] mutates the buffer directly and stops at the first failure,
//!   reporting how many edits had already been applied.

use crate::buffer::TextBuffer;
use crate::delta::{AppliedEdit, TextDelta};
use crate::encoding::{OffsetEncoding, to_char_offsets};
use crate::error::{ApplyError, PartialApply};
use crate::span::TextChange;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, trace, warn};

/// What to do with edits that touch the same characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Reject the whole batch before touching the buffer.
    #[default]
    Reject,
    /// Skip detection. Overlapping batches still never write out of bounds, but the resulting
    /// text is unspecified.
    Allow,
}

/// Applier configuration, constructed by the caller and passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyOptions {
    /// Overlap handling.
    pub overlap: OverlapPolicy,
    /// Unit of the incoming span offsets.
    pub encoding: OffsetEncoding,
}

impl ApplyOptions {
    /// Options for edits produced in the given encoding.
    pub fn with_encoding(encoding: OffsetEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }
}

/// Indices of `edits` in application order.
///
/// Strictly descending by `span.start`; edits sharing a start offset are applied in reverse
/// batch order, so insertions at one offset end up in batch order in the final text.
pub fn application_order(edits: &[TextChange]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by(|&a, &b| {
        edits[b]
            .span
            .start
            .cmp(&edits[a].span.start)
            .then(b.cmp(&a))
    });
    order
}

/// Reject batches in which two edits touch the same characters.
///
/// Edits are scanned in ascending `(start, index)` order. An edit overlaps when it starts before
/// the furthest end seen so far. Consequently:
/// - insertion points at the same offset never conflict with each other;
/// - an insertion at the end of a replaced range is fine;
/// - an insertion strictly inside a replaced range conflicts;
/// - an insertion at the start of a replaced range conflicts only when it comes later in the
///   batch, because it would be applied first and then swallowed by the replacement.
pub fn check_overlaps(edits: &[TextChange]) -> Result<(), ApplyError> {
    let mut ascending: Vec<usize> = (0..edits.len()).collect();
    ascending.sort_by_key(|&i| (edits[i].span.start, i));

    let mut furthest: Option<(usize, usize)> = None;
    for index in ascending {
        let span = edits[index].span;
        if let Some((other_index, other_end)) = furthest
            && other_end > span.start
        {
            return Err(ApplyError::Overlap {
                index,
                span,
                other_index,
                other_span: edits[other_index].span,
            });
        }

        let end = span.end().unwrap_or(usize::MAX);
        if furthest.is_none_or(|(_, other_end)| end > other_end) {
            furthest = Some((index, end));
        }
    }
    Ok(())
}

/// Applies edit batches to text buffers. Holds configuration only, no buffer state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchApplier {
    options: ApplyOptions,
}

impl PatchApplier {
    /// Create an applier with the given options.
    pub fn new(options: ApplyOptions) -> Self {
        Self { options }
    }

    /// The options this applier was built with.
    pub fn options(&self) -> ApplyOptions {
        self.options
    }

    /// Apply `edits` atomically.
    ///
    /// The batch is applied to a clone of `buffer`; the clone replaces `buffer` only if every
    /// edit succeeded. On failure `buffer` is left exactly as it was.
    pub fn apply<B>(&self, buffer: &mut B, edits: &[TextChange]) -> Result<TextDelta, ApplyError>
    where
        B: TextBuffer + Clone,
    {
        if edits.is_empty() {
            return Ok(unchanged(buffer));
        }

        let mut working = buffer.clone();
        match self.run(&mut working, edits) {
            Ok(delta) => {
                *buffer = working;
                Ok(delta)
            }
            Err(failure) => {
                warn!(
                    applied = failure.applied,
                    error = %failure.error,
                    "edit batch rolled back"
                );
                Err(failure.error)
            }
        }
    }

    /// Apply `edits` directly to `buffer`, stopping at the first failure.
    ///
    /// If the returned [`PartialApply`] reports `applied > 0`, `buffer` has been partially
    /// patched. Validation failures (overlap, encoding) are detected before any mutation.
    pub fn apply_in_place<B>(
        &self,
        buffer: &mut B,
        edits: &[TextChange],
    ) -> Result<TextDelta, PartialApply>
    where
        B: TextBuffer + ?Sized,
    {
        let result = self.run(buffer, edits);
        if let Err(failure) = &result {
            warn!(
                applied = failure.applied,
                error = %failure.error,
                "edit batch aborted"
            );
        }
        result
    }

    /// Validate `edits` against `buffer` without applying them.
    ///
    /// Returns the error [`Self::apply`] would return for a buffer that accepts every
    /// replacement. Bounds are checked against the length the buffer would have at each step.
    pub fn validate<B>(&self, buffer: &B, edits: &[TextChange]) -> Result<(), ApplyError>
    where
        B: TextBuffer + ?Sized,
    {
        let edits = self.prepare(buffer, edits)?;
        if self.options.overlap == OverlapPolicy::Reject {
            check_overlaps(&edits)?;
        }
        let mut len = buffer.len();
        for index in application_order(&edits) {
            let edit = &edits[index];
            if !edit.span.end().is_some_and(|end| end <= len) {
                return Err(ApplyError::InvalidSpan {
                    index,
                    span: edit.span,
                    buffer_len: len,
                });
            }
            len = len - edit.span.length + edit.inserted_len();
        }
        Ok(())
    }

    fn prepare<'a, B>(
        &self,
        buffer: &B,
        edits: &'a [TextChange],
    ) -> Result<Cow<'a, [TextChange]>, ApplyError>
    where
        B: TextBuffer + ?Sized,
    {
        match self.options.encoding {
            OffsetEncoding::Char => Ok(Cow::Borrowed(edits)),
            encoding => to_char_offsets(&buffer.contents(), edits, encoding).map(Cow::Owned),
        }
    }

    fn run<B>(&self, buffer: &mut B, edits: &[TextChange]) -> Result<TextDelta, PartialApply>
    where
        B: TextBuffer + ?Sized,
    {
        let before_char_count = buffer.len();
        debug!(
            edits = edits.len(),
            buffer_len = before_char_count,
            overlap = ?self.options.overlap,
            encoding = ?self.options.encoding,
            "applying edit batch"
        );

        let not_applied = |error| PartialApply { applied: 0, error };
        let edits = self.prepare(buffer, edits).map_err(not_applied)?;
        if self.options.overlap == OverlapPolicy::Reject {
            check_overlaps(&edits).map_err(not_applied)?;
        }

        let mut applied = Vec::with_capacity(edits.len());
        for index in application_order(&edits) {
            let edit = &edits[index];
            let span = edit.span;
            let buffer_len = buffer.len();
            if !span.end().is_some_and(|end| end <= buffer_len) {
                return Err(PartialApply {
                    applied: applied.len(),
                    error: ApplyError::InvalidSpan {
                        index,
                        span,
                        buffer_len,
                    },
                });
            }

            let deleted_text = buffer.slice(span.start, span.length).unwrap_or_default();
            buffer
                .replace(span.start, span.length, &edit.new_text)
                .map_err(|source| PartialApply {
                    applied: applied.len(),
                    error: ApplyError::MutationFailure { index, source },
                })?;
            trace!(index, %span, inserted = edit.new_text.len(), "applied edit");

            applied.push(AppliedEdit {
                index,
                start: span.start,
                deleted_text,
                inserted_text: edit.new_text.clone(),
            });
        }

        Ok(TextDelta {
            before_char_count,
            after_char_count: buffer.len(),
            edits: applied,
        })
    }
}

fn unchanged<B: TextBuffer + ?Sized>(buffer: &B) -> TextDelta {
    let len = buffer.len();
    TextDelta {
        before_char_count: len,
        after_char_count: len,
        edits: Vec::new(),
    }
}

/// Apply `edits` to an owned buffer with default options and hand it back.
///
/// On failure the buffer is dropped; use [`PatchApplier::apply`] to keep it.
pub fn apply_edits<B: TextBuffer>(mut buffer: B, edits: &[TextChange]) -> Result<B, ApplyError> {
    PatchApplier::default()
        .run(&mut buffer, edits)
        .map_err(|failure| failure.error)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferError, Document};
    use crate::span::TextSpan;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_edits_in_any_order() {
        let forward = vec![TextChange::replace(1, 2, "Z"), TextChange::replace(4, 1, "YY")];
        let backward: Vec<_> = forward.iter().cloned().rev().collect();

        assert_eq!(apply_edits(String::from("abcdef"), &forward).unwrap(), "aZdYYf");
        assert_eq!(apply_edits(String::from("abcdef"), &backward).unwrap(), "aZdYYf");
    }

    #[test]
    fn test_application_order_ties_reverse_batch_order() {
        let edits = vec![
            TextChange::insert(2, "a"),
            TextChange::insert(5, "b"),
            TextChange::insert(2, "c"),
        ];
        assert_eq!(application_order(&edits), vec![1, 2, 0]);
        assert_eq!(apply_edits(String::from("0123456"), &edits).unwrap(), "01ac234b56");
    }

    #[test]
    fn test_empty_batch_is_identity() {
        let mut doc = Document::new("unchanged");
        let delta = PatchApplier::default().apply(&mut doc, &[]).unwrap();
        assert!(delta.is_empty());
        assert_eq!(doc.text(), "unchanged");
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_insertion_at_offset() {
        let text = apply_edits(String::from("hello"), &[TextChange::insert(2, "X")]).unwrap();
        assert_eq!(text, "heXllo");
    }

    #[test]
    fn test_invalid_span_leaves_buffer_untouched() {
        let mut text = String::from("abcde");
        let err = PatchApplier::default()
            .apply(&mut text, &[TextChange::replace(4, 5, "x")])
            .unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidSpan {
                index: 0,
                span: TextSpan::new(4, 5),
                buffer_len: 5
            }
        );
        assert_eq!(text, "abcde");
    }

    #[test]
    fn test_atomic_rollback_after_partial_progress() {
        // Overlapping on purpose: the high edit shrinks the buffer under the low one.
        let options = ApplyOptions {
            overlap: OverlapPolicy::Allow,
            ..ApplyOptions::default()
        };
        let edits = vec![TextChange::delete(6, 4), TextChange::replace(2, 7, "Q")];
        let mut text = String::from("0123456789");
        let err = PatchApplier::new(options).apply(&mut text, &edits).unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidSpan {
                index: 1,
                span: TextSpan::new(2, 7),
                buffer_len: 6
            }
        );
        assert_eq!(text, "0123456789");
    }

    #[test]
    fn test_in_place_read_only_fails_on_first_edit() {
        let edits = vec![TextChange::replace(0, 1, "A"), TextChange::replace(3, 1, "D")];
        let mut doc = Document::new("abcd");
        doc.set_read_only(true);

        let failure = PatchApplier::default()
            .apply_in_place(&mut doc, &edits)
            .unwrap_err();
        assert!(!failure.is_partial());
        assert_eq!(
            failure.error,
            ApplyError::MutationFailure {
                index: 1,
                source: BufferError::ReadOnly
            }
        );
        assert_eq!(doc.text(), "abcd");
    }

    #[test]
    fn test_in_place_reports_partial_progress() {
        let options = ApplyOptions {
            overlap: OverlapPolicy::Allow,
            ..ApplyOptions::default()
        };
        let edits = vec![TextChange::replace(9, 1, "D"), TextChange::delete(2, 20)];
        let mut text = String::from("abcdefghijk");
        let failure = PatchApplier::new(options)
            .apply_in_place(&mut text, &edits)
            .unwrap_err();
        assert_eq!(failure.applied, 1);
        assert!(failure.is_partial());
        assert_eq!(failure.error.index(), 1);
        assert_eq!(text, "abcdefghiDk");
    }

    #[test]
    fn test_overlap_rejected_before_mutation() {
        let edits = vec![TextChange::replace(0, 4, "x"), TextChange::replace(2, 4, "y")];
        let mut text = String::from("abcdefgh");
        let failure = PatchApplier::default()
            .apply_in_place(&mut text, &edits)
            .unwrap_err();
        assert_eq!(failure.applied, 0);
        assert_eq!(
            failure.error,
            ApplyError::Overlap {
                index: 1,
                span: TextSpan::new(2, 4),
                other_index: 0,
                other_span: TextSpan::new(0, 4)
            }
        );
        assert_eq!(text, "abcdefgh");
    }

    #[test]
    fn test_overlap_rules_for_insertions() {
        // Insertions at the same offset.
        assert!(check_overlaps(&[TextChange::insert(3, "a"), TextChange::insert(3, "b")]).is_ok());
        // Insertion at the end of a replaced range.
        assert!(check_overlaps(&[TextChange::replace(1, 2, "a"), TextChange::insert(3, "b")]).is_ok());
        // Insertion before a replacement at the same start, in batch order.
        assert!(check_overlaps(&[TextChange::insert(1, "a"), TextChange::replace(1, 2, "b")]).is_ok());
        // Insertion inside a replaced range.
        assert!(check_overlaps(&[TextChange::replace(1, 3, "a"), TextChange::insert(2, "b")]).is_err());
        // Insertion at the start of a replaced range, but later in the batch.
        assert!(check_overlaps(&[TextChange::replace(1, 2, "a"), TextChange::insert(1, "b")]).is_err());
    }

    #[test]
    fn test_overlap_against_earlier_long_span() {
        let edits = vec![
            TextChange::replace(0, 10, ""),
            TextChange::replace(2, 1, ""),
            TextChange::replace(5, 1, ""),
        ];
        let err = check_overlaps(&edits).unwrap_err();
        assert_eq!(err.index(), 1);
    }

    #[test]
    fn test_insert_before_replacement_at_same_start() {
        let edits = vec![TextChange::insert(1, "<"), TextChange::replace(1, 2, "BC")];
        assert_eq!(apply_edits(String::from("abcd"), &edits).unwrap(), "a<BCd");
    }

    #[test]
    fn test_allow_overlap_stays_in_bounds() {
        let options = ApplyOptions {
            overlap: OverlapPolicy::Allow,
            ..ApplyOptions::default()
        };
        let edits = vec![TextChange::replace(0, 4, ""), TextChange::replace(2, 2, "")];
        let mut text = String::from("abcd");
        let err = PatchApplier::new(options).apply(&mut text, &edits).unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidSpan {
                index: 0,
                span: TextSpan::new(0, 4),
                buffer_len: 2
            }
        );
        assert_eq!(text, "abcd");
    }

    #[test]
    fn test_validate_agrees_with_apply_on_overlapping_batch() {
        let applier = PatchApplier::new(ApplyOptions {
            overlap: OverlapPolicy::Allow,
            ..ApplyOptions::default()
        });
        let text = String::from("abcd");

        let shrinking = vec![TextChange::replace(0, 4, ""), TextChange::replace(2, 2, "")];
        let validated = applier.validate(&text, &shrinking);
        let applied = applier.apply(&mut text.clone(), &shrinking).map(|_| ());
        assert_eq!(validated, applied);
        assert!(matches!(
            validated,
            Err(ApplyError::InvalidSpan { index: 0, buffer_len: 2, .. })
        ));

        // The higher edit grows the buffer first, so the lower span fits afterwards.
        let growing = vec![TextChange::replace(0, 5, ""), TextChange::replace(2, 1, "xyz")];
        let mut grown = text.clone();
        assert_eq!(applier.validate(&text, &growing), Ok(()));
        applier.apply(&mut grown, &growing).unwrap();
        assert_eq!(grown, "d");
    }

    #[test]
    fn test_utf16_encoding_option() {
        let mut text = String::from("a👋b👋c");
        let applier = PatchApplier::new(ApplyOptions::with_encoding(OffsetEncoding::Utf16));
        // UTF-16: a=0, 👋=1..3, b=3, 👋=4..6, c=6
        applier
            .apply(&mut text, &[TextChange::replace(3, 1, "B"), TextChange::delete(6, 1)])
            .unwrap();
        assert_eq!(text, "a👋B👋");
    }

    #[test]
    fn test_delta_reports_application_order() {
        let mut text = String::from("abcdef");
        let delta = PatchApplier::default()
            .apply(
                &mut text,
                &[TextChange::replace(1, 2, "Z"), TextChange::replace(4, 1, "YY")],
            )
            .unwrap();
        assert_eq!(delta.before_char_count, 6);
        assert_eq!(delta.after_char_count, 6);
        assert_eq!(
            delta.edits,
            vec![
                AppliedEdit {
                    index: 1,
                    start: 4,
                    deleted_text: "e".to_string(),
                    inserted_text: "YY".to_string(),
                },
                AppliedEdit {
                    index: 0,
                    start: 1,
                    deleted_text: "bc".to_string(),
                    inserted_text: "Z".to_string(),
                },
            ]
        );
        assert_eq!(delta.changed_ranges(), vec![(1, 3), (4, 5)]);
        assert_eq!(delta.inserted_ranges(), vec![(1, 2), (3, 5)]);
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let text = String::from("abc");
        let applier = PatchApplier::default();
        assert!(applier.validate(&text, &[TextChange::replace(1, 2, "")]).is_ok());
        assert!(applier.validate(&text, &[TextChange::replace(2, 2, "")]).is_err());
    }
}
