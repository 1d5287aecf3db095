#![warn(missing_docs)]
//! textpatch-core - ordered, validated application of text edit batches.
//!
//! # Overview
//!
//! Formatters and language services describe their output as a batch of replacements, each
//! expressed against the document **as it was when the batch was computed**. Applying such a
//! batch naively (in producer order) corrupts the text as soon as one edit changes the length of
//! the document. This crate applies batches safely:
//!
//! - edits are applied from the highest start offset down, so no offset needs adjusting
//! - overlapping edits are rejected before the buffer is touched
//! - every span is bounds-checked against the live buffer
//! - failures are reported as values naming the offending edit
//! - [`PatchApplier::apply`] is atomic (copy-on-write); [`PatchApplier::apply_in_place`] is not,
//!   and says how far it got
//!
//! # Quick Start
//!
//! ```rust
//! use textpatch_core::{Document, PatchApplier, TextChange};
//!
//! let mut doc = Document::new("abcdef");
//! let edits = vec![TextChange::replace(1, 2, "Z"), TextChange::replace(4, 1, "YY")];
//!
//! let delta = PatchApplier::default().apply(&mut doc, &edits).unwrap();
//! assert_eq!(doc.text(), "aZdYYf");
//! assert_eq!(delta.changed_ranges(), vec![(1, 3), (4, 5)]);
//! ```
//!
//! # Module Description
//!
//! - [`span`] - spans, edits and edit batches
//! - [`buffer`] - the [`TextBuffer`] trait and its `String` / rope / [`Document`] implementations
//! - [`apply`] - ordering, overlap detection and the applier itself
//! - [`encoding`] - UTF-16 / UTF-8 offset conversion
//! - [`delta`] - what an apply did
//!
//! # Unicode Support
//!
//! Buffers count Unicode scalar values. Producers that count UTF-16 code units (TypeScript, LSP)
//! or UTF-8 bytes set [`ApplyOptions::encoding`]; spans are converted once against the original
//! text and misaligned offsets are rejected.

pub mod apply;
pub mod buffer;
pub mod delta;
pub mod encoding;
mod error;
pub mod span;

pub use apply::{
    ApplyOptions, OverlapPolicy, PatchApplier, application_order, apply_edits, check_overlaps,
};
pub use buffer::{BufferError, Document, TextBuffer};
pub use delta::{AppliedEdit, TextDelta};
pub use encoding::{OffsetEncoding, OffsetMap, OffsetMapError, to_char_offsets};
pub use error::{ApplyError, PartialApply};
pub use span::{EditBatch, TextChange, TextSpan};
