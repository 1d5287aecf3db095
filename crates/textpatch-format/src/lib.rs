#![warn(missing_docs)]
//! `textpatch-format` - format document regions through a language service.
//!
//! A [`ContentFormatter`] reads [`FormatCodeOptions`](textpatch_options::FormatCodeOptions)
//! from a preference store, asks a [`FormattingService`] for the edits that format a region,
//! and applies the whole reply with [`textpatch_core::PatchApplier`]. The service counts in its
//! own offset unit (UTF-16 by default); conversion happens once, against the snapshot the
//! service saw.
//!
//! ```rust
//! use std::convert::Infallible;
//! use textpatch_core::{EditBatch, TextChange};
//! use textpatch_format::{ContentFormatter, FormattingService};
//! use textpatch_options::{FormatCodeOptions, MemoryPreferenceStore};
//!
//! struct TrimTrailingSpace;
//!
//! impl FormattingService for TrimTrailingSpace {
//!     type Error = Infallible;
//!
//!     fn formatting_edits_for_range(
//!         &self,
//!         text: &str,
//!         _start: usize,
//!         _end: usize,
//!         _options: &FormatCodeOptions,
//!     ) -> Result<EditBatch, Infallible> {
//!         let trimmed = text.trim_end().encode_utf16().count();
//!         let total = text.encode_utf16().count();
//!         Ok(vec![TextChange::delete(trimmed, total - trimmed)].into())
//!     }
//! }
//!
//! let formatter = ContentFormatter::new(TrimTrailingSpace, MemoryPreferenceStore::with_defaults());
//! let mut text = String::from("let x = 1;   ");
//! formatter.format_document(&mut text).unwrap();
//! assert_eq!(text, "let x = 1;");
//! ```

mod error;
pub mod formatter;
pub mod json;
pub mod service;

pub use error::{FormatError, ServiceError};
pub use formatter::{ContentFormatter, FormatterSettings};
pub use json::{edit_batch_from_value, text_changes_from_value};
pub use service::FormattingService;
