//! The language service seam.

use textpatch_core::EditBatch;
use textpatch_options::FormatCodeOptions;

/// Computes formatting edits for a range of a document.
///
/// Implementations usually forward to an external language service. Offsets in and out are in
/// whatever unit that service counts (UTF-16 code units for TypeScript); the formatter converts
/// them with its configured [`OffsetEncoding`](textpatch_core::OffsetEncoding).
pub trait FormattingService {
    /// Why the service could not produce edits.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Edits that format `text[start..end]`. Spans refer to `text` as given, all at once.
    fn formatting_edits_for_range(
        &self,
        text: &str,
        start: usize,
        end: usize,
        options: &FormatCodeOptions,
    ) -> Result<EditBatch, Self::Error>;
}

impl<S: FormattingService + ?Sized> FormattingService for &S {
    type Error = S::Error;

    fn formatting_edits_for_range(
        &self,
        text: &str,
        start: usize,
        end: usize,
        options: &FormatCodeOptions,
    ) -> Result<EditBatch, Self::Error> {
        (**self).formatting_edits_for_range(text, start, end, options)
    }
}
