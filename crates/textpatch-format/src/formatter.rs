//! Range formatting: ask the service for edits, then patch the buffer.

use crate::error::FormatError;
use crate::service::FormattingService;
use textpatch_core::{
    ApplyOptions, OffsetEncoding, OffsetMap, PatchApplier, TextBuffer, TextChange, TextDelta,
    TextSpan, to_char_offsets,
};
use textpatch_options::{FormatCodeOptions, NewLineKind, PreferenceStore};
use tracing::{debug, warn};

/// How a [`ContentFormatter`] talks to its service and applies the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterSettings {
    /// Overlap policy and the offset encoding the service counts in.
    pub apply: ApplyOptions,
    /// Apply all-or-nothing. When `false`, a failure may leave the buffer partially formatted.
    pub atomic: bool,
    /// Send the document's own newline sequence instead of the preference default.
    pub detect_line_ending: bool,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            apply: ApplyOptions::with_encoding(OffsetEncoding::Utf16),
            atomic: true,
            detect_line_ending: true,
        }
    }
}

/// Formats regions of a buffer through a [`FormattingService`].
///
/// Options are rebuilt from the preference store on every request, so preference changes take
/// effect on the next call.
#[derive(Debug, Clone)]
pub struct ContentFormatter<S, P> {
    service: S,
    preferences: P,
    settings: FormatterSettings,
}

impl<S, P> ContentFormatter<S, P>
where
    S: FormattingService,
    P: PreferenceStore,
{
    /// Create a formatter with default settings.
    pub fn new(service: S, preferences: P) -> Self {
        Self::with_settings(service, preferences, FormatterSettings::default())
    }

    /// Create a formatter with explicit settings.
    pub fn with_settings(service: S, preferences: P, settings: FormatterSettings) -> Self {
        Self {
            service,
            preferences,
            settings,
        }
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The preference store options are read from.
    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    /// Mutable access to the preference store.
    pub fn preferences_mut(&mut self) -> &mut P {
        &mut self.preferences
    }

    /// Current settings.
    pub fn settings(&self) -> FormatterSettings {
        self.settings
    }

    /// Options that would be sent for a document holding `text`.
    pub fn format_code_options(&self, text: &str) -> Result<FormatCodeOptions, FormatError> {
        let options = FormatCodeOptions::from_preferences(&self.preferences)?;
        Ok(if self.settings.detect_line_ending {
            options.with_new_line(NewLineKind::detect_in_text(text))
        } else {
            options
        })
    }

    /// Format `region` (in characters) of `buffer`.
    ///
    /// The service sees the whole text and the region converted to its offset encoding. Its
    /// edits all refer to that snapshot and are applied as one batch, atomically unless
    /// [`FormatterSettings::atomic`] is off. Buffers that cannot be cloned go through
    /// [`Self::format_in_place`].
    pub fn format<B>(&self, buffer: &mut B, region: TextSpan) -> Result<TextDelta, FormatError>
    where
        B: TextBuffer + Clone,
    {
        let edits = self.edits_for_region(buffer, region)?;
        if self.settings.atomic {
            Ok(self.applier().apply(buffer, &edits)?)
        } else {
            Ok(self.applier().apply_in_place(buffer, &edits)?)
        }
    }

    /// Format `region` of `buffer`, stopping at the first failed edit.
    ///
    /// Ignores [`FormatterSettings::atomic`]: a failure may leave the buffer partially
    /// formatted, as reported by [`FormatError::PartialApply`].
    pub fn format_in_place<B>(
        &self,
        buffer: &mut B,
        region: TextSpan,
    ) -> Result<TextDelta, FormatError>
    where
        B: TextBuffer + ?Sized,
    {
        let edits = self.edits_for_region(buffer, region)?;
        Ok(self.applier().apply_in_place(buffer, &edits)?)
    }

    /// Format the whole of `buffer`.
    pub fn format_document<B>(&self, buffer: &mut B) -> Result<TextDelta, FormatError>
    where
        B: TextBuffer + Clone,
    {
        let region = TextSpan::new(0, buffer.len());
        self.format(buffer, region)
    }

    /// Format the whole of `buffer` in place.
    pub fn format_document_in_place<B>(&self, buffer: &mut B) -> Result<TextDelta, FormatError>
    where
        B: TextBuffer + ?Sized,
    {
        let region = TextSpan::new(0, buffer.len());
        self.format_in_place(buffer, region)
    }

    /// Ask the service for the edits of `region` and convert them to character offsets.
    fn edits_for_region<B>(
        &self,
        buffer: &B,
        region: TextSpan,
    ) -> Result<Vec<TextChange>, FormatError>
    where
        B: TextBuffer + ?Sized,
    {
        let text = buffer.contents();
        let encoding = self.settings.apply.encoding;
        let map = OffsetMap::new(&text, encoding);
        let len = buffer.len();
        let encoded = map
            .span_from_chars(region)
            .ok_or(FormatError::Region { region, len })?;
        let encoded_end = encoded.start + encoded.length;

        let options = self.format_code_options(&text)?;
        let batch = self
            .service
            .formatting_edits_for_range(&text, encoded.start, encoded_end, &options)
            .map_err(|err| {
                warn!(error = %err, %region, "formatting service failed");
                FormatError::Service(Box::new(err))
            })?;
        debug!(
            %region,
            ?encoding,
            edits = batch.len(),
            atomic = self.settings.atomic,
            "formatting region"
        );

        Ok(to_char_offsets(&text, batch.as_slice(), encoding)?)
    }

    /// Applier for already converted edits.
    fn applier(&self) -> PatchApplier {
        PatchApplier::new(ApplyOptions {
            encoding: OffsetEncoding::Char,
            ..self.settings.apply
        })
    }
}
