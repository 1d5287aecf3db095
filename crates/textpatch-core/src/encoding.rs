//! Offset encodings and conversion to character offsets.
//!
//! Language services rarely count in Unicode scalar values: TypeScript (like LSP) counts UTF-16
//! code units, some tools count UTF-8 bytes. Buffers in this crate count characters, so spans
//! are converted once, up front, against the original text.

use crate::error::ApplyError;
use crate::span::{TextChange, TextSpan};
use serde::{Deserialize, Serialize};

/// The unit a span's numbers count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetEncoding {
    /// Unicode scalar values (Rust `char`s).
    #[default]
    Char,
    /// UTF-16 code units.
    Utf16,
    /// UTF-8 bytes.
    Utf8,
}

impl OffsetEncoding {
    /// Number of units `ch` occupies.
    pub fn unit_len(self, ch: char) -> usize {
        match self {
            Self::Char => 1,
            Self::Utf16 => ch.len_utf16(),
            Self::Utf8 => ch.len_utf8(),
        }
    }

    /// Length of `text` in this encoding.
    pub fn text_len(self, text: &str) -> usize {
        match self {
            Self::Char => text.chars().count(),
            Self::Utf16 => text.encode_utf16().count(),
            Self::Utf8 => text.len(),
        }
    }
}

/// Why an offset could not be mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetMapError {
    /// The offset lies past the end of the text.
    OutOfRange,
    /// The offset lies inside a character.
    Misaligned,
}

/// Boundary table mapping encoded offsets to character offsets for one text snapshot.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    encoding: OffsetEncoding,
    // Encoded offset of every character boundary, including the end of the text.
    boundaries: Vec<usize>,
}

impl OffsetMap {
    /// Build the table for `text`.
    pub fn new(text: &str, encoding: OffsetEncoding) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut offset = 0;
        boundaries.push(offset);
        for ch in text.chars() {
            offset += encoding.unit_len(ch);
            boundaries.push(offset);
        }
        Self {
            encoding,
            boundaries,
        }
    }

    /// Encoding of the source offsets.
    pub fn encoding(&self) -> OffsetEncoding {
        self.encoding
    }

    /// Length of the text in the source encoding.
    pub fn encoded_len(&self) -> usize {
        self.boundaries.last().copied().unwrap_or(0)
    }

    /// Map an encoded offset to a character offset.
    pub fn to_char_offset(&self, offset: usize) -> Result<usize, OffsetMapError> {
        if offset > self.encoded_len() {
            return Err(OffsetMapError::OutOfRange);
        }
        self.boundaries
            .binary_search(&offset)
            .map_err(|_| OffsetMapError::Misaligned)
    }

    /// Map a character offset back to the source encoding.
    pub fn from_char_offset(&self, char_offset: usize) -> Option<usize> {
        self.boundaries.get(char_offset).copied()
    }

    /// Map an encoded span to a character span.
    pub fn span_to_chars(&self, span: TextSpan) -> Result<TextSpan, OffsetMapError> {
        let end = span.end().ok_or(OffsetMapError::OutOfRange)?;
        let start = self.to_char_offset(span.start)?;
        let end = self.to_char_offset(end)?;
        Ok(TextSpan::from_bounds(start, end))
    }

    /// Map a character span back to the source encoding.
    pub fn span_from_chars(&self, span: TextSpan) -> Option<TextSpan> {
        let start = self.from_char_offset(span.start)?;
        let end = self.from_char_offset(span.end()?)?;
        Some(TextSpan::from_bounds(start, end))
    }
}

/// Convert every span of `edits` from `encoding` to character offsets against `text`.
///
/// `text` must be the snapshot the edits were computed against.
pub fn to_char_offsets(
    text: &str,
    edits: &[TextChange],
    encoding: OffsetEncoding,
) -> Result<Vec<TextChange>, ApplyError> {
    if encoding == OffsetEncoding::Char {
        return Ok(edits.to_vec());
    }

    let map = OffsetMap::new(text, encoding);
    edits
        .iter()
        .enumerate()
        .map(|(index, edit)| {
            let span = map
                .span_to_chars(edit.span)
                .map_err(|err| match err {
                    OffsetMapError::OutOfRange => ApplyError::InvalidSpan {
                        index,
                        span: edit.span,
                        buffer_len: map.encoded_len(),
                    },
                    OffsetMapError::Misaligned => {
                        let offset = if map.to_char_offset(edit.span.start).is_err() {
                            edit.span.start
                        } else {
                            edit.span.start + edit.span.length
                        };
                        ApplyError::MisalignedOffset { index, offset }
                    }
                })?;
            Ok(TextChange {
                span,
                new_text: edit.new_text.clone(),
            })
        })
        .collect()
}
