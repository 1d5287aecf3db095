use crate::buffer::BufferError;
use crate::span::TextSpan;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while validating or applying an edit batch.
///
/// Every `index` refers to the edit's position in the batch as the caller supplied it, not to
/// its position in application order.
pub enum ApplyError {
    #[error("edit #{index} span {span} is out of bounds for buffer of length {buffer_len}")]
    /// The span does not fit inside the buffer at the time it was applied.
    InvalidSpan {
        /// Position of the offending edit in the original batch.
        index: usize,
        /// The offending span.
        span: TextSpan,
        /// Buffer length observed when the edit was rejected.
        buffer_len: usize,
    },

    #[error("edit #{index} span {span} overlaps edit #{other_index} span {other_span}")]
    /// Two edits of the batch touch the same characters.
    Overlap {
        /// Position of the later-starting edit in the original batch.
        index: usize,
        /// Its span.
        span: TextSpan,
        /// Position of the edit it collides with.
        other_index: usize,
        /// The colliding span.
        other_span: TextSpan,
    },

    #[error("edit #{index} offset {offset} falls inside a code point")]
    /// An offset in a non-character encoding does not sit on a character boundary.
    MisalignedOffset {
        /// Position of the offending edit in the original batch.
        index: usize,
        /// The misaligned offset, in the source encoding.
        offset: usize,
    },

    #[error("edit #{index} was rejected by the buffer: {source}")]
    /// The buffer refused the replacement.
    MutationFailure {
        /// Position of the offending edit in the original batch.
        index: usize,
        /// Why the buffer refused it.
        #[source]
        source: BufferError,
    },
}

impl ApplyError {
    /// Position of the offending edit in the original batch.
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidSpan { index, .. }
            | Self::Overlap { index, .. }
            | Self::MisalignedOffset { index, .. }
            | Self::MutationFailure { index, .. } => *index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error} ({applied} edit(s) already applied)")]
/// Failure of a non-atomic application.
///
/// When `applied > 0` the buffer holds a partially patched text.
pub struct PartialApply {
    /// Number of edits that were applied before the failure.
    pub applied: usize,
    /// The failure that stopped the batch.
    #[source]
    pub error: ApplyError,
}

impl PartialApply {
    /// Returns `true` if the buffer was modified before the failure.
    pub fn is_partial(&self) -> bool {
        self.applied > 0
    }
}
