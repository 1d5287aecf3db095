use textpatch_core::{ApplyError, PartialApply, TextSpan};
use textpatch_options::OptionsError;
use thiserror::Error;

/// Boxed error returned by a formatting service.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
/// Errors produced by [`ContentFormatter`](crate::ContentFormatter).
pub enum FormatError {
    #[error("invalid formatting options: {0}")]
    /// The preference store holds a value the option records cannot represent.
    Options(#[from] OptionsError),

    #[error("region {region} is outside the document (length {len})")]
    /// The requested region does not fit inside the buffer.
    Region {
        /// The requested region, in characters.
        region: TextSpan,
        /// Buffer length in characters.
        len: usize,
    },

    #[error("formatting service failed: {0}")]
    /// The service could not compute edits. The buffer was not touched.
    Service(#[source] ServiceError),

    #[error("failed to apply formatting edits: {0}")]
    /// Atomic application failed. The buffer was not touched.
    Apply(#[from] ApplyError),

    #[error("formatting stopped: {0}")]
    /// In-place application failed, possibly after modifying the buffer.
    PartialApply(#[from] PartialApply),
}
