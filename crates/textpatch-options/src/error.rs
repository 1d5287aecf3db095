use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while building option records from preferences.
pub enum OptionsError {
    #[error("unknown {kind} value '{value}'")]
    /// A string preference did not name any member of a closed enumeration.
    UnknownValue {
        /// The enumeration being parsed (e.g. `"indent style"`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    #[error("preference '{key}' must be a non-negative 32-bit integer, got {value}")]
    /// An integer preference was negative or too large.
    InvalidNumber {
        /// Preference key.
        key: &'static str,
        /// The rejected value.
        value: i64,
    },

    #[error("preference JSON error: {0}")]
    /// A preference document could not be decoded.
    Json(#[from] serde_json::Error),
}
