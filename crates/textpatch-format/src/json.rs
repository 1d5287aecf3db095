//! Decoding edit batches from a language service's JSON reply.
//!
//! The reply is an array of `{ "span": { "start": n, "length": n }, "newText": "..." }`.

use serde_json::Value;
use textpatch_core::{EditBatch, TextChange};
use tracing::warn;

/// Decode a reply, failing on the first malformed entry.
pub fn edit_batch_from_value(value: &Value) -> Result<EditBatch, serde_json::Error> {
    serde_json::from_value(value.clone())
}

/// Decode a reply, skipping malformed entries.
///
/// A reply that is not an array yields an empty batch.
pub fn text_changes_from_value(value: &Value) -> EditBatch {
    let Some(entries) = value.as_array() else {
        warn!(kind = value_kind(value), "formatting reply is not an array");
        return EditBatch::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(
            |(position, entry)| match serde_json::from_value::<TextChange>(entry.clone()) {
                Ok(change) => Some(change),
                Err(err) => {
                    warn!(position, error = %err, "skipping malformed text change");
                    None
                }
            },
        )
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
