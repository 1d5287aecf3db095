//! Layered key/value preference source.
//!
//! Lookups fall through three levels: an explicit value, a registered default, and finally the
//! type default (`false`, `0`, `""`). Values are loosely typed, as in most editor preference
//! stores: a boolean stored as the string `"true"` reads back as `true`.
//!
//! In a JSON preference document a `null` entry means "unset", and a float without a fractional
//! part (`4.0`) is read as an integer. Any other float is rejected.

use crate::error::OptionsError;
use crate::keys;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    String(String),
}

impl PreferenceValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::String(value) => match value.trim() {
                v if v.eq_ignore_ascii_case("true") => Some(true),
                v if v.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            },
            Self::Int(_) => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::String(value) => value.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    fn as_string(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::String(value) => value.clone(),
        }
    }
}

struct PreferenceValueVisitor;

impl<'de> Visitor<'de> for PreferenceValueVisitor {
    type Value = PreferenceValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, an integer or a string")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<PreferenceValue, E> {
        Ok(PreferenceValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<PreferenceValue, E> {
        Ok(PreferenceValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<PreferenceValue, E> {
        i64::try_from(value)
            .map(PreferenceValue::Int)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<PreferenceValue, E> {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Ok(PreferenceValue::Int(value as i64))
        } else {
            Err(E::invalid_value(Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<PreferenceValue, E> {
        Ok(PreferenceValue::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<PreferenceValue, E> {
        Ok(PreferenceValue::String(value))
    }
}

impl<'de> Deserialize<'de> for PreferenceValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PreferenceValueVisitor)
    }
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PreferenceValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for PreferenceValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Read access to a preference source.
pub trait PreferenceStore {
    /// Boolean preference, `false` if unset.
    fn get_bool(&self, key: &str) -> bool;
    /// Integer preference, `0` if unset.
    fn get_int(&self, key: &str) -> i64;
    /// String preference, empty if unset.
    fn get_string(&self, key: &str) -> String;
}

/// Preference document accepted by [`MemoryPreferenceStore::from_json`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PreferenceDocument {
    #[serde(deserialize_with = "without_nulls")]
    defaults: BTreeMap<String, PreferenceValue>,
    #[serde(deserialize_with = "without_nulls")]
    values: BTreeMap<String, PreferenceValue>,
}

fn without_nulls<'de, D>(deserializer: D) -> Result<BTreeMap<String, PreferenceValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = BTreeMap::<String, Option<PreferenceValue>>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

/// An in-memory preference store with a values layer over a defaults layer.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    defaults: BTreeMap<String, PreferenceValue>,
    values: BTreeMap<String, PreferenceValue>,
}

impl MemoryPreferenceStore {
    /// Create an empty store (every lookup yields the type default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the formatter and compiler defaults.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.register_defaults();
        store
    }

    /// Load `{ "defaults": { ... }, "values": { ... } }`. Both sections are optional.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let doc: PreferenceDocument = serde_json::from_str(json)?;
        Ok(Self {
            defaults: doc.defaults,
            values: doc.values,
        })
    }

    /// Serialize both layers in the shape accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, OptionsError> {
        let doc = PreferenceDocument {
            defaults: self.defaults.clone(),
            values: self.values.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Set an explicit value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PreferenceValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Register a default value.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<PreferenceValue>) {
        self.defaults.insert(key.into(), value.into());
    }

    /// Remove an explicit value so the default applies again.
    pub fn reset(&mut self, key: &str) -> Option<PreferenceValue> {
        self.values.remove(key)
    }

    /// Returns `true` if an explicit value is set for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Register the defaults used by the formatter and compiler option builders.
    pub fn register_defaults(&mut self) {
        self.set_default(keys::EDITOR_INDENT_SIZE, 4);
        self.set_default(keys::EDITOR_TAB_WIDTH, 4);
        self.set_default(keys::EDITOR_SPACES_FOR_TABS, true);
        self.set_default(keys::EDITOR_INDENT_STYLE, "SMART");

        self.set_default(keys::FORMATTER_INSERT_SPACE_AFTER_COMMA_DELIMITER, true);
        self.set_default(
            keys::FORMATTER_INSERT_SPACE_AFTER_SEMICOLON_IN_FOR_STATEMENTS,
            true,
        );
        self.set_default(
            keys::FORMATTER_INSERT_SPACE_BEFORE_AND_AFTER_BINARY_OPERATORS,
            true,
        );
        self.set_default(
            keys::FORMATTER_INSERT_SPACE_AFTER_KEYWORDS_IN_CONTROL_FLOW_STATEMENTS,
            true,
        );
        self.set_default(
            keys::FORMATTER_INSERT_SPACE_AFTER_FUNCTION_KEYWORD_FOR_ANONYMOUS_FUNCTIONS,
            false,
        );
        self.set_default(
            keys::FORMATTER_INSERT_SPACE_AFTER_OPENING_AND_BEFORE_CLOSING_NONEMPTY_PARENTHESIS,
            false,
        );
        self.set_default(keys::FORMATTER_PLACE_OPEN_BRACE_ON_NEW_LINE_FOR_FUNCTIONS, false);
        self.set_default(
            keys::FORMATTER_PLACE_OPEN_BRACE_ON_NEW_LINE_FOR_CONTROL_BLOCKS,
            false,
        );

        self.set_default(keys::COMPILER_JSX, "NONE");
        self.set_default(keys::COMPILER_MODULE, "NONE");
        self.set_default(keys::COMPILER_TARGET, "ES5");
        self.set_default(keys::COMPILER_OUT_DIR, "");
        self.set_default(keys::COMPILER_OUT_FILE, "");
    }

    fn lookup<T>(&self, key: &str, convert: impl Fn(&PreferenceValue) -> Option<T>) -> Option<T> {
        if let Some(value) = self.values.get(key) {
            match convert(value) {
                Some(converted) => return Some(converted),
                None => warn!(key, ?value, "ignoring ill-typed preference value"),
            }
        }
        self.defaults.get(key).and_then(convert)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_bool(&self, key: &str) -> bool {
        self.lookup(key, PreferenceValue::as_bool).unwrap_or_default()
    }

    fn get_int(&self, key: &str) -> i64 {
        self.lookup(key, PreferenceValue::as_int).unwrap_or_default()
    }

    fn get_string(&self, key: &str) -> String {
        self.lookup(key, |value| Some(value.as_string()))
            .unwrap_or_default()
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get_bool(&self, key: &str) -> bool {
        (**self).get_bool(key)
    }

    fn get_int(&self, key: &str) -> i64 {
        (**self).get_int(key)
    }

    fn get_string(&self, key: &str) -> String {
        (**self).get_string(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_defaults_when_unset() {
        let store = MemoryPreferenceStore::new();
        assert!(!store.get_bool("missing"));
        assert_eq!(store.get_int("missing"), 0);
        assert_eq!(store.get_string("missing"), "");
    }

    #[test]
    fn test_value_overrides_default() {
        let mut store = MemoryPreferenceStore::new();
        store.set_default("size", 4);
        assert_eq!(store.get_int("size"), 4);

        store.set("size", 2);
        assert_eq!(store.get_int("size"), 2);

        store.reset("size");
        assert_eq!(store.get_int("size"), 4);
    }

    #[test]
    fn test_string_values_coerce() {
        let mut store = MemoryPreferenceStore::new();
        store.set("flag", "TRUE");
        store.set("size", " 8 ");
        assert!(store.get_bool("flag"));
        assert_eq!(store.get_int("size"), 8);
        assert_eq!(store.get_string("size"), " 8 ");
    }

    #[test]
    fn test_ill_typed_value_falls_back_to_default() {
        let mut store = MemoryPreferenceStore::new();
        store.set_default("size", 4);
        store.set("size", "wide");
        assert_eq!(store.get_int("size"), 4);
    }

    #[test]
    fn test_json_round_trip() {
        let store = MemoryPreferenceStore::from_json(
            r#"{ "defaults": { "tabWidth": 4 }, "values": { "spacesForTabs": "false" } }"#,
        )
        .unwrap();
        assert_eq!(store.get_int("tabWidth"), 4);
        assert!(!store.get_bool("spacesForTabs"));

        let reloaded = MemoryPreferenceStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.get_int("tabWidth"), 4);
        assert!(reloaded.contains("spacesForTabs"));
    }

    #[test]
    fn test_json_nulls_and_integral_floats() {
        let store = MemoryPreferenceStore::from_json(
            r#"{
                "defaults": { "tabWidth": 4.0, "spacesForTabs": true },
                "values": { "tabWidth": null, "editor.indentSize": 2.0, "spacesForTabs": null }
            }"#,
        )
        .unwrap();
        assert_eq!(store.get_int("tabWidth"), 4);
        assert_eq!(store.get_int("editor.indentSize"), 2);
        assert!(store.get_bool("spacesForTabs"));
        assert!(!store.contains("tabWidth"));
        assert!(!store.contains("spacesForTabs"));
    }

    #[test]
    fn test_fractional_float_is_rejected() {
        assert!(matches!(
            MemoryPreferenceStore::from_json(r#"{ "values": { "tabWidth": 4.5 } }"#),
            Err(OptionsError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            MemoryPreferenceStore::from_json("{ not json"),
            Err(OptionsError::Json(_))
        ));
    }
}
