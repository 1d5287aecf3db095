#![warn(missing_docs)]
//! `textpatch-options` - typed option records for formatting and compile requests.
//!
//! Hosts keep settings in a loosely typed key/value store (strings, booleans, integers with
//! registered defaults). Language services want strongly shaped records. This crate sits in
//! between:
//!
//! - [`PreferenceStore`] / [`MemoryPreferenceStore`] - layered lookups with defaults
//! - [`FormatCodeOptions`] / [`EditorOptions`] - formatter settings
//! - [`CompilerOptions`] - compile settings, including output location resolution
//! - closed enumerations ([`IndentStyle`], [`ModuleKind`], ...) with total parsing
//!
//! Records are built once per request and passed by value; nothing here reads global state.
//!
//! ```rust
//! use textpatch_options::{FormatCodeOptions, IndentStyle, MemoryPreferenceStore, keys};
//!
//! let mut store = MemoryPreferenceStore::with_defaults();
//! store.set(keys::EDITOR_INDENT_STYLE, "block");
//!
//! let options = FormatCodeOptions::from_preferences(&store).unwrap();
//! assert_eq!(options.editor.indent_style, IndentStyle::Block);
//! ```

pub mod compiler;
mod error;
pub mod format;
pub mod keys;
pub mod kinds;
pub mod prefs;

pub use compiler::{CompilerOptions, ProjectLayout};
pub use error::OptionsError;
pub use format::{EditorOptions, FormatCodeOptions};
pub use kinds::{IndentStyle, JsxEmit, ModuleKind, ModuleResolutionKind, NewLineKind, ScriptTarget};
pub use prefs::{MemoryPreferenceStore, PreferenceStore, PreferenceValue};
