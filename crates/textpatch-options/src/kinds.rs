//! Closed enumerations used by the option records.
//!
//! Preference stores hold these as strings (the upper-case constant names, e.g. `"SMART"`).
//! Parsing is total: any input maps to a member or to [`OptionsError::UnknownValue`]. Matching
//! ignores case and `_` / `-` separators, so `"CommonJS"`, `"COMMONJS"` and `"common-js"` are
//! the same value. On the wire the language service expects the numeric values.

use crate::error::OptionsError;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::str::FromStr;

fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| *ch != '_' && *ch != '-')
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

fn parse_named<T: Copy>(
    kind: &'static str,
    value: &str,
    names: &[(&str, T)],
) -> Result<T, OptionsError> {
    let wanted = normalize(value);
    names
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, member)| *member)
        .ok_or_else(|| OptionsError::UnknownValue {
            kind,
            value: value.to_string(),
        })
}

/// How the formatter indents new lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum IndentStyle {
    /// No automatic indentation.
    None = 0,
    /// Keep the indentation of the previous line.
    Block = 1,
    /// Language-aware indentation.
    #[default]
    Smart = 2,
}

impl IndentStyle {
    /// Canonical preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Block => "BLOCK",
            Self::Smart => "SMART",
        }
    }
}

impl FromStr for IndentStyle {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(
            "indent style",
            s,
            &[
                ("NONE", Self::None),
                ("BLOCK", Self::Block),
                ("SMART", Self::Smart),
            ],
        )
    }
}

/// JSX emit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum JsxEmit {
    /// JSX is not allowed.
    #[default]
    None = 0,
    /// Keep JSX in the output.
    Preserve = 1,
    /// Compile JSX to `React.createElement` calls.
    React = 2,
}

impl JsxEmit {
    /// Canonical preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Preserve => "PRESERVE",
            Self::React => "REACT",
        }
    }
}

impl FromStr for JsxEmit {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(
            "jsx emit",
            s,
            &[
                ("NONE", Self::None),
                ("PRESERVE", Self::Preserve),
                ("REACT", Self::React),
            ],
        )
    }
}

/// Module code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ModuleKind {
    /// No module system.
    #[default]
    None = 0,
    /// CommonJS (`require` / `exports`).
    CommonJs = 1,
    /// Asynchronous module definition.
    Amd = 2,
    /// Universal module definition.
    Umd = 3,
    /// SystemJS.
    System = 4,
    /// ECMAScript 2015 modules.
    Es2015 = 5,
}

impl ModuleKind {
    /// Canonical preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::CommonJs => "COMMONJS",
            Self::Amd => "AMD",
            Self::Umd => "UMD",
            Self::System => "SYSTEM",
            Self::Es2015 => "ES2015",
        }
    }
}

impl FromStr for ModuleKind {
    type Err = OptionsError;

    /// An empty string means "no module system".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(
            "module kind",
            s,
            &[
                ("", Self::None),
                ("NONE", Self::None),
                ("COMMONJS", Self::CommonJs),
                ("AMD", Self::Amd),
                ("UMD", Self::Umd),
                ("SYSTEM", Self::System),
                ("ES6", Self::Es2015),
                ("ES2015", Self::Es2015),
            ],
        )
    }
}

/// Module resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ModuleResolutionKind {
    /// Classic TypeScript resolution.
    #[default]
    Classic = 1,
    /// Node.js style `node_modules` lookup.
    NodeJs = 2,
}

impl ModuleResolutionKind {
    /// Canonical preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "CLASSIC",
            Self::NodeJs => "NODE_JS",
        }
    }
}

impl FromStr for ModuleResolutionKind {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(
            "module resolution kind",
            s,
            &[
                ("CLASSIC", Self::Classic),
                ("NODE", Self::NodeJs),
                ("NODEJS", Self::NodeJs),
            ],
        )
    }
}

/// Newline sequence used by emitted or formatted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum NewLineKind {
    /// Windows-style CRLF (`"\r\n"`).
    CarriageReturnLineFeed = 0,
    /// Unix-style LF (`'\n'`).
    #[default]
    LineFeed = 1,
}

impl NewLineKind {
    /// Canonical preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CarriageReturnLineFeed => "CRLF",
            Self::LineFeed => "LF",
        }
    }

    /// The newline sequence itself.
    pub fn sequence(self) -> &'static str {
        match self {
            Self::CarriageReturnLineFeed => "\r\n",
            Self::LineFeed => "\n",
        }
    }

    /// Detect the dominant newline of a text.
    ///
    /// Policy: any CRLF (`"\r\n"`) yields [`NewLineKind::CarriageReturnLineFeed`], otherwise
    /// [`NewLineKind::LineFeed`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CarriageReturnLineFeed
        } else {
            Self::LineFeed
        }
    }
}

impl FromStr for NewLineKind {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(
            "newline kind",
            s,
            &[
                ("CRLF", Self::CarriageReturnLineFeed),
                ("CARRIAGERETURNLINEFEED", Self::CarriageReturnLineFeed),
                ("LF", Self::LineFeed),
                ("LINEFEED", Self::LineFeed),
            ],
        )
    }
}

/// ECMAScript target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ScriptTarget {
    /// ECMAScript 3.
    Es3 = 0,
    /// ECMAScript 5.
    #[default]
    Es5 = 1,
    /// ECMAScript 2015 (also the latest supported target).
    Es2015 = 2,
}

impl ScriptTarget {
    /// Canonical preference string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Es3 => "ES3",
            Self::Es5 => "ES5",
            Self::Es2015 => "ES2015",
        }
    }
}

impl FromStr for ScriptTarget {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(
            "script target",
            s,
            &[
                ("ES3", Self::Es3),
                ("ES5", Self::Es5),
                ("ES6", Self::Es2015),
                ("ES2015", Self::Es2015),
                ("LATEST", Self::Es2015),
            ],
        )
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    IndentStyle,
    JsxEmit,
    ModuleKind,
    ModuleResolutionKind,
    NewLineKind,
    ScriptTarget
);
