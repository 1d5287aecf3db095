//! Editor and formatter option records.

use crate::error::OptionsError;
use crate::keys;
use crate::kinds::{IndentStyle, NewLineKind};
use crate::prefs::PreferenceStore;
use serde::{Deserialize, Serialize};

fn non_negative(store: &impl PreferenceStore, key: &'static str) -> Result<u32, OptionsError> {
    let value = store.get_int(key);
    u32::try_from(value).map_err(|_| OptionsError::InvalidNumber { key, value })
}

/// Whitespace settings shared by every editor-facing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditorOptions {
    /// Columns per indentation level.
    pub indent_size: u32,
    /// Columns per tab stop.
    pub tab_size: u32,
    /// Newline sequence to emit.
    pub new_line_character: String,
    /// Emit spaces instead of tab characters.
    pub convert_tabs_to_spaces: bool,
    /// Indentation strategy.
    pub indent_style: IndentStyle,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            tab_size: 4,
            new_line_character: NewLineKind::LineFeed.sequence().to_string(),
            convert_tabs_to_spaces: true,
            indent_style: IndentStyle::Smart,
        }
    }
}

impl EditorOptions {
    /// Read the editor settings from `store`.
    pub fn from_preferences(store: &impl PreferenceStore) -> Result<Self, OptionsError> {
        Ok(Self {
            indent_size: non_negative(store, keys::EDITOR_INDENT_SIZE)?,
            tab_size: non_negative(store, keys::EDITOR_TAB_WIDTH)?,
            new_line_character: NewLineKind::LineFeed.sequence().to_string(),
            convert_tabs_to_spaces: store.get_bool(keys::EDITOR_SPACES_FOR_TABS),
            indent_style: store.get_string(keys::EDITOR_INDENT_STYLE).parse()?,
        })
    }

    /// Use the given newline sequence.
    pub fn with_new_line(mut self, kind: NewLineKind) -> Self {
        self.new_line_character = kind.sequence().to_string();
        self
    }
}

/// Settings for a range/document formatting request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormatCodeOptions {
    /// Shared whitespace settings.
    #[serde(flatten)]
    pub editor: EditorOptions,
    /// `f(a,b)` becomes `f(a, b)`.
    pub insert_space_after_comma_delimiter: bool,
    /// `for (;;)` gets a space after each `;`.
    pub insert_space_after_semicolon_in_for_statements: bool,
    /// `a+b` becomes `a + b`.
    pub insert_space_before_and_after_binary_operators: bool,
    /// `if(x)` becomes `if (x)`.
    pub insert_space_after_keywords_in_control_flow_statements: bool,
    /// `function()` becomes `function ()`.
    pub insert_space_after_function_keyword_for_anonymous_functions: bool,
    /// `(a)` becomes `( a )`.
    pub insert_space_after_opening_and_before_closing_nonempty_parenthesis: bool,
    /// Function bodies open on a new line.
    pub place_open_brace_on_new_line_for_functions: bool,
    /// Control blocks open on a new line.
    pub place_open_brace_on_new_line_for_control_blocks: bool,
}

impl FormatCodeOptions {
    /// Read the formatter settings from `store`.
    pub fn from_preferences(store: &impl PreferenceStore) -> Result<Self, OptionsError> {
        Ok(Self {
            editor: EditorOptions::from_preferences(store)?,
            insert_space_after_comma_delimiter: store
                .get_bool(keys::FORMATTER_INSERT_SPACE_AFTER_COMMA_DELIMITER),
            insert_space_after_semicolon_in_for_statements: store
                .get_bool(keys::FORMATTER_INSERT_SPACE_AFTER_SEMICOLON_IN_FOR_STATEMENTS),
            insert_space_before_and_after_binary_operators: store
                .get_bool(keys::FORMATTER_INSERT_SPACE_BEFORE_AND_AFTER_BINARY_OPERATORS),
            insert_space_after_keywords_in_control_flow_statements: store
                .get_bool(keys::FORMATTER_INSERT_SPACE_AFTER_KEYWORDS_IN_CONTROL_FLOW_STATEMENTS),
            insert_space_after_function_keyword_for_anonymous_functions: store.get_bool(
                keys::FORMATTER_INSERT_SPACE_AFTER_FUNCTION_KEYWORD_FOR_ANONYMOUS_FUNCTIONS,
            ),
            insert_space_after_opening_and_before_closing_nonempty_parenthesis: store.get_bool(
                keys::FORMATTER_INSERT_SPACE_AFTER_OPENING_AND_BEFORE_CLOSING_NONEMPTY_PARENTHESIS,
            ),
            place_open_brace_on_new_line_for_functions: store
                .get_bool(keys::FORMATTER_PLACE_OPEN_BRACE_ON_NEW_LINE_FOR_FUNCTIONS),
            place_open_brace_on_new_line_for_control_blocks: store
                .get_bool(keys::FORMATTER_PLACE_OPEN_BRACE_ON_NEW_LINE_FOR_CONTROL_BLOCKS),
        })
    }

    /// Use the given newline sequence.
    pub fn with_new_line(mut self, kind: NewLineKind) -> Self {
        self.editor = self.editor.with_new_line(kind);
        self
    }
}
