//! Preference keys read by the option builders.
//!
//! Keys shared with generic text-editor preferences (tab width, spaces for tabs) use the host
//! editor's names; everything else is namespaced.

/// Indent size in columns (integer).
pub const EDITOR_INDENT_SIZE: &str = "editor.indentSize";
/// Tab width in columns (integer).
pub const EDITOR_TAB_WIDTH: &str = "tabWidth";
/// Insert spaces instead of tabs (boolean).
pub const EDITOR_SPACES_FOR_TABS: &str = "spacesForTabs";
/// Indent style name, see [`crate::IndentStyle`] (string).
pub const EDITOR_INDENT_STYLE: &str = "editor.indentStyle";

/// Formatter toggle (boolean).
pub const FORMATTER_INSERT_SPACE_AFTER_COMMA_DELIMITER: &str =
    "formatter.insertSpaceAfterCommaDelimiter";
/// Formatter toggle (boolean).
pub const FORMATTER_INSERT_SPACE_AFTER_SEMICOLON_IN_FOR_STATEMENTS: &str =
    "formatter.insertSpaceAfterSemicolonInForStatements";
/// Formatter toggle (boolean).
pub const FORMATTER_INSERT_SPACE_BEFORE_AND_AFTER_BINARY_OPERATORS: &str =
    "formatter.insertSpaceBeforeAndAfterBinaryOperators";
/// Formatter toggle (boolean).
pub const FORMATTER_INSERT_SPACE_AFTER_KEYWORDS_IN_CONTROL_FLOW_STATEMENTS: &str =
    "formatter.insertSpaceAfterKeywordsInControlFlowStatements";
/// Formatter toggle (boolean).
pub const FORMATTER_INSERT_SPACE_AFTER_FUNCTION_KEYWORD_FOR_ANONYMOUS_FUNCTIONS: &str =
    "formatter.insertSpaceAfterFunctionKeywordForAnonymousFunctions";
/// Formatter toggle (boolean).
pub const FORMATTER_INSERT_SPACE_AFTER_OPENING_AND_BEFORE_CLOSING_NONEMPTY_PARENTHESIS: &str =
    "formatter.insertSpaceAfterOpeningAndBeforeClosingNonemptyParenthesis";
/// Formatter toggle (boolean).
pub const FORMATTER_PLACE_OPEN_BRACE_ON_NEW_LINE_FOR_FUNCTIONS: &str =
    "formatter.placeOpenBraceOnNewLineForFunctions";
/// Formatter toggle (boolean).
pub const FORMATTER_PLACE_OPEN_BRACE_ON_NEW_LINE_FOR_CONTROL_BLOCKS: &str =
    "formatter.placeOpenBraceOnNewLineForControlBlocks";

/// Compiler toggle (boolean).
pub const COMPILER_DECLARATION: &str = "compiler.declaration";
/// Compiler toggle (boolean).
pub const COMPILER_EXPERIMENTAL_DECORATORS: &str = "compiler.experimentalDecorators";
/// Compiler toggle (boolean).
pub const COMPILER_INLINE_SOURCE_MAP: &str = "compiler.inlineSourceMap";
/// Compiler toggle (boolean).
pub const COMPILER_INLINE_SOURCES: &str = "compiler.inlineSources";
/// JSX emit name, see [`crate::JsxEmit`] (string).
pub const COMPILER_JSX: &str = "compiler.jsx";
/// Module kind name, see [`crate::ModuleKind`] (string).
pub const COMPILER_MODULE: &str = "compiler.module";
/// Compiler toggle (boolean).
pub const COMPILER_NO_EMIT_ON_ERROR: &str = "compiler.noEmitOnError";
/// Compiler toggle (boolean).
pub const COMPILER_NO_IMPLICIT_ANY: &str = "compiler.noImplicitAny";
/// Compiler toggle (boolean).
pub const COMPILER_NO_LIB: &str = "compiler.noLib";
/// Output directory, project relative (string, may be empty).
pub const COMPILER_OUT_DIR: &str = "compiler.outDir";
/// Single output file name (string, may be empty).
pub const COMPILER_OUT_FILE: &str = "compiler.outFile";
/// Compiler toggle (boolean).
pub const COMPILER_REMOVE_COMMENTS: &str = "compiler.removeComments";
/// Compiler toggle (boolean).
pub const COMPILER_SOURCE_MAP: &str = "compiler.sourceMap";
/// Compiler toggle (boolean).
pub const COMPILER_SUPPRESS_EXCESS_PROPERTY_ERRORS: &str = "compiler.suppressExcessPropertyErrors";
/// Compiler toggle (boolean).
pub const COMPILER_SUPPRESS_IMPLICIT_ANY_INDEX_ERRORS: &str =
    "compiler.suppressImplicitAnyIndexErrors";
/// Script target name, see [`crate::ScriptTarget`] (string).
pub const COMPILER_TARGET: &str = "compiler.target";
