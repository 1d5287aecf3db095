//! Compiler option record.
//!
//! Every field is optional; only the ones that are set are sent to the language service.

use crate::error::OptionsError;
use crate::keys;
use crate::kinds::{JsxEmit, ModuleKind, ModuleResolutionKind, NewLineKind, ScriptTarget};
use crate::prefs::PreferenceStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resolves project-relative folders to workspace container paths.
///
/// Container paths are absolute within the workspace and always end with `/`
/// (`/project/`, `/project/build/`), so a file name can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    name: String,
}

impl ProjectLayout {
    /// Layout for the project called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Container path of the project itself.
    pub fn project_container(&self) -> String {
        format!("/{}/", self.name.trim_matches('/'))
    }

    /// Container path of a project-relative folder.
    pub fn folder_container(&self, folder: &str) -> String {
        let folder = folder.trim_matches(|ch| ch == '/' || ch == '\\');
        if folder.is_empty() {
            return self.project_container();
        }
        let folder = folder.replace('\\', "/");
        format!("{}{}/", self.project_container(), folder)
    }
}

/// Options for a compile request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CompilerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_non_ts_extensions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<bool>,
    #[serde(rename = "emitBOM", skip_serializing_if = "Option::is_none")]
    pub emit_bom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit_decorator_metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_async_functions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_decorators: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_source_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_sources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_modules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<JsxEmit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_files: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_resolution: Option<ModuleResolutionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<NewLineKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_emit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_emit_helpers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_emit_on_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_error_truncation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_implicit_any: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_lib: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_resolve: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_const_enums: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_excess_property_errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_implicit_any_index_errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ScriptTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
}

impl CompilerOptions {
    /// Build the compile settings of a project from its preferences.
    ///
    /// Output location:
    /// - a non-empty out dir resolves to that folder's container path;
    /// - a non-empty out file is emitted as `out`, prefixed with the resolved folder (or the
    ///   project container when no out dir is set);
    /// - otherwise a resolved folder is emitted as `outDir`.
    pub fn from_preferences(
        store: &impl PreferenceStore,
        layout: &ProjectLayout,
    ) -> Result<Self, OptionsError> {
        let mut options = Self {
            declaration: Some(store.get_bool(keys::COMPILER_DECLARATION)),
            experimental_decorators: Some(store.get_bool(keys::COMPILER_EXPERIMENTAL_DECORATORS)),
            inline_source_map: Some(store.get_bool(keys::COMPILER_INLINE_SOURCE_MAP)),
            inline_sources: Some(store.get_bool(keys::COMPILER_INLINE_SOURCES)),
            jsx: Some(store.get_string(keys::COMPILER_JSX).parse()?),
            module: Some(store.get_string(keys::COMPILER_MODULE).parse()?),
            module_resolution: Some(ModuleResolutionKind::Classic),
            no_emit_on_error: Some(store.get_bool(keys::COMPILER_NO_EMIT_ON_ERROR)),
            no_implicit_any: Some(store.get_bool(keys::COMPILER_NO_IMPLICIT_ANY)),
            no_lib: Some(store.get_bool(keys::COMPILER_NO_LIB)),
            remove_comments: Some(store.get_bool(keys::COMPILER_REMOVE_COMMENTS)),
            source_map: Some(store.get_bool(keys::COMPILER_SOURCE_MAP)),
            suppress_excess_property_errors: Some(
                store.get_bool(keys::COMPILER_SUPPRESS_EXCESS_PROPERTY_ERRORS),
            ),
            suppress_implicit_any_index_errors: Some(
                store.get_bool(keys::COMPILER_SUPPRESS_IMPLICIT_ANY_INDEX_ERRORS),
            ),
            target: Some(store.get_string(keys::COMPILER_TARGET).parse()?),
            ..Self::default()
        };

        let out_dir = store.get_string(keys::COMPILER_OUT_DIR);
        let out_file = store.get_string(keys::COMPILER_OUT_FILE);

        let output_folder =
            (!out_dir.trim().is_empty()).then(|| layout.folder_container(out_dir.trim()));

        if !out_file.trim().is_empty() {
            let folder = output_folder.unwrap_or_else(|| layout.project_container());
            options.out = Some(format!("{}{}", folder, out_file.trim()));
        } else if let Some(folder) = output_folder {
            options.out_dir = Some(folder);
        }

        debug!(
            project = layout.name(),
            out = ?options.out,
            out_dir = ?options.out_dir,
            "resolved compiler options"
        );
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferenceStore;
    use pretty_assertions::assert_eq;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("app")
    }

    #[test]
    fn test_container_paths() {
        let layout = layout();
        assert_eq!(layout.project_container(), "/app/");
        assert_eq!(layout.folder_container("build/js/"), "/app/build/js/");
        assert_eq!(layout.folder_container("\\out\\"), "/app/out/");
        assert_eq!(layout.folder_container(""), "/app/");
    }

    #[test]
    fn test_defaults() {
        let options =
            CompilerOptions::from_preferences(&MemoryPreferenceStore::with_defaults(), &layout())
                .unwrap();
        assert_eq!(options.jsx, Some(JsxEmit::None));
        assert_eq!(options.module, Some(ModuleKind::None));
        assert_eq!(options.module_resolution, Some(ModuleResolutionKind::Classic));
        assert_eq!(options.target, Some(ScriptTarget::Es5));
        assert_eq!(options.declaration, Some(false));
        assert_eq!(options.out, None);
        assert_eq!(options.out_dir, None);
        assert_eq!(options.charset, None);
    }

    #[test]
    fn test_out_dir_only() {
        let mut store = MemoryPreferenceStore::with_defaults();
        store.set(keys::COMPILER_OUT_DIR, "build");
        let options = CompilerOptions::from_preferences(&store, &layout()).unwrap();
        assert_eq!(options.out_dir.as_deref(), Some("/app/build/"));
        assert_eq!(options.out, None);
    }

    #[test]
    fn test_out_file_only_uses_project_container() {
        let mut store = MemoryPreferenceStore::with_defaults();
        store.set(keys::COMPILER_OUT_FILE, "bundle.js");
        let options = CompilerOptions::from_preferences(&store, &layout()).unwrap();
        assert_eq!(options.out.as_deref(), Some("/app/bundle.js"));
        assert_eq!(options.out_dir, None);
    }

    #[test]
    fn test_out_file_inside_out_dir() {
        let mut store = MemoryPreferenceStore::with_defaults();
        store.set(keys::COMPILER_OUT_DIR, "build");
        store.set(keys::COMPILER_OUT_FILE, "bundle.js");
        let options = CompilerOptions::from_preferences(&store, &layout()).unwrap();
        assert_eq!(options.out.as_deref(), Some("/app/build/bundle.js"));
        assert_eq!(options.out_dir, None);
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let mut store = MemoryPreferenceStore::with_defaults();
        store.set(keys::COMPILER_TARGET, "ES2049");
        let err = CompilerOptions::from_preferences(&store, &layout()).unwrap_err();
        assert_eq!(err.to_string(), "unknown script target value 'ES2049'");
    }

    #[test]
    fn test_serialization_omits_unset_fields() {
        let options = CompilerOptions {
            emit_bom: Some(true),
            module: Some(ModuleKind::CommonJs),
            out_dir: Some("/app/build/".to_string()),
            ..CompilerOptions::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "emitBOM": true, "module": 1, "outDir": "/app/build/" })
        );
    }
}
