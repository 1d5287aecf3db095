use pretty_assertions::assert_eq;
use textpatch_options::{
    CompilerOptions, FormatCodeOptions, IndentStyle, MemoryPreferenceStore, ModuleKind,
    OptionsError, ProjectLayout, ScriptTarget, keys,
};

const PROJECT_PREFERENCES: &str = r#"{
    "values": {
        "editor.indentSize": 2,
        "tabWidth": "2",
        "editor.indentStyle": "block",
        "formatter.placeOpenBraceOnNewLineForFunctions": true,
        "compiler.module": "commonjs",
        "compiler.target": "es6",
        "compiler.outDir": "dist",
        "compiler.sourceMap": true
    }
}"#;

fn project_store() -> MemoryPreferenceStore {
    let mut store = MemoryPreferenceStore::from_json(PROJECT_PREFERENCES).unwrap();
    store.register_defaults();
    store
}

#[test]
fn test_format_options_from_json_preferences() {
    let options = FormatCodeOptions::from_preferences(&project_store()).unwrap();

    assert_eq!(options.editor.indent_size, 2);
    assert_eq!(options.editor.tab_size, 2);
    assert_eq!(options.editor.indent_style, IndentStyle::Block);
    assert!(options.editor.convert_tabs_to_spaces);
    assert!(options.place_open_brace_on_new_line_for_functions);
    assert!(options.insert_space_after_comma_delimiter);
}

#[test]
fn test_compiler_options_from_json_preferences() {
    let options =
        CompilerOptions::from_preferences(&project_store(), &ProjectLayout::new("web")).unwrap();

    assert_eq!(options.module, Some(ModuleKind::CommonJs));
    assert_eq!(options.target, Some(ScriptTarget::Es2015));
    assert_eq!(options.source_map, Some(true));
    assert_eq!(options.out_dir.as_deref(), Some("/web/dist/"));
    assert_eq!(options.out, None);

    let value = serde_json::to_value(&options).unwrap();
    assert_eq!(value["module"], 1);
    assert_eq!(value["moduleResolution"], 1);
    assert_eq!(value["outDir"], "/web/dist/");
    assert!(value.get("outFile").is_none());
}

#[test]
fn test_store_survives_serialization() {
    let store = project_store();
    let reloaded = MemoryPreferenceStore::from_json(&store.to_json().unwrap()).unwrap();

    assert_eq!(
        FormatCodeOptions::from_preferences(&reloaded).unwrap(),
        FormatCodeOptions::from_preferences(&store).unwrap()
    );
}

#[test]
fn test_bad_module_value_is_reported() {
    let mut store = project_store();
    store.set(keys::COMPILER_MODULE, "esm-ish");

    let err = CompilerOptions::from_preferences(&store, &ProjectLayout::new("web")).unwrap_err();

    assert!(matches!(
        err,
        OptionsError::UnknownValue { kind: "module kind", .. }
    ));
}
