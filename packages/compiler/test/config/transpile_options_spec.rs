//! Transpile config tests

use serde_json::{json, Value};
use std::sync::Arc;
use stencil_compiler::config::{
    build_transpile_config, get_transpile_config_opt, get_transpile_css_config,
    get_transpile_results, BuildSession, VALID_EXPORT, VALID_METADATA, VALID_MODULE, VALID_PROXY,
    VALID_STYLE, VALID_STYLE_IMPORT_DATA, VALID_TARGET,
};
use stencil_compiler::declarations::{
    ComponentMetadata, ProxyStyle, RawTranspileOptions, SourceMapSetting, TranspileTarget,
};
use stencil_compiler::sys::testing::TestingSystem;
use stencil_compiler::transformers::Encapsulation;
use ts::{ModuleKind, ScriptTarget};

fn transpile(value: Value) -> stencil_compiler::declarations::TranspileConfig {
    let input: RawTranspileOptions = serde_json::from_value(value).unwrap();
    build_transpile_config(&input, Arc::new(TestingSystem::new("/project")))
}

const ALLOW_LISTS: &[(&[Option<&str>], Option<&str>)] = &[
    (VALID_EXPORT, Some("customelement")),
    (VALID_METADATA, None),
    (VALID_PROXY, Some("defineproperty")),
    (VALID_MODULE, Some("esm")),
    (VALID_STYLE, Some("static")),
    (VALID_STYLE_IMPORT_DATA, Some("queryparams")),
    (VALID_TARGET, Some("latest")),
];

#[test]
fn should_accept_every_member_case_insensitively() {
    for (valid, default_value) in ALLOW_LISTS {
        for member in valid.iter().flatten() {
            let shouted = json!(format!("  {}  ", member.to_uppercase()));
            assert_eq!(
                get_transpile_config_opt(Some(&shouted), valid, *default_value).as_deref(),
                Some(*member)
            );
        }
    }
}

#[test]
fn should_fall_back_for_values_outside_allow_list() {
    let outside = [json!("bogus"), json!(""), json!(1), json!(true), json!(["esm"]), json!({})];
    for (valid, default_value) in ALLOW_LISTS {
        for value in &outside {
            assert_eq!(
                get_transpile_config_opt(Some(value), valid, *default_value).as_deref(),
                *default_value,
                "value {} should fall back",
                value
            );
        }
        assert_eq!(get_transpile_config_opt(None, valid, *default_value).as_deref(), *default_value);
    }
}

#[test]
fn should_honor_null_sentinels() {
    for sentinel in [Value::Null, json!("null")] {
        let config = transpile(json!({ "proxy": sentinel.clone(), "componentMetadata": sentinel }));
        assert_eq!(config.compile_opts.proxy, None);
        assert_eq!(config.compile_opts.component_metadata, None);
        assert_eq!(config.transform_opts.proxy, None);
    }
}

#[test]
fn should_apply_documented_defaults() {
    let config = transpile(json!({}));
    assert_eq!(config.compile_opts.proxy, Some(ProxyStyle::DefineProperty));
    assert_eq!(config.compile_opts.component_metadata, None);
    assert_eq!(config.compile_opts.target, Some(TranspileTarget::Latest));
    assert_eq!(config.compile_opts.source_map, SourceMapSetting::Enabled);
    assert_eq!(config.compile_opts.current_directory, "/project");
}

#[test]
fn should_normalize_typed_fields() {
    let config = transpile(json!({
        "componentMetadata": "CompilerStatic",
        "target": "ES2017",
        "module": "cjs",
        "sourceMap": false
    }));
    let opts = &config.compile_opts;
    assert_eq!(opts.component_metadata, Some(ComponentMetadata::CompilerStatic));
    assert_eq!(opts.target, Some(TranspileTarget::Es2017));
    assert_eq!(opts.source_map, SourceMapSetting::Disabled);

    let ts_options = config.ts_compiler_options().unwrap();
    assert_eq!(ts_options.module, Some(ModuleKind::CommonJS));
    assert_eq!(ts_options.target, Some(ScriptTarget::ES2017));
    assert_eq!(ts_options.source_map, Some(false));
}

#[test]
fn should_treat_non_boolean_source_map_as_enabled() {
    let config = transpile(json!({ "sourceMap": "yes" }));
    assert_eq!(config.compile_opts.source_map, SourceMapSetting::Enabled);
    assert_eq!(config.ts_compiler_options().unwrap().source_map, Some(true));
}

#[test]
fn should_copy_base_url_and_paths() {
    let config = transpile(json!({
        "baseUrl": "/project/src",
        "paths": { "@utils/*": ["utils/*"] },
        "transformAliasedImportPaths": true
    }));
    let ts_options = config.ts_compiler_options().unwrap();
    assert_eq!(ts_options.base_url.as_deref(), Some("/project/src"));
    assert_eq!(config.compile_opts.base_url.as_deref(), Some("/project/src"));
    let paths = ts_options.paths.as_ref().unwrap();
    assert_eq!(paths["@utils/*"], vec!["utils/*".to_string()]);
    assert_eq!(config.compile_opts.paths.as_ref(), Some(paths));
    assert_eq!(config.config.transform_aliased_import_paths, Some(true));
}

#[test]
fn should_default_file_name_to_module_tsx() {
    let mut input = RawTranspileOptions::default();
    let init = get_transpile_results("export const a = 1;", &mut input);
    assert_eq!(init.results.input_file_path, "module.tsx");
    assert_eq!(init.results.input_file_extension.as_deref(), Some("tsx"));
    assert!(init.results.diagnostics.is_empty());
    assert!(init.results.imports.is_empty());
    assert!(init.results.output_file_path.is_none());

    let config = build_transpile_config(&input, Arc::new(TestingSystem::new("/project")));
    assert_eq!(config.compile_opts.file.as_deref(), Some("module.tsx"));
}

#[test]
fn should_default_empty_file_name() {
    let mut input = RawTranspileOptions {
        file: Some(String::new()),
        ..Default::default()
    };
    let init = get_transpile_results("", &mut input);
    assert_eq!(init.results.input_file_path, "module.tsx");
}

#[test]
fn should_derive_css_input() {
    let mut input = RawTranspileOptions {
        file: Some("/project/src/cmp.css?tag=my-cmp&encapsulation=scoped&mode=ios".to_string()),
        source_map: Some(json!(false)),
        ..Default::default()
    };
    let init = get_transpile_results(":host{}", &mut input);
    let config = build_transpile_config(&input, Arc::new(TestingSystem::new("/project")));
    let css = get_transpile_css_config(&config.compile_opts, init.import_data.as_ref(), &init.results);

    assert_eq!(css.file, "/project/src/cmp.css?tag=my-cmp&encapsulation=scoped&mode=ios");
    assert_eq!(css.tag.as_deref(), Some("my-cmp"));
    assert_eq!(css.encapsulation, Some(Encapsulation::Scoped));
    assert_eq!(css.mode.as_deref(), Some("ios"));
    assert!(!css.source_map);
    assert!(!css.comment_original_selector);
    assert!(!css.minify);
    assert!(!css.autoprefixer);
}

#[test]
fn should_reuse_session_default_system() {
    let mut session = BuildSession::new();
    let first = session.get_transpile_config(&RawTranspileOptions::default());
    let second = session.get_transpile_config(&RawTranspileOptions::default());
    let first_sys = first.config.sys.unwrap();
    let second_sys = second.config.sys.unwrap();
    assert!(Arc::ptr_eq(&first_sys, &second_sys));
}
