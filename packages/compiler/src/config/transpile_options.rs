//! Transpile config builder
//!
//! Derives the compile options, TypeScript options and a minimal build
//! config for transpiling one file, plus the per-file result scaffolding
//! and CSS transform input.

use super::constants::{DEFAULT_TRANSPILE_FILE, STENCIL_INTERNAL_CLIENT_ID};
use crate::declarations::{
    ComponentExport, ComponentMetadata, ModuleFormat, ProxyStyle, RawConfig, RawTranspileOptions,
    SourceMapSetting, StyleImportData, StyleSource, TransformCssToEsmInput, TransformOptions,
    TranspileConfig, TranspileOptions, TranspileResults, TranspileTarget,
};
use crate::sys::{normalize_path, CompilerSystem};
use crate::transformers::{parse_import_path, ImportData};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use ts::{CompilerOptions, ModuleKind, ScriptTarget};

pub const VALID_EXPORT: &[Option<&str>] = &[Some("customelement"), Some("module")];
pub const VALID_METADATA: &[Option<&str>] = &[Some("compilerstatic"), None];
pub const VALID_PROXY: &[Option<&str>] = &[Some("defineproperty"), None];
pub const VALID_MODULE: &[Option<&str>] = &[Some("cjs"), Some("esm")];
pub const VALID_STYLE: &[Option<&str>] = &[Some("static")];
pub const VALID_STYLE_IMPORT_DATA: &[Option<&str>] = &[Some("queryparams")];
pub const VALID_TARGET: &[Option<&str>] = &[
    Some("latest"),
    Some("esnext"),
    Some("es2020"),
    Some("es2019"),
    Some("es2018"),
    Some("es2017"),
    Some("es2016"),
    Some("es2015"),
    Some("es5"),
];

/// Normalize one enum-like option against its allow-list.
///
/// `None` is the "no value" answer: it is returned for an explicit JSON
/// `null` or the string `"null"`, and is a regular member of lists such as
/// [`VALID_PROXY`]. Absent, non-string and unrecognized values yield
/// `default_value`.
pub fn get_transpile_config_opt(
    value: Option<&Value>,
    valid_values: &[Option<&str>],
    default_value: Option<&str>,
) -> Option<String> {
    let value = match value {
        None => return default_value.map(String::from),
        Some(Value::Null) => return None,
        Some(Value::String(s)) if s == "null" => return None,
        Some(Value::String(s)) => s.trim().to_lowercase(),
        Some(_) => return default_value.map(String::from),
    };
    if valid_values.contains(&Some(value.as_str())) {
        Some(value)
    } else {
        default_value.map(String::from)
    }
}

fn normalize_opt<T>(
    value: Option<&Value>,
    valid_values: &[Option<&str>],
    default_value: Option<T>,
    parse: fn(&str) -> Option<T>,
) -> Option<T>
where
    T: Copy + ToString,
{
    let default_name = default_value.map(|d| d.to_string());
    get_transpile_config_opt(value, valid_values, default_name.as_deref())
        .and_then(|name| parse(&name))
}

fn resolve_source_map(value: Option<&Value>) -> SourceMapSetting {
    match value {
        Some(Value::String(s)) if s == "inline" => SourceMapSetting::Inline,
        Some(Value::Bool(false)) => SourceMapSetting::Disabled,
        _ => SourceMapSetting::Enabled,
    }
}

/// Normalize the caller's transpile input into compile options.
pub fn get_transpile_options(
    input: &RawTranspileOptions,
    sys: &dyn CompilerSystem,
) -> TranspileOptions {
    let current_directory = input
        .current_directory
        .clone()
        .unwrap_or_else(|| sys.get_current_directory());

    TranspileOptions {
        component_export: normalize_opt(
            input.component_export.as_ref(),
            VALID_EXPORT,
            Some(ComponentExport::CustomElement),
            ComponentExport::parse,
        ),
        component_metadata: normalize_opt(
            input.component_metadata.as_ref(),
            VALID_METADATA,
            None,
            ComponentMetadata::parse,
        ),
        core_import_path: input
            .core_import_path
            .clone()
            .unwrap_or_else(|| STENCIL_INTERNAL_CLIENT_ID.to_string()),
        current_directory: normalize_path(Path::new(&current_directory)),
        file: input.file.clone(),
        proxy: normalize_opt(
            input.proxy.as_ref(),
            VALID_PROXY,
            Some(ProxyStyle::DefineProperty),
            ProxyStyle::parse,
        ),
        module: normalize_opt(
            input.module.as_ref(),
            VALID_MODULE,
            Some(ModuleFormat::Esm),
            ModuleFormat::parse,
        ),
        source_map: resolve_source_map(input.source_map.as_ref()),
        style: normalize_opt(
            input.style.as_ref(),
            VALID_STYLE,
            Some(StyleSource::Static),
            StyleSource::parse,
        ),
        style_import_data: normalize_opt(
            input.style_import_data.as_ref(),
            VALID_STYLE_IMPORT_DATA,
            Some(StyleImportData::QueryParams),
            StyleImportData::parse,
        ),
        target: normalize_opt(
            input.target.as_ref(),
            VALID_TARGET,
            Some(TranspileTarget::Latest),
            TranspileTarget::parse,
        ),
        base_url: input.base_url.clone(),
        paths: input.paths.clone(),
        transform_aliased_import_paths: input.transform_aliased_import_paths,
    }
}

/// TypeScript options for isolated, single-file transpilation.
pub fn get_transpile_ts_options(compile_opts: &TranspileOptions) -> CompilerOptions {
    let mut ts_options = CompilerOptions::isolated_transpile();

    match compile_opts.source_map {
        SourceMapSetting::Inline => {
            ts_options.inline_source_map = Some(true);
            ts_options.inline_sources = Some(true);
        }
        setting => ts_options.source_map = Some(setting.is_enabled()),
    }

    ts_options.module = Some(match compile_opts.module {
        Some(ModuleFormat::Cjs) => ModuleKind::CommonJS,
        _ => ModuleKind::ESNext,
    });
    ts_options.target = Some(
        compile_opts
            .target
            .map(|target| target.script_target())
            .unwrap_or(ScriptTarget::Latest),
    );

    if let Some(base_url) = &compile_opts.base_url {
        ts_options.base_url = Some(base_url.clone());
    }
    if let Some(paths) = &compile_opts.paths {
        ts_options.paths = Some(paths.clone());
    }
    ts_options
}

/// Derive `{compileOpts, config, transformOpts}` using an already resolved
/// system.
pub fn build_transpile_config(
    input: &RawTranspileOptions,
    sys: Arc<dyn CompilerSystem>,
) -> TranspileConfig {
    let compile_opts = get_transpile_options(input, sys.as_ref());
    let ts_options = get_transpile_ts_options(&compile_opts);

    let transform_opts = TransformOptions {
        core_import_path: compile_opts.core_import_path.clone(),
        component_export: compile_opts.component_export,
        component_metadata: compile_opts.component_metadata,
        current_directory: compile_opts.current_directory.clone(),
        file: compile_opts.file.clone(),
        isolated_modules: true,
        module: compile_opts.module,
        proxy: compile_opts.proxy,
        style: compile_opts.style,
        style_import_data: compile_opts.style_import_data,
        target: compile_opts.target,
    };

    let config = RawConfig {
        is_testing: Some(true),
        dev_mode: Some(true),
        enable_cache: Some(false),
        minify_css: Some(true),
        minify_js: Some(false),
        root_dir: Some(compile_opts.current_directory.clone()),
        src_dir: Some(compile_opts.current_directory.clone()),
        sys: Some(sys),
        transform_aliased_import_paths: input.transform_aliased_import_paths,
        ts_compiler_options: Some(ts_options),
        validate_types: Some(false),
        ..Default::default()
    };

    TranspileConfig {
        compile_opts,
        config,
        transform_opts,
    }
}

/// Result scaffolding for one file, filled in by the transform stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TranspileResultsInit {
    pub import_data: Option<ImportData>,
    pub results: TranspileResults,
}

/// Build the empty result envelope for `code`.
///
/// A missing or empty `file` is replaced by `module.tsx` on `input` so the
/// config derived afterwards sees the same file name.
pub fn get_transpile_results(code: &str, input: &mut RawTranspileOptions) -> TranspileResultsInit {
    let file = match input.file.as_deref() {
        Some(file) if !file.is_empty() => file.to_string(),
        _ => DEFAULT_TRANSPILE_FILE.to_string(),
    };
    input.file = Some(file.clone());

    let parsed = parse_import_path(&file);

    TranspileResultsInit {
        import_data: parsed.data,
        results: TranspileResults {
            code: code.to_string(),
            data: Vec::new(),
            diagnostics: Vec::new(),
            imports: Vec::new(),
            input_file_extension: parsed.ext,
            input_file_path: file,
            map: None,
            output_file_path: None,
        },
    }
}

/// Input for the CSS-to-module transform of a style file.
pub fn get_transpile_css_config(
    compile_opts: &TranspileOptions,
    import_data: Option<&ImportData>,
    results: &TranspileResults,
) -> TransformCssToEsmInput {
    TransformCssToEsmInput {
        file: results.input_file_path.clone(),
        input: results.code.clone(),
        tag: import_data.and_then(|data| data.tag.clone()),
        encapsulation: import_data.and_then(|data| data.encapsulation),
        mode: import_data.and_then(|data| data.mode.clone()),
        module: compile_opts.module,
        style_import_data: compile_opts.style_import_data,
        source_map: compile_opts.source_map.is_enabled(),
        comment_original_selector: false,
        minify: false,
        autoprefixer: false,
        docs: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::testing::TestingSystem;
    use serde_json::json;

    fn testing_sys() -> Arc<dyn CompilerSystem> {
        Arc::new(TestingSystem::new("/work/app"))
    }

    #[test]
    fn should_normalize_case_and_whitespace() {
        let value = json!("  CJS ");
        assert_eq!(
            get_transpile_config_opt(Some(&value), VALID_MODULE, Some("esm")).as_deref(),
            Some("cjs")
        );
    }

    #[test]
    fn should_return_none_for_null_sentinels() {
        assert_eq!(get_transpile_config_opt(Some(&Value::Null), VALID_PROXY, Some("defineproperty")), None);
        let literal = json!("null");
        assert_eq!(get_transpile_config_opt(Some(&literal), VALID_PROXY, Some("defineproperty")), None);
    }

    #[test]
    fn should_fall_back_for_non_strings() {
        let value = json!(42);
        assert_eq!(
            get_transpile_config_opt(Some(&value), VALID_PROXY, Some("defineproperty")).as_deref(),
            Some("defineproperty")
        );
        assert_eq!(
            get_transpile_config_opt(None, VALID_EXPORT, Some("customelement")).as_deref(),
            Some("customelement")
        );
    }

    #[test]
    fn should_apply_defaults() {
        let config = build_transpile_config(&RawTranspileOptions::default(), testing_sys());
        let opts = &config.compile_opts;
        assert_eq!(opts.component_export, Some(ComponentExport::CustomElement));
        assert_eq!(opts.component_metadata, None);
        assert_eq!(opts.proxy, Some(ProxyStyle::DefineProperty));
        assert_eq!(opts.module, Some(ModuleFormat::Esm));
        assert_eq!(opts.style, Some(StyleSource::Static));
        assert_eq!(opts.style_import_data, Some(StyleImportData::QueryParams));
        assert_eq!(opts.target, Some(TranspileTarget::Latest));
        assert_eq!(opts.source_map, SourceMapSetting::Enabled);
        assert_eq!(opts.current_directory, "/work/app");
        assert_eq!(opts.core_import_path, STENCIL_INTERNAL_CLIENT_ID);
    }

    #[test]
    fn should_build_minimal_config() {
        let config = build_transpile_config(&RawTranspileOptions::default(), testing_sys());
        let raw = &config.config;
        assert_eq!(raw.is_testing, Some(true));
        assert_eq!(raw.dev_mode, Some(true));
        assert_eq!(raw.enable_cache, Some(false));
        assert_eq!(raw.minify_css, Some(true));
        assert_eq!(raw.minify_js, Some(false));
        assert_eq!(raw.validate_types, Some(false));
        assert_eq!(raw.root_dir.as_deref(), Some("/work/app"));
        assert_eq!(raw.src_dir.as_deref(), Some("/work/app"));
        assert!(config.transform_opts.isolated_modules);
    }

    #[test]
    fn should_set_inline_source_map_options() {
        let input = RawTranspileOptions {
            source_map: Some(json!("inline")),
            ..Default::default()
        };
        let config = build_transpile_config(&input, testing_sys());
        let ts_options = config.ts_compiler_options().unwrap();
        assert_eq!(ts_options.inline_source_map, Some(true));
        assert_eq!(ts_options.inline_sources, Some(true));
        assert_eq!(ts_options.source_map, None);
    }

    #[test]
    fn should_map_module_and_target() {
        let input = RawTranspileOptions {
            module: Some(json!("cjs")),
            target: Some(json!("es2017")),
            source_map: Some(json!(false)),
            ..Default::default()
        };
        let config = build_transpile_config(&input, testing_sys());
        let ts_options = config.ts_compiler_options().unwrap();
        assert_eq!(ts_options.module, Some(ModuleKind::CommonJS));
        assert_eq!(ts_options.target, Some(ScriptTarget::ES2017));
        assert_eq!(ts_options.source_map, Some(false));
        assert_eq!(ts_options.no_lib, Some(true));
        assert_eq!(ts_options.isolated_modules, Some(true));
    }

    #[test]
    fn should_default_file_name() {
        let mut input = RawTranspileOptions::default();
        let init = get_transpile_results("const a = 1;", &mut input);
        assert_eq!(init.results.input_file_path, "module.tsx");
        assert_eq!(init.results.input_file_extension.as_deref(), Some("tsx"));
        assert_eq!(input.file.as_deref(), Some("module.tsx"));
        assert!(init.import_data.is_none());
        assert!(init.results.map.is_none());
    }

    #[test]
    fn should_build_css_input_from_import_data() {
        let mut input = RawTranspileOptions {
            file: Some("/src/cmp.css?tag=my-cmp&encapsulation=shadow".to_string()),
            ..Default::default()
        };
        let init = get_transpile_results(".a{}", &mut input);
        let config = build_transpile_config(&input, testing_sys());
        let css = get_transpile_css_config(&config.compile_opts, init.import_data.as_ref(), &init.results);
        assert_eq!(css.tag.as_deref(), Some("my-cmp"));
        assert_eq!(css.input, ".a{}");
        assert!(css.source_map);
        assert!(!css.minify);
        assert!(!css.autoprefixer);
        assert_eq!(css.module, Some(ModuleFormat::Esm));
    }
}
