// Perform Transpile
//
// Derives the single-file transpile config from command line options.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use stencil_compiler::declarations::{
    RawTranspileOptions, TransformOptions, TranspileConfig, TranspileOptions,
};

/// Transpile options as given on the command line. Every value is passed
/// through the normalizer unchanged.
#[derive(Debug, Clone, Default)]
pub struct TranspileArgs {
    pub file: Option<String>,
    pub target: Option<String>,
    pub module: Option<String>,
    pub source_map: Option<String>,
    pub component_export: Option<String>,
    pub component_metadata: Option<String>,
    pub proxy: Option<String>,
    pub style: Option<String>,
    pub core_import_path: Option<String>,
    pub current_directory: Option<String>,
    pub base_url: Option<String>,
}

impl TranspileArgs {
    pub fn into_options(self) -> RawTranspileOptions {
        let value = |arg: Option<String>| arg.map(Value::String);
        RawTranspileOptions {
            component_export: value(self.component_export),
            component_metadata: value(self.component_metadata),
            proxy: value(self.proxy),
            module: value(self.module),
            style: value(self.style),
            target: value(self.target),
            source_map: self.source_map.map(|source_map| match source_map.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(source_map),
            }),
            file: self.file,
            core_import_path: self.core_import_path,
            current_directory: self.current_directory,
            base_url: self.base_url,
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranspileConfigOutput<'a> {
    compile_opts: &'a TranspileOptions,
    ts_compiler_options: Option<&'a ts::CompilerOptions>,
    transform_opts: &'a TransformOptions,
}

/// `{ compileOpts, tsCompilerOptions, transformOpts }` as JSON.
pub fn transpile_config_json(config: &TranspileConfig) -> Result<Value> {
    let output = TranspileConfigOutput {
        compile_opts: &config.compile_opts,
        ts_compiler_options: config.ts_compiler_options(),
        transform_opts: &config.transform_opts,
    };
    Ok(serde_json::to_value(output)?)
}

/// Derive the transpile config against the process-wide build session.
pub fn perform_transpile_config(args: TranspileArgs) -> Result<Value> {
    let config = stencil_compiler::get_transpile_config(&args.into_options());
    transpile_config_json(&config)
}
