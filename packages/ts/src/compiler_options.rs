use crate::{ModuleKind, ScriptTarget};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Path mapping table as written in a tsconfig `paths` field.
pub type PathMappings = IndexMap<String, Vec<String>>;

/// Options handed to the TypeScript transform stage.
///
/// Every field is optional; an absent field leaves the TypeScript default
/// in place and is omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_non_ts_extensions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_synthetic_default_imports: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub es_module_interop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_source_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_sources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_modules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_lib: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_resolve: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathMappings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_output_path_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ScriptTarget>,
}

impl CompilerOptions {
    /// Baseline for isolated, single-file transpilation: no type checking,
    /// no standard library, no module resolution.
    pub fn isolated_transpile() -> Self {
        CompilerOptions {
            allow_synthetic_default_imports: Some(true),
            es_module_interop: Some(true),
            isolated_modules: Some(true),
            suppress_output_path_check: Some(true),
            allow_non_ts_extensions: Some(true),
            no_lib: Some(true),
            no_resolve: Some(true),
            ..Default::default()
        }
    }
}
