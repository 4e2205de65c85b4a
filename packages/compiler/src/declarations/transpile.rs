//! Single-file transpile options, results and CSS transform input.

use super::config::{json_type_name, RawConfig};
use super::lenient;
use crate::config::error::ConfigError;
use crate::diagnostics::Diagnostic;
use crate::sys::CompilerSystem;
use crate::transformers::stencil_import_path::Encapsulation;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use ts::{PathMappings, ScriptTarget};

/// Declares a closed, string-named transpile option.
macro_rules! transpile_option {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            /// Parse the canonical (lowercase, trimmed) name.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

transpile_option!(
    /// How components are exported from the transpiled module.
    ComponentExport {
        CustomElement => "customelement",
        Module => "module",
    }
);

transpile_option!(
    /// How component metadata is emitted.
    ComponentMetadata {
        CompilerStatic => "compilerstatic",
    }
);

transpile_option!(
    /// How component members are proxied.
    ProxyStyle {
        DefineProperty => "defineproperty",
    }
);

transpile_option!(
    /// Output module format.
    ModuleFormat {
        Cjs => "cjs",
        Esm => "esm",
    }
);

transpile_option!(
    /// Where component styles come from.
    StyleSource {
        Static => "static",
    }
);

transpile_option!(
    /// How style imports carry component data.
    StyleImportData {
        QueryParams => "queryparams",
    }
);

transpile_option!(
    /// ECMAScript version emitted by the transpiler.
    TranspileTarget {
        Latest => "latest",
        EsNext => "esnext",
        Es2020 => "es2020",
        Es2019 => "es2019",
        Es2018 => "es2018",
        Es2017 => "es2017",
        Es2016 => "es2016",
        Es2015 => "es2015",
        Es5 => "es5",
    }
);

impl TranspileTarget {
    pub fn script_target(&self) -> ScriptTarget {
        match self {
            TranspileTarget::Latest => ScriptTarget::Latest,
            TranspileTarget::EsNext => ScriptTarget::ESNext,
            TranspileTarget::Es2020 => ScriptTarget::ES2020,
            TranspileTarget::Es2019 => ScriptTarget::ES2019,
            TranspileTarget::Es2018 => ScriptTarget::ES2018,
            TranspileTarget::Es2017 => ScriptTarget::ES2017,
            TranspileTarget::Es2016 => ScriptTarget::ES2016,
            TranspileTarget::Es2015 => ScriptTarget::ES2015,
            TranspileTarget::Es5 => ScriptTarget::ES5,
        }
    }
}

/// Resolved `sourceMap` setting: a boolean, or `"inline"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMapSetting {
    Enabled,
    Disabled,
    Inline,
}

impl SourceMapSetting {
    pub fn is_enabled(&self) -> bool {
        *self != SourceMapSetting::Disabled
    }
}

impl Serialize for SourceMapSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SourceMapSetting::Enabled => serializer.serialize_bool(true),
            SourceMapSetting::Disabled => serializer.serialize_bool(false),
            SourceMapSetting::Inline => serializer.serialize_str("inline"),
        }
    }
}

/// Transpile input as supplied by the caller.
///
/// Enum-like fields keep the raw JSON value: an explicit `null` means
/// "no value", which is different from leaving the field out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTranspileOptions {
    #[serde(skip)]
    pub sys: Option<Arc<dyn CompilerSystem>>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub component_export: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub component_metadata: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub proxy: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub module: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub style: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub style_import_data: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub target: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub source_map: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub file: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub core_import_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub current_directory: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub paths: Option<PathMappings>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub transform_aliased_import_paths: Option<bool>,
}

impl RawTranspileOptions {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source)?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject(json_type_name(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Normalized transpile options ("compile options").
///
/// `None` in an enum-like field means the caller explicitly asked for no
/// value (`null`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileOptions {
    pub component_export: Option<ComponentExport>,
    pub component_metadata: Option<ComponentMetadata>,
    pub core_import_path: String,
    pub current_directory: String,
    pub file: Option<String>,
    pub proxy: Option<ProxyStyle>,
    pub module: Option<ModuleFormat>,
    pub source_map: SourceMapSetting,
    pub style: Option<StyleSource>,
    pub style_import_data: Option<StyleImportData>,
    pub target: Option<TranspileTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathMappings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_aliased_import_paths: Option<bool>,
}

/// Options consumed by the component transform stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    pub core_import_path: String,
    pub component_export: Option<ComponentExport>,
    pub component_metadata: Option<ComponentMetadata>,
    pub current_directory: String,
    pub file: Option<String>,
    pub isolated_modules: bool,
    pub module: Option<ModuleFormat>,
    pub proxy: Option<ProxyStyle>,
    pub style: Option<StyleSource>,
    pub style_import_data: Option<StyleImportData>,
    pub target: Option<TranspileTarget>,
}

/// Everything needed to transpile one file.
///
/// `config` is a deliberately minimal stand-in for a validated build
/// configuration; it only drives single-file transforms.
#[derive(Debug, Clone)]
pub struct TranspileConfig {
    pub compile_opts: TranspileOptions,
    pub config: RawConfig,
    pub transform_opts: TransformOptions,
}

impl TranspileConfig {
    pub fn ts_compiler_options(&self) -> Option<&ts::CompilerOptions> {
        self.config.ts_compiler_options.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranspileImport {
    pub path: String,
}

/// Output envelope for one transpiled file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileResults {
    pub code: String,
    pub data: Vec<Value>,
    pub diagnostics: Vec<Diagnostic>,
    pub imports: Vec<TranspileImport>,
    pub input_file_extension: Option<String>,
    pub input_file_path: String,
    pub map: Option<String>,
    pub output_file_path: Option<String>,
}

/// Input descriptor for the CSS-to-module transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformCssToEsmInput {
    pub file: String,
    pub input: String,
    pub tag: Option<String>,
    pub encapsulation: Option<Encapsulation>,
    pub mode: Option<String>,
    pub module: Option<ModuleFormat>,
    pub style_import_data: Option<StyleImportData>,
    pub source_map: bool,
    pub comment_original_selector: bool,
    pub minify: bool,
    pub autoprefixer: bool,
    pub docs: bool,
}
