//! User-supplied configuration.
//!
//! Every field is optional and may arrive with the wrong JSON type; see
//! [`super::lenient`] for how mistyped values degrade to "absent".

use super::lenient;
use crate::config::error::ConfigError;
use crate::logging::Logger;
use crate::sys::CompilerSystem;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// CLI-style flags. Known flags are typed, everything else is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFlags {
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub prod: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub dev: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub docs: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub esm: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub profile: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub ci: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub serve: Option<bool>,
    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub unknown: IndexMap<String, Value>,
}

impl ConfigFlags {
    /// Boolean value of the flag with the given (camelCase) name, if it is
    /// present and boolean.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        match name {
            "prod" => self.prod,
            "dev" => self.dev,
            "watch" => self.watch,
            "docs" => self.docs,
            "esm" => self.esm,
            "profile" => self.profile,
            "log" => self.log,
            "cache" => self.cache,
            "ci" => self.ci,
            "headless" => self.headless,
            "open" => self.open,
            "serve" => self.serve,
            other => self.unknown.get(other).and_then(Value::as_bool),
        }
    }
}

/// `extras` as written by the user. Values are coerced by truthiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtras {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub append_child_slot_fix: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub clone_node_fix: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub enable_import_injection: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub experimental_import_injection: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub experimental_scoped_slot_changes: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub experimental_slot_fixes: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub initialize_next_tick: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy", rename = "lifecycleDOMEvents")]
    pub lifecycle_dom_events: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub scoped_slot_text_content_fix: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub script_data_opts: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub slot_child_nodes_fix: Option<bool>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub tag_name_transform: Option<bool>,
}

/// `buildEs5` accepts a boolean or the literal `"prod"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEs5 {
    Bool(bool),
    Prod,
}

fn build_es5<'de, D>(deserializer: D) -> Result<Option<BuildEs5>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(BuildEs5::Bool(b)),
        Value::String(s) if s == "prod" => Some(BuildEs5::Prod),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputTarget {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(flatten)]
    pub options: IndexMap<String, Value>,
}

impl OutputTarget {
    pub fn new(output_type: impl Into<String>) -> Self {
        OutputTarget {
            output_type: Some(output_type.into()),
            ..Default::default()
        }
    }

    pub fn is_type(&self, output_type: &str) -> bool {
        self.output_type.as_deref() == Some(output_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub options: IndexMap<String, Value>,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        PluginDescriptor {
            name: name.into(),
            options: IndexMap::new(),
        }
    }
}

/// A group of components emitted into one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub components: Vec<String>,
}

impl Bundle {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Bundle {
            components: components.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedFlagInput {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub selector: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub property: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub initial_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hydrated_value: Option<String>,
}

/// `hydratedFlag` as written by the user: `null`/`false` turns it off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawHydratedFlag {
    Disabled,
    Settings(HydratedFlagInput),
}

fn hydrated_flag<'de, D>(deserializer: D) -> Result<Option<RawHydratedFlag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Some(RawHydratedFlag::Disabled),
        value @ Value::Object(_) => Some(RawHydratedFlag::Settings(
            serde_json::from_value(value).unwrap_or_default(),
        )),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryApiFallback {
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub disable_dot_rule: Option<bool>,
}

/// `devServer` as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerInput {
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub port: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub base_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub reload_strategy: Option<Value>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub open_browser: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub gzip: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub log_requests: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub https: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub root: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub initial_load_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub history_api_fallback: Option<HistoryApiFallback>,
}

/// `testing` options. The same shape is used before and after validation;
/// the validator fills in the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingConfig {
    #[serde(default, deserialize_with = "lenient::bool", skip_serializing_if = "Option::is_none")]
    pub browser_headless: Option<bool>,
    #[serde(default, deserialize_with = "lenient::shape", skip_serializing_if = "Option::is_none")]
    pub browser_args: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub test_regex: Option<String>,
    #[serde(default, deserialize_with = "lenient::shape", skip_serializing_if = "Option::is_none")]
    pub test_path_ignore_patterns: Option<Vec<String>>,
    #[serde(flatten)]
    pub options: IndexMap<String, Value>,
}

/// A JavaScript regular expression, kept as written.
///
/// The source is compiled with the `regex` crate where possible. Sources
/// using syntax it lacks (lookaround, backreferences) are still regular
/// expressions: they stay in the config with no compiled matcher.
#[derive(Debug, Clone, Serialize)]
pub struct WatchRegex {
    pub source: String,
    pub flags: String,
    #[serde(skip)]
    compiled: Option<Regex>,
}

impl WatchRegex {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        let source = source.into();
        let flags = flags.into();
        let compiled = compile_pattern(&source, &flags).ok();
        WatchRegex {
            source,
            flags,
            compiled,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn compiled(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }

    /// `false` for patterns without a compiled matcher.
    pub fn is_match(&self, path: &str) -> bool {
        self.compiled.as_ref().is_some_and(|re| re.is_match(path))
    }
}

impl PartialEq for WatchRegex {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

/// One `watchIgnoredRegex` entry.
///
/// In JSON a regular expression is written as `{ "source": "...", "flags": "..." }`;
/// any other value is kept as `Other` and later discarded.
#[derive(Debug, Clone)]
pub enum WatchPattern {
    Regex(WatchRegex),
    Other(Value),
}

impl WatchPattern {
    pub fn from_value(value: Value) -> Self {
        let regex = value.as_object().and_then(|obj| {
            let source = obj.get("source")?.as_str()?;
            let flags = obj.get("flags").and_then(Value::as_str).unwrap_or("");
            Some(WatchRegex::new(source, flags))
        });
        match regex {
            Some(regex) => WatchPattern::Regex(regex),
            None => WatchPattern::Other(value),
        }
    }
}

/// Compile a pattern written with JavaScript-style flags (`i`, `m`, `s`).
pub fn compile_pattern(source: &str, flags: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
}

/// `watchIgnoredRegex` accepts a single entry or an array of entries.
#[derive(Debug, Clone)]
pub enum WatchIgnoredInput {
    One(WatchPattern),
    Many(Vec<WatchPattern>),
}

fn watch_ignored<'de, D>(deserializer: D) -> Result<Option<WatchIgnoredInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(items) => Some(WatchIgnoredInput::Many(
            items.into_iter().map(WatchPattern::from_value).collect(),
        )),
        value => Some(WatchIgnoredInput::One(WatchPattern::from_value(value))),
    })
}

/// Seed used when the user config carries no system or logger.
#[derive(Debug, Clone, Default)]
pub struct BootstrapSeed {
    pub logger: Option<Arc<dyn Logger>>,
    pub sys: Option<Arc<dyn CompilerSystem>>,
}

/// User-supplied build configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(skip)]
    pub logger: Option<Arc<dyn Logger>>,
    #[serde(skip)]
    pub sys: Option<Arc<dyn CompilerSystem>>,

    #[serde(default, deserialize_with = "lenient::shape")]
    pub flags: Option<ConfigFlags>,
    #[serde(rename = "_isTesting", default, deserialize_with = "lenient::bool")]
    pub is_testing: Option<bool>,

    // Build mode
    #[serde(default, deserialize_with = "lenient::bool")]
    pub dev_mode: Option<bool>,
    #[serde(default, deserialize_with = "build_es5")]
    pub build_es5: Option<BuildEs5>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub extras: Option<RawExtras>,

    // Boolean toggles
    #[serde(default, deserialize_with = "lenient::bool")]
    pub minify_css: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub minify_js: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub source_map: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub watch: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub build_docs: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub build_dist: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub profile: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub write_log: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub build_app_core: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub autoprefix_css: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub validate_types: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub allow_inline_scripts: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub dev_inspector: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub enable_cache: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub transform_aliased_import_paths: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub validate_primary_package_output_target: Option<bool>,

    // Hashing
    #[serde(default, deserialize_with = "lenient::bool")]
    pub hash_file_names: Option<bool>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub hashed_file_name_length: Option<i64>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub task_queue: Option<String>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub env: Option<IndexMap<String, String>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub namespace: Option<String>,

    // Delegated sub-objects
    #[serde(default, deserialize_with = "lenient::elements")]
    pub output_targets: Option<Vec<OutputTarget>>,
    #[serde(default, deserialize_with = "lenient::elements")]
    pub plugins: Option<Vec<PluginDescriptor>>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub dev_server: Option<DevServerInput>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub testing: Option<TestingConfig>,
    #[serde(default, deserialize_with = "lenient::elements")]
    pub bundles: Option<Vec<Bundle>>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub max_concurrent_workers: Option<i64>,
    #[serde(default, deserialize_with = "hydrated_flag")]
    pub hydrated_flag: Option<RawHydratedFlag>,
    #[serde(default, deserialize_with = "lenient::raw")]
    pub rollup_config: Option<Value>,
    #[serde(default, deserialize_with = "watch_ignored")]
    pub watch_ignored_regex: Option<WatchIgnoredInput>,
    #[serde(default, deserialize_with = "lenient::shape")]
    pub ts_compiler_options: Option<ts::CompilerOptions>,

    // Paths
    #[serde(default, deserialize_with = "lenient::string")]
    pub root_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub src_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cache_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub src_index_html: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub package_json_file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tsconfig: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub global_script: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub global_style: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub config_path: Option<String>,
}

impl RawConfig {
    /// Parse a config document. The document itself must be a JSON object;
    /// individual mistyped fields are tolerated.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        if !value.is_object() {
            return Err(ConfigError::NotAnObject(json_type_name(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_loosely_typed_document() {
        let config = RawConfig::from_json_str(
            r#"{
                "devMode": "yes",
                "buildEs5": "prod",
                "hashedFileNameLength": 12,
                "flags": { "prod": true, "custom": true },
                "bundles": [{ "components": ["a-b"] }, 42],
                "_isTesting": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.dev_mode, None);
        assert_eq!(config.build_es5, Some(BuildEs5::Prod));
        assert_eq!(config.hashed_file_name_length, Some(12));
        let flags = config.flags.unwrap();
        assert_eq!(flags.prod, Some(true));
        assert_eq!(flags.boolean("custom"), Some(true));
        assert_eq!(config.bundles.unwrap().len(), 1);
        assert_eq!(config.is_testing, Some(true));
    }

    #[test]
    fn should_reject_non_object_documents() {
        let err = RawConfig::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject("array")));
    }

    #[test]
    fn should_read_hydrated_flag_states() {
        let config = RawConfig::from_json_str(r#"{"hydratedFlag": false}"#).unwrap();
        assert_eq!(config.hydrated_flag, Some(RawHydratedFlag::Disabled));
        let config = RawConfig::from_json_str(r#"{"hydratedFlag": {"name": "ready"}}"#).unwrap();
        match config.hydrated_flag {
            Some(RawHydratedFlag::Settings(input)) => assert_eq!(input.name.as_deref(), Some("ready")),
            other => panic!("unexpected hydrated flag: {:?}", other),
        }
    }

    #[test]
    fn should_read_watch_patterns() {
        let config = RawConfig::from_json_str(
            r#"{"watchIgnoredRegex": [{"source": "\\.tmp$", "flags": "i"}, "not-a-regex"]}"#,
        )
        .unwrap();
        match config.watch_ignored_regex {
            Some(WatchIgnoredInput::Many(patterns)) => {
                assert_eq!(patterns.len(), 2);
                match &patterns[0] {
                    WatchPattern::Regex(re) => assert!(re.is_match("FILE.TMP")),
                    other => panic!("expected regex, got {:?}", other),
                }
                assert!(matches!(patterns[1], WatchPattern::Other(_)));
            }
            other => panic!("unexpected watch input: {:?}", other),
        }
    }

    #[test]
    fn should_keep_regex_the_matcher_cannot_compile() {
        let pattern = WatchPattern::from_value(serde_json::json!({ "source": "(a)\\1", "flags": "g" }));
        match pattern {
            WatchPattern::Regex(re) => {
                assert_eq!(re.as_str(), "(a)\\1");
                assert!(re.compiled().is_none());
                assert!(!re.is_match("aa"));
            }
            other => panic!("expected regex, got {:?}", other),
        }
    }
}
