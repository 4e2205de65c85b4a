//! Validated configuration.
//!
//! Every field holds a concrete value. Once produced, a `ValidatedConfig`
//! is shared behind an `Arc` and never mutated again.

use super::config::{
    BuildEs5, Bundle, ConfigFlags, DevServerInput, HistoryApiFallback, HydratedFlagInput,
    OutputTarget, PluginDescriptor, RawConfig, RawExtras, RawHydratedFlag, TestingConfig,
    WatchIgnoredInput, WatchPattern, WatchRegex,
};
use crate::logging::Logger;
use crate::sys::CompilerSystem;
use bitflags::bitflags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

bitflags! {
    /// Opt-in runtime behaviors (`extras`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ConfigExtras: u32 {
        const APPEND_CHILD_SLOT_FIX = 1 << 0;
        const CLONE_NODE_FIX = 1 << 1;
        const ENABLE_IMPORT_INJECTION = 1 << 2;
        const EXPERIMENTAL_IMPORT_INJECTION = 1 << 3;
        const EXPERIMENTAL_SCOPED_SLOT_CHANGES = 1 << 4;
        const EXPERIMENTAL_SLOT_FIXES = 1 << 5;
        const INITIALIZE_NEXT_TICK = 1 << 6;
        const LIFECYCLE_DOM_EVENTS = 1 << 7;
        const SCOPED_SLOT_TEXT_CONTENT_FIX = 1 << 8;
        const SCRIPT_DATA_OPTS = 1 << 9;
        const SLOT_CHILD_NODES_FIX = 1 << 10;
        const TAG_NAME_TRANSFORM = 1 << 11;
    }
}

impl ConfigExtras {
    /// Fixes switched on by `experimentalSlotFixes`, with their config names.
    pub const SLOT_FIXES: [(ConfigExtras, &'static str); 4] = [
        (ConfigExtras::APPEND_CHILD_SLOT_FIX, "appendChildSlotFix"),
        (ConfigExtras::SLOT_CHILD_NODES_FIX, "slotChildNodesFix"),
        (ConfigExtras::CLONE_NODE_FIX, "cloneNodeFix"),
        (ConfigExtras::SCOPED_SLOT_TEXT_CONTENT_FIX, "scopedSlotTextContentFix"),
    ];

    pub fn to_raw(self) -> RawExtras {
        let has = |flag: ConfigExtras| Some(self.contains(flag));
        RawExtras {
            append_child_slot_fix: has(ConfigExtras::APPEND_CHILD_SLOT_FIX),
            clone_node_fix: has(ConfigExtras::CLONE_NODE_FIX),
            enable_import_injection: has(ConfigExtras::ENABLE_IMPORT_INJECTION),
            experimental_import_injection: has(ConfigExtras::EXPERIMENTAL_IMPORT_INJECTION),
            experimental_scoped_slot_changes: has(ConfigExtras::EXPERIMENTAL_SCOPED_SLOT_CHANGES),
            experimental_slot_fixes: has(ConfigExtras::EXPERIMENTAL_SLOT_FIXES),
            initialize_next_tick: has(ConfigExtras::INITIALIZE_NEXT_TICK),
            lifecycle_dom_events: has(ConfigExtras::LIFECYCLE_DOM_EVENTS),
            scoped_slot_text_content_fix: has(ConfigExtras::SCOPED_SLOT_TEXT_CONTENT_FIX),
            script_data_opts: has(ConfigExtras::SCRIPT_DATA_OPTS),
            slot_child_nodes_fix: has(ConfigExtras::SLOT_CHILD_NODES_FIX),
            tag_name_transform: has(ConfigExtras::TAG_NAME_TRANSFORM),
        }
    }
}

/// Scheduling mode of the runtime task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskQueue {
    #[default]
    Async,
    Immediate,
    Congestion,
}

impl TaskQueue {
    pub fn parse(value: &str) -> Option<TaskQueue> {
        match value {
            "async" => Some(TaskQueue::Async),
            "immediate" => Some(TaskQueue::Immediate),
            "congestion" => Some(TaskQueue::Congestion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskQueue::Async => "async",
            TaskQueue::Immediate => "immediate",
            TaskQueue::Congestion => "congestion",
        }
    }
}

/// Paths computed by the path validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPaths {
    pub root_dir: String,
    pub src_dir: String,
    pub cache_dir: String,
    pub src_index_html: String,
    pub package_json_file_path: String,
    pub tsconfig: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HydratedSelector {
    Class,
    Attribute,
}

/// Marker applied to components once they hydrate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedFlag {
    pub name: String,
    pub selector: HydratedSelector,
    pub property: String,
    pub initial_value: String,
    pub hydrated_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupInputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treeshake: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_file_ops: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupOutputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<Value>,
}

/// Bundler options that pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupConfig {
    pub input_options: RollupInputOptions,
    pub output_options: RollupOutputOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DevServerProtocol {
    #[default]
    Http,
    Https,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReloadStrategy {
    Hmr,
    PageReload,
}

impl ReloadStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadStrategy::Hmr => "hmr",
            ReloadStrategy::PageReload => "pageReload",
        }
    }
}

pub const DEFAULT_DEV_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_DEV_SERVER_PORT: u16 = 3333;

/// Validated dev-server options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    pub address: String,
    pub port: u16,
    pub protocol: DevServerProtocol,
    pub base_path: String,
    pub reload_strategy: Option<ReloadStrategy>,
    pub open_browser: bool,
    pub gzip: bool,
    pub log_requests: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub initial_load_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_api_fallback: Option<HistoryApiFallback>,
    pub worker: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        DevServerConfig {
            address: DEFAULT_DEV_SERVER_ADDRESS.to_string(),
            port: DEFAULT_DEV_SERVER_PORT,
            protocol: DevServerProtocol::Http,
            base_path: "/".to_string(),
            reload_strategy: Some(ReloadStrategy::Hmr),
            open_browser: true,
            gzip: true,
            log_requests: false,
            root: None,
            initial_load_url: "/".to_string(),
            history_api_fallback: None,
            worker: true,
        }
    }
}

impl DevServerConfig {
    pub fn to_input(&self) -> DevServerInput {
        DevServerInput {
            address: Some(self.address.clone()),
            port: Some(i64::from(self.port)),
            base_path: Some(self.base_path.clone()),
            reload_strategy: Some(
                self.reload_strategy
                    .map(|s| Value::from(s.as_str()))
                    .unwrap_or(Value::Null),
            ),
            open_browser: Some(self.open_browser),
            gzip: Some(self.gzip),
            log_requests: Some(self.log_requests),
            https: Some(self.protocol == DevServerProtocol::Https),
            root: self.root.clone(),
            initial_load_url: Some(self.initial_load_url.clone()),
            history_api_fallback: self.history_api_fallback.clone(),
        }
    }
}

/// Fully resolved build configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedConfig {
    #[serde(skip)]
    pub logger: Arc<dyn Logger>,
    #[serde(skip)]
    pub sys: Arc<dyn CompilerSystem>,
    pub flags: ConfigFlags,
    #[serde(rename = "_isTesting")]
    pub is_testing: bool,

    pub hydrated_flag: Option<HydratedFlag>,
    pub output_targets: Vec<OutputTarget>,
    pub rollup_config: RollupConfig,
    pub testing: TestingConfig,
    pub transform_aliased_import_paths: bool,
    pub validate_primary_package_output_target: bool,
    #[serde(flatten)]
    pub paths: ConfigPaths,

    pub dev_mode: bool,
    pub extras: ConfigExtras,
    pub build_es5: bool,

    pub minify_css: bool,
    pub minify_js: bool,
    pub source_map: bool,
    pub watch: bool,
    pub build_docs: bool,
    pub build_dist: bool,
    pub profile: bool,
    pub write_log: bool,
    pub build_app_core: bool,
    pub autoprefix_css: bool,
    pub validate_types: bool,
    pub allow_inline_scripts: bool,

    pub task_queue: TaskQueue,
    pub hash_file_names: bool,
    pub hashed_file_name_length: i64,
    pub env: IndexMap<String, String>,

    pub namespace: String,
    pub fs_namespace: String,
    pub plugins: Vec<PluginDescriptor>,
    pub dev_server: DevServerConfig,
    pub bundles: Vec<Bundle>,
    pub max_concurrent_workers: u32,
    pub dev_inspector: bool,
    pub enable_cache: bool,
    /// Serialized as `{ source, flags }`, the shape the input accepts.
    pub watch_ignored_regex: Vec<WatchRegex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_compiler_options: Option<ts::CompilerOptions>,
}

impl ValidatedConfig {
    /// Express this config as user input again, every field explicit.
    ///
    /// Re-validating the result is not guaranteed to reproduce `self`:
    /// dev-server derivation is not idempotent.
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            logger: Some(self.logger.clone()),
            sys: Some(self.sys.clone()),
            flags: Some(self.flags.clone()),
            is_testing: Some(self.is_testing),
            dev_mode: Some(self.dev_mode),
            build_es5: Some(BuildEs5::Bool(self.build_es5)),
            extras: Some(self.extras.to_raw()),
            minify_css: Some(self.minify_css),
            minify_js: Some(self.minify_js),
            source_map: Some(self.source_map),
            watch: Some(self.watch),
            build_docs: Some(self.build_docs),
            build_dist: Some(self.build_dist),
            profile: Some(self.profile),
            write_log: Some(self.write_log),
            build_app_core: Some(self.build_app_core),
            autoprefix_css: Some(self.autoprefix_css),
            validate_types: Some(self.validate_types),
            allow_inline_scripts: Some(self.allow_inline_scripts),
            dev_inspector: Some(self.dev_inspector),
            enable_cache: Some(self.enable_cache),
            transform_aliased_import_paths: Some(self.transform_aliased_import_paths),
            validate_primary_package_output_target: Some(
                self.validate_primary_package_output_target,
            ),
            hash_file_names: Some(self.hash_file_names),
            hashed_file_name_length: Some(self.hashed_file_name_length),
            task_queue: Some(self.task_queue.as_str().to_string()),
            env: Some(self.env.clone()),
            // a dashed name only survives in its file-system form
            namespace: Some(if self.fs_namespace.contains('-') {
                self.fs_namespace.clone()
            } else {
                self.namespace.clone()
            }),
            output_targets: Some(self.output_targets.clone()),
            plugins: Some(self.plugins.clone()),
            dev_server: Some(self.dev_server.to_input()),
            testing: Some(self.testing.clone()),
            bundles: Some(self.bundles.clone()),
            max_concurrent_workers: Some(i64::from(self.max_concurrent_workers)),
            hydrated_flag: Some(match &self.hydrated_flag {
                None => RawHydratedFlag::Disabled,
                Some(flag) => RawHydratedFlag::Settings(HydratedFlagInput {
                    name: Some(flag.name.clone()),
                    selector: Some(
                        match flag.selector {
                            HydratedSelector::Class => "class",
                            HydratedSelector::Attribute => "attribute",
                        }
                        .to_string(),
                    ),
                    property: Some(flag.property.clone()),
                    initial_value: Some(flag.initial_value.clone()),
                    hydrated_value: Some(flag.hydrated_value.clone()),
                }),
            }),
            rollup_config: serde_json::to_value(&self.rollup_config).ok(),
            watch_ignored_regex: Some(WatchIgnoredInput::Many(
                self.watch_ignored_regex
                    .iter()
                    .cloned()
                    .map(WatchPattern::Regex)
                    .collect(),
            )),
            ts_compiler_options: self.ts_compiler_options.clone(),
            root_dir: Some(self.paths.root_dir.clone()),
            src_dir: Some(self.paths.src_dir.clone()),
            cache_dir: Some(self.paths.cache_dir.clone()),
            src_index_html: Some(self.paths.src_index_html.clone()),
            package_json_file_path: Some(self.paths.package_json_file_path.clone()),
            tsconfig: Some(self.paths.tsconfig.clone()),
            global_script: self.paths.global_script.clone(),
            global_style: self.paths.global_style.clone(),
            config_path: self.paths.config_path.clone(),
        }
    }
}
