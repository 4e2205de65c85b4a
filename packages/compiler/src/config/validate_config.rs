//! Full config validation.
//!
//! Turns a `RawConfig` into a `ValidatedConfig` plus diagnostics. Use it
//! through [`super::BuildSession`], which guards it with the identity cache.

use super::config_utils::set_boolean_config;
use super::constants::{
    DEFAULT_DEV_MODE, DEFAULT_HASHED_FILENAME_LENGTH, MAX_HASHED_FILENAME_LENGTH,
    MIN_HASHED_FILENAME_LENGTH,
};
use super::validators::ConfigValidators;
use crate::declarations::{
    BootstrapSeed, BuildEs5, ConfigExtras, ConfigFlags, DevServerConfig, RawConfig, RawExtras,
    TaskQueue, ValidatedConfig, WatchIgnoredInput, WatchPattern, WatchRegex,
};
use crate::diagnostics::{build_error, build_warn, has_error, Diagnostic};
use crate::logging::{create_logger, Logger};
use std::sync::Arc;

/// What a caller hands to validation: fresh user input, or a config that
/// was already validated.
#[derive(Debug, Clone)]
pub enum ConfigInput {
    Raw(RawConfig),
    Validated(Arc<ValidatedConfig>),
}

impl From<RawConfig> for ConfigInput {
    fn from(config: RawConfig) -> Self {
        ConfigInput::Raw(config)
    }
}

impl From<Arc<ValidatedConfig>> for ConfigInput {
    fn from(config: Arc<ValidatedConfig>) -> Self {
        ConfigInput::Validated(config)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigValidationResults {
    pub config: Arc<ValidatedConfig>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConfigValidationResults {
    pub fn has_error(&self) -> bool {
        has_error(&self.diagnostics)
    }
}

/// Run every validation step over `raw`. Not idempotent: callers go
/// through the build session cache.
pub fn validate_raw_config(
    mut raw: RawConfig,
    bootstrap: &BootstrapSeed,
    validators: &dyn ConfigValidators,
) -> ConfigValidationResults {
    let mut diagnostics = Vec::new();

    let logger: Arc<dyn Logger> = bootstrap
        .logger
        .clone()
        .or_else(|| raw.logger.clone())
        .unwrap_or_else(create_logger);

    let dev_server_input = raw.dev_server.take().unwrap_or_default();

    let flags = match clone_flags(raw.flags.as_ref()) {
        Ok(flags) => flags,
        Err(err) => {
            logger.warn(&format!("config flags could not be copied: {}", err));
            ConfigFlags::default()
        }
    };

    let hydrated_flag = validators.validate_hydrated(&raw);
    let rollup_config = validators.validate_rollup_config(&raw);
    let sys = raw
        .sys
        .clone()
        .or_else(|| bootstrap.sys.clone())
        .unwrap_or_else(|| validators.create_system(Some(&logger)));
    let paths = validators.validate_paths(&raw, sys.as_ref());
    let is_testing = raw.is_testing.unwrap_or(false);

    let dev_mode = if flags.prod == Some(true) {
        false
    } else if flags.dev == Some(true) {
        true
    } else {
        raw.dev_mode.unwrap_or(DEFAULT_DEV_MODE)
    };

    let extras = validate_extras(raw.extras.as_ref(), &mut diagnostics);

    let build_es5 = match raw.build_es5 {
        Some(BuildEs5::Bool(true)) => true,
        Some(BuildEs5::Prod) => !dev_mode,
        _ => false,
    };

    let minify_css = set_boolean_config(&mut raw.minify_css, None, &flags, !dev_mode);
    let minify_js = set_boolean_config(&mut raw.minify_js, None, &flags, !dev_mode);
    let source_map = set_boolean_config(&mut raw.source_map, None, &flags, true);
    let watch = set_boolean_config(&mut raw.watch, Some("watch"), &flags, false);
    let build_docs = set_boolean_config(&mut raw.build_docs, Some("docs"), &flags, !dev_mode);
    let build_dist =
        set_boolean_config(&mut raw.build_dist, Some("esm"), &flags, !dev_mode || build_es5);
    let profile = set_boolean_config(&mut raw.profile, Some("profile"), &flags, dev_mode);
    let write_log = set_boolean_config(&mut raw.write_log, Some("log"), &flags, false);
    let build_app_core = set_boolean_config(&mut raw.build_app_core, None, &flags, true);
    let autoprefix_css = set_boolean_config(&mut raw.autoprefix_css, None, &flags, build_es5);
    let validate_types = set_boolean_config(&mut raw.validate_types, None, &flags, !is_testing);
    let allow_inline_scripts =
        set_boolean_config(&mut raw.allow_inline_scripts, None, &flags, true);

    let task_queue = raw
        .task_queue
        .as_deref()
        .and_then(TaskQueue::parse)
        .unwrap_or_default();

    let hash_file_names = set_boolean_config(&mut raw.hash_file_names, None, &flags, !dev_mode);
    let hashed_file_name_length = raw
        .hashed_file_name_length
        .unwrap_or(DEFAULT_HASHED_FILENAME_LENGTH);
    if hashed_file_name_length < MIN_HASHED_FILENAME_LENGTH {
        build_error(&mut diagnostics).message_text = format!(
            "hashedFileNameLength must be at least {} characters",
            MIN_HASHED_FILENAME_LENGTH
        );
    }
    if hashed_file_name_length > MAX_HASHED_FILENAME_LENGTH {
        build_error(&mut diagnostics).message_text = format!(
            "hashedFileNameLength cannot be more than {} characters",
            MAX_HASHED_FILENAME_LENGTH
        );
    }

    let names = validators.validate_namespace(raw.namespace.as_deref(), &mut diagnostics);

    let mut config = ValidatedConfig {
        logger,
        sys,
        flags,
        is_testing,
        hydrated_flag,
        output_targets: raw.output_targets.take().unwrap_or_default(),
        rollup_config,
        testing: raw.testing.take().unwrap_or_default(),
        transform_aliased_import_paths: raw.transform_aliased_import_paths.unwrap_or(true),
        validate_primary_package_output_target: raw
            .validate_primary_package_output_target
            .unwrap_or(false),
        paths,
        dev_mode,
        extras,
        build_es5,
        minify_css,
        minify_js,
        source_map,
        watch,
        build_docs,
        build_dist,
        profile,
        write_log,
        build_app_core,
        autoprefix_css,
        validate_types,
        allow_inline_scripts,
        task_queue,
        hash_file_names,
        hashed_file_name_length,
        env: raw.env.take().unwrap_or_default(),
        namespace: names.namespace,
        fs_namespace: names.fs_namespace,
        plugins: raw.plugins.take().unwrap_or_default(),
        dev_server: DevServerConfig::default(),
        bundles: raw.bundles.take().unwrap_or_default(),
        max_concurrent_workers: 0,
        dev_inspector: raw.dev_inspector.unwrap_or(dev_mode),
        enable_cache: false,
        watch_ignored_regex: Vec::new(),
        ts_compiler_options: raw.ts_compiler_options.take(),
    };

    validators.validate_output_targets(&mut config, &mut diagnostics);
    validators.validate_plugins(&mut config, &mut diagnostics);
    config.dev_server = validators.validate_dev_server(&config, &dev_server_input, &mut diagnostics);
    validators.validate_testing(&mut config, &mut diagnostics);

    config.bundles.sort_by_key(|bundle| bundle.components.len());

    validators.validate_workers(&mut config, raw.max_concurrent_workers);

    if !config.is_testing {
        validators.validate_dist_namespace(&config, &mut diagnostics);
    }

    config.enable_cache = set_boolean_config(&mut raw.enable_cache, Some("cache"), &config.flags, true);

    config.watch_ignored_regex =
        watch_ignored_regex(raw.watch_ignored_regex.take(), &mut diagnostics);

    config.logger.debug(&format!(
        "validated config: devMode {}, {} output target(s), {} diagnostic(s)",
        config.dev_mode,
        config.output_targets.len(),
        diagnostics.len()
    ));

    ConfigValidationResults {
        config: Arc::new(config),
        diagnostics,
    }
}

fn clone_flags(flags: Option<&ConfigFlags>) -> Result<ConfigFlags, serde_json::Error> {
    match flags {
        Some(flags) => serde_json::from_value(serde_json::to_value(flags)?),
        None => Ok(ConfigFlags::default()),
    }
}

/// Coerce every extras flag to a boolean, then switch on the fixes implied
/// by `experimentalSlotFixes`.
pub fn validate_extras(raw: Option<&RawExtras>, diagnostics: &mut Vec<Diagnostic>) -> ConfigExtras {
    let raw = raw.cloned().unwrap_or_default();
    let pairs = [
        (raw.append_child_slot_fix, ConfigExtras::APPEND_CHILD_SLOT_FIX),
        (raw.clone_node_fix, ConfigExtras::CLONE_NODE_FIX),
        (raw.enable_import_injection, ConfigExtras::ENABLE_IMPORT_INJECTION),
        (raw.experimental_import_injection, ConfigExtras::EXPERIMENTAL_IMPORT_INJECTION),
        (raw.experimental_scoped_slot_changes, ConfigExtras::EXPERIMENTAL_SCOPED_SLOT_CHANGES),
        (raw.experimental_slot_fixes, ConfigExtras::EXPERIMENTAL_SLOT_FIXES),
        (raw.initialize_next_tick, ConfigExtras::INITIALIZE_NEXT_TICK),
        (raw.lifecycle_dom_events, ConfigExtras::LIFECYCLE_DOM_EVENTS),
        (raw.scoped_slot_text_content_fix, ConfigExtras::SCOPED_SLOT_TEXT_CONTENT_FIX),
        (raw.script_data_opts, ConfigExtras::SCRIPT_DATA_OPTS),
        (raw.slot_child_nodes_fix, ConfigExtras::SLOT_CHILD_NODES_FIX),
        (raw.tag_name_transform, ConfigExtras::TAG_NAME_TRANSFORM),
    ];

    let mut extras = ConfigExtras::empty();
    for (value, flag) in pairs {
        extras.set(flag, value.unwrap_or(false));
    }

    if extras.contains(ConfigExtras::EXPERIMENTAL_SLOT_FIXES) {
        let overridden: Vec<&str> = ConfigExtras::SLOT_FIXES
            .iter()
            .filter(|(flag, _)| {
                pairs
                    .iter()
                    .any(|(value, f)| f == flag && *value == Some(false))
            })
            .map(|(_, name)| *name)
            .collect();
        if !overridden.is_empty() {
            build_warn(&mut *diagnostics).message_text = format!(
                "If the 'experimentalSlotFixes' flag is enabled it will override any slot fix flags which are disabled. In particular, the following currently-disabled flags will be ignored: {}. Please update your Stencil config accordingly.",
                overridden.join(", ")
            );
        }
        for (flag, _) in ConfigExtras::SLOT_FIXES {
            extras.insert(flag);
        }
    }

    extras
}

/// Keep only genuine regular expressions. Patterns the matcher cannot
/// compile are kept too, with a warning.
fn watch_ignored_regex(
    input: Option<WatchIgnoredInput>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<WatchRegex> {
    let patterns = match input {
        None => Vec::new(),
        Some(WatchIgnoredInput::One(pattern)) => vec![pattern],
        Some(WatchIgnoredInput::Many(patterns)) => patterns,
    };
    let kept: Vec<WatchRegex> = patterns
        .into_iter()
        .filter_map(|pattern| match pattern {
            WatchPattern::Regex(re) => Some(re),
            WatchPattern::Other(_) => None,
        })
        .collect();
    for re in kept.iter().filter(|re| re.compiled().is_none()) {
        build_warn(diagnostics).message_text = format!(
            "watchIgnoredRegex pattern /{}/{} uses syntax the file watcher cannot match (such as lookaround or backreferences); it will not ignore any files",
            re.source, re.flags
        );
    }
    kept
}
