//! Full config validation tests

use serde_json::json;
use std::sync::Arc;
use stencil_compiler::config::BuildSession;
use stencil_compiler::declarations::{Bundle, ConfigExtras, RawConfig};
use stencil_compiler::diagnostics::DiagnosticLevel;
use stencil_compiler::logging::MemoryLogger;
use stencil_compiler::sys::testing::TestingSystem;
use stencil_compiler::{BootstrapSeed, ConfigValidationResults};

fn bootstrap() -> BootstrapSeed {
    BootstrapSeed {
        logger: Some(Arc::new(MemoryLogger::default())),
        sys: Some(Arc::new(TestingSystem::new("/User/some/path"))),
    }
}

fn validate_json(value: serde_json::Value) -> ConfigValidationResults {
    let raw = RawConfig::from_value(value).unwrap();
    BuildSession::new().validate_config(raw, &bootstrap())
}

fn errors(results: &ConfigValidationResults) -> Vec<&str> {
    results
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .map(|d| d.message_text.as_str())
        .collect()
}

#[test]
fn should_return_cached_config_for_same_object() {
    let mut session = BuildSession::new();
    let first = session.validate_config(RawConfig::default(), &bootstrap());
    let second = session.validate_config(first.config.clone(), &bootstrap());

    assert!(Arc::ptr_eq(&first.config, &second.config));
    assert!(second.diagnostics.is_empty());
    assert_eq!(second.config.namespace, "App");
}

#[test]
fn should_revalidate_a_different_validated_object() {
    let mut session = BuildSession::new();
    let first = session.validate_config(RawConfig::default(), &bootstrap());
    let _other = session.validate_config(RawConfig::default(), &bootstrap());
    let again = session.validate_config(first.config.clone(), &bootstrap());

    assert!(!Arc::ptr_eq(&first.config, &again.config));
    assert_eq!(again.config.hashed_file_name_length, first.config.hashed_file_name_length);
    assert_eq!(again.config.paths, first.config.paths);
}

#[test]
fn should_let_prod_flag_override_dev_mode() {
    let results = validate_json(json!({ "flags": { "prod": true }, "devMode": true }));
    assert!(!results.config.dev_mode);
}

#[test]
fn should_let_dev_flag_override_dev_mode() {
    let results = validate_json(json!({ "flags": { "dev": true }, "devMode": false }));
    assert!(results.config.dev_mode);
}

#[test]
fn should_default_to_prod_mode() {
    let results = validate_json(json!({}));
    assert!(!results.config.dev_mode);
}

#[test]
fn should_accept_hash_length_boundaries() {
    for length in [4, 32] {
        let results = validate_json(json!({ "hashedFileNameLength": length }));
        assert!(errors(&results).is_empty(), "length {} should be accepted", length);
        assert_eq!(results.config.hashed_file_name_length, length);
    }
}

#[test]
fn should_report_hash_length_below_minimum() {
    let results = validate_json(json!({ "hashedFileNameLength": 3 }));
    assert_eq!(errors(&results), vec!["hashedFileNameLength must be at least 4 characters"]);
}

#[test]
fn should_report_hash_length_above_maximum() {
    let results = validate_json(json!({ "hashedFileNameLength": 33 }));
    assert_eq!(errors(&results), vec!["hashedFileNameLength cannot be more than 32 characters"]);
}

// Out-of-range lengths are reported but kept as given, while a
// non-numeric length is silently replaced by the default.
#[test]
fn should_keep_out_of_range_hash_length_unclamped() {
    let results = validate_json(json!({ "hashedFileNameLength": 33 }));
    assert_eq!(results.config.hashed_file_name_length, 33);

    let results = validate_json(json!({ "hashedFileNameLength": "12" }));
    assert_eq!(results.config.hashed_file_name_length, 8);
    assert!(errors(&results).is_empty());
}

#[test]
fn should_cascade_experimental_slot_fixes() {
    let results = validate_json(json!({ "extras": { "experimentalSlotFixes": true } }));
    let expected = ConfigExtras::EXPERIMENTAL_SLOT_FIXES
        | ConfigExtras::APPEND_CHILD_SLOT_FIX
        | ConfigExtras::CLONE_NODE_FIX
        | ConfigExtras::SLOT_CHILD_NODES_FIX
        | ConfigExtras::SCOPED_SLOT_TEXT_CONTENT_FIX;
    assert_eq!(results.config.extras, expected);
}

#[test]
fn should_coerce_extras_by_truthiness() {
    let results = validate_json(json!({ "extras": { "lifecycleDOMEvents": 1, "scriptDataOpts": "" } }));
    assert!(results.config.extras.contains(ConfigExtras::LIFECYCLE_DOM_EVENTS));
    assert!(!results.config.extras.contains(ConfigExtras::SCRIPT_DATA_OPTS));
}

#[test]
fn should_sort_bundles_by_component_count() {
    let results = validate_json(json!({
        "bundles": [
            { "components": ["a-1", "a-2", "a-3"] },
            { "components": ["b-1"] },
            { "components": ["c-1", "c-2"] },
            { "components": ["d-1"] }
        ]
    }));
    assert_eq!(
        results.config.bundles,
        vec![
            Bundle::new(["b-1"]),
            Bundle::new(["d-1"]),
            Bundle::new(["c-1", "c-2"]),
            Bundle::new(["a-1", "a-2", "a-3"]),
        ]
    );
}

#[test]
fn should_wrap_single_watch_regex() {
    let results = validate_json(json!({ "watchIgnoredRegex": { "source": "\\.tmp$" } }));
    let patterns: Vec<&str> = results.config.watch_ignored_regex.iter().map(|re| re.as_str()).collect();
    assert_eq!(patterns, vec!["\\.tmp$"]);
}

#[test]
fn should_drop_non_regex_watch_entries() {
    let results = validate_json(json!({
        "watchIgnoredRegex": [{ "source": "a" }, "b", 3, { "source": "c", "flags": "i" }]
    }));
    let patterns: Vec<&str> = results.config.watch_ignored_regex.iter().map(|re| re.as_str()).collect();
    assert_eq!(patterns, vec!["a", "c"]);
}

#[test]
fn should_discard_single_non_regex_watch_value() {
    let results = validate_json(json!({ "watchIgnoredRegex": "node_modules" }));
    assert!(results.config.watch_ignored_regex.is_empty());
}

#[test]
fn should_keep_lookaround_and_backreference_patterns() {
    let results = validate_json(json!({
        "watchIgnoredRegex": [
            { "source": "^(?!keep).*\\.tmp$" },
            { "source": "(a)\\1" },
            { "source": "x", "flags": "gu" }
        ]
    }));
    let patterns: Vec<&str> = results.config.watch_ignored_regex.iter().map(|re| re.as_str()).collect();
    assert_eq!(patterns, vec!["^(?!keep).*\\.tmp$", "(a)\\1", "x"]);

    let warnings: Vec<&str> = results
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warn)
        .map(|d| d.message_text.as_str())
        .collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("/^(?!keep).*\\.tmp$/"));
    assert!(warnings[1].contains("/(a)\\1/"));
}

#[test]
fn should_serialize_watch_regex_with_flags() {
    let results = validate_json(json!({
        "watchIgnoredRegex": { "source": "\\.TMP$", "flags": "i" }
    }));
    assert!(results.config.watch_ignored_regex[0].is_match("/src/file.tmp"));
    let value = serde_json::to_value(&*results.config).unwrap();
    assert_eq!(
        value["watchIgnoredRegex"],
        json!([{ "source": "\\.TMP$", "flags": "i" }])
    );
}

#[test]
fn should_keep_fs_namespace_when_revalidating() {
    let mut session = BuildSession::new();
    let first = session.validate_config(
        RawConfig::from_value(json!({ "namespace": "my-lib" })).unwrap(),
        &bootstrap(),
    );
    let _other = session.validate_config(RawConfig::default(), &bootstrap());
    let again = session.validate_config(first.config.clone(), &bootstrap());

    assert_eq!(first.config.fs_namespace, "my-lib");
    assert_eq!(again.config.namespace, "MyLib");
    assert_eq!(again.config.fs_namespace, "my-lib");
}

#[test]
fn should_default_task_queue_and_env() {
    let results = validate_json(json!({ "taskQueue": "sometimes" }));
    assert_eq!(results.config.task_queue.as_str(), "async");
    assert!(results.config.env.is_empty());

    let results = validate_json(json!({ "taskQueue": "congestion", "env": { "API": "x" } }));
    assert_eq!(results.config.task_queue.as_str(), "congestion");
    assert_eq!(results.config.env.get("API").map(String::as_str), Some("x"));
}

#[test]
fn should_prefer_explicit_boolean_over_flag() {
    let results = validate_json(json!({ "watch": false, "flags": { "watch": true } }));
    assert!(!results.config.watch);

    let results = validate_json(json!({ "flags": { "watch": true, "docs": false } }));
    assert!(results.config.watch);
    assert!(!results.config.build_docs);
}

#[test]
fn should_resolve_paths_from_system() {
    let results = validate_json(json!({}));
    assert_eq!(results.config.paths.root_dir, "/User/some/path");
    assert_eq!(results.config.paths.src_dir, "/User/some/path/src");
    assert_eq!(results.config.sys.name(), "testing");
}

#[test]
fn should_default_delegated_sub_objects() {
    let results = validate_json(json!({ "hydratedFlag": null }));
    let config = &results.config;
    assert!(config.hydrated_flag.is_none());
    assert_eq!(config.output_targets.len(), 1);
    assert!(config.output_targets[0].is_type("www"));
    assert!(config.transform_aliased_import_paths);
    assert!(!config.validate_primary_package_output_target);
    assert_eq!(config.dev_server.port, 3333);
    assert_eq!(config.testing.browser_headless, Some(true));
    assert_eq!(config.max_concurrent_workers, 8);
    assert!(config.dev_server.worker);
}

#[test]
fn should_aggregate_delegated_diagnostics() {
    let results = validate_json(json!({
        "namespace": "1x",
        "outputTargets": [{ "type": "nope" }],
        "plugins": [{ "name": "commonjs" }]
    }));
    assert_eq!(errors(&results).len(), 3);
    assert!(results.has_error());
    assert!(results
        .diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Warn));
    assert!(results.config.plugins.is_empty());
}

#[test]
fn should_serialize_validated_config() {
    let results = validate_json(json!({ "namespace": "my-lib" }));
    let value = serde_json::to_value(&*results.config).unwrap();
    assert_eq!(value["namespace"], json!("MyLib"));
    assert_eq!(value["fsNamespace"], json!("my-lib"));
    assert_eq!(value["rootDir"], json!("/User/some/path"));
    assert_eq!(value["_isTesting"], json!(false));
}

#[test]
fn should_use_process_wide_session() {
    let first = stencil_compiler::validate_config(RawConfig::default(), &bootstrap());
    let second = stencil_compiler::validate_config(first.config.clone(), &bootstrap());
    assert!(Arc::ptr_eq(&first.config, &second.config));
}
