//! Dev server and worker validation tests

use serde_json::json;
use std::sync::Arc;
use stencil_compiler::config::BuildSession;
use stencil_compiler::declarations::{DevServerProtocol, RawConfig, ReloadStrategy};
use stencil_compiler::logging::MemoryLogger;
use stencil_compiler::sys::testing::TestingSystem;
use stencil_compiler::{BootstrapSeed, ConfigValidationResults};

fn validate(value: serde_json::Value) -> ConfigValidationResults {
    let bootstrap = BootstrapSeed {
        logger: Some(Arc::new(MemoryLogger::default())),
        sys: Some(Arc::new(TestingSystem::new("/some/path"))),
    };
    BuildSession::new().validate_config(RawConfig::from_value(value).unwrap(), &bootstrap)
}

#[test]
fn should_default_dev_server() {
    let results = validate(json!({}));
    let dev_server = &results.config.dev_server;
    assert_eq!(dev_server.address, "0.0.0.0");
    assert_eq!(dev_server.port, 3333);
    assert_eq!(dev_server.protocol, DevServerProtocol::Http);
    assert_eq!(dev_server.reload_strategy, Some(ReloadStrategy::Hmr));
    assert_eq!(dev_server.root.as_deref(), Some("/some/path/www"));
    assert!(dev_server.gzip);
    assert!(!dev_server.log_requests);
}

#[test]
fn should_use_flags_over_config() {
    let results = validate(json!({
        "devServer": { "port": 4000, "address": "localhost", "openBrowser": true },
        "flags": { "port": 5555, "address": "123.123.123.123", "open": false }
    }));
    let dev_server = &results.config.dev_server;
    assert_eq!(dev_server.port, 5555);
    assert_eq!(dev_server.address, "123.123.123.123");
    assert!(!dev_server.open_browser);
}

#[test]
fn should_set_https_protocol() {
    let results = validate(json!({ "devServer": { "https": true } }));
    assert_eq!(results.config.dev_server.protocol, DevServerProtocol::Https);
}

#[test]
fn should_keep_page_reload_strategy() {
    let results = validate(json!({ "devServer": { "reloadStrategy": "pageReload" } }));
    assert_eq!(results.config.dev_server.reload_strategy, Some(ReloadStrategy::PageReload));
}

#[test]
fn should_report_invalid_reload_strategy() {
    let results = validate(json!({ "devServer": { "reloadStrategy": "full" } }));
    assert!(results.has_error());
    assert_eq!(results.config.dev_server.reload_strategy, Some(ReloadStrategy::Hmr));
}

#[test]
fn should_report_invalid_port() {
    let results = validate(json!({ "devServer": { "port": 0 } }));
    assert!(results.has_error());
    assert_eq!(results.config.dev_server.port, 3333);
}

#[test]
fn should_disable_worker_when_no_workers() {
    let results = validate(json!({ "maxConcurrentWorkers": 0 }));
    assert_eq!(results.config.max_concurrent_workers, 0);
    assert!(!results.config.dev_server.worker);
}

#[test]
fn should_size_workers_from_flags() {
    let results = validate(json!({ "maxConcurrentWorkers": 10, "flags": { "ci": true } }));
    assert_eq!(results.config.max_concurrent_workers, 4);

    let results = validate(json!({ "flags": { "ci": true, "maxWorkers": 30 } }));
    assert_eq!(results.config.max_concurrent_workers, 16);
}

#[test]
fn should_add_ci_browser_args() {
    let results = validate(json!({ "flags": { "ci": true } }));
    let args = results.config.testing.browser_args.clone().unwrap_or_default();
    assert!(args.iter().any(|arg| arg == "--no-sandbox"));
}
