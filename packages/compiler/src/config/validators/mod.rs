//! Field validators the config pipeline delegates to.
//!
//! `ConfigValidators` is the seam between the pipeline and its
//! collaborators. Every method has a working default so hosts only
//! override what they need.

pub mod validate_dev_server;
pub mod validate_hydrated;
pub mod validate_namespace;
pub mod validate_output_targets;
pub mod validate_paths;
pub mod validate_plugins;
pub mod validate_rollup_config;
pub mod validate_testing;
pub mod validate_workers;

pub use validate_dev_server::validate_dev_server;
pub use validate_hydrated::validate_hydrated;
pub use validate_namespace::{validate_dist_namespace, validate_namespace, NamespaceNames};
pub use validate_output_targets::validate_output_targets;
pub use validate_paths::{resolve_path, validate_paths};
pub use validate_plugins::validate_plugins;
pub use validate_rollup_config::validate_rollup_config;
pub use validate_testing::validate_testing;
pub use validate_workers::validate_workers;

use crate::declarations::{
    ConfigPaths, DevServerConfig, DevServerInput, HydratedFlag, RawConfig, RollupConfig,
    ValidatedConfig,
};
use crate::diagnostics::Diagnostic;
use crate::logging::Logger;
use crate::sys::{self, CompilerSystem};
use std::fmt::Debug;
use std::sync::Arc;

pub trait ConfigValidators: Send + Sync + Debug {
    fn create_system(&self, logger: Option<&Arc<dyn Logger>>) -> Arc<dyn CompilerSystem> {
        sys::create_system(logger)
    }

    fn validate_hydrated(&self, config: &RawConfig) -> Option<HydratedFlag> {
        validate_hydrated(config)
    }

    fn validate_rollup_config(&self, config: &RawConfig) -> RollupConfig {
        validate_rollup_config(config)
    }

    fn validate_paths(&self, config: &RawConfig, sys: &dyn CompilerSystem) -> ConfigPaths {
        validate_paths(config, sys)
    }

    fn validate_namespace(
        &self,
        namespace: Option<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> NamespaceNames {
        validate_namespace(namespace, diagnostics)
    }

    fn validate_dist_namespace(&self, config: &ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
        validate_dist_namespace(config, diagnostics)
    }

    fn validate_output_targets(&self, config: &mut ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
        validate_output_targets(config, diagnostics)
    }

    fn validate_plugins(&self, config: &mut ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
        validate_plugins(config, diagnostics)
    }

    fn validate_dev_server(
        &self,
        config: &ValidatedConfig,
        input: &DevServerInput,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> DevServerConfig {
        validate_dev_server(config, input, diagnostics)
    }

    fn validate_testing(&self, config: &mut ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
        validate_testing(config, diagnostics)
    }

    fn validate_workers(&self, config: &mut ValidatedConfig, requested: Option<i64>) {
        validate_workers(config, requested)
    }
}

/// The built-in validator set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidators;

impl ConfigValidators for DefaultValidators {}
