//! Build session state.
//!
//! A `BuildSession` owns the single-slot identity cache of the last
//! validated config and the memoized default system used by transpile
//! config derivation.

use super::transpile_options::build_transpile_config;
use super::validate_config::{validate_raw_config, ConfigInput, ConfigValidationResults};
use super::validators::{ConfigValidators, DefaultValidators};
use crate::declarations::{BootstrapSeed, RawTranspileOptions, TranspileConfig, ValidatedConfig};
use crate::sys::CompilerSystem;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct BuildSession {
    validators: Arc<dyn ConfigValidators>,
    cached_config: Option<Arc<ValidatedConfig>>,
    default_sys: Option<Arc<dyn CompilerSystem>>,
}

impl BuildSession {
    pub fn new() -> Self {
        Self::with_validators(Arc::new(DefaultValidators))
    }

    pub fn with_validators(validators: Arc<dyn ConfigValidators>) -> Self {
        BuildSession {
            validators,
            cached_config: None,
            default_sys: None,
        }
    }

    /// Validate a config, short-circuiting when `input` is the config this
    /// session validated last.
    pub fn validate_config(
        &mut self,
        input: impl Into<ConfigInput>,
        bootstrap: &BootstrapSeed,
    ) -> ConfigValidationResults {
        let raw = match input.into() {
            ConfigInput::Validated(config) => {
                if let Some(cached) = &self.cached_config {
                    if Arc::ptr_eq(cached, &config) {
                        config.logger.debug("config already validated, reusing it");
                        return ConfigValidationResults {
                            config,
                            diagnostics: Vec::new(),
                        };
                    }
                }
                config.to_raw()
            }
            ConfigInput::Raw(raw) => raw,
        };

        let results = validate_raw_config(raw, bootstrap, self.validators.as_ref());
        self.cached_config = Some(results.config.clone());
        results
    }

    /// Derive the single-file transpile config. A system on `input` wins;
    /// otherwise the session's default system is built once and reused.
    pub fn get_transpile_config(&mut self, input: &RawTranspileOptions) -> TranspileConfig {
        let sys = match &input.sys {
            Some(sys) => sys.clone(),
            None => self.default_system(),
        };
        build_transpile_config(input, sys)
    }

    pub fn cached_config(&self) -> Option<&Arc<ValidatedConfig>> {
        self.cached_config.as_ref()
    }

    /// End the session: forget the cached config.
    pub fn reset(&mut self) {
        self.cached_config = None;
    }

    fn default_system(&mut self) -> Arc<dyn CompilerSystem> {
        let validators = &self.validators;
        self.default_sys
            .get_or_insert_with(|| validators.create_system(None))
            .clone()
    }
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new()
    }
}

static SESSION: Lazy<Mutex<BuildSession>> = Lazy::new(|| Mutex::new(BuildSession::new()));

fn session() -> MutexGuard<'static, BuildSession> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Validate against the process-wide session.
pub fn validate_config(
    input: impl Into<ConfigInput>,
    bootstrap: &BootstrapSeed,
) -> ConfigValidationResults {
    session().validate_config(input, bootstrap)
}

/// Derive a transpile config against the process-wide session.
pub fn get_transpile_config(input: &RawTranspileOptions) -> TranspileConfig {
    session().get_transpile_config(input)
}

/// Forget the process-wide session's cached config.
pub fn reset_session() {
    session().reset();
}
