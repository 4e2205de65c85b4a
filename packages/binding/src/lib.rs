#![deny(clippy::all)]

use napi::{Error, Result, Status};
use napi_derive::napi;
use std::sync::{Arc, Mutex, PoisonError};
use stencil_compiler::logging::{LogLevel, MemoryLogger};
use stencil_compiler::{BootstrapSeed, BuildSession, RawConfig, RawTranspileOptions};
use stencil_compiler_cli::perform_transpile::transpile_config_json;
use stencil_compiler_cli::perform_validate::validation_json;

// Functional entry points backed by the process-wide session.
pub use stencil_compiler_cli::napi_bindings::{get_transpile_config_json, validate_config_json};

fn failure(err: impl std::fmt::Display) -> Error {
    Error::new(Status::GenericFailure, err.to_string())
}

/// A build session owned by the JS side, with its own log.
///
/// Configs cross the boundary as JSON, so every `validateConfig` call
/// sees a fresh object and is validated in full; the session's identity
/// cache never short-circuits here. The session still memoizes the
/// default system used by `getTranspileConfig`.
#[napi]
pub struct ConfigCompiler {
    session: Mutex<BuildSession>,
    logger: Arc<MemoryLogger>,
}

#[napi]
impl ConfigCompiler {
    #[napi(constructor)]
    pub fn new(log_level: Option<String>) -> Self {
        let level = log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or(LogLevel::Info);
        ConfigCompiler {
            session: Mutex::new(BuildSession::new()),
            logger: Arc::new(MemoryLogger::new(level)),
        }
    }

    /// Validate a JSON config. Returns `{ config, diagnostics }` as JSON.
    #[napi]
    pub fn validate_config(&self, config_json: String) -> Result<String> {
        let raw = RawConfig::from_json_str(&config_json).map_err(failure)?;
        let bootstrap = BootstrapSeed {
            logger: Some(self.logger.clone()),
            sys: None,
        };
        let results = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .validate_config(raw, &bootstrap);
        let output = validation_json(&results).map_err(failure)?;
        serde_json::to_string(&output).map_err(failure)
    }

    /// Derive the transpile config for JSON transpile options.
    #[napi]
    pub fn get_transpile_config(&self, options_json: String) -> Result<String> {
        let options = RawTranspileOptions::from_json_str(&options_json).map_err(failure)?;
        let config = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_transpile_config(&options);
        let output = transpile_config_json(&config).map_err(failure)?;
        serde_json::to_string(&output).map_err(failure)
    }

    /// Log lines captured so far.
    #[napi]
    pub fn logs(&self) -> Vec<String> {
        self.logger.lines()
    }
}
