#![cfg(feature = "napi-bindings")]

//! Node.js entry points. Both take and return JSON text.

use crate::perform_transpile::transpile_config_json;
use crate::perform_validate::validation_json;
use ::napi::{Error, Result, Status};
use napi_derive::napi;
use std::sync::Arc;
use stencil_compiler::logging::NullLogger;
use stencil_compiler::{BootstrapSeed, RawConfig, RawTranspileOptions};

fn failure(err: impl std::fmt::Display) -> Error {
    Error::new(Status::GenericFailure, err.to_string())
}

/// Validate a config given as JSON; returns `{ config, diagnostics }`.
#[napi]
pub fn validate_config_json(config_json: String) -> Result<String> {
    let raw = RawConfig::from_json_str(&config_json).map_err(failure)?;
    let bootstrap = BootstrapSeed {
        logger: Some(Arc::new(NullLogger::new())),
        sys: None,
    };
    let results = stencil_compiler::validate_config(raw, &bootstrap);
    let output = validation_json(&results).map_err(failure)?;
    serde_json::to_string(&output).map_err(failure)
}

/// Derive a transpile config from transpile options given as JSON.
#[napi]
pub fn get_transpile_config_json(options_json: String) -> Result<String> {
    let options = RawTranspileOptions::from_json_str(&options_json).map_err(failure)?;
    let config = stencil_compiler::get_transpile_config(&options);
    let output = transpile_config_json(&config).map_err(failure)?;
    serde_json::to_string(&output).map_err(failure)
}
