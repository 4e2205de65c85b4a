#![deny(clippy::all)]

/**
 * Stencil Compiler Config - Rust Implementation
 *
 * Derives validated build configurations and single-file transpile
 * configurations from loosely-typed user input.
 */

// Shared building blocks
pub mod declarations;
pub mod diagnostics;
pub mod logging;
pub mod sys;

// Config derivation pipelines
pub mod config;
pub mod transformers;

// Re-exports
pub use config::{
    get_transpile_config, validate_config, BuildSession, ConfigInput, ConfigValidationResults,
};
pub use declarations::{BootstrapSeed, RawConfig, RawTranspileOptions, ValidatedConfig};
pub use diagnostics::{Diagnostic, DiagnosticLevel};

/// Crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
