#![deny(clippy::all)]

/**
 * Stencil Compiler CLI - Rust Implementation
 *
 * Loads config files, applies command line flags and runs the config
 * derivation pipelines.
 */
// Re-export compiler for convenience
pub use stencil_compiler as compiler;

// CLI-specific modules
pub mod main_entry;
pub mod perform_transpile;
pub mod perform_validate;

#[cfg(feature = "napi-bindings")]
pub mod napi_bindings;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
