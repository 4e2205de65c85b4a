//! Config derivation
//!
//! Two sibling pipelines, both normalize -> default -> validate -> cache:
//! full build config validation and single-file transpile config.

pub mod build_session;
pub mod config_utils;
pub mod constants;
pub mod error;
pub mod transpile_options;
pub mod validate_config;
pub mod validators;

pub use build_session::*;
pub use config_utils::*;
pub use error::ConfigError;
pub use transpile_options::*;
pub use validate_config::*;
pub use validators::{ConfigValidators, DefaultValidators};
