//! Declarations
//!
//! Data model shared by the config pipelines: raw user input, the validated
//! configuration, and the transpile option/result envelopes.

pub mod config;
pub mod lenient;
pub mod transpile;
pub mod validated;

pub use config::*;
pub use transpile::*;
pub use validated::*;
