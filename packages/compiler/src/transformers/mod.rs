//! Transformer helpers shared by the config pipelines.

pub mod stencil_import_path;

pub use stencil_import_path::*;
