use thiserror::Error;

/// Input that cannot be represented as a configuration at all.
///
/// Validation problems are never reported through this type; they become
/// diagnostics.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an object.
    #[error("configuration must be an object, found {0}")]
    NotAnObject(&'static str),
}
