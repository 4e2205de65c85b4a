use super::validate_paths::resolve_path;
use crate::config::constants::{DIST, VALID_OUTPUT_TARGET_TYPES, WWW};
use crate::declarations::{OutputTarget, ValidatedConfig};
use crate::diagnostics::{build_error, Diagnostic};

/// Check target types and fill in default output directories.
///
/// A config without targets builds a single `www` target.
pub fn validate_output_targets(config: &mut ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
    if config.output_targets.is_empty() {
        config.output_targets.push(OutputTarget::new(WWW));
    }

    let root_dir = config.paths.root_dir.clone();
    for target in config.output_targets.iter_mut() {
        let output_type = target.output_type.as_deref().unwrap_or_default();
        if !VALID_OUTPUT_TARGET_TYPES.contains(&output_type) {
            build_error(diagnostics).message_text = format!(
                "Invalid outputTarget type \"{}\". Valid outputTarget types include: {}",
                output_type,
                VALID_OUTPUT_TARGET_TYPES
                    .iter()
                    .map(|t| format!("\"{}\"", t))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            continue;
        }

        let default_dir = match output_type {
            WWW => Some(WWW),
            DIST => Some(DIST),
            _ => None,
        };
        target.dir = match (target.dir.as_deref(), default_dir) {
            (Some(dir), _) => Some(resolve_path(&root_dir, dir)),
            (None, Some(dir)) => Some(resolve_path(&root_dir, dir)),
            (None, None) => None,
        };
    }
}

/// Output directory of the first target of `output_type`.
pub fn output_dir<'a>(config: &'a ValidatedConfig, output_type: &str) -> Option<&'a str> {
    config
        .output_targets
        .iter()
        .find(|target| target.is_type(output_type))
        .and_then(|target| target.dir.as_deref())
}
