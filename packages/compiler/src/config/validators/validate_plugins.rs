use crate::declarations::ValidatedConfig;
use crate::diagnostics::{build_warn, Diagnostic};

/// Bundler plugins the build already provides, with the config property
/// that configures them instead.
const BUILT_IN_PLUGINS: &[(&str, &str, &str)] = &[
    ("commonjs", "@rollup/plugin-commonjs", "commonjs"),
    ("node-resolve", "@rollup/plugin-node-resolve", "nodeResolve"),
];

/// Drop user plugins that duplicate built-in ones, warning for each kind.
pub fn validate_plugins(config: &mut ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
    for (name, package, property) in BUILT_IN_PLUGINS {
        if config.plugins.iter().any(|plugin| plugin.name == *name) {
            build_warn(diagnostics).message_text = format!(
                "Stencil already uses \"{}\", please remove it from your \"stencil.config.ts\" plugins. You can configure the {} settings using the \"{}\" property in \"stencil.config.ts\"",
                package, name, property
            );
        }
    }
    config
        .plugins
        .retain(|plugin| !BUILT_IN_PLUGINS.iter().any(|(name, _, _)| plugin.name == *name));
}
