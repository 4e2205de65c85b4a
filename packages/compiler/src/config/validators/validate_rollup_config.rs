use crate::declarations::lenient::as_integer;
use crate::declarations::{RawConfig, RollupConfig, RollupInputOptions, RollupOutputOptions};
use serde_json::{Map, Value};

/// Keep only the bundler options the build passes through.
pub fn validate_rollup_config(config: &RawConfig) -> RollupConfig {
    let rollup_config = match config.rollup_config.as_ref().and_then(Value::as_object) {
        Some(rollup_config) => rollup_config,
        None => return RollupConfig::default(),
    };

    let input_options = rollup_config
        .get("inputOptions")
        .and_then(Value::as_object)
        .map(pluck_input_options)
        .unwrap_or_default();
    let output_options = rollup_config
        .get("outputOptions")
        .and_then(Value::as_object)
        .map(|options| RollupOutputOptions {
            globals: options.get("globals").cloned(),
        })
        .unwrap_or_default();

    RollupConfig {
        input_options,
        output_options,
    }
}

fn pluck_input_options(options: &Map<String, Value>) -> RollupInputOptions {
    RollupInputOptions {
        context: options.get("context").and_then(Value::as_str).map(String::from),
        module_context: options.get("moduleContext").cloned(),
        treeshake: options.get("treeshake").cloned(),
        external: options.get("external").cloned(),
        max_parallel_file_ops: options.get("maxParallelFileOps").and_then(as_integer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_default_non_objects() {
        let config = RawConfig {
            rollup_config: Some(json!("nope")),
            ..Default::default()
        };
        assert_eq!(validate_rollup_config(&config), RollupConfig::default());
    }

    #[test]
    fn should_pluck_known_options() {
        let config = RawConfig {
            rollup_config: Some(json!({
                "inputOptions": { "context": "window", "maxParallelFileOps": 5, "plugins": [] },
                "outputOptions": { "globals": { "lodash": "_" }, "format": "iife" }
            })),
            ..Default::default()
        };
        let rollup = validate_rollup_config(&config);
        assert_eq!(rollup.input_options.context.as_deref(), Some("window"));
        assert_eq!(rollup.input_options.max_parallel_file_ops, Some(5));
        assert_eq!(rollup.input_options.external, None);
        assert_eq!(rollup.output_options.globals, Some(json!({ "lodash": "_" })));
    }
}
