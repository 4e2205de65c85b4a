// Perform Validate
//
// Reads a JSON config file, merges command line flags into it and runs
// full config validation.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stencil_compiler::declarations::{ConfigFlags, RawConfig, ValidatedConfig};
use stencil_compiler::diagnostics::{has_error, Diagnostic, DiagnosticLevel};
use stencil_compiler::logging::Logger;
use stencil_compiler::sys::normalize_path;
use stencil_compiler::{BootstrapSeed, ConfigValidationResults};

/// Config file looked up when the project path is a directory.
pub const DEFAULT_CONFIG_FILE: &str = "stencil.config.json";

/// A config file after loading.
#[derive(Debug, Clone)]
pub struct ParsedConfiguration {
    pub config_path: PathBuf,
    pub config: RawConfig,
}

/// Load the config at `project` (a file, or a directory holding
/// `stencil.config.json`). `rootDir` defaults to the file's directory.
pub fn read_configuration(project: &Path) -> Result<ParsedConfiguration> {
    let config_path = if project.is_dir() {
        project.join(DEFAULT_CONFIG_FILE)
    } else {
        project.to_path_buf()
    };

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config file {}", config_path.display()))?;
    let content = strip_json_comments(&content);
    let mut config = RawConfig::from_json_str(&content)
        .with_context(|| format!("invalid config file {}", config_path.display()))?;

    if config.root_dir.is_none() {
        let root_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => normalize_path(parent),
            _ => ".".to_string(),
        };
        config.root_dir = Some(root_dir);
    }
    config.config_path = Some(normalize_path(&config_path));

    Ok(ParsedConfiguration {
        config_path,
        config,
    })
}

/// Remove `//` and `/* */` comments outside of string literals.
pub fn strip_json_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        result.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        // keep line numbers stable for parse errors
                        result.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }
    result
}

/// Overlay command line flags on the config's own `flags`. Flags given on
/// the command line win.
pub fn merge_flags(config: &mut RawConfig, cli_flags: &ConfigFlags) -> Result<()> {
    let mut merged = match serde_json::to_value(config.flags.take().unwrap_or_default())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(cli) = serde_json::to_value(cli_flags)? {
        merged.extend(cli);
    }
    config.flags = Some(serde_json::from_value(Value::Object(merged))?);
    Ok(())
}

/// Validate a loaded config against the process-wide build session.
pub fn perform_validation(config: RawConfig, logger: Arc<dyn Logger>) -> ConfigValidationResults {
    let bootstrap = BootstrapSeed {
        logger: Some(logger),
        sys: None,
    };
    stencil_compiler::validate_config(config, &bootstrap)
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    config: &'a ValidatedConfig,
    diagnostics: &'a [Diagnostic],
}

/// `{ config, diagnostics }` as JSON.
pub fn validation_json(results: &ConfigValidationResults) -> Result<Value> {
    let output = ValidationOutput {
        config: &results.config,
        diagnostics: &results.diagnostics,
    };
    Ok(serde_json::to_value(output)?)
}

/// Format diagnostics for display.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diag in diagnostics {
        output.push_str(&diag.to_string());
        output.push('\n');
    }
    output
}

/// Get exit code from validation diagnostics.
pub fn exit_code_from_result(diagnostics: &[Diagnostic]) -> i32 {
    if has_error(diagnostics) {
        1
    } else {
        0
    }
}

/// One-line summary, e.g. `2 error(s), 1 warning(s)`.
pub fn summarize(diagnostics: &[Diagnostic]) -> String {
    let count = |level: DiagnosticLevel| diagnostics.iter().filter(|d| d.level == level).count();
    format!(
        "{} error(s), {} warning(s)",
        count(DiagnosticLevel::Error),
        count(DiagnosticLevel::Warn)
    )
}
