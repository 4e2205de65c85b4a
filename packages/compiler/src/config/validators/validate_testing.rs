use super::validate_paths::resolve_path;
use crate::config::constants::{DEFAULT_CACHE_DIR, DIST, WWW};
use crate::declarations::ValidatedConfig;
use crate::diagnostics::{build_error, Diagnostic};
use regex::Regex;

pub const DEFAULT_TEST_REGEX: &str = r"(/__tests__/.*|(\.|/)(test|spec|e2e))\.[jt]sx?$";

const DEFAULT_IGNORE_PATTERNS: &[&str] = &[".vscode", DEFAULT_CACHE_DIR, "node_modules"];

const CI_BROWSER_ARGS: &[&str] = &["--no-sandbox", "--disable-setuid-sandbox", "--disable-dev-shm-usage"];

pub fn validate_testing(config: &mut ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
    let root_dir = config.paths.root_dir.clone();
    let ci = config.flags.ci == Some(true);
    let headless_flag = config.flags.headless;

    let output_dirs: Vec<String> = config
        .output_targets
        .iter()
        .filter(|target| target.is_type(WWW) || target.is_type(DIST))
        .filter_map(|target| target.dir.clone())
        .collect();

    let testing = &mut config.testing;

    testing.browser_headless = Some(headless_flag.or(testing.browser_headless).unwrap_or(true));

    let browser_args = testing.browser_args.get_or_insert_with(Vec::new);
    if ci {
        for arg in CI_BROWSER_ARGS {
            if !browser_args.iter().any(|existing| existing.as_str() == *arg) {
                browser_args.push(arg.to_string());
            }
        }
    }

    testing.root_dir = Some(match testing.root_dir.as_deref() {
        Some(dir) => resolve_path(&root_dir, dir),
        None => root_dir.clone(),
    });

    match testing.test_regex.as_deref() {
        Some(test_regex) => {
            if let Err(err) = Regex::new(test_regex) {
                build_error(diagnostics).message_text =
                    format!("testing.testRegex \"{}\" is not a valid regular expression: {}", test_regex, err);
            }
        }
        None => testing.test_regex = Some(DEFAULT_TEST_REGEX.to_string()),
    }

    if testing.test_path_ignore_patterns.is_none() {
        let mut patterns: Vec<String> = DEFAULT_IGNORE_PATTERNS
            .iter()
            .map(|pattern| resolve_path(&root_dir, pattern))
            .collect();
        patterns.extend(output_dirs);
        testing.test_path_ignore_patterns = Some(patterns);
    }
}
