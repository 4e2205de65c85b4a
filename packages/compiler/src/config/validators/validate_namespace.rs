use crate::config::constants::{DEFAULT_NAMESPACE, DIST};
use crate::declarations::ValidatedConfig;
use crate::diagnostics::{build_error, Diagnostic};
use once_cell::sync::Lazy;
use regex::Regex;

static NAMESPACE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w\-$]").unwrap());

/// Runtime namespace and its file-system form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceNames {
    pub namespace: String,
    pub fs_namespace: String,
}

pub fn validate_namespace(namespace: Option<&str>, diagnostics: &mut Vec<Diagnostic>) -> NamespaceNames {
    let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE).trim().to_string();

    let invalid_chars = NAMESPACE_CHARS.replace_all(&namespace, "");
    if !invalid_chars.is_empty() {
        build_error(diagnostics).message_text = format!(
            "Namespace \"{}\" contains invalid characters: {}",
            namespace, invalid_chars
        );
    }
    if namespace.chars().count() < 3 {
        build_error(diagnostics).message_text =
            format!("Namespace \"{}\" must be at least 3 characters", namespace);
    }
    if namespace.starts_with(|c: char| c.is_ascii_digit()) {
        build_error(diagnostics).message_text = format!(
            "Namespace \"{}\" cannot have a number for the first character",
            namespace
        );
    }
    if namespace.starts_with('-') {
        build_error(diagnostics).message_text = format!(
            "Namespace \"{}\" cannot have a dash for the first character",
            namespace
        );
    }
    if namespace.ends_with('-') {
        build_error(diagnostics).message_text = format!(
            "Namespace \"{}\" cannot have a dash for the last character",
            namespace
        );
    }

    let fs_namespace = namespace.to_lowercase();
    let namespace = if namespace.contains('-') {
        dash_to_pascal_case(&namespace)
    } else {
        namespace
    };

    NamespaceNames {
        namespace,
        fs_namespace,
    }
}

/// Distributed packages should not ship under the default namespace.
pub fn validate_dist_namespace(config: &ValidatedConfig, diagnostics: &mut Vec<Diagnostic>) {
    let has_dist = config.output_targets.iter().any(|target| target.is_type(DIST));
    if has_dist && config.namespace.eq_ignore_ascii_case(DEFAULT_NAMESPACE) {
        build_error(diagnostics).message_text = format!(
            "When generating a distribution it is recommended to choose a unique namespace rather than the default setting \"{}\". Please update the \"namespace\" config property within the stencil config.",
            DEFAULT_NAMESPACE
        );
    }
}

/// `my-app` -> `MyApp`
pub fn dash_to_pascal_case(value: &str) -> String {
    value
        .to_lowercase()
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
