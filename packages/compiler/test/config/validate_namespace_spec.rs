//! Namespace validation tests

use stencil_compiler::config::validators::validate_namespace::dash_to_pascal_case;
use stencil_compiler::config::validators::{validate_dist_namespace, validate_namespace};
use stencil_compiler::config::BuildSession;
use stencil_compiler::declarations::{OutputTarget, RawConfig};
use stencil_compiler::diagnostics::Diagnostic;
use stencil_compiler::logging::NullLogger;
use stencil_compiler::sys::testing::TestingSystem;
use stencil_compiler::BootstrapSeed;
use std::sync::Arc;

fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message_text.as_str()).collect()
}

#[test]
fn should_allow_dollar_and_underscore() {
    let mut diagnostics = Vec::new();
    let names = validate_namespace(Some("$my_App"), &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert_eq!(names.namespace, "$my_App");
    assert_eq!(names.fs_namespace, "$my_app");
}

#[test]
fn should_not_allow_special_characters() {
    let mut diagnostics = Vec::new();
    validate_namespace(Some("My/App"), &mut diagnostics);
    assert_eq!(messages(&diagnostics), vec!["Namespace \"My/App\" contains invalid characters: /"]);
}

#[test]
fn should_require_three_characters() {
    let mut diagnostics = Vec::new();
    validate_namespace(Some("ab"), &mut diagnostics);
    assert_eq!(messages(&diagnostics), vec!["Namespace \"ab\" must be at least 3 characters"]);
}

#[test]
fn should_not_start_with_a_number() {
    let mut diagnostics = Vec::new();
    validate_namespace(Some("88MyApp"), &mut diagnostics);
    assert_eq!(
        messages(&diagnostics),
        vec!["Namespace \"88MyApp\" cannot have a number for the first character"]
    );
}

#[test]
fn should_not_start_or_end_with_a_dash() {
    let mut diagnostics = Vec::new();
    validate_namespace(Some("-myapp"), &mut diagnostics);
    assert_eq!(
        messages(&diagnostics),
        vec!["Namespace \"-myapp\" cannot have a dash for the first character"]
    );

    let mut diagnostics = Vec::new();
    validate_namespace(Some("myapp-"), &mut diagnostics);
    assert_eq!(
        messages(&diagnostics),
        vec!["Namespace \"myapp-\" cannot have a dash for the last character"]
    );
}

#[test]
fn should_convert_dashes_to_pascal_case() {
    assert_eq!(dash_to_pascal_case("my-app"), "MyApp");
    assert_eq!(dash_to_pascal_case("MY-APP-two"), "MyAppTwo");
    let mut diagnostics = Vec::new();
    let names = validate_namespace(Some("my-app"), &mut diagnostics);
    assert_eq!(names.namespace, "MyApp");
    assert_eq!(names.fs_namespace, "my-app");
}

#[test]
fn should_require_unique_namespace_for_dist_builds() {
    let bootstrap = BootstrapSeed {
        logger: Some(Arc::new(NullLogger::new())),
        sys: Some(Arc::new(TestingSystem::new("/app"))),
    };
    let raw = RawConfig {
        output_targets: Some(vec![OutputTarget::new("dist")]),
        ..Default::default()
    };
    let results = BuildSession::new().validate_config(raw, &bootstrap);
    assert_eq!(results.diagnostics.len(), 1);
    assert!(results.diagnostics[0].message_text.contains("unique namespace"));

    let mut diagnostics = Vec::new();
    let mut config = (*results.config).clone();
    config.namespace = "Ionic".to_string();
    validate_dist_namespace(&config, &mut diagnostics);
    assert!(diagnostics.is_empty());
}
