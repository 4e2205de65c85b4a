// Main Entry Point
//
// Command line surface of `stencil-config`.

use crate::perform_transpile::{perform_transpile_config, TranspileArgs};
use crate::perform_validate::{
    exit_code_from_result, format_diagnostics, merge_flags, perform_validation,
    read_configuration, summarize, validation_json,
};
use anyhow::{anyhow, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::Arc;
use stencil_compiler::declarations::ConfigFlags;
use stencil_compiler::logging::{ConsoleLogger, LogLevel, Logger};

/// Boolean flags forwarded to the config's `flags`.
const BOOLEAN_FLAGS: &[(&str, &str)] = &[
    ("prod", "Build for production"),
    ("dev", "Build for development"),
    ("watch", "Rebuild on file changes"),
    ("docs", "Generate docs"),
    ("esm", "Build the dist output"),
    ("profile", "Profile the build"),
    ("log", "Write a build log"),
    ("ci", "Running in a CI environment"),
    ("headless", "Run test browsers headless"),
    ("open", "Open the dev server in a browser"),
    ("serve", "Start the dev server"),
];

pub fn build_command() -> Command {
    let mut validate = Command::new("validate")
        .about("Validate a config file and print the resolved config")
        .arg(
            Arg::new("config")
                .value_name("CONFIG")
                .help("Config file, or a directory holding stencil.config.json")
                .default_value("."),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the validated config and diagnostics as JSON"),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .action(ArgAction::SetTrue)
                .conflicts_with("no-cache")
                .help("Enable the build cache"),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .action(ArgAction::SetTrue)
                .help("Disable the build cache"),
        )
        .arg(
            Arg::new("max-workers")
                .long("max-workers")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .help("Maximum number of workers"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .value_parser(value_parser!(i64))
                .help("Dev server port"),
        )
        .arg(
            Arg::new("address")
                .long("address")
                .value_name("ADDRESS")
                .help("Dev server address"),
        );
    for (name, help) in BOOLEAN_FLAGS {
        validate = validate.arg(Arg::new(*name).long(*name).action(ArgAction::SetTrue).help(*help));
    }

    let transpile = Command::new("transpile-config")
        .about("Print the config used to transpile a single file")
        .arg(string_arg("file", "File name of the module"))
        .arg(string_arg("target", "ECMAScript target"))
        .arg(string_arg("module", "Module format (cjs or esm)"))
        .arg(string_arg("source-map", "true, false or inline"))
        .arg(string_arg("component-export", "customelement or module"))
        .arg(string_arg("component-metadata", "compilerstatic or null"))
        .arg(string_arg("proxy", "defineproperty or null"))
        .arg(string_arg("style", "Style source"))
        .arg(string_arg("core-import-path", "Import path of the runtime"))
        .arg(string_arg("current-directory", "Directory relative paths resolve against"))
        .arg(string_arg("base-url", "TypeScript baseUrl"));

    Command::new("stencil-config")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stencil config derivation (Rust implementation)")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .default_value("info")
                .help("debug, info, warn or error"),
        )
        .subcommand(validate)
        .subcommand(transpile)
}

fn string_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("VALUE").help(help)
}

/// CLI flags from `validate` arguments. Only flags actually given are set.
pub fn flags_from_matches(matches: &ArgMatches) -> ConfigFlags {
    let given = |name: &str| matches.get_flag(name).then_some(true);
    let mut flags = ConfigFlags {
        prod: given("prod"),
        dev: given("dev"),
        watch: given("watch"),
        docs: given("docs"),
        esm: given("esm"),
        profile: given("profile"),
        log: given("log"),
        ci: given("ci"),
        headless: given("headless"),
        open: given("open"),
        serve: given("serve"),
        ..ConfigFlags::default()
    };

    if matches.get_flag("cache") {
        flags.cache = Some(true);
    } else if matches.get_flag("no-cache") {
        flags.cache = Some(false);
    }
    flags.max_workers = matches.get_one::<i64>("max-workers").copied();
    flags.port = matches.get_one::<i64>("port").copied();
    flags.address = matches.get_one::<String>("address").cloned();
    flags
}

fn transpile_args(matches: &ArgMatches) -> TranspileArgs {
    let get = |name: &str| matches.get_one::<String>(name).cloned();
    TranspileArgs {
        file: get("file"),
        target: get("target"),
        module: get("module"),
        source_map: get("source-map"),
        component_export: get("component-export"),
        component_metadata: get("component-metadata"),
        proxy: get("proxy"),
        style: get("style"),
        core_import_path: get("core-import-path"),
        current_directory: get("current-directory"),
        base_url: get("base-url"),
    }
}

/// Run the CLI with `args` (including the program name) and return the
/// process exit code.
pub fn main_entry<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;

    let level_name = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("info");
    let level = LogLevel::parse(level_name).ok_or_else(|| anyhow!("unknown log level: {}", level_name))?;
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new(level));

    match matches.subcommand() {
        Some(("validate", sub)) => {
            let project = sub
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let mut parsed = read_configuration(&project)?;
            merge_flags(&mut parsed.config, &flags_from_matches(sub))?;
            logger.debug(&format!("loaded {}", parsed.config_path.display()));

            let results = perform_validation(parsed.config, logger.clone());
            if sub.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&validation_json(&results)?)?);
            } else {
                eprint!("{}", format_diagnostics(&results.diagnostics));
                logger.info(&format!(
                    "{}: {}",
                    parsed.config_path.display(),
                    summarize(&results.diagnostics)
                ));
            }
            Ok(exit_code_from_result(&results.diagnostics))
        }
        Some(("transpile-config", sub)) => {
            let json = perform_transpile_config(transpile_args(sub))?;
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(0)
        }
        _ => Err(anyhow!("missing subcommand")),
    }
}
