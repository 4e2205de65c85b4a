use super::validate_output_targets::output_dir;
use super::validate_paths::resolve_path;
use crate::config::constants::WWW;
use crate::declarations::{
    DevServerConfig, DevServerInput, DevServerProtocol, HistoryApiFallback, ReloadStrategy,
    ValidatedConfig, DEFAULT_DEV_SERVER_ADDRESS, DEFAULT_DEV_SERVER_PORT,
};
use crate::diagnostics::{build_error, Diagnostic};
use serde_json::Value;

pub fn validate_dev_server(
    config: &ValidatedConfig,
    input: &DevServerInput,
    diagnostics: &mut Vec<Diagnostic>,
) -> DevServerConfig {
    let flags = &config.flags;

    let mut address = flags
        .address
        .clone()
        .or_else(|| input.address.clone())
        .unwrap_or_else(|| DEFAULT_DEV_SERVER_ADDRESS.to_string());
    let mut address_protocol = None;
    if let Some(rest) = strip_prefix_ignore_case(&address, "http://") {
        address_protocol = Some(DevServerProtocol::Http);
        address = rest.to_string();
    } else if let Some(rest) = strip_prefix_ignore_case(&address, "https://") {
        address_protocol = Some(DevServerProtocol::Https);
        address = rest.to_string();
    }
    let mut address = address.split('/').next().unwrap_or_default().to_string();

    let mut address_port = None;
    if let Some((host, port)) = address.split_once(':') {
        if let Ok(port) = port.parse::<i64>() {
            address_port = Some(port);
            address = host.to_string();
        }
    }

    let requested_port = flags.port.or(input.port).or(address_port);
    let port = match requested_port {
        None => DEFAULT_DEV_SERVER_PORT,
        Some(port) => match u16::try_from(port) {
            Ok(port) if port > 0 => port,
            _ => {
                build_error(diagnostics).message_text =
                    format!("devServer port {} must be between 1 and 65535", port);
                DEFAULT_DEV_SERVER_PORT
            }
        },
    };

    let reload_strategy = match &input.reload_strategy {
        None => Some(ReloadStrategy::Hmr),
        Some(Value::Null) => None,
        Some(Value::String(s)) if s == "hmr" => Some(ReloadStrategy::Hmr),
        Some(Value::String(s)) if s == "pageReload" => Some(ReloadStrategy::PageReload),
        Some(other) => {
            build_error(diagnostics).message_text = format!(
                "Invalid devServer reloadStrategy {}. Valid configs include \"hmr\", \"pageReload\" and null.",
                other
            );
            Some(ReloadStrategy::Hmr)
        }
    };

    let protocol = match (input.https, address_protocol) {
        (Some(true), _) => DevServerProtocol::Https,
        (_, Some(protocol)) => protocol,
        _ => DevServerProtocol::Http,
    };

    let open_browser = if flags.open == Some(false) {
        false
    } else {
        input.open_browser.unwrap_or(true)
    };

    let history_api_fallback = Some(match &input.history_api_fallback {
        Some(fallback) => HistoryApiFallback {
            index: fallback.index.clone().or_else(|| Some("index.html".to_string())),
            disable_dot_rule: fallback.disable_dot_rule,
        },
        None => HistoryApiFallback {
            index: Some("index.html".to_string()),
            disable_dot_rule: None,
        },
    });

    let root_dir = &config.paths.root_dir;
    let serve_dir = output_dir(config, WWW).unwrap_or(root_dir.as_str());
    let root = resolve_path(root_dir, input.root.as_deref().unwrap_or(serve_dir));

    DevServerConfig {
        address,
        port,
        protocol,
        base_path: normalize_base_path(input.base_path.as_deref()),
        reload_strategy,
        open_browser,
        gzip: input.gzip.unwrap_or(true),
        log_requests: input.log_requests.unwrap_or(false),
        root: Some(root),
        initial_load_url: input
            .initial_load_url
            .clone()
            .unwrap_or_else(|| "/".to_string()),
        history_api_fallback,
        // decided by the worker validator
        worker: true,
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        value.get(prefix.len()..)
    } else {
        None
    }
}

fn normalize_base_path(base_path: Option<&str>) -> String {
    let base_path = base_path.map(str::trim).unwrap_or_default().replace('\\', "/");
    if base_path.is_empty() {
        return "/".to_string();
    }
    let mut normalized = String::with_capacity(base_path.len() + 2);
    if !base_path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(&base_path);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
