use crate::config::constants::{
    DEFAULT_CACHE_DIR, DEFAULT_INDEX_HTML, DEFAULT_PACKAGE_JSON, DEFAULT_SRC_DIR, DEFAULT_TSCONFIG,
};
use crate::declarations::{ConfigPaths, RawConfig};
use crate::sys::{normalize_path, CompilerSystem};
use std::path::Path;

/// Resolve the config's well-known paths against its root directory.
///
/// Pure string work: nothing is read from disk.
pub fn validate_paths(config: &RawConfig, sys: &dyn CompilerSystem) -> ConfigPaths {
    let cwd = sys.get_current_directory();
    let root_dir = match config.root_dir.as_deref() {
        Some(root_dir) => resolve_path(&cwd, root_dir),
        None => resolve_path(&cwd, "."),
    };
    let resolve = |value: Option<&str>, default_value: &str| {
        resolve_path(&root_dir, value.unwrap_or(default_value))
    };

    let src_dir = resolve(config.src_dir.as_deref(), DEFAULT_SRC_DIR);
    let src_index_html = match config.src_index_html.as_deref() {
        Some(path) => resolve_path(&root_dir, path),
        None => resolve_path(&src_dir, DEFAULT_INDEX_HTML),
    };

    ConfigPaths {
        cache_dir: resolve(config.cache_dir.as_deref(), DEFAULT_CACHE_DIR),
        package_json_file_path: resolve(config.package_json_file_path.as_deref(), DEFAULT_PACKAGE_JSON),
        tsconfig: resolve(config.tsconfig.as_deref(), DEFAULT_TSCONFIG),
        global_script: config.global_script.as_deref().map(|p| resolve_path(&root_dir, p)),
        global_style: config.global_style.as_deref().map(|p| resolve_path(&root_dir, p)),
        config_path: config.config_path.as_deref().map(|p| resolve_path(&root_dir, p)),
        src_index_html,
        src_dir,
        root_dir,
    }
}

/// Join `path` onto `base` unless it is already absolute, then collapse
/// `.` and `..` segments. Output always uses forward slashes.
pub fn resolve_path(base: &str, path: &str) -> String {
    let path = normalize_path(Path::new(path));
    let joined = if is_absolute(&path) {
        path
    } else {
        format!("{}/{}", normalize_path(Path::new(base)), path)
    };

    let (prefix, rest) = split_root(&joined);
    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().map_or(false, |last| *last != "..") {
                    segments.pop();
                } else if prefix.is_empty() {
                    segments.push("..");
                }
            }
            segment => segments.push(segment),
        }
    }

    let body = segments.join("/");
    if prefix.is_empty() && body.is_empty() {
        ".".to_string()
    } else {
        format!("{}{}", prefix, body)
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || has_drive_letter(path)
}

fn has_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn split_root(path: &str) -> (&str, &str) {
    if has_drive_letter(path) {
        let end = if path[2..].starts_with('/') { 3 } else { 2 };
        path.split_at(end)
    } else if path.starts_with('/') {
        path.split_at(1)
    } else {
        ("", path)
    }
}
