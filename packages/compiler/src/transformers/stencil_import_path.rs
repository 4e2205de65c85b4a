//! Import path parsing.
//!
//! Component style imports carry data in their query string, e.g.
//! `./my-cmp.css?tag=my-cmp&encapsulation=shadow&mode=ios`.

use serde::Serialize;

/// Style encapsulation requested by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encapsulation {
    Shadow,
    Scoped,
}

impl Encapsulation {
    pub fn parse(value: &str) -> Option<Encapsulation> {
        match value {
            "shadow" => Some(Encapsulation::Shadow),
            "scoped" => Some(Encapsulation::Scoped),
            _ => None,
        }
    }
}

/// Component data carried in an import's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportData {
    pub tag: Option<String>,
    pub encapsulation: Option<Encapsulation>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedImport {
    pub import_path: String,
    pub basename: Option<String>,
    pub ext: Option<String>,
    pub data: Option<ImportData>,
}

/// Split an import path into basename, lowercase extension and query data.
///
/// Never fails: an empty path yields no basename, extension or data.
pub fn parse_import_path(import_path: &str) -> ParsedImport {
    let mut parsed = ParsedImport {
        import_path: import_path.to_string(),
        basename: None,
        ext: None,
        data: None,
    };

    let (pathname, query) = match import_path.split_once('?') {
        Some((pathname, query)) => (pathname, Some(query)),
        None => (import_path, None),
    };

    let basename = basename(pathname.trim());
    if !basename.is_empty() {
        let ext_parts: Vec<String> = basename.to_lowercase().split('.').map(String::from).collect();
        if ext_parts.len() > 1 {
            let last = ext_parts.len() - 1;
            let ext = if ext_parts[last] == "css" && ext_parts.len() > 2 && ext_parts[last - 1] == "module" {
                "module.css".to_string()
            } else {
                ext_parts[last].clone()
            };
            parsed.ext = Some(ext);
        }
        parsed.basename = Some(basename.to_string());
    }

    if let Some(query) = query {
        parsed.data = Some(parse_import_data(query));
    }

    parsed
}

fn parse_import_data(query: &str) -> ImportData {
    let mut data = ImportData::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "tag" if data.tag.is_none() => data.tag = Some(value.to_lowercase()),
            "encapsulation" if data.encapsulation.is_none() => {
                data.encapsulation = Encapsulation::parse(&value.to_lowercase())
            }
            "mode" if data.mode.is_none() => data.mode = Some(value.to_lowercase()),
            _ => {}
        }
    }
    data
}

fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
}
