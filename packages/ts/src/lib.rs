//! TypeScript-compatible interfaces and types for the Stencil compiler.
//! This crate serves as a shared compatibility layer: it models the
//! compiler options handed to the TypeScript transform stage.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod compiler_options;

pub use compiler_options::*;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    ESNext,
    JSON,
    Latest,
}

impl ScriptTarget {
    /// Name as written in a tsconfig `target` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptTarget::ES3 => "es3",
            ScriptTarget::ES5 => "es5",
            ScriptTarget::ES2015 => "es2015",
            ScriptTarget::ES2016 => "es2016",
            ScriptTarget::ES2017 => "es2017",
            ScriptTarget::ES2018 => "es2018",
            ScriptTarget::ES2019 => "es2019",
            ScriptTarget::ES2020 => "es2020",
            ScriptTarget::ES2021 => "es2021",
            ScriptTarget::ES2022 => "es2022",
            ScriptTarget::ESNext => "esnext",
            ScriptTarget::JSON => "json",
            ScriptTarget::Latest => "latest",
        }
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    None,
    CommonJS,
    AMD,
    UMD,
    System,
    ES2015,
    ES2020,
    ES2022,
    ESNext,
    Node16,
    NodeNext,
}

impl ModuleKind {
    /// Name as written in a tsconfig `module` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::None => "none",
            ModuleKind::CommonJS => "commonjs",
            ModuleKind::AMD => "amd",
            ModuleKind::UMD => "umd",
            ModuleKind::System => "system",
            ModuleKind::ES2015 => "es2015",
            ModuleKind::ES2020 => "es2020",
            ModuleKind::ES2022 => "es2022",
            ModuleKind::ESNext => "esnext",
            ModuleKind::Node16 => "node16",
            ModuleKind::NodeNext => "nodenext",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
