//! Diagnostics
//!
//! Validation problems are accumulated as `Diagnostic` records and handed
//! back to the caller; they are never raised.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warn,
    Info,
    Log,
    Debug,
}

impl DiagnosticLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warn => "warn",
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Log => "log",
            DiagnosticLevel::Debug => "debug",
        }
    }
}

/// Pipeline stage a diagnostic originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Build,
}

/// One validation or compile problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub header: String,
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abs_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<usize>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, header: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            level,
            kind: DiagnosticKind::Build,
            header: header.into(),
            message_text: message.into(),
            abs_file_path: None,
            line_number: None,
            column_number: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level.as_str().to_uppercase(), self.header, self.message_text)?;
        if let Some(path) = &self.abs_file_path {
            write!(f, " ({}", path)?;
            if let Some(line) = self.line_number {
                write!(f, ":{}", line)?;
                if let Some(column) = self.column_number {
                    write!(f, ":{}", column)?;
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Push a fresh error diagnostic and return it for the caller to fill in.
pub fn build_error(diagnostics: &mut Vec<Diagnostic>) -> &mut Diagnostic {
    push_diagnostic(diagnostics, Diagnostic::new(DiagnosticLevel::Error, "Build Error", "build error"))
}

/// Push a fresh warning diagnostic and return it for the caller to fill in.
pub fn build_warn(diagnostics: &mut Vec<Diagnostic>) -> &mut Diagnostic {
    push_diagnostic(diagnostics, Diagnostic::new(DiagnosticLevel::Warn, "Build Warn", "build warn"))
}

fn push_diagnostic(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) -> &mut Diagnostic {
    let index = diagnostics.len();
    diagnostics.push(diagnostic);
    &mut diagnostics[index]
}

/// Whether any diagnostic is error level.
pub fn has_error(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
