use crate::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A structured problem found while reading or checking a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    /// Stable, dotted identifier such as `yaml.parse_error`.
    pub code: String,
    pub field_path: FieldPath,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: &str, field_path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code: code.to_string(),
            field_path,
            message: message.into(),
        }
    }

    pub fn warning(code: &str, field_path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            code: code.to_string(),
            field_path,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    pub fn sort_stable(diagnostics: &mut [Self]) {
        diagnostics.sort_by(|left, right| {
            (left.severity, &left.field_path, &left.code, &left.message).cmp(&(
                right.severity,
                &right.field_path,
                &right.code,
                &right.message,
            ))
        });
    }

    /// Renders a list one diagnostic per line, for error messages.
    pub fn render_list(diagnostics: &[Self]) -> String {
        diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        write!(
            f,
            "{severity}[{}] {}: {}",
            self.code, self.field_path, self.message
        )
    }
}

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod tests;
