use std::fmt;

use serde::{Deserialize, Serialize};

/// The non-fatal conditions a read can run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The leading field is not a known record kind.
    MalformedLine,
    /// A section header beyond the known section list.
    UnexpectedSection,
    /// A row names a component or package that does not exist.
    MissingReference,
    /// A row could not be converted into its section's record.
    InvalidRecord,
    /// A header declares a field the section does not know.
    UnknownField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Info,
}

/// One reported condition, with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let severity = match kind {
            DiagnosticKind::UnknownField => Severity::Info,
            _ => Severity::Warning,
        };
        Self {
            line,
            kind,
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {:?}: {}", self.line, self.kind, self.message)
    }
}
