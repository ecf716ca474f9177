//! Recoverable parse diagnostics
//!
//! The parser never stops on a bad line. Anything it has to skip or repair
//! is recorded here so callers can show it next to the generated output.

use std::fmt;

use serde::Serialize;

/// Category of a recoverable defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A line that matches no statement shape
    UnrecognizedStatement,
    /// A line with a relationship marker that does not fit its grammar
    MalformedRelationship,
    /// A class body that was never closed
    UnterminatedClass,
    /// A `}` with no open class body
    UnexpectedClosingBrace,
    /// A `<<...>>` marker other than `abstract` or `interface`
    UnknownStereotype,
    /// A class whose id is not a valid XML name
    InvalidXmlName,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnrecognizedStatement => "unrecognized statement",
            DiagnosticKind::MalformedRelationship => "malformed relationship",
            DiagnosticKind::UnterminatedClass => "unterminated class",
            DiagnosticKind::UnexpectedClosingBrace => "unexpected closing brace",
            DiagnosticKind::UnknownStereotype => "unknown stereotype",
            DiagnosticKind::InvalidXmlName => "invalid xml name",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable defect found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number in the input
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}
