//! Core error types for diagram processing
//!
//! Parsing is recoverable by construction: malformed lines become
//! diagnostics, not errors. What remains here are the failures that stop
//! the pipeline before a model exists.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Missing diagram header: expected a line starting with `classDiagram`")]
    MissingHeader,

    #[error("Unknown diagram type: {diagram_type}")]
    UnknownDiagramType { diagram_type: String },
}

impl DiagramError {
    /// Whether the error means the input was not a class diagram at all
    pub fn is_missing_header(&self) -> bool {
        matches!(self, Self::MissingHeader)
    }
}
