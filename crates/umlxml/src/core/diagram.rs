//! Core diagram trait for all diagram types
//!
//! This trait ties a detector, parser, database and renderer together
//! into one diagram type.

use super::{Database, Detector, Parser, Renderer};
use std::sync::Arc;

/// Core trait for diagram types
///
/// This trait represents a complete diagram type with its associated components.
///
/// # Example
/// ```
/// use umlxml::core::Diagram;
/// use umlxml::plugins::class::ClassDiagram;
///
/// assert_eq!(ClassDiagram::name(), "class");
/// ```
pub trait Diagram: Send + Sync {
    /// The specific database type for this diagram
    type Database: Database + Send + Sync;

    /// The parser type for this diagram
    type Parser: Parser<Self::Database> + Send + Sync;

    /// The primary renderer type for this diagram
    type Renderer: Renderer<Self::Database> + Send + Sync;

    /// Get the detector for this diagram type
    fn detector() -> Arc<dyn Detector>;

    /// Create a new parser instance
    fn create_parser() -> Self::Parser;

    /// Create a new database instance
    fn create_database() -> Self::Database;

    /// Create a new renderer instance
    fn create_renderer() -> Self::Renderer;

    /// Get the name of this diagram type
    fn name() -> &'static str;

    /// Get the version of this diagram type
    fn version() -> &'static str;
}
