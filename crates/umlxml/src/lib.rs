//! umlxml - Convert Mermaid class diagrams to XML and DTD
//!
//! A library for parsing Mermaid `classDiagram` text into a canonical UML
//! model and serializing that model as an XML document plus a DTD that
//! describes it with ID/IDREF cross-references.
//!
//! # Quick Start
//!
//! ```rust
//! use umlxml::transform;
//!
//! let input = "classDiagram\n  class Animal {\n    +String name\n  }\n  Animal <|-- Dog";
//! let result = transform(input).unwrap();
//! assert!(result.xml.contains(r#"<Herencia padre="animal" hija="dog"/>"#));
//! assert!(result.dtd.starts_with("<!DOCTYPE Schema ["));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use umlxml::prelude::*;
//!
//! let input = "classDiagram\n  Estudiante \"1\" --> \"many\" Matricula";
//!
//! // Parse into the canonical model
//! let parsed = ClassParser::new().parse_diagram(input).unwrap();
//! let model = parsed.model;
//!
//! // Inspect the parsed data
//! assert_eq!(model.class_count(), 2);
//! let assoc = model.associations().next().unwrap();
//! assert_eq!(assoc.target_multiplicity, "many");
//!
//! // Render both artifacts
//! let xml = XmlRenderer::new().render(&model).unwrap();
//! let dtd = DtdRenderer::with_style(DtdStyle::ContentModel).render(&model).unwrap();
//! assert!(xml.contains("Matricula"));
//! assert!(dtd.contains("<!ELEMENT Estudiante (Matricula*)>"));
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use plugins::class::{DtdStyle, ParsedDiagram, UmlModel};
pub use plugins::orchestrator::Transformation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Database, DiagramError, Detector, Diagram, Parser, Renderer};
    pub use crate::plugins::class::{
        Attribute, ClassDetector, ClassDiagram, ClassEntity, ClassParser, Diagnostic,
        DiagnosticKind, DtdRenderer, DtdStyle, Method, ParsedDiagram, Relationship, Stereotype,
        UmlModel, Visibility, XmlRenderer,
    };
    pub use crate::plugins::orchestrator::{Orchestrator, Transformation};
}

/// Parse Mermaid class diagram text into the canonical model
///
/// Recoverable defects are reported in [`ParsedDiagram::diagnostics`];
/// the only error is non-blank input without a `classDiagram` header.
///
/// # Example
/// ```rust
/// use umlxml::parse;
///
/// let parsed = parse("classDiagram\n  Animal <|-- Dog\n  Animal <|-- Cat").unwrap();
/// assert_eq!(parsed.model.class_count(), 3);
/// assert_eq!(parsed.model.relationship_count(), 2);
/// assert!(parsed.diagnostics.is_empty());
///
/// assert!(parse("graph TD; A-->B").unwrap_err().is_missing_header());
/// ```
pub fn parse(input: &str) -> Result<ParsedDiagram, DiagramError> {
    plugins::class::ClassParser::new().parse_diagram(input)
}

/// Render a model as the `Schema/Clase` XML document
///
/// # Example
/// ```rust
/// use umlxml::{generate_xml, UmlModel};
///
/// let xml = generate_xml(&UmlModel::new()).unwrap();
/// assert!(xml.ends_with("<Schema nombre=\"EmptySchema\"></Schema>\n"));
/// ```
pub fn generate_xml(model: &UmlModel) -> anyhow::Result<String> {
    use crate::core::Renderer as _;

    plugins::class::XmlRenderer::new().render(model)
}

/// Render a model as a DTD in the default pointer style
pub fn generate_dtd(model: &UmlModel) -> anyhow::Result<String> {
    generate_dtd_with_style(model, DtdStyle::default())
}

/// Render a model as a DTD in the given style
///
/// # Example
/// ```rust
/// use umlxml::{generate_dtd_with_style, parse, DtdStyle};
///
/// let model = parse("classDiagram\n  class Persona {\n    +String nombre\n  }").unwrap().model;
/// let dtd = generate_dtd_with_style(&model, DtdStyle::ContentModel).unwrap();
/// assert!(dtd.contains("<!ELEMENT Persona (nombre)>"));
/// ```
pub fn generate_dtd_with_style(model: &UmlModel, style: DtdStyle) -> anyhow::Result<String> {
    use crate::core::Renderer as _;

    plugins::class::DtdRenderer::with_style(style).render(model)
}

/// Parse a class diagram and render both artifacts
///
/// Detection is skipped; a missing header surfaces as
/// [`DiagramError::MissingHeader`] inside the returned error.
pub fn transform(input: &str) -> anyhow::Result<Transformation> {
    plugins::orchestrator::Orchestrator::new().process_class(input)
}
