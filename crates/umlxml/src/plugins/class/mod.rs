//! Class diagram plugin
//!
//! Parses Mermaid `classDiagram` text into a [`UmlModel`] and renders the
//! model as an XML document and a matching DTD.

mod chumsky_parser;
mod database;
mod detector;
mod diagnostics;
mod dtd;
mod member;
mod parser;
pub mod templates;
mod xml;

use std::sync::Arc;

use crate::core::{Detector, Diagram};

pub use chumsky_parser::{ChumskyClassParser, ParsedClassHeader, ParsedRelationship, RelationshipLine};
pub use database::{
    class_id, is_xml_name, Association, Attribute, ClassEntity, Inheritance, Method, Realization,
    Relationship, Stereotype, UmlModel, Visibility, DEFAULT_ATTRIBUTE_TYPE,
    DEFAULT_MULTIPLICITY, DEFAULT_RETURN_TYPE,
};
pub use detector::ClassDetector;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use dtd::{Cardinality, DtdRenderer, DtdStyle};
pub use member::{Member, MemberClassifier};
pub use parser::{ClassParser, ParsedDiagram};
pub use templates::{template, Template, TEMPLATES};
pub use xml::{XmlRenderer, EMPTY_SCHEMA_NAME};

/// The class diagram type: detector, parser, model and XML renderer
pub struct ClassDiagram;

impl Diagram for ClassDiagram {
    type Database = UmlModel;
    type Parser = ClassParser;
    type Renderer = XmlRenderer;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(ClassDetector::new())
    }

    fn create_parser() -> Self::Parser {
        ClassParser::new()
    }

    fn create_database() -> Self::Database {
        UmlModel::new()
    }

    fn create_renderer() -> Self::Renderer {
        XmlRenderer::new()
    }

    fn name() -> &'static str {
        "class"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
