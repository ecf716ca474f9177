//! Core renderer trait for diagram output
//!
//! This trait defines the interface for rendering diagram data
//! into text output formats (XML, DTD).

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// This trait represents the output layer that serializes diagram data.
/// Each diagram type can have multiple renderers.
///
/// # Example
/// ```
/// use umlxml::core::Renderer;
/// use umlxml::plugins::class::{UmlModel, XmlRenderer};
///
/// let model = UmlModel::new();
/// let renderer = XmlRenderer::new();
/// let output = renderer.render(&model).unwrap();
/// assert!(output.contains("EmptySchema"));
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::*;

    #[test]
    fn test_renderers_implement_trait() {
        let xml = XmlRenderer::new();
        assert_eq!(xml.name(), "xml");
        assert_eq!(xml.version(), "0.1.0");
        assert_eq!(xml.format(), "xml");

        let dtd = DtdRenderer::new();
        assert_eq!(dtd.name(), "dtd");
        assert_eq!(dtd.format(), "dtd");
    }

    #[test]
    fn test_basic_rendering() {
        let mut model = UmlModel::new();
        model.ensure_class("Animal");
        model.ensure_class("Dog");
        model.add_inheritance("Animal", "Dog");

        let output = XmlRenderer::new().render(&model).unwrap();
        assert!(output.contains(r#"<Clase nombre="Animal" id="animal">"#));
        assert!(output.contains(r#"<Herencia padre="animal" hija="dog"/>"#));
    }
}
