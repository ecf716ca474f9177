//! XML generator
//!
//! Serializes a [`UmlModel`] into the `Schema/Clase` document:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Schema nombre="Dog">
//!   <Clase nombre="Dog" id="dog">
//!     <Atributos/>
//!     <Metodos>
//!       <Metodo nombre="bark" tipoRetorno="void" visibilidad="public"/>
//!     </Metodos>
//!   </Clase>
//!   <Relaciones>
//!     <Herencia padre="animal" hija="dog"/>
//!   </Relaciones>
//! </Schema>
//! ```

use std::borrow::Cow;
use std::fmt::Write;

use anyhow::Result;
use tracing::{debug, info_span};

use super::database::{ClassEntity, UmlModel};
use crate::core::{Database, Renderer};

/// Schema name used when the model has no classes
pub const EMPTY_SCHEMA_NAME: &str = "EmptySchema";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Escape a value for use inside a double-quoted attribute
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Renders the canonical model as an XML document
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl XmlRenderer {
    pub fn new() -> Self {
        Self
    }

    fn write_class(&self, out: &mut String, class: &ClassEntity) -> std::fmt::Result {
        let indent = INDENT;
        write!(
            out,
            r#"{indent}<Clase nombre="{}" id="{}""#,
            escape_attr(&class.name),
            escape_attr(&class.id)
        )?;
        if let Some(stereotype) = class.stereotype.as_str() {
            write!(out, r#" estereotipo="{stereotype}""#)?;
        }
        out.push_str(">\n");

        let inner = INDENT.repeat(2);
        let leaf = INDENT.repeat(3);

        if class.attributes.is_empty() {
            writeln!(out, "{inner}<Atributos/>")?;
        } else {
            writeln!(out, "{inner}<Atributos>")?;
            for attr in &class.attributes {
                writeln!(
                    out,
                    r#"{leaf}<Atributo nombre="{}" tipo="{}" visibilidad="{}"/>"#,
                    escape_attr(&attr.name),
                    escape_attr(&attr.attr_type),
                    attr.visibility
                )?;
            }
            writeln!(out, "{inner}</Atributos>")?;
        }

        if class.methods.is_empty() {
            writeln!(out, "{inner}<Metodos/>")?;
        } else {
            writeln!(out, "{inner}<Metodos>")?;
            for method in &class.methods {
                writeln!(
                    out,
                    r#"{leaf}<Metodo nombre="{}" tipoRetorno="{}" visibilidad="{}"/>"#,
                    escape_attr(&method.name),
                    escape_attr(&method.return_type),
                    method.visibility
                )?;
            }
            writeln!(out, "{inner}</Metodos>")?;
        }

        writeln!(out, "{indent}</Clase>")
    }

    /// Herencia first, then Asociacion, then Realizacion, each in read order
    fn write_relationships(&self, out: &mut String, model: &UmlModel) -> std::fmt::Result {
        if !model.has_relationships() {
            return Ok(());
        }

        let indent = INDENT;
        let inner = INDENT.repeat(2);
        writeln!(out, "{indent}<Relaciones>")?;
        for inheritance in model.inheritances() {
            writeln!(
                out,
                r#"{inner}<Herencia padre="{}" hija="{}"/>"#,
                escape_attr(&inheritance.parent),
                escape_attr(&inheritance.child)
            )?;
        }
        for assoc in model.associations() {
            writeln!(
                out,
                r#"{inner}<Asociacion origen="{}" destino="{}" multiplicidadOrigen="{}" multiplicidadDestino="{}"/>"#,
                escape_attr(&assoc.source),
                escape_attr(&assoc.target),
                escape_attr(&assoc.source_multiplicity),
                escape_attr(&assoc.target_multiplicity)
            )?;
        }
        for realization in model.realizations() {
            writeln!(
                out,
                r#"{inner}<Realizacion interfaz="{}" implementador="{}"/>"#,
                escape_attr(&realization.interface),
                escape_attr(&realization.implementer)
            )?;
        }
        writeln!(out, "{indent}</Relaciones>")
    }
}

impl Renderer<UmlModel> for XmlRenderer {
    type Output = String;

    fn render(&self, model: &UmlModel) -> Result<String> {
        let span = info_span!("render_xml", classes = model.node_count());
        let _enter = span.enter();

        let mut out = String::new();
        writeln!(out, "{XML_DECLARATION}")?;

        let Some(root) = model.designated_root() else {
            debug!("Empty model, writing empty schema");
            writeln!(out, r#"<Schema nombre="{EMPTY_SCHEMA_NAME}"></Schema>"#)?;
            return Ok(out);
        };

        debug!(root = %root.name, "Selected schema root");
        writeln!(out, r#"<Schema nombre="{}">"#, escape_attr(&root.name))?;
        for class in model.nodes() {
            self.write_class(&mut out, class)?;
        }
        self.write_relationships(&mut out, model)?;
        writeln!(out, "</Schema>")?;

        debug!(bytes = out.len(), "XML rendered");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "xml"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "xml"
    }
}
