//! DTD generator
//!
//! Two output styles share one renderer:
//!
//! - [`DtdStyle::Pointers`] (default) describes the `Schema/Clase` XML
//!   document, with one `ap<ClassName>` pointer element per class for
//!   ID/IDREF references.
//! - [`DtdStyle::ContentModel`] turns each class into its own element whose
//!   content lists its attributes as `#PCDATA` children and its outgoing
//!   associations with a cardinality operator.

use std::collections::HashSet;
use std::fmt::{self, Write};
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, info_span, trace};

use super::database::{is_xml_name, ClassEntity, Relationship, UmlModel};
use super::xml::EMPTY_SCHEMA_NAME;
use crate::core::{Database, Renderer};

/// DTD output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DtdStyle {
    /// Structural declarations for the generated XML plus pointer elements
    #[default]
    Pointers,
    /// One element per class with attribute and association particles
    ContentModel,
}

impl DtdStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            DtdStyle::Pointers => "pointers",
            DtdStyle::ContentModel => "content-model",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["pointers", "content-model"]
    }
}

impl FromStr for DtdStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pointers" => Ok(DtdStyle::Pointers),
            "content-model" | "content_model" => Ok(DtdStyle::ContentModel),
            _ => Err(format!("Unknown DTD style: {}", s)),
        }
    }
}

impl fmt::Display for DtdStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content-model occurrence operator derived from a multiplicity label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one, no operator
    One,
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Cardinality {
    /// Map a multiplicity label; unknown labels are treated as `*`
    pub fn from_multiplicity(multiplicity: &str) -> Self {
        match multiplicity.trim().to_lowercase().as_str() {
            "1" => Cardinality::One,
            "0..1" => Cardinality::Optional,
            "1..*" | "1..n" => Cardinality::OneOrMore,
            _ => Cardinality::ZeroOrMore,
        }
    }

    pub fn operator(self) -> &'static str {
        match self {
            Cardinality::One => "",
            Cardinality::Optional => "?",
            Cardinality::ZeroOrMore => "*",
            Cardinality::OneOrMore => "+",
        }
    }
}

/// Renders the canonical model as a DTD
#[derive(Debug, Clone, Copy, Default)]
pub struct DtdRenderer {
    style: DtdStyle,
}

impl DtdRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: DtdStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> DtdStyle {
        self.style
    }

    fn render_pointers(&self, out: &mut String, model: &UmlModel) -> fmt::Result {
        writeln!(out, "<!DOCTYPE Schema [")?;
        writeln!(out, "  <!ELEMENT Schema (Clase+, Relaciones?)>")?;
        writeln!(out, "  <!ATTLIST Schema nombre CDATA #REQUIRED>")?;
        writeln!(out)?;

        writeln!(out, "  <!ELEMENT Clase (Atributos?, Metodos?)>")?;
        writeln!(out, "  <!ATTLIST Clase")?;
        writeln!(out, "    nombre CDATA #REQUIRED")?;
        writeln!(out, "    id ID #REQUIRED")?;
        writeln!(out, "    estereotipo (abstract|interface) #IMPLIED")?;
        writeln!(out, "  >")?;
        writeln!(out)?;

        // `<Atributos/>` is written for a class without attributes, so the
        // content model only requires one when every class has some
        let attr_op = occurrence(model.classes().all(|c| !c.attributes.is_empty()));
        writeln!(out, "  <!ELEMENT Atributos (Atributo{attr_op})>")?;
        writeln!(out, "  <!ELEMENT Atributo EMPTY>")?;
        writeln!(out, "  <!ATTLIST Atributo")?;
        writeln!(out, "    nombre CDATA #REQUIRED")?;
        writeln!(out, "    tipo CDATA #REQUIRED")?;
        writeln!(out, "    visibilidad (public|private) #IMPLIED")?;
        writeln!(out, "  >")?;
        writeln!(out)?;

        let method_op = occurrence(model.classes().all(|c| !c.methods.is_empty()));
        writeln!(out, "  <!ELEMENT Metodos (Metodo{method_op})>")?;
        writeln!(out, "  <!ELEMENT Metodo EMPTY>")?;
        writeln!(out, "  <!ATTLIST Metodo")?;
        writeln!(out, "    nombre CDATA #REQUIRED")?;
        writeln!(out, "    tipoRetorno CDATA #IMPLIED")?;
        writeln!(out, "    visibilidad (public|private) #IMPLIED")?;
        writeln!(out, "  >")?;

        for class in model.classes() {
            writeln!(out)?;
            self.write_class_section(out, class)?;
        }

        if model.has_relationships() {
            writeln!(out)?;
            self.write_relationship_declarations(out, model)?;
        }

        write!(out, "]>")
    }

    /// Comment block describing the class, then its pointer element
    fn write_class_section(&self, out: &mut String, class: &ClassEntity) -> fmt::Result {
        match class.stereotype.as_str() {
            Some(stereotype) => writeln!(
                out,
                "  <!-- Clase {} (id {}, {stereotype}) -->",
                comment_text(&class.name),
                comment_text(&class.id)
            )?,
            None => writeln!(
                out,
                "  <!-- Clase {} (id {}) -->",
                comment_text(&class.name),
                comment_text(&class.id)
            )?,
        }
        for attr in &class.attributes {
            writeln!(
                out,
                "  <!--   Atributo {}: {} ({}) -->",
                comment_text(&attr.name),
                comment_text(&attr.attr_type),
                attr.visibility
            )?;
        }
        for method in &class.methods {
            writeln!(
                out,
                "  <!--   Metodo {}(): {} ({}) -->",
                comment_text(&method.name),
                comment_text(&method.return_type),
                method.visibility
            )?;
        }
        writeln!(out, "  <!ELEMENT ap{} EMPTY>", class.name)?;
        writeln!(out, "  <!ATTLIST ap{} point IDREF #REQUIRED>", class.name)
    }

    fn write_relationship_declarations(&self, out: &mut String, model: &UmlModel) -> fmt::Result {
        let has_realizations = model.realizations().next().is_some();
        if has_realizations {
            writeln!(out, "  <!ELEMENT Relaciones (Herencia|Asociacion|Realizacion)*>")?;
        } else {
            writeln!(out, "  <!ELEMENT Relaciones (Herencia|Asociacion)*>")?;
        }

        writeln!(out, "  <!ELEMENT Herencia EMPTY>")?;
        writeln!(out, "  <!ATTLIST Herencia")?;
        writeln!(out, "    padre IDREF #REQUIRED")?;
        writeln!(out, "    hija IDREF #REQUIRED")?;
        writeln!(out, "  >")?;

        writeln!(out, "  <!ELEMENT Asociacion EMPTY>")?;
        writeln!(out, "  <!ATTLIST Asociacion")?;
        writeln!(out, "    origen IDREF #REQUIRED")?;
        writeln!(out, "    destino IDREF #REQUIRED")?;
        writeln!(out, "    multiplicidadOrigen CDATA #IMPLIED")?;
        writeln!(out, "    multiplicidadDestino CDATA #IMPLIED")?;
        writeln!(out, "  >")?;

        if has_realizations {
            writeln!(out, "  <!ELEMENT Realizacion EMPTY>")?;
            writeln!(out, "  <!ATTLIST Realizacion")?;
            writeln!(out, "    interfaz IDREF #REQUIRED")?;
            writeln!(out, "    implementador IDREF #REQUIRED")?;
            writeln!(out, "  >")?;
        }
        Ok(())
    }

    fn render_content_model(&self, out: &mut String, model: &UmlModel) -> fmt::Result {
        let doctype = model
            .designated_root()
            .map(|c| c.name.as_str())
            .unwrap_or(EMPTY_SCHEMA_NAME);
        writeln!(out, "<!DOCTYPE {doctype} [")?;

        let class_names: HashSet<&str> = model.classes().map(|c| c.name.as_str()).collect();
        let mut declared: HashSet<&str> = HashSet::new();

        for class in model.classes() {
            let attributes: Vec<&str> = class
                .attributes
                .iter()
                .map(|a| a.name.as_str())
                .filter(|name| {
                    let valid = is_xml_name(name);
                    if !valid {
                        trace!(class = %class.name, attribute = *name, "not a valid element name");
                    }
                    valid
                })
                .collect();

            let mut particles: Vec<String> = attributes.iter().map(|a| a.to_string()).collect();
            for assoc in model.associations().filter(|a| a.source == class.id) {
                if let Some(target) = model.get_node(&assoc.target) {
                    let op = Cardinality::from_multiplicity(&assoc.target_multiplicity).operator();
                    particles.push(format!("{}{op}", target.name));
                }
            }

            if particles.is_empty() {
                writeln!(out, "  <!ELEMENT {} EMPTY>", class.name)?;
            } else {
                writeln!(out, "  <!ELEMENT {} ({})>", class.name, particles.join(", "))?;
            }

            for attr in attributes {
                // A class of the same name already declares this element
                if class_names.contains(attr) || !declared.insert(attr) {
                    continue;
                }
                writeln!(out, "  <!ELEMENT {attr} (#PCDATA)>")?;
            }
        }

        let referenced: HashSet<&str> = model
            .relationships()
            .iter()
            .filter_map(|r| match r {
                Relationship::Association(a) => Some(a.target.as_str()),
                Relationship::Inheritance(i) => Some(i.parent.as_str()),
                Relationship::Realization(r) => Some(r.interface.as_str()),
            })
            .collect();

        for class in model.classes().filter(|c| referenced.contains(c.id.as_str())) {
            writeln!(out)?;
            writeln!(out, "  <!ATTLIST {} id ID #REQUIRED>", class.name)?;
            writeln!(out, "  <!ELEMENT ap{} EMPTY>", class.name)?;
            writeln!(out, "  <!ATTLIST ap{} point IDREF #REQUIRED>", class.name)?;
        }

        write!(out, "]>")
    }
}

fn occurrence(required: bool) -> &'static str {
    if required {
        "+"
    } else {
        "*"
    }
}

/// Make text safe inside `<!-- -->`
fn comment_text(text: &str) -> String {
    let mut safe = text.replace("--", "- -");
    if safe.ends_with('-') {
        safe.push(' ');
    }
    safe
}

impl Renderer<UmlModel> for DtdRenderer {
    type Output = String;

    fn render(&self, model: &UmlModel) -> Result<String> {
        let span = info_span!("render_dtd", style = %self.style, classes = model.node_count());
        let _enter = span.enter();

        let mut out = String::new();
        match self.style {
            DtdStyle::Pointers => self.render_pointers(&mut out, model)?,
            DtdStyle::ContentModel => self.render_content_model(&mut out, model)?,
        }

        debug!(bytes = out.len(), "DTD rendered");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "dtd"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "dtd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::{Attribute, Method, Stereotype};

    fn render(model: &UmlModel) -> String {
        DtdRenderer::new().render(model).unwrap()
    }

    fn animal_dog() -> UmlModel {
        let mut model = UmlModel::new();
        model.add_class(
            ClassEntity::new("Animal")
                .with_attributes(vec![Attribute::new("name").with_type("String")])
                .with_methods(vec![Method::new("eat")]),
        );
        model.add_class(ClassEntity::new("Dog").with_methods(vec![Method::new("bark")]));
        model.add_inheritance("Animal", "Dog");
        model
    }

    #[test]
    fn test_framing() {
        let output = render(&animal_dog());
        assert!(output.starts_with("<!DOCTYPE Schema ["));
        assert!(output.ends_with("]>"));
        assert!(output.contains("  <!ELEMENT Schema (Clase+, Relaciones?)>\n"));
    }

    #[test]
    fn test_structural_declarations_appear_once() {
        let output = render(&animal_dog());
        assert_eq!(output.matches("<!ELEMENT Clase ").count(), 1);
        assert_eq!(output.matches("<!ELEMENT Atributo EMPTY>").count(), 1);
        assert_eq!(output.matches("<!ELEMENT Metodo EMPTY>").count(), 1);
    }

    #[test]
    fn test_member_occurrence_follows_model() {
        // Dog has no attributes, so `<Atributos/>` must stay valid
        let output = render(&animal_dog());
        assert!(output.contains("<!ELEMENT Atributos (Atributo*)>"));
        assert!(output.contains("<!ELEMENT Metodos (Metodo+)>"));
    }

    #[test]
    fn test_class_sections_and_pointers() {
        let output = render(&animal_dog());
        assert!(output.contains("  <!-- Clase Animal (id animal) -->\n"));
        assert!(output.contains("  <!--   Atributo name: String (public) -->\n"));
        assert!(output.contains("  <!--   Metodo eat(): void (public) -->\n"));
        assert!(output.contains("  <!ELEMENT apAnimal EMPTY>\n"));
        assert!(output.contains("  <!ATTLIST apDog point IDREF #REQUIRED>\n"));
    }

    #[test]
    fn test_relationship_declarations() {
        let output = render(&animal_dog());
        assert!(output.contains("<!ELEMENT Relaciones (Herencia|Asociacion)*>"));
        assert!(output.contains("    padre IDREF #REQUIRED\n"));
        assert!(output.contains("    multiplicidadDestino CDATA #IMPLIED\n"));
        assert!(!output.contains("Realizacion"));

        let mut model = animal_dog();
        model.add_realization("Pet", "Dog");
        let output = render(&model);
        assert!(output.contains("<!ELEMENT Relaciones (Herencia|Asociacion|Realizacion)*>"));
        assert!(output.contains("    implementador IDREF #REQUIRED\n"));
    }

    #[test]
    fn test_no_relationship_section_without_relationships() {
        let mut model = UmlModel::new();
        model.ensure_class("Solo");
        let output = render(&model);
        assert!(!output.contains("Relaciones ("));
        assert!(!output.contains("Herencia"));
        assert!(output.contains("<!ELEMENT apSolo EMPTY>"));
    }

    #[test]
    fn test_stereotype_in_class_comment() {
        let mut model = UmlModel::new();
        model.add_class(ClassEntity::new("Shape").with_stereotype(Stereotype::Abstract));
        assert!(render(&model).contains("<!-- Clase Shape (id shape, abstract) -->"));
    }

    #[test]
    fn test_comment_text_is_sanitized() {
        let mut model = UmlModel::new();
        model.add_class(
            ClassEntity::new("A").with_attributes(vec![Attribute::new("x -- y-")]),
        );
        let output = render(&model);
        assert!(output.contains("<!--   Atributo x - - y- : string (public) -->"));
    }

    #[test]
    fn test_cardinality_mapping() {
        assert_eq!(Cardinality::from_multiplicity("1"), Cardinality::One);
        assert_eq!(Cardinality::from_multiplicity("0..1"), Cardinality::Optional);
        for label in ["*", "many", "n", "0..*", "0..n", "Many"] {
            assert_eq!(Cardinality::from_multiplicity(label), Cardinality::ZeroOrMore);
        }
        assert_eq!(Cardinality::from_multiplicity("1..*"), Cardinality::OneOrMore);
        assert_eq!(Cardinality::from_multiplicity("1..n"), Cardinality::OneOrMore);
        assert_eq!(Cardinality::from_multiplicity("2..5"), Cardinality::ZeroOrMore);
        assert_eq!(Cardinality::OneOrMore.operator(), "+");
        assert_eq!(Cardinality::One.operator(), "");
    }

    #[test]
    fn test_content_model_style() {
        let mut model = UmlModel::new();
        model.add_class(
            ClassEntity::new("Estudiante")
                .with_attributes(vec![Attribute::new("nombre"), Attribute::new("edad")]),
        );
        model.add_class(
            ClassEntity::new("Curso")
                .with_attributes(vec![Attribute::new("nombre"), Attribute::new("codigo")]),
        );
        model.add_association("Estudiante", "Curso", Some("1"), Some("many"));

        let output = DtdRenderer::with_style(DtdStyle::ContentModel)
            .render(&model)
            .unwrap();

        let expected = "<!DOCTYPE Estudiante [
  <!ELEMENT Estudiante (nombre, edad, Curso*)>
  <!ELEMENT nombre (#PCDATA)>
  <!ELEMENT edad (#PCDATA)>
  <!ELEMENT Curso (nombre, codigo)>
  <!ELEMENT codigo (#PCDATA)>

  <!ATTLIST Curso id ID #REQUIRED>
  <!ELEMENT apCurso EMPTY>
  <!ATTLIST apCurso point IDREF #REQUIRED>
]>";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_content_model_empty_class_and_model() {
        let mut model = UmlModel::new();
        model.ensure_class("Marker");
        let renderer = DtdRenderer::with_style(DtdStyle::ContentModel);
        assert_eq!(
            renderer.render(&model).unwrap(),
            "<!DOCTYPE Marker [\n  <!ELEMENT Marker EMPTY>\n]>"
        );
        assert_eq!(
            renderer.render(&UmlModel::new()).unwrap(),
            "<!DOCTYPE EmptySchema [\n]>"
        );
    }

    #[test]
    fn test_dtd_style_from_str() {
        assert_eq!("pointers".parse::<DtdStyle>().unwrap(), DtdStyle::Pointers);
        assert_eq!(
            "Content-Model".parse::<DtdStyle>().unwrap(),
            DtdStyle::ContentModel
        );
        assert!("tree".parse::<DtdStyle>().is_err());
        assert_eq!(DtdStyle::default().to_string(), "pointers");
    }
}
