//! Integration tests for the public API

use umlxml::prelude::*;
use umlxml::{generate_dtd, generate_dtd_with_style, generate_xml, parse, transform};

const ANIMAL_DOG: &str = r#"classDiagram
class Animal {
  +String name
  +int age
  +eat() void
}
class Dog {
  +bark() void
}
Animal <|-- Dog
"#;

#[test]
fn test_parse_animal_dog_model() {
    let parsed = parse(ANIMAL_DOG).unwrap();
    let model = &parsed.model;
    assert!(parsed.diagnostics.is_empty());

    let ids: Vec<_> = model.classes().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["animal", "dog"]);

    let animal = model.get_class("animal").unwrap();
    let attrs: Vec<_> = animal
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.attr_type.as_str(), a.visibility))
        .collect();
    assert_eq!(
        attrs,
        vec![
            ("name", "String", Visibility::Public),
            ("age", "int", Visibility::Public)
        ]
    );
    assert_eq!(animal.methods.len(), 1);
    assert_eq!(animal.methods[0].name, "eat");
    assert_eq!(animal.methods[0].return_type, "void");

    let dog = model.get_class("dog").unwrap();
    assert!(dog.attributes.is_empty());
    assert_eq!(dog.methods[0].name, "bark");

    let inheritances: Vec<_> = model.inheritances().collect();
    assert_eq!(inheritances.len(), 1);
    assert_eq!(inheritances[0].parent, "animal");
    assert_eq!(inheritances[0].child, "dog");
}

#[test]
fn test_generate_xml_animal_dog() {
    let model = parse(ANIMAL_DOG).unwrap().model;
    let xml = generate_xml(&model).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(xml.contains(r#"<Clase nombre="Animal" id="animal">"#));
    assert!(xml.contains(
        "  <Relaciones>\n    <Herencia padre=\"animal\" hija=\"dog\"/>\n  </Relaciones>\n"
    ));

    let animal_block = &xml[xml.find(r#"<Clase nombre="Animal""#).unwrap()
        ..xml.find(r#"<Clase nombre="Dog""#).unwrap()];
    assert_eq!(animal_block.matches("<Atributo ").count(), 2);
    assert_eq!(animal_block.matches("<Metodo ").count(), 1);
}

#[test]
fn test_generate_dtd_animal_dog() {
    let model = parse(ANIMAL_DOG).unwrap().model;
    let dtd = generate_dtd(&model).unwrap();

    assert!(dtd.starts_with("<!DOCTYPE Schema ["));
    assert!(dtd.ends_with("]>"));
    assert!(dtd.contains("<!ELEMENT Clase (Atributos?, Metodos?)>"));
    assert!(dtd.contains("<!ELEMENT Herencia EMPTY>"));
    assert!(dtd.contains("  <!ATTLIST Herencia\n    padre IDREF #REQUIRED\n    hija IDREF #REQUIRED\n  >"));
}

#[test]
fn test_transform_bundles_everything() {
    let result = transform(ANIMAL_DOG).unwrap();
    let model = parse(ANIMAL_DOG).unwrap().model;

    assert_eq!(result.model, model);
    assert_eq!(result.xml, generate_xml(&model).unwrap());
    assert_eq!(result.dtd, generate_dtd(&model).unwrap());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_prelude_components_compose() {
    let parser = ClassParser::new();
    let mut model = UmlModel::new();
    parser.parse(ANIMAL_DOG, &mut model).unwrap();

    assert_eq!(model.node_count(), 2);
    assert_eq!(model.edge_count(), 1);

    let xml = XmlRenderer::new().render(&model).unwrap();
    assert_eq!(xml, generate_xml(&model).unwrap());

    let dtd = DtdRenderer::with_style(DtdStyle::ContentModel)
        .render(&model)
        .unwrap();
    assert_eq!(
        dtd,
        generate_dtd_with_style(&model, DtdStyle::ContentModel).unwrap()
    );
}

#[test]
fn test_class_diagram_type() {
    let detector = ClassDiagram::detector();
    assert!(detector.detect(ANIMAL_DOG));

    let parser = ClassDiagram::create_parser();
    let mut model = ClassDiagram::create_database();
    parser.parse(ANIMAL_DOG, &mut model).unwrap();

    let xml = ClassDiagram::create_renderer().render(&model).unwrap();
    assert!(xml.contains(r#"<Schema nombre="Dog">"#));
}

#[test]
fn test_orchestrator_with_detection() {
    let orchestrator = Orchestrator::with_class_plugins();
    let result = orchestrator.process(ANIMAL_DOG).unwrap();
    assert_eq!(result.model.class_count(), 2);

    let err = orchestrator.process("sequenceDiagram\n  Alice->>Bob: Hi").unwrap_err();
    assert_eq!(err.to_string(), "No suitable detector found for input");
}

#[test]
fn test_orchestrator_detects_header_after_frontmatter() {
    let orchestrator = Orchestrator::with_class_plugins();
    let input = "---\ntitle: Demo\n---\nclassDiagram\nclass A";
    assert_eq!(orchestrator.detect_diagram_type(input).unwrap(), "class");

    let result = orchestrator.process(input).unwrap();
    assert!(result.model.contains_class("A"));
    assert_eq!(result.xml, transform(input).unwrap().xml);
}

#[test]
fn test_realization_leaves_interface_as_root() {
    let result = transform("classDiagram\nclass Shape\nclass Circle\nCircle ..|> Shape").unwrap();
    assert_eq!(result.model.dependency_count("shape"), 0);
    assert!(result.xml.contains(r#"<Schema nombre="Shape">"#));
    let dtd = generate_dtd_with_style(&result.model, DtdStyle::ContentModel).unwrap();
    assert!(dtd.starts_with("<!DOCTYPE Shape ["));
}

#[test]
fn test_realization_declares_implementer_first() {
    let model = parse("classDiagram\nCircle ..|> Shape").unwrap().model;
    let ids: Vec<_> = model.classes().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["circle", "shape"]);
    assert!(generate_xml(&model).unwrap().contains(r#"<Schema nombre="Circle">"#));
}

#[test]
fn test_model_serializes_to_json() {
    let model = parse("classDiagram\nclass Shape {\n<<interface>>\n-draw() void\n}\nCircle ..|> Shape")
        .unwrap()
        .model;
    let json = serde_json::to_value(&model).unwrap();

    assert_eq!(json["classes"]["shape"]["stereotype"], "interface");
    assert_eq!(json["classes"]["shape"]["methods"][0]["visibility"], "private");
    assert_eq!(json["relationships"][0]["kind"], "realization");
    assert_eq!(json["relationships"][0]["interface"], "shape");
    assert_eq!(json["relationships"][0]["implementer"], "circle");
}

#[test]
fn test_templates_are_exposed() {
    let names: Vec<_> = umlxml::plugins::class::TEMPLATES
        .iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["basic", "inheritance", "associations"]);

    let inheritance = umlxml::plugins::class::template("inheritance").unwrap();
    let result = transform(inheritance.source).unwrap();
    assert_eq!(result.model.inheritances().count(), 2);
    assert!(result.xml.contains(r#"<Schema nombre="Auto">"#));
}
