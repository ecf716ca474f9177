//! Edge case tests for diagram parsing and generation
//!
//! Tests for boundary conditions, unusual inputs, and recovery behaviour.

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use umlxml::core::Parser;
    use umlxml::plugins::class::*;
    use umlxml::{generate_dtd, generate_xml};

    #[test]
    fn test_empty_model_xml() {
        let xml = generate_xml(&UmlModel::new()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Schema nombre=\"EmptySchema\"></Schema>\n"
        );
    }

    #[test]
    fn test_empty_model_dtd() {
        let dtd = generate_dtd(&UmlModel::new()).unwrap();
        assert!(dtd.starts_with("<!DOCTYPE Schema ["));
        assert!(dtd.ends_with("]>"));
        assert!(!dtd.contains("<!ELEMENT ap"));
        assert!(!dtd.contains("Relaciones ("));
    }

    #[test]
    fn test_parser_empty_input() {
        let mut model = UmlModel::new();
        let result = ClassParser::new().parse("", &mut model);
        assert!(result.is_ok());
        assert!(model.is_empty());
    }

    #[test]
    fn test_parser_whitespace_only() {
        let mut model = UmlModel::new();
        let result = ClassParser::new().parse("   \n\n  \t  \n", &mut model);
        assert!(result.is_ok());
        assert!(model.is_empty());
    }

    #[test]
    fn test_header_only() {
        let parsed = ClassParser::new().parse_diagram("classDiagram\n").unwrap();
        assert!(parsed.model.is_empty());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_body() {
        let parsed = ClassParser::new()
            .parse_diagram("classDiagram\nclass Empty {\n}")
            .unwrap();
        let class = parsed.model.get_class("Empty").unwrap();
        assert!(class.attributes.is_empty());
        assert!(class.methods.is_empty());

        let xml = umlxml::generate_xml(&parsed.model).unwrap();
        assert!(xml.contains("<Atributos/>"));
        assert!(xml.contains("<Metodos/>"));
    }
}

// =============================================================================
// Unicode and Special Character Tests
// =============================================================================

mod unicode_handling {
    use umlxml::plugins::class::*;
    use umlxml::{generate_dtd, generate_xml, parse};

    #[test]
    fn test_accented_names() {
        let input = "classDiagram\nclass Dirección {\n+String calle\n+int número\n+validar() bool\n}";
        let parsed = parse(input).unwrap();
        let class = parsed.model.get_class("dirección").unwrap();
        assert_eq!(class.name, "Dirección");
        assert_eq!(class.attributes[1].name, "número");
        assert_eq!(class.attributes[1].attr_type, "int");

        let xml = generate_xml(&parsed.model).unwrap();
        assert!(xml.contains(r#"<Clase nombre="Dirección" id="dirección">"#));
        assert!(generate_dtd(&parsed.model)
            .unwrap()
            .contains("<!ELEMENT apDirección EMPTY>"));
    }

    #[test]
    fn test_cjk_class_names() {
        let parsed = parse("classDiagram\n数据库 <|-- 管理器").unwrap();
        assert_eq!(parsed.model.class_count(), 2);
        let inheritance = parsed.model.inheritances().next().unwrap();
        assert_eq!(inheritance.parent, "数据库");
    }

    #[test]
    fn test_case_folding_merges_classes() {
        let parsed = parse("classDiagram\nclass ÁRBOL\nárbol <|-- Hoja").unwrap();
        assert_eq!(parsed.model.class_count(), 2);
        assert_eq!(parsed.model.get_class("Árbol").unwrap().name, "ÁRBOL");
    }

    #[test]
    fn test_markup_characters_escaped() {
        let mut model = UmlModel::new();
        model.add_class(
            ClassEntity::new("Tag")
                .with_attributes(vec![Attribute::new("<b>bold</b>").with_type("a'b")]),
        );
        let xml = generate_xml(&model).unwrap();
        assert!(xml.contains(r#"nombre="&lt;b&gt;bold&lt;/b&gt;" tipo="a&apos;b""#));
    }
}

// =============================================================================
// Malformed Syntax Tests
// =============================================================================

mod malformed_syntax {
    use umlxml::plugins::class::*;
    use umlxml::parse;

    fn kinds(parsed: &ParsedDiagram) -> Vec<DiagnosticKind> {
        parsed.diagnostics.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_unsupported_arrows_are_reported() {
        let parsed = parse("classDiagram\nPerson *-- Heart\nPond o-- Duck\nA ..> B").unwrap();
        assert_eq!(parsed.model.relationship_count(), 0);
        // `..>` carries no recognized marker at all
        assert_eq!(
            kinds(&parsed),
            vec![
                DiagnosticKind::MalformedRelationship,
                DiagnosticKind::MalformedRelationship,
                DiagnosticKind::UnrecognizedStatement,
            ]
        );
    }

    #[test]
    fn test_half_annotated_association_is_not_bare() {
        let parsed = parse("classDiagram\nA \"1\" --> B\nA --> \"1\" B").unwrap();
        assert_eq!(parsed.model.relationship_count(), 0);
        assert_eq!(
            kinds(&parsed),
            vec![
                DiagnosticKind::MalformedRelationship,
                DiagnosticKind::MalformedRelationship,
            ]
        );
    }

    #[test]
    fn test_inheritance_never_read_as_association() {
        let parsed = parse("classDiagram\nA <|-- B C").unwrap();
        assert_eq!(parsed.model.relationship_count(), 0);
        assert!(parsed.diagnostics[0].message.contains("<|--"));
    }

    #[test]
    fn test_labels_are_discarded() {
        let parsed = parse("classDiagram\nCustomer \"1\" --> \"*\" Order : places\nAnimal <|-- Dog : is a").unwrap();
        assert_eq!(parsed.model.relationship_count(), 2);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_stray_closing_brace() {
        let parsed = parse("classDiagram\n}\nclass A").unwrap();
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::UnexpectedClosingBrace]);
        assert!(parsed.model.contains_class("A"));
    }

    #[test]
    fn test_nothing_after_unterminated_body_is_lost() {
        let parsed = parse("classDiagram\nclass A {\n+int x\nA <|-- B\n+int y").unwrap();
        let a = parsed.model.get_class("A").unwrap();
        assert_eq!(a.attributes.len(), 2);
        assert_eq!(parsed.model.inheritances().count(), 1);
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::UnterminatedClass]);
    }

    #[test]
    fn test_missing_header_with_content() {
        let err = parse("flowchart LR\nA --> B").unwrap_err();
        assert!(err.is_missing_header());
    }

    #[test]
    fn test_comment_only_input_is_missing_header() {
        assert!(parse("%% just a comment").unwrap_err().is_missing_header());
    }
}

// =============================================================================
// Scale Tests
// =============================================================================

mod scale {
    use std::fmt::Write;

    use umlxml::{generate_dtd, generate_xml, parse};

    #[test]
    fn test_many_classes_keep_declaration_order() {
        let mut input = String::from("classDiagram\n");
        for i in (0..200).rev() {
            writeln!(input, "class C{i} {{\n+int v{i}\n}}").unwrap();
        }
        let model = parse(&input).unwrap().model;
        assert_eq!(model.class_count(), 200);

        let first = model.classes().next().unwrap();
        assert_eq!(first.name, "C199");
        let last = model.classes().last().unwrap();
        assert_eq!(last.name, "C0");

        let xml = generate_xml(&model).unwrap();
        assert_eq!(xml.matches("<Clase ").count(), 200);
        assert_eq!(generate_dtd(&model).unwrap().matches("<!ELEMENT ap").count(), 200);
    }

    #[test]
    fn test_long_chain_root_selection() {
        let mut input = String::from("classDiagram\n");
        for i in 0..50 {
            writeln!(input, "N{i} <|-- N{}", i + 1).unwrap();
        }
        let model = parse(&input).unwrap().model;
        // Only the last child is never a parent
        assert_eq!(model.designated_root().unwrap().name, "N50");
    }
}
