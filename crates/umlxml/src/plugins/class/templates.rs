//! Built-in starter diagrams

/// A named starter diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

const BASIC: &str = r#"classDiagram
    class Persona {
      +String nombre
      +int edad
      +caminar() void
    }
"#;

const INHERITANCE: &str = r#"classDiagram
    class Vehiculo {
      +String marca
      +arrancar() void
    }
    class Auto {
      +int puertas
    }
    class Motocicleta {
      +boolean tieneCareta
    }
    Vehiculo <|-- Auto
    Vehiculo <|-- Motocicleta
"#;

const ASSOCIATIONS: &str = r#"classDiagram
    class Estudiante {
      +String idEstudiante
      +String nombre
    }
    class Curso {
      +String codigoCurso
      +String titulo
    }
    class Matricula {
      +Date fechaMatricula
      +String calificacion
    }
    Estudiante "1" --> "many" Matricula
    Curso "1" --> "many" Matricula
"#;

/// All starter diagrams, in menu order
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "basic",
        description: "A single class with attributes and a method",
        source: BASIC,
    },
    Template {
        name: "inheritance",
        description: "A parent class with two subclasses",
        source: INHERITANCE,
    },
    Template {
        name: "associations",
        description: "Two classes associated with a third through multiplicities",
        source: ASSOCIATIONS,
    },
];

/// Look up a starter diagram by name, case-insensitively
pub fn template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::ClassParser;

    #[test]
    fn test_lookup() {
        assert_eq!(template("basic").unwrap().name, "basic");
        assert_eq!(template(" Inheritance ").unwrap().name, "inheritance");
        assert!(template("sequence").is_none());
    }

    #[test]
    fn test_templates_parse_cleanly() {
        let parser = ClassParser::new();
        for t in TEMPLATES {
            let parsed = parser.parse_diagram(t.source).unwrap();
            assert!(parsed.diagnostics.is_empty(), "{}: {:?}", t.name, parsed.diagnostics);
            assert!(parsed.model.class_count() > 0);
        }
    }

    #[test]
    fn test_associations_template_shape() {
        let parsed = ClassParser::new()
            .parse_diagram(template("associations").unwrap().source)
            .unwrap();
        assert_eq!(parsed.model.class_count(), 3);
        assert_eq!(parsed.model.associations().count(), 2);
        assert_eq!(parsed.model.designated_root().unwrap().name, "Estudiante");
    }
}
