//! Class diagram database
//!
//! The canonical model: classes keyed by normalized id in declaration order,
//! plus every relationship in the order it was read.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::Database;

/// Default type label for an attribute without one
pub const DEFAULT_ATTRIBUTE_TYPE: &str = "string";

/// Default return type for a method without one
pub const DEFAULT_RETURN_TYPE: &str = "void";

/// Default multiplicity on either end of an association
pub const DEFAULT_MULTIPLICITY: &str = "1";

/// Normalize a class name into its id.
///
/// Ids are the case-insensitive fold of the name, so `Animal`, `animal` and
/// `ANIMAL` all address the same class.
pub fn class_id(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `name` is a valid XML name as written.
///
/// Class ids become `ID`/`IDREF` values, so an id failing this check makes
/// the generated document invalid against its DTD.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public, // +
    Private, // -
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stereotype tag carried by a class (`<<abstract>>`, `<<interface>>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stereotype {
    #[default]
    None,
    Abstract,
    Interface,
}

impl Stereotype {
    /// Parse the text between `<<` and `>>`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "abstract" => Some(Stereotype::Abstract),
            "interface" => Some(Stereotype::Interface),
            _ => None,
        }
    }

    /// Name used in generated output, `None` for an untagged class
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Stereotype::None => None,
            Stereotype::Abstract => Some("abstract"),
            Stereotype::Interface => Some("interface"),
        }
    }

    pub fn is_none(self) -> bool {
        self == Stereotype::None
    }
}

/// A class attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    pub visibility: Visibility,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: DEFAULT_ATTRIBUTE_TYPE.to_string(),
            visibility: Visibility::Public,
        }
    }

    pub fn with_type(mut self, t: impl Into<String>) -> Self {
        self.attr_type = t.into();
        self
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = v;
        self
    }
}

/// A class method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub visibility: Visibility,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: DEFAULT_RETURN_TYPE.to_string(),
            visibility: Visibility::Public,
        }
    }

    pub fn with_return_type(mut self, t: impl Into<String>) -> Self {
        self.return_type = t.into();
        self
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = v;
        self
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEntity {
    pub id: String,
    pub name: String,
    pub stereotype: Stereotype,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        let name = name.trim().to_string();
        Self {
            id: class_id(&name),
            name,
            stereotype: Stereotype::None,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_stereotype(mut self, stereotype: Stereotype) -> Self {
        self.stereotype = stereotype;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }
}

/// Generalization: `parent <|-- child`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inheritance {
    pub parent: String,
    pub child: String,
}

/// Realization: `implementer ..|> interface`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Realization {
    pub interface: String,
    pub implementer: String,
}

/// Binary association with a multiplicity on each end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    pub source: String,
    pub target: String,
    pub source_multiplicity: String,
    pub target_multiplicity: String,
}

/// Any relationship between two classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Relationship {
    Inheritance(Inheritance),
    Realization(Realization),
    Association(Association),
}

impl Relationship {
    /// Both endpoint ids, in written order
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Relationship::Inheritance(r) => (&r.parent, &r.child),
            Relationship::Realization(r) => (&r.implementer, &r.interface),
            Relationship::Association(r) => (&r.source, &r.target),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Relationship::Inheritance(_) => "inheritance",
            Relationship::Realization(_) => "realization",
            Relationship::Association(_) => "association",
        }
    }
}

/// Class diagram database
///
/// Every mutation goes through a method that normalizes class names with
/// [`class_id`], so ids stored in relationships always resolve to a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UmlModel {
    classes: IndexMap<String, ClassEntity>,
    relationships: Vec<Relationship>,
}

impl UmlModel {
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
            relationships: Vec::new(),
        }
    }

    /// Add or redefine a class.
    ///
    /// Redefining an existing id replaces its name, stereotype and members
    /// but keeps the class where it was first declared.
    pub fn add_class(&mut self, class: ClassEntity) {
        match self.classes.get_mut(&class.id) {
            Some(existing) => *existing = class,
            None => {
                self.classes.insert(class.id.clone(), class);
            }
        }
    }

    /// Get the id for `name`, creating an empty class if it is unknown
    pub fn ensure_class(&mut self, name: &str) -> String {
        let id = class_id(name);
        if !self.classes.contains_key(&id) {
            self.classes.insert(id.clone(), ClassEntity::new(name));
        }
        id
    }

    /// Tag a class with a stereotype, creating the class if needed
    pub fn set_stereotype(&mut self, name: &str, stereotype: Stereotype) {
        let id = self.ensure_class(name);
        if let Some(class) = self.classes.get_mut(&id) {
            class.stereotype = stereotype;
        }
    }

    pub fn add_inheritance(&mut self, parent: &str, child: &str) {
        let parent = self.ensure_class(parent);
        let child = self.ensure_class(child);
        self.relationships
            .push(Relationship::Inheritance(Inheritance { parent, child }));
    }

    /// Record a realization; the implementer is created before the interface,
    /// matching the left-to-right order of `Circle ..|> Shape`.
    pub fn add_realization(&mut self, interface: &str, implementer: &str) {
        let implementer = self.ensure_class(implementer);
        let interface = self.ensure_class(interface);
        self.relationships.push(Relationship::Realization(Realization {
            interface,
            implementer,
        }));
    }

    /// Record an association; `None` multiplicities default to `"1"`
    pub fn add_association(
        &mut self,
        source: &str,
        target: &str,
        source_multiplicity: Option<&str>,
        target_multiplicity: Option<&str>,
    ) {
        let source = self.ensure_class(source);
        let target = self.ensure_class(target);
        self.relationships
            .push(Relationship::Association(Association {
                source,
                target,
                source_multiplicity: source_multiplicity
                    .unwrap_or(DEFAULT_MULTIPLICITY)
                    .to_string(),
                target_multiplicity: target_multiplicity
                    .unwrap_or(DEFAULT_MULTIPLICITY)
                    .to_string(),
            }));
    }

    /// Classes in declaration order
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.classes.values()
    }

    /// Look a class up by name or id
    pub fn get_class(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.get(&class_id(name))
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(&class_id(name))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relationships.is_empty()
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn has_relationships(&self) -> bool {
        !self.relationships.is_empty()
    }

    pub fn inheritances(&self) -> impl Iterator<Item = &Inheritance> {
        self.relationships.iter().filter_map(|r| match r {
            Relationship::Inheritance(i) => Some(i),
            _ => None,
        })
    }

    pub fn realizations(&self) -> impl Iterator<Item = &Realization> {
        self.relationships.iter().filter_map(|r| match r {
            Relationship::Realization(r) => Some(r),
            _ => None,
        })
    }

    pub fn associations(&self) -> impl Iterator<Item = &Association> {
        self.relationships.iter().filter_map(|r| match r {
            Relationship::Association(a) => Some(a),
            _ => None,
        })
    }

    /// Count the relationships a class depends on others through.
    ///
    /// Counts inheritances where the class is the parent and associations on
    /// either side. Realizations never count toward either endpoint.
    pub fn dependency_count(&self, id: &str) -> usize {
        self.relationships
            .iter()
            .filter(|r| match r {
                Relationship::Inheritance(i) => i.parent == id,
                Relationship::Realization(_) => false,
                Relationship::Association(a) => a.source == id || a.target == id,
            })
            .count()
    }

    /// The class that names the generated schema.
    ///
    /// Picks the class with the lowest [`dependency_count`](Self::dependency_count);
    /// ties go to the class declared first.
    pub fn designated_root(&self) -> Option<&ClassEntity> {
        let mut root: Option<(&ClassEntity, usize)> = None;
        for class in self.classes.values() {
            let count = self.dependency_count(&class.id);
            match root {
                Some((_, best)) if best <= count => {}
                _ => root = Some((class, count)),
            }
        }
        root.map(|(class, _)| class)
    }
}

impl Database for UmlModel {
    type Node = ClassEntity;
    type Edge = Relationship;

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.get_class(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.values()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relationships.iter()
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}
