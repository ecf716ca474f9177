//! Member classifier
//!
//! Turns one line of a class body into an attribute or a method. The
//! accepted shapes are deliberately narrow:
//!
//! - attribute: `+String name`, `-int age` (sign, type, name)
//! - method: `+eat() void`, `-digest() bool` (sign, name, `()`, return type)
//!
//! Anything else is kept verbatim as a public member with the default type,
//! so classification never fails.

use chumsky::prelude::*;
use tracing::trace;

use super::database::{Attribute, Method, Visibility};
use crate::core::chumsky_utils::{inline_whitespace_required, word};

/// A classified class-body line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Attribute(Attribute),
    Method(Method),
}

/// Classifies class-body lines into attributes and methods
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberClassifier;

impl MemberClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Lines with both parentheses are methods; everything else is an attribute
    pub fn is_method_line(line: &str) -> bool {
        line.contains('(') && line.contains(')')
    }

    /// Classify one body line
    pub fn classify(&self, line: &str) -> Member {
        if Self::is_method_line(line) {
            Member::Method(self.parse_method(line))
        } else {
            Member::Attribute(self.parse_attribute(line))
        }
    }

    /// Classify a whole body, keeping attributes and methods in line order
    pub fn classify_body<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> (Vec<Attribute>, Vec<Method>) {
        let mut attributes = Vec::new();
        let mut methods = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.classify(line) {
                Member::Attribute(a) => attributes.push(a),
                Member::Method(m) => methods.push(m),
            }
        }
        (attributes, methods)
    }

    /// Parse `[+-]Type name`, falling back to a verbatim public attribute
    pub fn parse_attribute(&self, line: &str) -> Attribute {
        let line = line.trim();
        match Self::attribute_parser().parse(line).into_result() {
            Ok((visibility, attr_type, name)) => Attribute::new(name)
                .with_type(attr_type)
                .with_visibility(visibility),
            Err(_) => {
                trace!(line, "attribute line kept verbatim");
                Attribute::new(line)
            }
        }
    }

    /// Parse `[+-]name() ReturnType`, falling back to a verbatim public method
    pub fn parse_method(&self, line: &str) -> Method {
        let line = line.trim();
        match Self::method_parser().parse(line).into_result() {
            Ok((visibility, name, return_type)) => Method::new(name)
                .with_return_type(return_type)
                .with_visibility(visibility),
            Err(_) => {
                trace!(line, "method line kept verbatim");
                Method::new(line)
            }
        }
    }

    fn visibility<'src>() -> impl Parser<'src, &'src str, Visibility> + Clone {
        just('+')
            .to(Visibility::Public)
            .or(just('-').to(Visibility::Private))
    }

    fn attribute_parser<'src>(
    ) -> impl Parser<'src, &'src str, (Visibility, &'src str, &'src str)> + Clone {
        Self::visibility()
            .then(word())
            .then_ignore(inline_whitespace_required())
            .then(word())
            .then_ignore(end())
            .map(|((visibility, attr_type), name)| (visibility, attr_type, name))
    }

    fn method_parser<'src>(
    ) -> impl Parser<'src, &'src str, (Visibility, &'src str, &'src str)> + Clone {
        Self::visibility()
            .then(word())
            .then_ignore(just("()"))
            .then_ignore(inline_whitespace_required())
            .then(word())
            .then_ignore(end())
            .map(|((visibility, name), return_type)| (visibility, name, return_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_attribute() {
        let attr = MemberClassifier::new().parse_attribute("+String name");
        assert_eq!(attr.name, "name");
        assert_eq!(attr.attr_type, "String");
        assert_eq!(attr.visibility, Visibility::Public);
    }

    #[test]
    fn test_private_attribute() {
        let attr = MemberClassifier::new().parse_attribute("-int  edad");
        assert_eq!(attr.name, "edad");
        assert_eq!(attr.attr_type, "int");
        assert_eq!(attr.visibility, Visibility::Private);
    }

    #[test]
    fn test_attribute_fallback_is_verbatim() {
        let classifier = MemberClassifier::new();

        let attr = classifier.parse_attribute("name: string");
        assert_eq!(attr.name, "name: string");
        assert_eq!(attr.attr_type, "string");
        assert_eq!(attr.visibility, Visibility::Public);

        // Protected is outside the accepted grammar
        let attr = classifier.parse_attribute("#int secret");
        assert_eq!(attr.name, "#int secret");
        assert_eq!(attr.visibility, Visibility::Public);

        let attr = classifier.parse_attribute("+List~Dog~ dogs");
        assert_eq!(attr.name, "+List~Dog~ dogs");
    }

    #[test]
    fn test_method() {
        let method = MemberClassifier::new().parse_method("+eat() void");
        assert_eq!(method.name, "eat");
        assert_eq!(method.return_type, "void");
        assert_eq!(method.visibility, Visibility::Public);

        let method = MemberClassifier::new().parse_method("-validar() boolean");
        assert_eq!(method.name, "validar");
        assert_eq!(method.return_type, "boolean");
        assert_eq!(method.visibility, Visibility::Private);
    }

    #[test]
    fn test_method_fallback_is_verbatim() {
        let classifier = MemberClassifier::new();

        let method = classifier.parse_method("+eat()");
        assert_eq!(method.name, "+eat()");
        assert_eq!(method.return_type, "void");

        let method = classifier.parse_method("+feed(food: Food) void");
        assert_eq!(method.name, "+feed(food: Food) void");
        assert_eq!(method.visibility, Visibility::Public);
    }

    #[test]
    fn test_classify_routes_by_parentheses() {
        let classifier = MemberClassifier::new();
        assert!(matches!(classifier.classify("+bark() void"), Member::Method(_)));
        assert!(matches!(classifier.classify("+String breed"), Member::Attribute(_)));
        // Only an opening parenthesis is not a method
        assert!(matches!(classifier.classify("+open( x"), Member::Attribute(_)));
    }

    #[test]
    fn test_classify_body_keeps_order() {
        let (attributes, methods) = MemberClassifier::new().classify_body([
            "+String name",
            "",
            "+eat() void",
            "+int age",
            "-sleep() void",
        ]);

        let attr_names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
        let method_names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(attr_names, vec!["name", "age"]);
        assert_eq!(method_names, vec!["eat", "sleep"]);
    }
}
