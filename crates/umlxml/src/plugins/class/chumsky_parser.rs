//! Class diagram statement grammar using chumsky
//!
//! Each function here parses exactly one trimmed line. The line-oriented
//! state machine in `parser.rs` decides which grammar to try; this module
//! only knows the shapes.
//!
//! Relationship lines are dispatched on their literal marker, tested in a
//! fixed precedence: `<|--`, then `..|>`, then `--`/`-->`. Once a marker is
//! found only that relationship's grammar is attempted, so an inheritance
//! line can never be misread as an association. Associations have two
//! rules, tried in order:
//!
//! 1. `Name "m1" --> "m2" Name` (both multiplicities quoted)
//! 2. `Name --> Name` (multiplicities default to `"1"`)

use chumsky::prelude::*;

use crate::core::chumsky_utils::{
    inline_whitespace, inline_whitespace_required, quoted, trailing_label, word,
};

/// Marker for inheritance: `Parent <|-- Child`
pub const INHERITANCE_MARKER: &str = "<|--";

/// Marker for realization: `Implementer ..|> Interface`
pub const REALIZATION_MARKER: &str = "..|>";

/// Marker shared by both association connectors (`--`, `-->`)
pub const ASSOCIATION_MARKER: &str = "--";

/// A `class Name ...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClassHeader {
    pub name: String,
    /// Text of a `<<stereotype>>` marker on the header line
    pub stereotype: Option<String>,
    /// The line contains `{`
    pub opens_body: bool,
    /// Text between `{` and `}` (or end of line) on the header line
    pub inline_body: Option<String>,
    /// The line also contains the closing `}`
    pub closes_body: bool,
}

/// A relationship line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRelationship {
    Inheritance {
        parent: String,
        child: String,
    },
    Realization {
        implementer: String,
        interface: String,
    },
    Association {
        source: String,
        target: String,
        source_multiplicity: Option<String>,
        target_multiplicity: Option<String>,
    },
}

impl ParsedRelationship {
    /// Both class names, in the order they appear on the line
    pub fn class_names(&self) -> [&str; 2] {
        match self {
            ParsedRelationship::Inheritance { parent, child } => [parent.as_str(), child.as_str()],
            ParsedRelationship::Realization {
                implementer,
                interface,
            } => [implementer.as_str(), interface.as_str()],
            ParsedRelationship::Association { source, target, .. } => {
                [source.as_str(), target.as_str()]
            }
        }
    }
}

/// Outcome of looking at a line as a relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipLine {
    /// No relationship marker on the line
    NoMarker,
    /// A marker was found and its grammar matched
    Parsed(ParsedRelationship),
    /// A marker was found but the line does not fit its grammar
    Malformed { marker: &'static str },
}

/// Chumsky-based class diagram statement parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ChumskyClassParser;

impl ChumskyClassParser {
    pub fn new() -> Self {
        Self
    }

    /// Whether the line starts a class declaration
    pub fn is_class_header(line: &str) -> bool {
        line.strip_prefix("class")
            .is_some_and(|rest| rest.starts_with([' ', '\t']))
    }

    /// Parse `class Name [<<stereotype>>] [{ [body] [}]]`
    pub fn parse_class_header(&self, line: &str) -> Option<ParsedClassHeader> {
        Self::class_header_parser()
            .parse(line.trim())
            .into_result()
            .ok()
    }

    /// Parse a line that is only a stereotype marker, e.g. `<<interface>>`
    pub fn parse_stereotype_line(&self, line: &str) -> Option<String> {
        Self::stereotype_marker()
            .then_ignore(end())
            .parse(line.trim())
            .into_result()
            .ok()
            .map(str::to_string)
    }

    /// Parse a Mermaid annotation statement, e.g. `<<interface>> Shape`
    pub fn parse_annotation(&self, line: &str) -> Option<(String, String)> {
        Self::stereotype_marker()
            .then_ignore(inline_whitespace())
            .then(word())
            .then_ignore(end())
            .parse(line.trim())
            .into_result()
            .ok()
            .map(|(stereotype, class)| (stereotype.to_string(), class.to_string()))
    }

    /// Look at a line as a relationship, honouring marker precedence
    pub fn parse_relationship(&self, line: &str) -> RelationshipLine {
        let line = line.trim();

        if line.contains(INHERITANCE_MARKER) {
            return Self::finish(
                Self::binary_parser(INHERITANCE_MARKER)
                    .parse(line)
                    .into_result()
                    .ok()
                    .map(|(parent, child)| ParsedRelationship::Inheritance {
                        parent: parent.to_string(),
                        child: child.to_string(),
                    }),
                INHERITANCE_MARKER,
            );
        }

        if line.contains(REALIZATION_MARKER) {
            return Self::finish(
                Self::binary_parser(REALIZATION_MARKER)
                    .parse(line)
                    .into_result()
                    .ok()
                    .map(|(implementer, interface)| ParsedRelationship::Realization {
                        implementer: implementer.to_string(),
                        interface: interface.to_string(),
                    }),
                REALIZATION_MARKER,
            );
        }

        if line.contains(ASSOCIATION_MARKER) {
            return Self::finish(self.parse_association(line), ASSOCIATION_MARKER);
        }

        RelationshipLine::NoMarker
    }

    /// Association rules in precedence order: annotated first, then bare
    fn parse_association(&self, line: &str) -> Option<ParsedRelationship> {
        if let Ok((((source, source_mult), target_mult), target)) =
            Self::annotated_association_parser().parse(line).into_result()
        {
            return Some(ParsedRelationship::Association {
                source: source.to_string(),
                target: target.to_string(),
                source_multiplicity: Some(source_mult.trim().to_string()),
                target_multiplicity: Some(target_mult.trim().to_string()),
            });
        }

        Self::bare_association_parser()
            .parse(line)
            .into_result()
            .ok()
            .map(|(source, target)| ParsedRelationship::Association {
                source: source.to_string(),
                target: target.to_string(),
                source_multiplicity: None,
                target_multiplicity: None,
            })
    }

    fn finish(parsed: Option<ParsedRelationship>, marker: &'static str) -> RelationshipLine {
        match parsed {
            Some(rel) => RelationshipLine::Parsed(rel),
            None => RelationshipLine::Malformed { marker },
        }
    }

    fn stereotype_marker<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
        just("<<")
            .ignore_then(none_of('>').repeated().at_least(1).to_slice())
            .then_ignore(just(">>"))
    }

    fn class_header_parser<'src>() -> impl Parser<'src, &'src str, ParsedClassHeader> + Clone {
        let ws = inline_whitespace();

        // `{ body` with an optional closing `}`; anything after it is ignored
        let body = just('{')
            .ignore_then(none_of('}').repeated().to_slice())
            .then(just('}').ignore_then(any().repeated()).or_not());

        just("class")
            .ignore_then(inline_whitespace_required())
            .ignore_then(word())
            .then_ignore(ws.clone())
            .then(Self::stereotype_marker().or_not())
            .then_ignore(ws)
            // Tolerate decorations we do not model, e.g. `:::cssClass`
            .then_ignore(none_of("{<").repeated())
            .then(body.or_not())
            .then_ignore(end())
            .map(|((name, stereotype), body)| {
                let (inline_body, closes_body) = match body {
                    Some((text, close)) => {
                        let text = text.trim();
                        (
                            (!text.is_empty()).then(|| text.to_string()),
                            close.is_some(),
                        )
                    }
                    None => (None, false),
                };
                ParsedClassHeader {
                    name: name.to_string(),
                    stereotype: stereotype.map(str::to_string),
                    opens_body: body.is_some(),
                    inline_body,
                    closes_body,
                }
            })
    }

    /// `Name <marker> Name [: label]`
    fn binary_parser<'src>(
        marker: &'static str,
    ) -> impl Parser<'src, &'src str, (&'src str, &'src str)> + Clone {
        let ws = inline_whitespace();

        word()
            .then_ignore(ws.clone())
            .then_ignore(just(marker))
            .then_ignore(ws)
            .then(word())
            .then_ignore(trailing_label())
            .then_ignore(end())
    }

    fn connector<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
        just("-->").or(just("--")).ignored()
    }

    /// `Name "m1" --> "m2" Name [: label]`
    #[allow(clippy::type_complexity)]
    fn annotated_association_parser<'src>(
    ) -> impl Parser<'src, &'src str, (((&'src str, &'src str), &'src str), &'src str)> + Clone
    {
        let ws = inline_whitespace();

        word()
            .then_ignore(ws.clone())
            .then(quoted())
            .then_ignore(ws.clone())
            .then_ignore(Self::connector())
            .then_ignore(ws.clone())
            .then(quoted())
            .then_ignore(ws)
            .then(word())
            .then_ignore(trailing_label())
            .then_ignore(end())
    }

    /// `Name --> Name [: label]`
    fn bare_association_parser<'src>(
    ) -> impl Parser<'src, &'src str, (&'src str, &'src str)> + Clone {
        let ws = inline_whitespace();

        word()
            .then_ignore(ws.clone())
            .then_ignore(Self::connector())
            .then_ignore(ws)
            .then(word())
            .then_ignore(trailing_label())
            .then_ignore(end())
    }
}
