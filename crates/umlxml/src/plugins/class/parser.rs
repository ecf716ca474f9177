//! Class diagram parser
//!
//! A line-oriented state machine over trimmed, non-blank lines. Statement
//! shapes come from [`ChumskyClassParser`], class bodies are classified by
//! [`MemberClassifier`]. A second pass re-reads every closed `class ... { }`
//! block from the raw text and writes it back authoritatively.

use tracing::{debug, info, info_span, trace};

use super::chumsky_parser::{
    ChumskyClassParser, ParsedClassHeader, ParsedRelationship, RelationshipLine,
};
use super::database::{class_id, is_xml_name, ClassEntity, Stereotype, UmlModel};
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::member::MemberClassifier;
use crate::core::{DiagramError, Parser};

/// Output of a successful parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDiagram {
    pub model: UmlModel,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDiagram {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// A class whose body is still being read
#[derive(Debug)]
struct OpenClass {
    name: String,
    stereotype: Stereotype,
    lines: Vec<String>,
    start_line: usize,
}

impl OpenClass {
    fn new(header: &ParsedClassHeader, stereotype: Stereotype, start_line: usize) -> Self {
        Self {
            name: header.name.clone(),
            stereotype,
            lines: header.inline_body.iter().cloned().collect(),
            start_line,
        }
    }
}

#[derive(Debug)]
enum ScanState {
    BeforeHeader,
    Scanning,
    InClassBody(OpenClass),
}

/// What a line means while a class body is open
#[derive(Debug)]
enum BodyLine {
    Member(String),
    Stereotype(String),
    Relationship(ParsedRelationship),
    /// Closing brace, with any member text written before it
    Close(Option<String>),
    /// Another `class` header interrupting the body
    NewClass,
}

/// Class diagram parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassParser {
    statements: ChumskyClassParser,
    members: MemberClassifier,
}

impl ClassParser {
    pub fn new() -> Self {
        Self {
            statements: ChumskyClassParser::new(),
            members: MemberClassifier::new(),
        }
    }

    /// Whether a trimmed line is the diagram header
    pub fn is_header(line: &str) -> bool {
        line.to_lowercase().starts_with("classdiagram")
    }

    /// Parse diagram text into a fresh model plus any diagnostics.
    ///
    /// Blank input yields an empty model. Non-blank input without a
    /// `classDiagram` header is the only error.
    pub fn parse_diagram(&self, input: &str) -> Result<ParsedDiagram, DiagramError> {
        let span = info_span!("parse_class_diagram", input_len = input.len());
        let _enter = span.enter();

        let mut model = UmlModel::new();
        let diagnostics = self.parse_into(input, &mut model)?;

        info!(
            classes = model.class_count(),
            relationships = model.relationship_count(),
            diagnostics = diagnostics.len(),
            "Parsed class diagram"
        );

        Ok(ParsedDiagram { model, diagnostics })
    }

    /// Parse diagram text into an existing model
    pub fn parse_into(
        &self,
        input: &str,
        model: &mut UmlModel,
    ) -> Result<Vec<Diagnostic>, DiagramError> {
        let mut diagnostics = Vec::new();
        if input.trim().is_empty() {
            debug!("Blank input, nothing to parse");
            return Ok(diagnostics);
        }

        let mut state = ScanState::BeforeHeader;
        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("%%") {
                continue;
            }
            let line_no = index + 1;
            trace!(line_no, line, "scan");

            state = match state {
                ScanState::BeforeHeader if Self::is_header(line) => ScanState::Scanning,
                ScanState::BeforeHeader => ScanState::BeforeHeader,
                ScanState::Scanning => self.scan_statement(line, line_no, model, &mut diagnostics),
                ScanState::InClassBody(open) => {
                    self.scan_body_line(open, line, line_no, model, &mut diagnostics)
                }
            };
        }

        match state {
            ScanState::BeforeHeader => return Err(DiagramError::MissingHeader),
            ScanState::InClassBody(open) => {
                self.close_unterminated(open, "end of input", model, &mut diagnostics)
            }
            ScanState::Scanning => {}
        }

        self.extract_blocks(input, model);

        Ok(diagnostics)
    }

    /// Handle one statement outside any class body
    fn scan_statement(
        &self,
        line: &str,
        line_no: usize,
        model: &mut UmlModel,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ScanState {
        if ChumskyClassParser::is_class_header(line) {
            let Some(header) = self.statements.parse_class_header(line) else {
                report(
                    diagnostics,
                    Diagnostic::new(
                        line_no,
                        DiagnosticKind::UnrecognizedStatement,
                        format!("`{line}` is not a valid class declaration"),
                    ),
                );
                return ScanState::Scanning;
            };

            let stereotype = header
                .stereotype
                .as_deref()
                .map(|s| resolve_stereotype(s, line_no, diagnostics))
                .unwrap_or_default();
            check_class_name(&header.name, line_no, model, diagnostics);

            if !header.opens_body {
                let id = model.ensure_class(&header.name);
                if !stereotype.is_none() {
                    model.set_stereotype(&id, stereotype);
                }
                trace!(class = %header.name, "class declaration without body");
                return ScanState::Scanning;
            }

            let open = OpenClass::new(&header, stereotype, line_no);
            if header.closes_body {
                self.emit_class(open, model);
                return ScanState::Scanning;
            }
            return ScanState::InClassBody(open);
        }

        if line.starts_with('}') {
            report(
                diagnostics,
                Diagnostic::new(
                    line_no,
                    DiagnosticKind::UnexpectedClosingBrace,
                    "closing brace without an open class body",
                ),
            );
            return ScanState::Scanning;
        }

        if line.starts_with("<<") {
            match self.statements.parse_annotation(line) {
                Some((stereotype, class)) => {
                    let stereotype = resolve_stereotype(&stereotype, line_no, diagnostics);
                    check_class_name(&class, line_no, model, diagnostics);
                    let id = model.ensure_class(&class);
                    if !stereotype.is_none() {
                        model.set_stereotype(&id, stereotype);
                    }
                }
                None => report(
                    diagnostics,
                    Diagnostic::new(
                        line_no,
                        DiagnosticKind::UnrecognizedStatement,
                        format!("`{line}` is not a valid stereotype annotation"),
                    ),
                ),
            }
            return ScanState::Scanning;
        }

        match self.statements.parse_relationship(line) {
            RelationshipLine::Parsed(rel) => {
                check_relationship_names(&rel, None, line_no, model, diagnostics);
                apply_relationship(model, rel)
            }
            RelationshipLine::Malformed { marker } => report(
                diagnostics,
                Diagnostic::new(
                    line_no,
                    DiagnosticKind::MalformedRelationship,
                    format!("`{line}` has a `{marker}` marker but does not match its grammar"),
                ),
            ),
            RelationshipLine::NoMarker => report(
                diagnostics,
                Diagnostic::new(
                    line_no,
                    DiagnosticKind::UnrecognizedStatement,
                    format!("`{line}` was ignored"),
                ),
            ),
        }
        ScanState::Scanning
    }

    /// Handle one line while a class body is open
    fn scan_body_line(
        &self,
        mut open: OpenClass,
        line: &str,
        line_no: usize,
        model: &mut UmlModel,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ScanState {
        match self.classify_body_line(line) {
            BodyLine::Member(text) => {
                open.lines.push(text);
                ScanState::InClassBody(open)
            }
            BodyLine::Stereotype(text) => {
                open.stereotype = resolve_stereotype(&text, line_no, diagnostics);
                ScanState::InClassBody(open)
            }
            BodyLine::Relationship(rel) => {
                // The open class was already checked at its header
                let open_name = Some(open.name.as_str());
                check_relationship_names(&rel, open_name, line_no, model, diagnostics);
                apply_relationship(model, rel);
                ScanState::InClassBody(open)
            }
            BodyLine::Close(before) => {
                open.lines.extend(before);
                self.emit_class(open, model);
                ScanState::Scanning
            }
            BodyLine::NewClass => {
                let reason = format!("a new class declaration at line {line_no}");
                self.close_unterminated(open, &reason, model, diagnostics);
                self.scan_statement(line, line_no, model, diagnostics)
            }
        }
    }

    fn classify_body_line(&self, line: &str) -> BodyLine {
        if ChumskyClassParser::is_class_header(line) {
            return BodyLine::NewClass;
        }
        if let Some(pos) = line.find('}') {
            let before = line[..pos].trim();
            return BodyLine::Close((!before.is_empty()).then(|| before.to_string()));
        }
        if let Some(stereotype) = self.statements.parse_stereotype_line(line) {
            return BodyLine::Stereotype(stereotype);
        }
        // Only a line that fully parses as a relationship leaves the body
        if let RelationshipLine::Parsed(rel) = self.statements.parse_relationship(line) {
            return BodyLine::Relationship(rel);
        }
        BodyLine::Member(line.to_string())
    }

    fn close_unterminated(
        &self,
        open: OpenClass,
        reason: &str,
        model: &mut UmlModel,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        report(
            diagnostics,
            Diagnostic::new(
                open.start_line,
                DiagnosticKind::UnterminatedClass,
                format!(
                    "class `{}` body was not closed before {reason}; kept {} member line(s)",
                    open.name,
                    open.lines.len()
                ),
            ),
        );
        self.emit_class(open, model);
    }

    /// Classify the buffered body and write the class into the model
    fn emit_class(&self, open: OpenClass, model: &mut UmlModel) {
        let (attributes, methods) = self
            .members
            .classify_body(open.lines.iter().map(String::as_str));

        // A body without its own stereotype keeps one set by an annotation
        let stereotype = if open.stereotype.is_none() {
            model
                .get_class(&open.name)
                .map(|c| c.stereotype)
                .unwrap_or_default()
        } else {
            open.stereotype
        };

        trace!(
            class = %open.name,
            attributes = attributes.len(),
            methods = methods.len(),
            "emit class"
        );
        model.add_class(
            ClassEntity::new(open.name)
                .with_stereotype(stereotype)
                .with_attributes(attributes)
                .with_methods(methods),
        );
    }

    /// Re-read every closed `class Name { ... }` block from the raw text.
    ///
    /// A block counts only if its `}` comes before the next `class` header.
    /// Relationship lines inside a block were already recorded by the scan
    /// and are not turned into members here.
    fn extract_blocks(&self, input: &str, model: &mut UmlModel) {
        let mut open: Option<OpenClass> = None;
        let mut extracted = 0usize;
        // Stereotype problems were already reported by the scan
        let mut ignored = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("%%") {
                continue;
            }
            let line_no = index + 1;

            let Some(mut current) = open.take() else {
                if let Some(header) = ChumskyClassParser::is_class_header(line)
                    .then(|| self.statements.parse_class_header(line))
                    .flatten()
                    .filter(|h| h.opens_body)
                {
                    let stereotype = header
                        .stereotype
                        .as_deref()
                        .map(|s| resolve_stereotype(s, line_no, &mut ignored))
                        .unwrap_or_default();
                    let block = OpenClass::new(&header, stereotype, line_no);
                    if header.closes_body {
                        self.emit_class(block, model);
                        extracted += 1;
                    } else {
                        open = Some(block);
                    }
                }
                continue;
            };

            match self.classify_body_line(line) {
                BodyLine::Member(text) => current.lines.push(text),
                BodyLine::Stereotype(text) => {
                    current.stereotype = resolve_stereotype(&text, line_no, &mut ignored)
                }
                BodyLine::Relationship(_) => {}
                BodyLine::Close(before) => {
                    current.lines.extend(before);
                    self.emit_class(current, model);
                    extracted += 1;
                    continue;
                }
                BodyLine::NewClass => {
                    trace!(class = %current.name, "block skipped, never closed");
                    // The interrupting header may open a block of its own
                    if let Some(header) = self
                        .statements
                        .parse_class_header(line)
                        .filter(|h| h.opens_body)
                    {
                        let stereotype = header
                            .stereotype
                            .as_deref()
                            .map(|s| resolve_stereotype(s, line_no, &mut ignored))
                            .unwrap_or_default();
                        let block = OpenClass::new(&header, stereotype, line_no);
                        if header.closes_body {
                            self.emit_class(block, model);
                            extracted += 1;
                        } else {
                            open = Some(block);
                        }
                    }
                    continue;
                }
            }
            open = Some(current);
        }

        debug!(blocks = extracted, "Block extraction pass finished");
    }
}

/// Record a diagnostic and log it
fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    debug!(
        line = diagnostic.line,
        kind = %diagnostic.kind,
        "{}",
        diagnostic.message
    );
    diagnostics.push(diagnostic);
}

fn resolve_stereotype(text: &str, line_no: usize, diagnostics: &mut Vec<Diagnostic>) -> Stereotype {
    match Stereotype::from_name(text) {
        Some(stereotype) => stereotype,
        None => {
            report(
                diagnostics,
                Diagnostic::new(
                    line_no,
                    DiagnosticKind::UnknownStereotype,
                    format!("`<<{text}>>` is not one of abstract, interface"),
                ),
            );
            Stereotype::None
        }
    }
}

/// Report a class whose id would not be a valid `ID` value, once, at the
/// line where it first appears
fn check_class_name(
    name: &str,
    line_no: usize,
    model: &UmlModel,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let id = class_id(name);
    if model.contains_class(&id) || is_xml_name(&id) {
        return;
    }
    report(
        diagnostics,
        Diagnostic::new(
            line_no,
            DiagnosticKind::InvalidXmlName,
            format!(
                "class `{name}` has id `{id}`, which is not a valid XML name; \
                 the XML will not validate against its DTD"
            ),
        ),
    );
}

fn check_relationship_names(
    rel: &ParsedRelationship,
    checked: Option<&str>,
    line_no: usize,
    model: &UmlModel,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut seen: Vec<String> = checked.map(class_id).into_iter().collect();
    for name in rel.class_names() {
        let id = class_id(name);
        if !seen.contains(&id) {
            check_class_name(name, line_no, model, diagnostics);
            seen.push(id);
        }
    }
}

fn apply_relationship(model: &mut UmlModel, rel: ParsedRelationship) {
    match rel {
        ParsedRelationship::Inheritance { parent, child } => {
            model.add_inheritance(&parent, &child)
        }
        ParsedRelationship::Realization {
            implementer,
            interface,
        } => model.add_realization(&interface, &implementer),
        ParsedRelationship::Association {
            source,
            target,
            source_multiplicity,
            target_multiplicity,
        } => model.add_association(
            &source,
            &target,
            source_multiplicity.as_deref(),
            target_multiplicity.as_deref(),
        ),
    }
}

impl Parser<UmlModel> for ClassParser {
    fn parse(&self, input: &str, database: &mut UmlModel) -> anyhow::Result<()> {
        self.parse_into(input, database)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.to_lowercase().contains("classdiagram")
    }
}
