//! Command-line interface for the umlxml utility
//!
//! Provides a CLI to convert Mermaid.js class diagrams into an XML document
//! and a DTD describing it.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use umlxml::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use umlxml::plugins::class::{template, Relationship, TEMPLATES};
use umlxml::plugins::Orchestrator;
use umlxml::{DtdStyle, ParsedDiagram, Transformation};

/// umlxml - Convert Mermaid.js class diagrams to XML and DTD
#[derive(Parser)]
#[command(name = "umlxml")]
#[command(about = "A Rust utility to convert Mermaid.js class diagrams to XML and DTD")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a class diagram to XML and/or DTD
    Convert {
        /// Input file containing the class diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout); with `--format both` the
        /// extension is replaced by .xml and .dtd
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which artifacts to produce
        #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,

        /// DTD flavour
        #[arg(long, value_enum, default_value_t = DtdStyleChoice::Pointers)]
        dtd_style: DtdStyleChoice,

        /// Skip diagram type detection (treat input as a class diagram)
        #[arg(long)]
        skip_detection: bool,
    },

    /// Parse a class diagram and print the model
    Parse {
        /// Input file to parse (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the model and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect diagram type in input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate class diagram syntax and report diagnostics
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print a built-in starter diagram
    Template {
        /// Template name (basic|inheritance|associations)
        name: Option<String>,

        /// List the available templates
        #[arg(long)]
        list: bool,

        /// Print the template list as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Artifacts produced by `convert`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Xml,
    Dtd,
    #[default]
    Both,
}

/// DTD styles selectable on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum DtdStyleChoice {
    /// Structural declarations plus one `ap<Class>` pointer per class
    #[default]
    Pointers,
    /// One element per class with attributes and associations as children
    ContentModel,
}

impl From<DtdStyleChoice> for DtdStyle {
    fn from(value: DtdStyleChoice) -> Self {
        match value {
            DtdStyleChoice::Pointers => DtdStyle::Pointers,
            DtdStyleChoice::ContentModel => DtdStyle::ContentModel,
        }
    }
}

#[derive(Serialize)]
struct TemplateInfo {
    name: &'static str,
    description: &'static str,
}

/// Main CLI application
pub struct UmlxmlApp {
    orchestrator: Orchestrator,
}

impl UmlxmlApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_dtd_style(DtdStyle::default())
    }

    pub fn with_dtd_style(style: DtdStyle) -> Self {
        Self {
            orchestrator: Orchestrator::with_class_plugins().with_dtd_style(style),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(self, cli: Cli) -> Result<()> {
        // Flags win over the environment; without either, stay quiet unless verbose
        let log_level = cli
            .log_level
            .map(|l| l.as_str().to_string())
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| if cli.verbose { "info" } else { "warn" }.to_string());

        let log_format = cli
            .log_format
            .map(|f| f.as_str().to_string())
            .or_else(|| std::env::var(LOG_FORMAT_ENV).ok());

        if let Err(e) = init_logging(Some(&log_level), log_format.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("umlxml v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                dtd_style,
                skip_detection,
            } => Self::with_dtd_style(dtd_style.into()).convert_command(
                input,
                output,
                format,
                skip_detection,
                cli.verbose,
            ),
            Commands::Parse { input, json } => self.parse_command(input, json, cli.verbose),
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Template { name, list, json } => self.template_command(name, list, json),
        }
    }

    /// Run the pipeline, with or without detection
    pub fn transform(&self, content: &str, skip_detection: bool) -> Result<Transformation> {
        if skip_detection {
            self.orchestrator.process_class(content)
        } else {
            self.orchestrator.process(content)
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: OutputFormat,
        skip_detection: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let result = self.transform(&content, skip_detection)?;
        report_diagnostics(&result);

        if verbose {
            eprintln!(
                "Converted {} classes and {} relationships",
                result.model.class_count(),
                result.model.relationship_count()
            );
        }

        match (format, output) {
            (OutputFormat::Xml, output) => self.write_output(output, &result.xml),
            (OutputFormat::Dtd, output) => self.write_output(output, &result.dtd),
            (OutputFormat::Both, Some(path)) if !is_stdio(&path) => {
                let (xml_path, dtd_path) = artifact_paths(&path);
                self.write_output(Some(xml_path.clone()), &result.xml)?;
                self.write_output(Some(dtd_path.clone()), &result.dtd)?;
                info!(xml = %xml_path.display(), dtd = %dtd_path.display(), "Wrote artifacts");
                Ok(())
            }
            (OutputFormat::Both, output) => {
                self.write_output(output, &format!("{}\n{}", result.xml, result.dtd))
            }
        }
    }

    /// Handle the parse command
    fn parse_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let parsed = umlxml::parse(&content)?;
        if json {
            let value = serde_json::json!({
                "model": parsed.model,
                "diagnostics": parsed.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print!("{}", summarize(&parsed));
        }
        Ok(())
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.orchestrator.detect_diagram_type(&content) {
            Ok(diagram_type) => {
                println!("{}", diagram_type);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect diagram type: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match umlxml::parse(&content) {
            Ok(parsed) => {
                print!("{}", validation_report(&parsed));
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid class diagram: {}", e);
                Err(e.into())
            }
        }
    }

    /// Handle the template command
    fn template_command(&self, name: Option<String>, list: bool, json: bool) -> Result<()> {
        match name {
            Some(name) if !list => {
                let found = template(&name).ok_or_else(|| {
                    anyhow!(
                        "Unknown template '{}' (available: {})",
                        name,
                        template_names().join(", ")
                    )
                })?;
                print!("{}", found.source);
                Ok(())
            }
            _ => {
                if json {
                    let infos: Vec<TemplateInfo> = TEMPLATES
                        .iter()
                        .map(|t| TemplateInfo {
                            name: t.name,
                            description: t.description,
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&infos)?);
                } else {
                    print!("{}", template_listing());
                }
                Ok(())
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if !is_stdio(&path) => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if !is_stdio(&path) => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
                debug!(path = %path.display(), bytes = content.len(), "Wrote output file");
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for UmlxmlApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Sibling `.xml` and `.dtd` paths for a combined output target
fn artifact_paths(path: &Path) -> (PathBuf, PathBuf) {
    (path.with_extension("xml"), path.with_extension("dtd"))
}

fn report_diagnostics(result: &Transformation) {
    for diagnostic in &result.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
}

fn template_names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}

fn template_listing() -> String {
    let mut out = String::from("Available templates:\n");
    for t in TEMPLATES {
        let _ = writeln!(out, "  {:<13} - {}", t.name, t.description);
    }
    out
}

/// Human-readable model summary for `parse`
fn summarize(parsed: &ParsedDiagram) -> String {
    let model = &parsed.model;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} classes, {} relationships",
        model.class_count(),
        model.relationship_count()
    );

    for class in model.classes() {
        let stereotype = class
            .stereotype
            .as_str()
            .map(|s| format!(" <<{}>>", s))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  class {} (id {}){}: {} attributes, {} methods",
            class.name,
            class.id,
            stereotype,
            class.attributes.len(),
            class.methods.len()
        );
    }

    for rel in model.relationships() {
        let _ = match rel {
            Relationship::Inheritance(i) => {
                writeln!(out, "  inheritance {} <|-- {}", i.parent, i.child)
            }
            Relationship::Realization(r) => {
                writeln!(out, "  realization {} ..|> {}", r.implementer, r.interface)
            }
            Relationship::Association(a) => writeln!(
                out,
                "  association {} \"{}\" --> \"{}\" {}",
                a.source, a.source_multiplicity, a.target_multiplicity, a.target
            ),
        };
    }

    for diagnostic in &parsed.diagnostics {
        let _ = writeln!(out, "  warning: {}", diagnostic);
    }
    out
}

/// Report printed by `validate`
fn validation_report(parsed: &ParsedDiagram) -> String {
    let mut out = String::new();
    for diagnostic in &parsed.diagnostics {
        let _ = writeln!(out, "warning: {}", diagnostic);
    }
    let counts = format!(
        "{} classes, {} relationships",
        parsed.model.class_count(),
        parsed.model.relationship_count()
    );
    let _ = if parsed.has_diagnostics() {
        writeln!(
            out,
            "✓ Valid class diagram ({}) with {} warning(s)",
            counts,
            parsed.diagnostics.len()
        )
    } else {
        writeln!(out, "✓ Valid class diagram ({})", counts)
    };
    out
}
