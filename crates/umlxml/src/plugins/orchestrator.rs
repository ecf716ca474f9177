//! Plugin orchestrator for coordinating the transformation pipeline
//!
//! The orchestrator manages the flow of data through all plugins:
//! Detector → Parser → Model → {XML renderer, DTD renderer}

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{Database, Detector, Diagram, DiagramError, Renderer};
use crate::plugins::class::{
    ClassDiagram, ClassParser, Diagnostic, DtdRenderer, DtdStyle, UmlModel, XmlRenderer,
};

/// Everything produced from one diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transformation {
    pub model: UmlModel,
    pub xml: String,
    pub dtd: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Plugin orchestrator that coordinates the entire pipeline
///
/// Detectors are registered by name. Parser, model and XML renderer come
/// from [`ClassDiagram`], the only supported diagram type; the DTD renderer
/// reads the same model.
pub struct Orchestrator {
    detectors: HashMap<String, Arc<dyn Detector>>,
    parser: ClassParser,
    xml_renderer: XmlRenderer,
    dtd_renderer: DtdRenderer,
}

impl Orchestrator {
    /// Create an orchestrator with no detectors registered
    pub fn new() -> Self {
        Self {
            detectors: HashMap::new(),
            parser: ClassDiagram::create_parser(),
            xml_renderer: ClassDiagram::create_renderer(),
            dtd_renderer: DtdRenderer::new(),
        }
    }

    /// Create an orchestrator with the class diagram detector registered
    pub fn with_class_plugins() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register_default_detectors();
        orchestrator
    }

    /// Use a specific DTD output style
    pub fn with_dtd_style(mut self, style: DtdStyle) -> Self {
        self.dtd_renderer = DtdRenderer::with_style(style);
        self
    }

    pub fn dtd_style(&self) -> DtdStyle {
        self.dtd_renderer.style()
    }

    /// Register the built-in detectors
    pub fn register_default_detectors(&mut self) {
        self.register_detector(ClassDiagram::name().to_string(), ClassDiagram::detector());
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, name: String, detector: Arc<dyn Detector>) {
        self.detectors.insert(name, detector);
    }

    /// Get available detector names
    pub fn get_detectors(&self) -> Vec<String> {
        let mut names: Vec<String> = self.detectors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect diagram type from input text
    ///
    /// The detector with the highest confidence wins.
    pub fn detect_diagram_type(&self, input: &str) -> Result<String> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        trace!("Starting diagram type detection");

        let mut best: Option<(&str, f64)> = None;
        for (name, detector) in &self.detectors {
            let confidence = detector.confidence(input);
            trace!(detector = name, confidence, "Checking detector");
            if !detector.detect(input) {
                continue;
            }
            match best {
                Some((_, c)) if c >= confidence => {}
                _ => best = Some((name.as_str(), confidence)),
            }
        }

        match best {
            Some((name, confidence)) => {
                info!(detector = name, confidence, "Detected diagram type");
                Ok(name.to_string())
            }
            None => {
                warn!("No suitable detector found for input");
                Err(anyhow::anyhow!("No suitable detector found for input"))
            }
        }
    }

    /// Run detection, then the class diagram pipeline
    pub fn process(&self, input: &str) -> Result<Transformation> {
        let process_span = span!(Level::INFO, "process_diagram", input_len = input.len());
        let _enter = process_span.enter();

        info!("Starting transformation pipeline");

        let detect_span = span!(Level::DEBUG, "pipeline_detect");
        let detect_enter = detect_span.enter();
        let diagram_type = self.detect_diagram_type(input)?;
        debug!(diagram_type, "Diagram type detected");
        drop(detect_enter);

        if diagram_type != ClassDiagram::name() {
            warn!(diagram_type, "Unsupported diagram type");
            return Err(DiagramError::UnknownDiagramType { diagram_type }.into());
        }

        self.process_class(input)
    }

    /// Run the class diagram pipeline directly (skip detection)
    pub fn process_class(&self, input: &str) -> Result<Transformation> {
        let class_span = span!(Level::INFO, "process_class_diagram", input_len = input.len());
        let _enter = class_span.enter();

        let parse_span = span!(Level::DEBUG, "pipeline_parse");
        let parse_enter = parse_span.enter();
        let mut model = ClassDiagram::create_database();
        let diagnostics = self.parser.parse_into(input, &mut model)?;
        debug!(
            classes = model.node_count(),
            relationships = model.edge_count(),
            diagnostics = diagnostics.len(),
            "Parsing completed"
        );
        drop(parse_enter);

        // Both generators read the same immutable model
        let render_span = span!(Level::DEBUG, "pipeline_render");
        let render_enter = render_span.enter();
        let xml = self.xml_renderer.render(&model)?;
        let dtd = self.dtd_renderer.render(&model)?;
        debug!(xml_len = xml.len(), dtd_len = dtd.len(), "Rendering completed");
        drop(render_enter);

        info!("Pipeline completed successfully");

        Ok(Transformation {
            model,
            xml,
            dtd,
            diagnostics,
        })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
