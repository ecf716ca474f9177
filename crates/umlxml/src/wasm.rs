//! WebAssembly bindings for umlxml
//!
//! Browser-facing wrappers used by the diagram editor. Only compiled for
//! `wasm32` targets.

use wasm_bindgen::prelude::*;

use crate::plugins::class::{DtdStyle, UmlModel};
use crate::plugins::Orchestrator;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Logs go to the browser console
    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn parse_model(input: &str) -> Result<UmlModel, JsValue> {
    crate::parse(input)
        .map(|parsed| parsed.model)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_style(style: Option<String>) -> Result<DtdStyle, JsValue> {
    match style {
        Some(style) => style.parse().map_err(|e: String| JsValue::from_str(&e)),
        None => Ok(DtdStyle::default()),
    }
}

/// Parse a class diagram and render it as XML
///
/// Throws a JavaScript error when the input has no `classDiagram` header.
/// Use [`transform_diagram_json`] to get both artifacts from one call.
#[wasm_bindgen]
pub fn generate_xml_from(input: &str) -> Result<String, JsValue> {
    let model = parse_model(input)?;
    crate::generate_xml(&model).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a class diagram and render it as a DTD
///
/// * `style` - `"pointers"` (default) or `"content-model"`
#[wasm_bindgen]
pub fn generate_dtd_from(input: &str, style: Option<String>) -> Result<String, JsValue> {
    let style = parse_style(style)?;
    let model = parse_model(input)?;
    crate::generate_dtd_with_style(&model, style).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Transform a class diagram and return JSON
///
/// # Returns
/// * JSON string with fields: xml, dtd, diagnostics, error
#[wasm_bindgen]
pub fn transform_diagram_json(input: &str, style: Option<String>) -> String {
    let style = match parse_style(style) {
        Ok(style) => style,
        Err(e) => {
            return serde_json::json!({
                "xml": "",
                "dtd": "",
                "diagnostics": [],
                "error": e.as_string().unwrap_or_default()
            })
            .to_string();
        }
    };

    let orchestrator = Orchestrator::new().with_dtd_style(style);
    match orchestrator.process_class(input) {
        Ok(result) => serde_json::json!({
            "xml": result.xml,
            "dtd": result.dtd,
            "diagnostics": result.diagnostics,
            "error": null
        })
        .to_string(),
        Err(e) => serde_json::json!({
            "xml": "",
            "dtd": "",
            "diagnostics": [],
            "error": e.to_string()
        })
        .to_string(),
    }
}
