//! Class diagram detector
//!
//! Identifies class diagram syntax from input text.

use super::parser::ClassParser;
use crate::core::Detector;

/// Detector for class diagram syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassDetector;

impl ClassDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for ClassDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        // Same rule the parser uses, so frontmatter or stray lines before
        // the header do not hide it
        if input.lines().map(str::trim).any(ClassParser::is_header) {
            return 1.0;
        }

        // A class body is the strongest marker short of the header
        let has_class_def = input
            .lines()
            .any(|line| line.trim_start().starts_with("class ") && line.contains('{'));
        if has_class_def {
            return 0.8;
        }

        // `-->` alone is too common (flowcharts use it), so only the
        // class-specific arrows count
        if input.contains("<|--") || input.contains("..|>") {
            return 0.7;
        }

        0.0
    }

    fn diagram_type(&self) -> &'static str {
        "class"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["classDiagram"]
    }
}
