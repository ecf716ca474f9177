//! Core detector trait for diagram type identification
//!
//! This trait defines the interface for detecting diagram types
//! from markup language patterns.

/// Core trait for diagram type detectors
///
/// This trait represents the detection layer that identifies diagram types
/// from markup patterns. Each diagram type provides a detector that can
/// recognize its specific syntax patterns.
///
/// # Example
/// ```
/// use umlxml::core::Detector;
/// use umlxml::plugins::class::ClassDetector;
///
/// let detector = ClassDetector::new();
/// assert!(detector.detect("classDiagram\n    class Animal"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::*;

    #[test]
    fn test_class_detector_implements_trait() {
        let detector = ClassDetector::new();
        assert_eq!(detector.diagram_type(), "class");
        assert_eq!(detector.patterns(), vec!["classDiagram"]);
    }

    #[test]
    fn test_detector_confidence() {
        let detector = ClassDetector::new();
        assert_eq!(detector.confidence("classDiagram\nclass A"), 1.0);
        assert_eq!(detector.confidence("random text"), 0.0);
    }
}
