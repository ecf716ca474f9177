//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use std::str::FromStr;
use umlxml::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "UMLXML_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "UMLXML_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest
    // must fail gracefully rather than panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
    let _ = init_logging(Some("umlxml::plugins::class::parser=trace"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("compact"));
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_logging_defaults() {
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    // The format is validated before any subscriber is installed
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_init_logging_invalid_level() {
    // EnvFilter falls back to `info`; the call may still fail if a
    // subscriber is already installed, but it must not panic
    let _ = init_logging(Some("not a level ==="), Some("compact"));
}
