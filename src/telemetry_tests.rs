#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_rust_log_wins_over_fallback() {
    let filter = build_filter(Some("credflow=debug"), "warn").unwrap();
    assert_eq!(filter.to_string(), "credflow=debug");
}

#[test]
fn test_blank_rust_log_uses_fallback() {
    let filter = build_filter(Some("  "), "info").unwrap();
    assert_eq!(filter.to_string(), "info");
    assert_eq!(build_filter(None, "info").unwrap().to_string(), "info");
}

#[test]
fn test_invalid_rust_log_uses_fallback() {
    let filter = build_filter(Some("credflow=loudest"), "warn").unwrap();
    assert_eq!(filter.to_string(), "warn");
}

#[test]
fn test_invalid_fallback_is_reported() {
    let err = build_filter(None, "credflow=loudest").unwrap_err();
    assert!(matches!(
        &err,
        TelemetryError::InvalidFilter { value, .. } if value == "credflow=loudest"
    ));
    assert!(err.to_string().contains("credflow=loudest"));
    assert!(std::error::Error::source(&err).is_some());
}
