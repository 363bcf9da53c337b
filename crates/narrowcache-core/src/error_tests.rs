//! Tests for `error` module

use super::error::*;

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors: Vec<Error> = vec![
        Error::InvalidFilter("test".into()),
        Error::Config("test".into()),
        Error::Io(std::io::Error::other("test")),
        Error::InvalidTrace {
            line: 3,
            message: "test".into(),
        },
    ];

    // Act
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");

    for code in &codes {
        assert!(
            code.starts_with("NARROW-"),
            "Code {code} should start with NARROW-"
        );
    }
}

#[test]
fn test_error_display_includes_code() {
    // Arrange
    let err = Error::InvalidFilter("unknown operator 'foo'".into());

    // Act
    let display = format!("{err}");

    // Assert
    assert!(display.contains("[NARROW-001]"));
    assert!(display.contains("unknown operator 'foo'"));
}

#[test]
fn test_invalid_trace_display_includes_line() {
    let err = Error::InvalidTrace {
        line: 42,
        message: "missing field `op`".into(),
    };

    let display = err.to_string();

    assert!(display.contains("line 42"));
    assert!(display.contains("missing field `op`"));
}

#[test]
fn test_config_error_is_not_recoverable() {
    assert!(!Error::Config("bad".into()).is_recoverable());
    assert!(Error::InvalidFilter("bad".into()).is_recoverable());
    assert!(Error::Io(std::io::Error::other("disk")).is_recoverable());
}

#[test]
fn test_from_config_error() {
    // Arrange
    let config_err = crate::config::ConfigError::InvalidValue {
        key: "cache.storage_limit".into(),
        message: "too small".into(),
    };

    // Act
    let err: Error = config_err.into();

    // Assert
    assert_eq!(err.code(), "NARROW-002");
    assert!(err.to_string().contains("cache.storage_limit"));
}

#[test]
fn test_invalid_trace_code() {
    let err = Error::InvalidTrace {
        line: 1,
        message: "expected value".into(),
    };

    assert_eq!(err.code(), "NARROW-004");
    assert!(err.to_string().starts_with("[NARROW-004]"));
}
