//! Tests for `error` module

use super::error::*;

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors: Vec<Error> = vec![
        Error::InvalidArgument("depth".into()),
        Error::NotFound("42".into()),
        Error::CapacityExceeded {
            limit: 10,
            consumed: 11,
        },
        Error::Cancelled { depth: 2 },
        Error::Backend("io".into()),
    ];

    // Act
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");
    for code in &codes {
        assert!(code.starts_with("KOUT-"), "Code {code} should start with KOUT-");
    }
}

#[test]
fn test_error_display_contains_code() {
    let err = Error::CapacityExceeded {
        limit: 1,
        consumed: 2,
    };
    let msg = err.to_string();
    assert!(msg.starts_with("[KOUT-003]"));
    assert!(msg.contains("examined 2 edges"));
    assert!(msg.contains("limit is 1"));
}

#[test]
fn test_not_found_display() {
    let err = Error::NotFound("alice".into());
    assert_eq!(err.to_string(), "[KOUT-002] Vertex 'alice' not found");
}

#[test]
fn test_retryable_errors() {
    assert!(Error::CapacityExceeded {
        limit: 1,
        consumed: 2
    }
    .is_retryable());
    assert!(Error::Backend("timeout".into()).is_retryable());
    assert!(!Error::InvalidArgument("depth".into()).is_retryable());
    assert!(!Error::NotFound("1".into()).is_retryable());
    assert!(!Error::Cancelled { depth: 1 }.is_retryable());
}
