//! Integration tests for Error types
//!
//! Tests error construction, display, context merging, and error kinds.

use std::io;

use entitygen_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_duplicate_entity() {
    let err = Error::duplicate_entity("User");
    assert!(err.is_schema());
    assert!(format!("{err}").contains("duplicate 'User' entity"));
}

#[test]
fn error_duplicate_attribute() {
    let err = Error::duplicate_attribute("User", "email");
    assert!(err.is_schema());
    let msg = format!("{err}");
    assert!(msg.contains("email"));
    assert!(msg.contains("User"));
}

#[test]
fn error_parse_carries_position() {
    let err = Error::parse("expected value", 3, 14);
    assert!(matches!(
        err.kind,
        ErrorKind::Parse {
            line: 3,
            column: 14,
            ..
        }
    ));
    assert_eq!(format!("{err}"), "parse error at 3:14: expected value");
}

#[test]
fn error_io_keeps_source() {
    let err = Error::io("out/User.java", io::Error::other("disk full"));
    let source = std::error::Error::source(&err.kind).unwrap();
    assert_eq!(source.to_string(), "disk full");
    assert!(format!("{err}").contains("out/User.java"));
}

#[test]
fn error_kinds_are_distinct() {
    assert!(Error::argument("x").is_argument());
    assert!(!Error::argument("x").is_schema());
    assert!(matches!(Error::config("x").kind, ErrorKind::Config(_)));
    assert!(matches!(
        Error::resource("a.json", "gone").kind,
        ErrorKind::Resource { .. }
    ));
    assert!(matches!(
        Error::render("User", "boom").kind,
        ErrorKind::Render { .. }
    ));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_without_context_displays_kind_only() {
    let err = Error::schema("an entity needs a name");
    assert_eq!(format!("{err}"), "schema error: an entity needs a name");
}

#[test]
fn error_context_display() {
    let err = Error::schema("bad").with_context(
        ErrorContext::new()
            .with_source("users-entities.json")
            .with_entity("User")
            .with_frame("relation #0"),
    );
    assert_eq!(
        format!("{err}"),
        "schema error: bad (at users-entities.json, entity User, in relation #0)"
    );
}

#[test]
fn inner_context_wins_and_frames_accumulate() {
    let err = Error::schema("bad")
        .with_context(ErrorContext::new().with_entity("Inner").with_frame("first"))
        .with_context(
            ErrorContext::new()
                .with_entity("Outer")
                .with_source("a.json")
                .with_frame("second"),
        );

    let ctx = err.context.unwrap();
    assert_eq!(ctx.entity.as_deref(), Some("Inner"));
    assert_eq!(ctx.source.as_deref(), Some("a.json"));
    assert_eq!(ctx.stack, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn in_source_fills_only_the_source() {
    let err = Error::parse("eof", 1, 1).in_source("orders-entities.json");
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("orders-entities.json"));
    assert!(ctx.entity.is_none());
    assert!(ctx.stack.is_empty());
}

#[test]
fn empty_context_is_not_displayed() {
    let err = Error::argument("a valid pattern is required").with_context(ErrorContext::new());
    assert_eq!(
        format!("{err}"),
        "invalid argument: a valid pattern is required"
    );
}
