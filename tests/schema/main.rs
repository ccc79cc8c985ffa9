//! Integration tests for Layer 1: Schema
//!
//! Tests for descriptor parsing, structural validation, and schema discovery.

mod parsing;

use std::path::PathBuf;

/// Directory holding the JSON schema fixtures.
pub fn fixtures() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}
