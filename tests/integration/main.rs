//! Cross-layer integration tests for entitygen
//!
//! Tests that verify correct interaction between multiple crates.

mod discovery;
mod generation;

use std::path::PathBuf;

/// Directory holding the JSON schema fixtures.
pub fn fixtures() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}
