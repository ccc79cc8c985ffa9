//! Integration tests for Layer 3: Render
//!
//! Tests for import collection, template context building, and rendering.


use std::fs::File;

use entitygen_engine::{ResolvedModel, resolve};
use entitygen_schema::parse_schema;

/// Resolves a fixture below `tests/fixtures`.
pub fn resolved(path: &str) -> ResolvedModel {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/").to_string() + path;
    resolve(&[parse_schema(File::open(&path).unwrap()).unwrap()]).unwrap()
}
