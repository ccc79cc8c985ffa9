//! Integration tests for Layer 2: Engine
//!
//! Tests for inheritance resolution, relation synthesis, and the resolve facade.

mod inheritance;

use std::fs::File;

use entitygen_schema::{SchemaDescriptor, parse_schema};

/// Parses a fixture below `tests/fixtures`.
pub fn fixture(path: &str) -> SchemaDescriptor {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/").to_string() + path;
    parse_schema(File::open(&path).unwrap()).unwrap()
}
