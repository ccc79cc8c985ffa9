//! JSON deserialization of schema documents.

use std::io::Read;

use entitygen_foundation::{Error, Result};
use serde_json::error::Category;
use tracing::debug;

use crate::descriptor::SchemaDescriptor;
use crate::scanner::SchemaSource;

/// Parses a schema document from a reader.
///
/// The reader is consumed completely and dropped when this returns.
///
/// # Errors
///
/// Returns a parse error for malformed JSON or a document that does not match
/// the descriptor shapes, and a resource error if the reader itself fails.
pub fn parse_schema<R: Read>(reader: R) -> Result<SchemaDescriptor> {
    serde_json::from_reader(reader).map_err(convert_error)
}

/// Parses a schema document from a string.
///
/// # Errors
///
/// Returns a parse error for malformed JSON.
pub fn parse_str(json: &str) -> Result<SchemaDescriptor> {
    serde_json::from_str(json).map_err(convert_error)
}

/// Parses an opened schema source, attaching its identifier to any error.
///
/// # Errors
///
/// Returns the same errors as [`parse_schema`], with the source as context.
pub fn parse_source(source: SchemaSource) -> Result<SchemaDescriptor> {
    let (id, reader) = source.into_parts();
    debug!(source = %id, "parsing schema");
    parse_schema(reader).map_err(|e| e.in_source(id))
}

fn convert_error(err: serde_json::Error) -> Error {
    match err.classify() {
        Category::Io => Error::resource("schema stream", err.to_string()),
        Category::Syntax | Category::Data | Category::Eof => {
            Error::parse(strip_position(&err), err.line(), err.column())
        }
    }
}

// serde_json appends " at line X column Y" to its message; the position is
// carried separately.
fn strip_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}
