//! Schema descriptors, validation, JSON parsing, and schema discovery for entitygen.
//!
//! This crate provides:
//! - [`SchemaDescriptor`] and friends - The raw descriptor model
//! - [`validate_schema`] - Fail-fast structural validation
//! - [`parse_schema`] - JSON deserialization of schema documents
//! - [`SchemaScanner`] - Pattern-based discovery of schema files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod descriptor;
pub mod parse;
pub mod scanner;
pub mod validate;

pub use descriptor::{
    AttributeDescriptor, CollectionType, EntityDescriptor, RelationDescriptor,
    RelationSideDescriptor, RootDescriptor, SchemaDescriptor, Side,
};
pub use parse::{parse_schema, parse_source, parse_str};
pub use scanner::{DEFAULT_SCHEMA_PATTERN, SchemaScanner, SchemaSource};
pub use validate::{validate_entity, validate_schema};
