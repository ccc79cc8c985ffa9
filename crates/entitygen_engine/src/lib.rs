//! Inheritance and relation resolution for entitygen.
//!
//! This crate provides:
//! - [`ResolvedModel`] - The flattened, name-indexed entity model
//! - [`resolve_inheritance`] - Merging of extension and inheritance fragments
//! - [`resolve_relations`] - Synthesis of relation attributes on both sides
//! - [`resolve`] - Validation and resolution of a schema collection
//! - [`resolve_validated`] - Resolution of schemas validated on load

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod inheritance;
pub mod model;
pub mod relation;
pub mod resolve;

pub use inheritance::{process_entity_descriptor, resolve_inheritance};
pub use model::{
    AttributeSet, RelationInfo, RelationType, ResolvedAttribute, ResolvedEntity, ResolvedModel,
};
pub use relation::resolve_relations;
pub use resolve::{resolve, resolve_validated};
