//! entitygen - Entity schema resolution and source generation
//!
//! This crate re-exports all layers of the entitygen system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: entitygen_runtime    - Config, CLI, generation pipeline, writer
//! Layer 3: entitygen_render     - Imports, template context, minijinja renderer
//! Layer 2: entitygen_engine     - Resolved model, inheritance, relations
//! Layer 1: entitygen_schema     - Descriptors, validation, JSON parsing, scanning
//! Layer 0: entitygen_foundation - Core types (EntityId, Error, naming)
//! ```

pub use entitygen_engine as engine;
pub use entitygen_foundation as foundation;
pub use entitygen_render as render;
pub use entitygen_runtime as runtime;
pub use entitygen_schema as schema;
