//! Core error types, entity handles, and naming helpers for entitygen.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`EntityId`] - Stable handles into a resolved entity arena
//! - [`naming`] - Blank checks and qualified-name splitting shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod naming;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};

/// Result type alias using entitygen's Error type.
pub type Result<T> = std::result::Result<T, Error>;
