//! Template rendering of resolved entities for entitygen.
//!
//! This crate provides:
//! - [`ImportMap`] and [`short_type_name`] - Import collection for attribute types
//! - [`TemplateContext`] - The serializable view templates render from
//! - [`Renderer`] - The rendering seam used by the runtime
//! - [`TemplateRenderer`] - A minijinja renderer with a built-in entity template

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod imports;
pub mod renderer;
pub mod view;

pub use imports::{ImportMap, qualified_names, short_type_name};
pub use renderer::{DEFAULT_TEMPLATE_NAME, RenderedEntity, Renderer, TemplateRenderer};
pub use view::{AttributeView, EntityView, RelationView, TemplateContext};
