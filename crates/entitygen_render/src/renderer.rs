//! Template rendering of resolved entities.

use std::fs;
use std::path::Path;

use entitygen_engine::{ResolvedEntity, ResolvedModel};
use entitygen_foundation::naming::is_blank;
use entitygen_foundation::{Error, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::debug;

use crate::view::TemplateContext;

/// Name of the built-in entity template.
pub const DEFAULT_TEMPLATE_NAME: &str = "entity.java.jinja";

const DEFAULT_TEMPLATE: &str = include_str!("../templates/entity.java.jinja");

// =============================================================================
// Renderer Trait
// =============================================================================

/// Source text generated for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEntity {
    /// Entity name.
    pub entity: String,
    /// Fully qualified class file the text belongs to.
    pub class_file: String,
    /// Generated text.
    pub contents: String,
}

/// Turns resolved entities into source text.
pub trait Renderer {
    /// Renders a single entity of a model.
    ///
    /// # Errors
    ///
    /// Returns a render error if the entity cannot be rendered.
    fn render(&self, entity: &ResolvedEntity, model: &ResolvedModel) -> Result<String>;

    /// Renders every entity of a model, sorted by entity name.
    ///
    /// # Errors
    ///
    /// Stops at the first entity that fails to render.
    fn render_model(&self, model: &ResolvedModel) -> Result<Vec<RenderedEntity>> {
        model
            .entities()
            .into_iter()
            .map(|entity| -> Result<RenderedEntity> {
                let contents = self.render(entity, model)?;
                let class_file = entity
                    .class_file
                    .clone()
                    .ok_or_else(|| Error::render(&entity.name, "entity has no class file"))?;
                Ok(RenderedEntity {
                    entity: entity.name.clone(),
                    class_file,
                    contents,
                })
            })
            .collect()
    }
}

// =============================================================================
// Template Renderer
// =============================================================================

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders entities through a minijinja template.
///
/// The built-in template is always registered under [`DEFAULT_TEMPLATE_NAME`];
/// templates loaded from a directory are added next to it and replace it when
/// they share its name.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
    template_name: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("upper_first", upper_first);
        if let Err(e) = env.add_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE) {
            tracing::error!(error = %e, "built-in entity template is invalid");
        }

        Self {
            env,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
        }
    }
}

impl TemplateRenderer {
    /// Creates a renderer using the built-in template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to load every file of a directory as a template.
    ///
    /// Templates are registered under their file names. Subdirectories are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the directory or a template cannot be read,
    /// or if a template does not parse.
    pub fn with_template_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|e| Error::resource(dir.display().to_string(), e.to_string()))?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::resource(dir.display().to_string(), e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            let source = fs::read_to_string(&path)
                .map_err(|e| Error::resource(path.display().to_string(), e.to_string()))?;
            self.env
                .add_template_owned(name.clone(), source)
                .map_err(|e| Error::resource(path.display().to_string(), e.to_string()))?;
            debug!(template = %name, "loaded template");
        }

        Ok(self)
    }

    /// Builder method to select the template used by [`Renderer::render`].
    ///
    /// # Errors
    ///
    /// Returns an argument error if the name is blank.
    pub fn with_template_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_blank(&name) {
            return Err(Error::argument("a valid template name is required"));
        }
        self.template_name = name;
        Ok(self)
    }

    /// Returns the selected template name.
    #[must_use]
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Returns true if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Renders an entity with an explicitly named template.
    ///
    /// # Errors
    ///
    /// Returns an argument error for a blank name and a render error if the
    /// template is missing or fails to evaluate.
    pub fn render_with(
        &self,
        template_name: &str,
        entity: &ResolvedEntity,
        model: &ResolvedModel,
    ) -> Result<String> {
        if is_blank(template_name) {
            return Err(Error::argument("a valid template name is required"));
        }
        let template = self.env.get_template(template_name).map_err(|e| {
            Error::render(&entity.name, format!("unable to obtain template: {e}"))
        })?;
        let context = TemplateContext::new(entity, model)?;
        let text = template
            .render(&context)
            .map_err(|e| Error::render(&entity.name, e.to_string()))?;
        debug!(entity = %entity.name, template = template_name, bytes = text.len(), "rendered entity");
        Ok(text)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, entity: &ResolvedEntity, model: &ResolvedModel) -> Result<String> {
        self.render_with(&self.template_name, entity, model)
    }
}
