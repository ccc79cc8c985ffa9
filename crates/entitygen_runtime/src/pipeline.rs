//! The generation pipeline: scan, parse, resolve, render, write.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use entitygen_engine::resolve_validated;
use entitygen_foundation::Result;
use entitygen_render::{Renderer, TemplateRenderer};
use entitygen_schema::{SchemaDescriptor, SchemaScanner, parse_source, validate_schema};
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::writer::{WriteSummary, write_all};

/// Result of a completed run.
#[derive(Debug)]
pub enum RunOutcome {
    /// No schema file matched any pattern; nothing was generated.
    NoSchemas,
    /// Sources were generated.
    Generated(RunSummary),
}

/// Counts of a run that generated sources.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of schema files read.
    pub schemas: usize,
    /// Number of distinct resolved entities.
    pub entities: usize,
    /// Per-file write results.
    pub writes: WriteSummary,
}

/// Runs the whole pipeline for one configuration.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator for a configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn scanner(&self) -> SchemaScanner {
        SchemaScanner::new(self.config.schema_roots.iter().cloned())
    }

    /// Finds every schema file matching any configured pattern.
    ///
    /// # Errors
    ///
    /// Returns an argument error for a blank or invalid pattern.
    pub fn discover(&self) -> Result<BTreeSet<PathBuf>> {
        let scanner = self.scanner();
        let mut found = BTreeSet::new();
        for pattern in self.config.patterns() {
            found.extend(scanner.find_schemas(pattern)?);
        }
        Ok(found)
    }

    /// Opens, parses and validates schema files, in path order.
    ///
    /// # Errors
    ///
    /// Returns the first resource, parse or validation error, tagged with the
    /// file it came from.
    pub fn load_schemas(&self, paths: &BTreeSet<PathBuf>) -> Result<Vec<SchemaDescriptor>> {
        let sources = self.scanner().open(paths)?;
        let mut schemas = Vec::with_capacity(sources.len());
        for source in sources {
            let id = source.id().to_string();
            let schema = parse_source(source)?;
            validate_schema(&schema).map_err(|e| e.in_source(id.clone()))?;
            debug!(source = %id, entities = schema.entities.len(), relations = schema.relations.len(), "loaded schema");
            schemas.push(schema);
        }
        Ok(schemas)
    }

    /// Builds the renderer described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns a resource error for an unreadable template directory and an
    /// argument error for a blank template name.
    pub fn renderer(&self) -> Result<TemplateRenderer> {
        let mut renderer = TemplateRenderer::new();
        if let Some(dir) = &self.config.template_dir {
            renderer = renderer.with_template_dir(dir)?;
        }
        renderer.with_template_name(self.config.template.as_str())
    }

    /// Runs the pipeline and writes sources below `output`.
    ///
    /// Write failures of single files are logged and reported in the summary;
    /// every other failure aborts the run before anything is written.
    ///
    /// # Errors
    ///
    /// Returns scan, parse, validation, resolution or render errors.
    pub fn generate(&self, output: &Path) -> Result<RunOutcome> {
        let paths = self.discover()?;
        if paths.is_empty() {
            warn!(roots = ?self.config.schema_roots, "no schemas found");
            return Ok(RunOutcome::NoSchemas);
        }
        info!(count = paths.len(), "discovered schemas");

        let renderer = self.renderer()?;
        let schemas = self.load_schemas(&paths)?;
        let model = resolve_validated(&schemas)?;
        let rendered = renderer.render_model(&model)?;

        info!(output = %output.display(), files = rendered.len(), "writing sources");
        let writes = write_all(output, &rendered, &self.config.extension);
        info!(
            written = writes.written.len(),
            failed = writes.failed.len(),
            "generation finished"
        );

        Ok(RunOutcome::Generated(RunSummary {
            schemas: schemas.len(),
            entities: model.len(),
            writes,
        }))
    }
}
