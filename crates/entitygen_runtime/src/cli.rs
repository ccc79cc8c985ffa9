//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use entitygen_foundation::Result;

use crate::config::GeneratorConfig;

/// Generates entity sources from `*-entities.json` schema files.
#[derive(Debug, Parser)]
#[command(name = "entitygen", author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory generated sources are written to
    pub output: PathBuf,

    /// Additional schema file-name patterns (regular expressions)
    pub patterns: Vec<String>,

    /// Directory searched for schema files (repeatable; defaults to the current directory)
    #[arg(long = "schema-dir", value_name = "DIR")]
    pub schema_dirs: Vec<PathBuf>,

    /// Directory of templates adding to or replacing the built-in one
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Template used for every entity
    #[arg(long, value_name = "NAME")]
    pub template: Option<String>,

    /// Extension of generated files
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Config file (defaults to ./entitygen.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads the config file and applies the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns a config error if the config file cannot be loaded.
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let base = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::load_or_default(".")?,
        };
        Ok(self.apply(base))
    }

    /// Applies the command-line overrides to a config.
    #[must_use]
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if !self.schema_dirs.is_empty() {
            config.schema_roots.clone_from(&self.schema_dirs);
        }
        config.extra_patterns.extend(self.patterns.iter().cloned());
        if let Some(dir) = &self.template_dir {
            config.template_dir = Some(dir.clone());
        }
        if let Some(template) = &self.template {
            config.template.clone_from(template);
        }
        if let Some(extension) = &self.extension {
            config.extension.clone_from(extension);
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
        config
    }
}
