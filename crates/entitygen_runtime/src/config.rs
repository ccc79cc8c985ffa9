//! Configuration for a generation run.

use std::fs;
use std::path::{Path, PathBuf};

use entitygen_foundation::naming::is_blank;
use entitygen_foundation::{Error, Result};
use entitygen_render::DEFAULT_TEMPLATE_NAME;
use entitygen_schema::DEFAULT_SCHEMA_PATTERN;
use serde::Deserialize;
use tracing::debug;

/// File name looked up in the working directory when no config path is given.
pub const CONFIG_FILE_NAME: &str = "entitygen.toml";

/// Configuration for a generation run.
///
/// Every field has a built-in default, so a config file only needs the keys
/// it changes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Directories searched for schema files.
    pub schema_roots: Vec<PathBuf>,

    /// File-name pattern every run scans for.
    pub schema_pattern: String,

    /// Additional file-name patterns.
    pub extra_patterns: Vec<String>,

    /// Directory of templates that add to or replace the built-in one.
    pub template_dir: Option<PathBuf>,

    /// Template used for every entity.
    pub template: String,

    /// Extension of generated files, without the dot.
    pub extension: String,

    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_roots: vec![PathBuf::from(".")],
            schema_pattern: DEFAULT_SCHEMA_PATTERN.to_string(),
            extra_patterns: Vec::new(),
            template_dir: None,
            template: DEFAULT_TEMPLATE_NAME.to_string(),
            extension: "java".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates the built-in configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a config error if the document is malformed or has unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::config(e.to_string()))
    }

    /// Loads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("unable to read '{}': {e}", path.display())))?;
        let config = Self::from_toml_str(&source)
            .map_err(|e| e.in_source(path.display().to_string()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads [`CONFIG_FILE_NAME`] from a directory, or the defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file exists but cannot be read or parsed.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Every pattern a run scans for, built-in pattern first. Blank extra
    /// patterns are skipped.
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        let mut patterns = vec![self.schema_pattern.as_str()];
        for pattern in self.extra_patterns.iter().filter(|p| !is_blank(p)) {
            if !patterns.contains(&pattern.as_str()) {
                patterns.push(pattern);
            }
        }
        patterns
    }

    /// Builder method to replace the schema search roots.
    #[must_use]
    pub fn with_schema_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.schema_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to add an extra schema pattern.
    #[must_use]
    pub fn with_extra_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_patterns.push(pattern.into());
        self
    }

    /// Builder method to set the template directory.
    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Builder method to set the template name.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Builder method to set the output file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to set the fallback log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
