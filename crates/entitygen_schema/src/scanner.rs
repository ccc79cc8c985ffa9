//! Discovery of schema documents on a search path.
//!
//! Schemas are located by matching a regular expression against file names
//! below a set of search roots, then opened as [`SchemaSource`]s.

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use entitygen_foundation::naming::is_blank;
use entitygen_foundation::{Error, Result};
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File-name pattern matched when no explicit pattern is given.
pub const DEFAULT_SCHEMA_PATTERN: &str = r".*-entities\.json";

/// An opened schema document together with its identifier.
pub struct SchemaSource {
    id: String,
    reader: Box<dyn Read>,
}

impl SchemaSource {
    /// Wraps an arbitrary reader.
    pub fn new(id: impl Into<String>, reader: impl Read + 'static) -> Self {
        Self {
            id: id.into(),
            reader: Box::new(reader),
        }
    }

    /// Wraps an in-memory document.
    #[must_use]
    pub fn from_bytes(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(id, Cursor::new(bytes))
    }

    /// Returns the identifier (usually the file path).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Splits the source into its identifier and reader.
    #[must_use]
    pub fn into_parts(self) -> (String, Box<dyn Read>) {
        (self.id, self.reader)
    }
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSource").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Finds schema files below a set of search roots.
#[derive(Clone, Debug)]
pub struct SchemaScanner {
    roots: Vec<PathBuf>,
}

impl SchemaScanner {
    /// Creates a scanner over the given search roots.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the search roots.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Finds schemas matching [`DEFAULT_SCHEMA_PATTERN`].
    ///
    /// # Errors
    ///
    /// Never fails for the built-in pattern; the `Result` mirrors [`Self::find_schemas`].
    pub fn find_default_schemas(&self) -> Result<BTreeSet<PathBuf>> {
        self.find_schemas(DEFAULT_SCHEMA_PATTERN)
    }

    /// Finds files whose whole file name matches `pattern`.
    ///
    /// Missing search roots and unreadable directory entries are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns an argument error if the pattern is blank or not a valid regex.
    pub fn find_schemas(&self, pattern: &str) -> Result<BTreeSet<PathBuf>> {
        let matcher = compile_pattern(pattern)?;
        let mut found = BTreeSet::new();

        for root in &self.roots {
            if !root.exists() {
                warn!(root = %root.display(), "schema search root does not exist");
                continue;
            }

            for entry in WalkDir::new(root).follow_links(true) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let matches = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| matcher.is_match(name));
                if matches {
                    found.insert(entry.into_path());
                }
            }
        }

        debug!(pattern, count = found.len(), "schema scan finished");
        Ok(found)
    }

    /// Opens every given schema file.
    ///
    /// # Errors
    ///
    /// Returns a resource error naming the first file that cannot be opened.
    pub fn open<'a, I>(&self, paths: I) -> Result<Vec<SchemaSource>>
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        paths.into_iter().map(|path| open_source(path)).collect()
    }
}

impl Default for SchemaScanner {
    fn default() -> Self {
        Self::new([PathBuf::from(".")])
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    if is_blank(pattern) {
        return Err(Error::argument("a valid pattern is required"));
    }
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| Error::argument(format!("invalid schema pattern '{pattern}': {e}")))
}

fn open_source(path: &Path) -> Result<SchemaSource> {
    let id = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| Error::resource(id.clone(), format!("unable to open: {e}")))?;
    Ok(SchemaSource::new(id, BufReader::new(file)))
}
