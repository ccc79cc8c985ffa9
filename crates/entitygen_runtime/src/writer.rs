//! Writing generated sources into a file tree.

use std::fs;
use std::path::{Path, PathBuf};

use entitygen_foundation::naming::split_qualified;
use entitygen_foundation::{Error, Result};
use entitygen_render::RenderedEntity;
use tracing::{debug, error};

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || matches!(c, '_' | '$'))
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$'))
}

/// Derives the output path of a class file below an output root.
///
/// `a.b.User` with extension `java` becomes `<root>/a/b/User.java`. A blank
/// extension leaves the file name bare.
///
/// # Errors
///
/// Returns an argument error if a segment of the class file is not an
/// identifier, so nothing is ever placed outside `root`.
pub fn output_path(root: &Path, class_file: &str, extension: &str) -> Result<PathBuf> {
    if let Some(segment) = class_file.split('.').find(|s| !is_identifier(s)) {
        return Err(Error::argument(format!(
            "invalid class file '{class_file}': '{segment}' is not an identifier"
        )));
    }

    let (package, simple) = split_qualified(class_file);
    let mut path = root.to_path_buf();
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    let extension = extension.trim().trim_start_matches('.');
    if extension.is_empty() {
        path.push(simple);
    } else {
        path.push(format!("{simple}.{extension}"));
    }
    Ok(path)
}

/// Writes one rendered entity, creating parent directories as needed.
///
/// # Errors
///
/// Returns an argument error for an invalid class file and an I/O error naming
/// the path that could not be written.
pub fn write_entity(root: &Path, rendered: &RenderedEntity, extension: &str) -> Result<PathBuf> {
    let path = output_path(root, &rendered.class_file, extension)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent.display().to_string(), e))?;
    }
    fs::write(&path, &rendered.contents).map_err(|e| Error::io(path.display().to_string(), e))?;
    debug!(entity = %rendered.entity, path = %path.display(), "wrote entity");
    Ok(path)
}

/// Outcome of writing a batch of rendered entities.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Paths written successfully, in write order.
    pub written: Vec<PathBuf>,
    /// Entities that could not be written, with the reason.
    pub failed: Vec<(String, Error)>,
}

impl WriteSummary {
    /// Returns true if every entity was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes every rendered entity. A failed write is logged and does not stop
/// the remaining ones.
pub fn write_all(root: &Path, rendered: &[RenderedEntity], extension: &str) -> WriteSummary {
    let mut summary = WriteSummary::default();
    for entity in rendered {
        match write_entity(root, entity, extension) {
            Ok(path) => summary.written.push(path),
            Err(e) => {
                error!(entity = %entity.entity, error = %e, "unable to write entity");
                summary.failed.push((entity.entity.clone(), e));
            }
        }
    }
    summary
}
