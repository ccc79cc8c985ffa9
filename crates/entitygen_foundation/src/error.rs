//! Error types for the entitygen system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for entitygen operations.
#[derive(Debug, Error)]
#[error("{kind}{}", context_suffix(.context))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

fn context_suffix(context: &Option<ErrorContext>) -> String {
    match context {
        Some(ctx) if !ctx.is_empty() => format!(" ({ctx})"),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context already attached is kept; missing fields are filled from `context`
    /// and its frames are appended.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => existing.merge(context),
            None => context,
        });
        self
    }

    /// Attaches the schema source the error originated from.
    #[must_use]
    pub fn in_source(self, source: impl Into<String>) -> Self {
        self.with_context(ErrorContext::new().with_source(source))
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Argument(message.into()))
    }

    /// Creates a structural schema error.
    #[must_use]
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Schema(message.into()))
    }

    /// Creates an unknown root reference error.
    #[must_use]
    pub fn unknown_root(entity: impl Into<String>, root: impl Into<String>) -> Self {
        Self::schema(format!(
            "entity '{}' references an unknown root '{}'",
            entity.into(),
            root.into()
        ))
    }

    /// Creates a duplicate entity definition error.
    #[must_use]
    pub fn duplicate_entity(name: impl Into<String>) -> Self {
        Self::schema(format!("duplicate '{}' entity definition", name.into()))
    }

    /// Creates a duplicate attribute error.
    #[must_use]
    pub fn duplicate_attribute(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::schema(format!(
            "duplicate attribute '{}' on entity '{}'",
            attribute.into(),
            entity.into()
        ))
    }

    /// Creates a resource access error.
    #[must_use]
    pub fn resource(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resource {
            resource: resource.into(),
            message: message.into(),
        })
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates a render error.
    #[must_use]
    pub fn render(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render {
            entity: entity.into(),
            message: message.into(),
        })
    }

    /// Creates an output I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            source,
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Returns true for structural schema violations.
    #[must_use]
    pub fn is_schema(&self) -> bool {
        matches!(self.kind, ErrorKind::Schema(_))
    }

    /// Returns true for invalid call-time arguments.
    #[must_use]
    pub fn is_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::Argument(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Invalid call-time argument.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Structural violation in a schema descriptor.
    #[error("schema error: {0}")]
    Schema(String),

    /// A schema resource could not be opened or read.
    #[error("resource error: {resource}: {message}")]
    Resource {
        /// Identifier of the resource.
        resource: String,
        /// Description of the failure.
        message: String,
    },

    /// Malformed schema document.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed, 0 if unknown).
        line: usize,
        /// Column number (1-indexed, 0 if unknown).
        column: usize,
    },

    /// Template lookup or evaluation failure.
    #[error("render error for entity '{entity}': {message}")]
    Render {
        /// The entity being rendered.
        entity: String,
        /// Description of the failure.
        message: String,
    },

    /// Output could not be written.
    #[error("cannot write '{path}': {source}")]
    Io {
        /// The output path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Schema source (file path or resource identifier).
    pub source: Option<String>,
    /// Entity being processed.
    pub entity: Option<String>,
    /// Processing frames, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the entity name.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Adds a processing frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.entity.is_none() && self.stack.is_empty()
    }

    fn merge(mut self, outer: Self) -> Self {
        if self.source.is_none() {
            self.source = outer.source;
        }
        if self.entity.is_none() {
            self.entity = outer.entity;
        }
        self.stack.extend(outer.stack);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(source) = &self.source {
            parts.push(format!("at {source}"));
        }
        if let Some(entity) = &self.entity {
            parts.push(format!("entity {entity}"));
        }
        for frame in &self.stack {
            parts.push(format!("in {frame}"));
        }
        write!(f, "{}", parts.join(", "))
    }
}
