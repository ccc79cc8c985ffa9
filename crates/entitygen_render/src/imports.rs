//! Import collection and short type names.
//!
//! Attribute types are opaque strings such as `java.util.List<com.acme.Item>`.
//! Every dotted identifier inside a type is imported under its simple name and
//! displayed without its package. When two identifiers share a simple name,
//! only the first one is imported and the other stays qualified.

use std::collections::BTreeMap;

use entitygen_engine::ResolvedEntity;
use entitygen_foundation::naming::simple_name;
use serde::Serialize;
use tracing::debug;

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.')
}

/// Splits a type into identifier tokens and the punctuation between them.
fn tokens(ty: &str) -> impl Iterator<Item = (bool, &str)> {
    let mut rest = ty;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let ident = is_identifier_char(first);
        let end = rest
            .char_indices()
            .find(|&(_, c)| is_identifier_char(c) != ident)
            .map_or(rest.len(), |(idx, _)| idx);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some((ident, token))
    })
}

/// Returns the display form of a type with every package stripped.
///
/// Generic arguments are separated by `", "` regardless of the input spacing.
///
/// ```
/// use entitygen_render::short_type_name;
///
/// assert_eq!(short_type_name("java.util.List<com.acme.Item>"), "List<Item>");
/// assert_eq!(short_type_name("java.util.Map<a.K,b.V>"), "Map<K, V>");
/// assert_eq!(short_type_name("int"), "int");
/// ```
#[must_use]
pub fn short_type_name(ty: &str) -> String {
    format_type(ty, simple_name)
}

/// Rebuilds a type, mapping each identifier through `name`.
fn format_type<'t>(ty: &'t str, mut name: impl FnMut(&'t str) -> &'t str) -> String {
    let mut out = String::with_capacity(ty.len());
    for (ident, token) in tokens(ty) {
        if ident {
            out.push_str(name(token));
            continue;
        }
        for c in token.chars() {
            match c {
                ',' => {
                    out.truncate(out.trim_end().len());
                    out.push_str(", ");
                }
                c if c.is_whitespace() => {
                    if !out.ends_with(' ') && !out.ends_with('<') {
                        out.push(' ');
                    }
                }
                c => {
                    if matches!(c, '>' | '<' | '[' | ']') {
                        out.truncate(out.trim_end().len());
                    }
                    out.push(c);
                }
            }
        }
    }
    out.trim().to_string()
}

/// Returns the dotted identifiers inside a type, in order of appearance.
pub fn qualified_names(ty: &str) -> impl Iterator<Item = &str> {
    tokens(ty).filter_map(|(ident, token)| {
        (ident && token.contains('.') && !token.starts_with('.') && !token.ends_with('.'))
            .then_some(token)
    })
}

/// Qualified type names to import, mapped to their simple names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportMap {
    entries: BTreeMap<String, String>,
}

impl ImportMap {
    /// Creates an empty import map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the imports needed by every attribute type of an entity.
    #[must_use]
    pub fn for_entity(entity: &ResolvedEntity) -> Self {
        let mut imports = Self::new();
        for attribute in &entity.attributes {
            imports.add_type(&attribute.ty);
        }
        imports
    }

    /// Adds every qualified name referenced by a type.
    ///
    /// A name whose simple name is already imported under another package is
    /// left out and keeps its package wherever it is displayed.
    pub fn add_type(&mut self, ty: &str) {
        for name in qualified_names(ty) {
            if self.entries.contains_key(name) {
                continue;
            }
            let simple = simple_name(name);
            if let Some((taken, _)) = self.entries.iter().find(|(_, s)| s.as_str() == simple) {
                debug!(import = %taken, kept_qualified = %name, "simple name already imported");
                continue;
            }
            self.entries.insert(name.to_string(), simple.to_string());
        }
    }

    /// Returns the display form of a type under these imports.
    ///
    /// Imported names lose their package. Every other name is kept as written.
    #[must_use]
    pub fn display_type(&self, ty: &str) -> String {
        format_type(ty, |token| match self.entries.get(token) {
            Some(_) => simple_name(token),
            None => token,
        })
    }

    /// Returns the simple name a qualified name is imported as.
    #[must_use]
    pub fn get(&self, qualified: &str) -> Option<&str> {
        self.entries.get(qualified).map(String::as_str)
    }

    /// Number of imports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing needs importing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(qualified, simple)` pairs sorted by qualified name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(q, s)| (q.as_str(), s.as_str()))
    }
}
