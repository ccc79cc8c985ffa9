//! Naming helpers for schema identifiers and fully-qualified type names.

/// Returns true if the string is empty or contains only whitespace.
#[must_use]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Returns true if the optional string is absent or blank.
#[must_use]
pub fn is_blank_opt(s: Option<&str>) -> bool {
    s.is_none_or(is_blank)
}

/// Splits a qualified name at its last `.` into `(package, simple_name)`.
///
/// Names without a separator have an empty package.
#[must_use]
pub fn split_qualified(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => ("", name),
    }
}

/// Returns the package part of a qualified name (everything before the last `.`).
#[must_use]
pub fn package_of(name: &str) -> &str {
    split_qualified(name).0
}

/// Returns the simple name of a qualified name (everything after the last `.`).
#[must_use]
pub fn simple_name(name: &str) -> &str {
    split_qualified(name).1
}

/// Joins a package and a simple name, omitting the separator for the root package.
#[must_use]
pub fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    }
}
