//! The resolution facade.

use entitygen_foundation::{Error, ErrorContext, Result};
use entitygen_schema::{SchemaDescriptor, validate_schema};
use tracing::info;

use crate::inheritance::resolve_inheritance;
use crate::model::ResolvedModel;
use crate::relation::resolve_relations;

/// Validates and resolves a collection of schemas into a single model.
///
/// Every schema is validated first. Inheritance is then resolved across all
/// schemas at once, after which each schema's relations are applied in order.
///
/// # Errors
///
/// Returns an argument error for an empty collection and a schema error for any
/// validation, inheritance, or relation failure.
pub fn resolve(schemas: &[SchemaDescriptor]) -> Result<ResolvedModel> {
    if schemas.is_empty() {
        return Err(Error::argument("a valid schemas collection is required"));
    }

    for (idx, schema) in schemas.iter().enumerate() {
        validate_schema(schema)
            .map_err(|e| e.with_context(ErrorContext::new().with_frame(format!("schema #{idx}"))))?;
    }

    resolve_validated(schemas)
}

/// Resolves schemas that already passed [`validate_schema`].
///
/// Callers that validate each schema as it is loaded use this to skip the
/// second validation pass of [`resolve`].
///
/// # Errors
///
/// Returns an argument error for an empty collection and a schema error for any
/// inheritance or relation failure.
pub fn resolve_validated(schemas: &[SchemaDescriptor]) -> Result<ResolvedModel> {
    if schemas.is_empty() {
        return Err(Error::argument("a valid schemas collection is required"));
    }

    let mut model = resolve_inheritance(schemas)?;

    for (idx, schema) in schemas.iter().enumerate() {
        resolve_relations(&schema.relations, &mut model)
            .map_err(|e| e.with_context(ErrorContext::new().with_frame(format!("schema #{idx}"))))?;
    }

    info!(
        schemas = schemas.len(),
        entities = model.len(),
        "resolved entity model"
    );
    Ok(model)
}
