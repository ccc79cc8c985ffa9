//! Structural validation of schema descriptors.
//!
//! Validation runs before any resolution work and stops at the first violation.
//! Checks per entity run in a fixed order: entity name, root name,
//! deployment/class file, then each attribute in declaration order.

use entitygen_foundation::naming::{is_blank, is_blank_opt};
use entitygen_foundation::{Error, ErrorContext, Result};

use crate::descriptor::{AttributeDescriptor, EntityDescriptor, SchemaDescriptor};

/// Validates a whole schema document.
///
/// # Errors
///
/// Returns a schema error if the schema has no entities or any entity
/// descriptor is structurally invalid.
pub fn validate_schema(schema: &SchemaDescriptor) -> Result<()> {
    if schema.entities.is_empty() {
        return Err(Error::schema("a schema descriptor needs at least one entity"));
    }

    for entity in &schema.entities {
        validate_entity(entity)?;
    }

    Ok(())
}

/// Validates a single entity descriptor.
///
/// Root-bearing descriptors may omit deployment and class file; they receive
/// them from their root during resolution.
///
/// # Errors
///
/// Returns a schema error describing the first violation found.
pub fn validate_entity(entity: &EntityDescriptor) -> Result<()> {
    if is_blank(&entity.name) {
        return Err(Error::schema("an entity needs a name"));
    }

    let context = || ErrorContext::new().with_entity(entity.name.clone());

    if let Some(root) = &entity.root {
        if is_blank(&root.name) {
            return Err(
                Error::schema("when defining a root, its name needs to be provided")
                    .with_context(context()),
            );
        }
    }

    let has_root = entity.root.is_some();
    if !has_root && is_blank_opt(entity.deployment.as_deref()) {
        return Err(Error::schema("an entity needs a valid deployment table").with_context(context()));
    }
    if !has_root && is_blank_opt(entity.class_file.as_deref()) {
        return Err(Error::schema("an entity needs a valid class file").with_context(context()));
    }

    for attribute in &entity.attributes {
        validate_attribute(attribute).map_err(|e| e.with_context(context()))?;
    }

    Ok(())
}

fn validate_attribute(attribute: &AttributeDescriptor) -> Result<()> {
    if is_blank(&attribute.name) {
        return Err(Error::schema("an entity attribute needs a name"));
    }
    if is_blank(&attribute.ty) {
        return Err(Error::schema(format!(
            "entity attribute '{}' needs a type",
            attribute.name
        )));
    }
    Ok(())
}
