//! Relation resolution.
//!
//! Each relation synthesizes one attribute on each participating entity. The
//! attribute on a side points at the other side's entity and is a collection
//! when the other side is [`Side::Many`]. Relations are applied strictly in
//! declaration order; attributes added by an earlier relation take part in the
//! collision checks of later ones.

use entitygen_foundation::naming::is_blank;
use entitygen_foundation::{EntityId, Error, ErrorContext, Result};
use entitygen_schema::{CollectionType, RelationDescriptor, RelationSideDescriptor, Side};
use tracing::debug;

use crate::model::{RelationInfo, ResolvedAttribute, ResolvedModel};

/// A relation side that passed validation.
#[derive(Clone, Debug)]
struct Endpoint<'a> {
    entity: EntityId,
    attribute: &'a str,
    side: Side,
    collection_type: Option<CollectionType>,
}

/// Applies every relation of one schema to the model.
///
/// # Errors
///
/// Returns a schema error for the first invalid relation; relations before it
/// have already been applied, but the caller discards the model.
pub fn resolve_relations(relations: &[RelationDescriptor], model: &mut ResolvedModel) -> Result<()> {
    for (position, relation) in relations.iter().enumerate() {
        let (source, target) = validate_relation_descriptor(relation, model)
            .map_err(|e| e.with_context(ErrorContext::new().with_frame(describe(position, relation))))?;
        synthesize(relation, &source, &target, model)?;
    }
    Ok(())
}

fn describe(position: usize, relation: &RelationDescriptor) -> String {
    match (&relation.source, &relation.target) {
        (Some(s), Some(t)) => format!(
            "relation {}.{} -> {}.{}",
            s.entity, s.attribute_name, t.entity, t.attribute_name
        ),
        _ => format!("relation #{position}"),
    }
}

fn validate_relation_descriptor<'a>(
    relation: &'a RelationDescriptor,
    model: &ResolvedModel,
) -> Result<(Endpoint<'a>, Endpoint<'a>)> {
    let (Some(source), Some(target)) = (&relation.source, &relation.target) else {
        return Err(Error::schema(
            "invalid relation definition: both source and target are required",
        ));
    };

    let source = validate_side(source, "source", model)?;
    let target = validate_side(target, "target", model)?;

    if source.entity == target.entity && source.attribute == target.attribute {
        return Err(Error::schema(format!(
            "invalid relation definition: both sides use attribute '{}'",
            source.attribute
        )));
    }

    Ok((source, target))
}

fn validate_side<'a>(
    side: &'a RelationSideDescriptor,
    role: &str,
    model: &ResolvedModel,
) -> Result<Endpoint<'a>> {
    if is_blank(&side.entity) {
        return Err(Error::schema(format!(
            "invalid {role} side definition: a valid entity name is required"
        )));
    }
    if is_blank(&side.attribute_name) {
        return Err(Error::schema(format!(
            "invalid {role} side definition: a valid attribute name is required"
        )));
    }
    let Some(cardinality) = side.side else {
        return Err(Error::schema(format!(
            "invalid {role} side definition: a relation side is required"
        )));
    };

    let Some(entity) = model.get(&side.entity) else {
        return Err(Error::schema(format!(
            "invalid relation definition: {role} side points to an unknown entity '{}'",
            side.entity
        )));
    };
    if entity.attributes.contains(&side.attribute_name) {
        return Err(Error::schema(format!(
            "invalid relation definition: attribute '{}' is already defined on entity '{}'",
            side.attribute_name, entity.name
        )));
    }

    Ok(Endpoint {
        entity: entity.id,
        attribute: &side.attribute_name,
        side: cardinality,
        collection_type: side.collection_type,
    })
}

fn synthesize(
    relation: &RelationDescriptor,
    source: &Endpoint<'_>,
    target: &Endpoint<'_>,
    model: &mut ResolvedModel,
) -> Result<()> {
    let source_attribute = relation_attribute(relation, source, target, true, model)?;
    let target_attribute = relation_attribute(relation, target, source, false, model)?;

    debug!(
        source = source.attribute,
        target = target.attribute,
        kind = ?source_attribute.relation.as_ref().map(RelationInfo::relation_type),
        "synthesized relation"
    );

    attach(model, source.entity, source_attribute)?;
    attach(model, target.entity, target_attribute)
}

fn relation_attribute(
    relation: &RelationDescriptor,
    this: &Endpoint<'_>,
    other: &Endpoint<'_>,
    is_source: bool,
    model: &ResolvedModel,
) -> Result<ResolvedAttribute> {
    let other_entity = model
        .entity(other.entity)
        .ok_or_else(|| Error::schema("relation side points to an unresolved entity"))?;
    let element_type = other_entity
        .class_file
        .clone()
        .unwrap_or_else(|| other_entity.name.clone());

    let (ty, collection_type) = if other.side == Side::Many {
        let collection = other
            .collection_type
            .or(this.collection_type)
            .unwrap_or_default();
        (
            format!("{}<{element_type}>", collection.qualified_name()),
            Some(collection),
        )
    } else {
        (element_type, None)
    };

    let info = RelationInfo {
        target: other.entity,
        target_attribute: other.attribute.to_string(),
        join_table: relation.join_table.clone(),
        join_column: relation.join_column.clone(),
        collection_type,
        side: this.side,
        target_side: other.side,
        is_source,
    };

    Ok(ResolvedAttribute::new(this.attribute, ty).with_relation(info))
}

fn attach(model: &mut ResolvedModel, id: EntityId, attribute: ResolvedAttribute) -> Result<()> {
    let entity = model
        .entity_mut(id)
        .ok_or_else(|| Error::schema("relation side points to an unresolved entity"))?;
    entity.attributes.insert(attribute);
    Ok(())
}
