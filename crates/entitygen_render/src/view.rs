//! Serializable views of resolved entities handed to templates.

use entitygen_engine::{RelationInfo, ResolvedAttribute, ResolvedEntity, ResolvedModel};
use entitygen_foundation::naming::{package_of, simple_name};
use entitygen_foundation::{Error, Result};
use serde::Serialize;

use crate::imports::ImportMap;

/// Everything a template can see while rendering one entity.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateContext {
    /// The entity being rendered.
    pub entity: EntityView,
    /// Package of the entity's class file.
    pub package: String,
    /// Qualified names to import, mapped to their simple names.
    pub imports: ImportMap,
}

impl TemplateContext {
    /// Builds the context for one entity of a model.
    ///
    /// # Errors
    ///
    /// Returns a render error if the entity has no class file.
    pub fn new(entity: &ResolvedEntity, model: &ResolvedModel) -> Result<Self> {
        let imports = ImportMap::for_entity(entity);
        let view = EntityView::with_imports(entity, model, &imports)?;
        Ok(Self {
            package: view.package.clone(),
            imports,
            entity: view,
        })
    }
}

/// Template view of an entity.
#[derive(Clone, Debug, Serialize)]
pub struct EntityView {
    /// Entity name.
    pub name: String,
    /// Simple class name taken from the class file.
    pub class_name: String,
    /// Package taken from the class file.
    pub package: String,
    /// Fully qualified class file.
    pub class_file: String,
    /// Deployment table.
    pub deployment: Option<String>,
    /// Name of the root entity this one inherits from.
    pub root: Option<String>,
    /// Attributes sorted by name.
    pub attributes: Vec<AttributeView>,
}

impl EntityView {
    /// Builds the view of an entity.
    ///
    /// # Errors
    ///
    /// Returns a render error if the entity has no class file.
    pub fn new(entity: &ResolvedEntity, model: &ResolvedModel) -> Result<Self> {
        Self::with_imports(entity, model, &ImportMap::for_entity(entity))
    }

    fn with_imports(
        entity: &ResolvedEntity,
        model: &ResolvedModel,
        imports: &ImportMap,
    ) -> Result<Self> {
        let Some(class_file) = entity.class_file.clone() else {
            return Err(Error::render(&entity.name, "entity has no class file"));
        };

        Ok(Self {
            name: entity.name.clone(),
            class_name: simple_name(&class_file).to_string(),
            package: package_of(&class_file).to_string(),
            deployment: entity.deployment.clone(),
            root: model.root_of(entity).map(|root| root.name.clone()),
            attributes: entity
                .attributes
                .iter()
                .map(|attribute| AttributeView::new(attribute, model, imports))
                .collect(),
            class_file,
        })
    }
}

/// Template view of an attribute.
#[derive(Clone, Debug, Serialize)]
pub struct AttributeView {
    /// Attribute name.
    pub name: String,
    /// Full type as declared.
    #[serde(rename = "type")]
    pub ty: String,
    /// Type as it appears after imports. Names left out of the imports keep
    /// their package.
    pub short_type: String,
    /// Whether the attribute replaced an earlier definition.
    pub reintroduced: bool,
    /// Attribute flags, sorted.
    pub flags: Vec<String>,
    /// Relation metadata for synthesized relation attributes.
    pub relation: Option<RelationView>,
}

impl AttributeView {
    fn new(attribute: &ResolvedAttribute, model: &ResolvedModel, imports: &ImportMap) -> Self {
        Self {
            name: attribute.name.clone(),
            short_type: imports.display_type(&attribute.ty),
            ty: attribute.ty.clone(),
            reintroduced: attribute.reintroduced,
            flags: attribute.flags.iter().cloned().collect(),
            relation: attribute
                .relation
                .as_ref()
                .map(|info| RelationView::new(info, model)),
        }
    }
}

/// Template view of relation metadata.
#[derive(Clone, Debug, Serialize)]
pub struct RelationView {
    /// `ONE_TO_ONE`, `ONE_TO_MANY` or `MANY_TO_MANY`.
    pub kind: String,
    /// Cardinality of this side.
    pub side: String,
    /// Cardinality of the other side.
    pub target_side: String,
    /// Name of the entity on the other side.
    pub target: String,
    /// Attribute synthesized on the other side.
    pub target_attribute: String,
    /// Join table.
    pub join_table: Option<String>,
    /// Join column.
    pub join_column: Option<String>,
    /// `LIST` or `SET` when this side holds a collection.
    pub collection: Option<String>,
    /// Whether this attribute belongs to the relation's source side.
    pub owner: bool,
}

impl RelationView {
    fn new(info: &RelationInfo, model: &ResolvedModel) -> Self {
        Self {
            kind: info.relation_type().to_string(),
            side: info.side.to_string(),
            target_side: info.target_side.to_string(),
            target: model
                .entity(info.target)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            target_attribute: info.target_attribute.clone(),
            join_table: info.join_table.clone(),
            join_column: info.join_column.clone(),
            collection: info.collection_type.map(|c| c.to_string()),
            owner: info.is_source,
        }
    }
}
