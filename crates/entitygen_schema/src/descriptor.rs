//! Raw schema descriptors.
//!
//! Descriptors mirror the JSON schema documents one to one and carry no behavior.
//! They are produced by [`crate::parse`] (or built directly in code) and are never
//! mutated by the resolution engine.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

const fn default_extend() -> bool {
    true
}

/// One schema document: entities plus the relations between them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    /// Entity descriptors in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<EntityDescriptor>,
    /// Relation descriptors in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<RelationDescriptor>,
}

impl SchemaDescriptor {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity descriptor.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.push(entity);
        self
    }

    /// Adds a relation descriptor.
    #[must_use]
    pub fn with_relation(mut self, relation: RelationDescriptor) -> Self {
        self.relations.push(relation);
        self
    }
}

/// Declaration of an entity, or a fragment extending/inheriting from another one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    /// Entity name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Storage (table) identifier.
    #[serde(default)]
    pub deployment: Option<String>,
    /// Fully-qualified output identifier, e.g. `com.acme.model.User`.
    #[serde(default)]
    pub class_file: Option<String>,
    /// Root this descriptor extends or inherits from.
    #[serde(default)]
    pub root: Option<RootDescriptor>,
    /// Attributes in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<AttributeDescriptor>,
}

impl EntityDescriptor {
    /// Creates a descriptor with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the deployment.
    #[must_use]
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    /// Sets the class file.
    #[must_use]
    pub fn with_class_file(mut self, class_file: impl Into<String>) -> Self {
        self.class_file = Some(class_file.into());
        self
    }

    /// Sets the root.
    #[must_use]
    pub fn with_root(mut self, root: RootDescriptor) -> Self {
        self.root = Some(root);
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns true if this descriptor is a top-level (rootless) definition.
    #[must_use]
    pub fn is_rootless(&self) -> bool {
        self.root.is_none()
    }
}

/// Reference from an entity descriptor to its root entity.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootDescriptor {
    /// Name of the root entity.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// `true` merges into the root in place; `false` creates an inheriting entity.
    #[serde(default = "default_extend")]
    pub extend: bool,
}

impl RootDescriptor {
    /// A root that the descriptor merges into (extension).
    #[must_use]
    pub fn extend(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extend: true,
        }
    }

    /// A root that the descriptor inherits from (new entity).
    #[must_use]
    pub fn inherit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extend: false,
        }
    }
}

/// Declaration of a single entity attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    /// Attribute name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Opaque type identifier, usually fully qualified.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub ty: String,
    /// Replace an existing attribute of the same name instead of conflicting with it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reintroduce: bool,
    /// Free-form tags passed through to the renderer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: BTreeSet<String>,
}

impl AttributeDescriptor {
    /// Creates an attribute with a name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Self::default()
        }
    }

    /// Marks the attribute as a reintroduction.
    #[must_use]
    pub fn reintroduced(mut self) -> Self {
        self.reintroduce = true;
        self
    }

    /// Adds a flag.
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }
}

/// Declaration of a relation between two entities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDescriptor {
    /// Owning side.
    #[serde(default)]
    pub source: Option<RelationSideDescriptor>,
    /// Inverse side.
    #[serde(default)]
    pub target: Option<RelationSideDescriptor>,
    /// Join table identifier.
    #[serde(default)]
    pub join_table: Option<String>,
    /// Join column identifier.
    #[serde(default)]
    pub join_column: Option<String>,
}

impl RelationDescriptor {
    /// Creates a relation between two sides.
    #[must_use]
    pub fn new(source: RelationSideDescriptor, target: RelationSideDescriptor) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            join_table: None,
            join_column: None,
        }
    }

    /// Sets the join table.
    #[must_use]
    pub fn with_join_table(mut self, join_table: impl Into<String>) -> Self {
        self.join_table = Some(join_table.into());
        self
    }

    /// Sets the join column.
    #[must_use]
    pub fn with_join_column(mut self, join_column: impl Into<String>) -> Self {
        self.join_column = Some(join_column.into());
        self
    }
}

/// One endpoint of a relation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSideDescriptor {
    /// Name of the entity on this side.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity: String,
    /// Name of the attribute synthesized on this side's entity.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attribute_name: String,
    /// Cardinality of this side.
    #[serde(default)]
    pub side: Option<Side>,
    /// Collection kind, meaningful when this side is [`Side::Many`].
    #[serde(default)]
    pub collection_type: Option<CollectionType>,
}

impl RelationSideDescriptor {
    /// A side holding a single entity.
    #[must_use]
    pub fn one(entity: impl Into<String>, attribute_name: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            attribute_name: attribute_name.into(),
            side: Some(Side::One),
            collection_type: None,
        }
    }

    /// A side holding many entities.
    #[must_use]
    pub fn many(entity: impl Into<String>, attribute_name: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            attribute_name: attribute_name.into(),
            side: Some(Side::Many),
            collection_type: None,
        }
    }

    /// Sets the collection kind.
    #[must_use]
    pub fn with_collection_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = Some(collection_type);
        self
    }
}

/// Cardinality of a relation side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Exactly one entity on this side.
    One,
    /// Many entities on this side.
    Many,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "ONE"),
            Self::Many => write!(f, "MANY"),
        }
    }
}

/// Collection kind used for the many-valued end of a relation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollectionType {
    /// Ordered list.
    #[default]
    List,
    /// Unordered set.
    Set,
}

impl CollectionType {
    /// Fully-qualified type identifier of the collection.
    #[must_use]
    pub const fn qualified_name(self) -> &'static str {
        match self {
            Self::List => "java.util.List",
            Self::Set => "java.util.Set",
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "LIST"),
            Self::Set => write!(f, "SET"),
        }
    }
}
