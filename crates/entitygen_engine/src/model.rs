//! The resolved entity model.
//!
//! Entities live in an arena owned by [`ResolvedModel`] and are addressed by
//! [`EntityId`]. The model's name index maps every descriptor name to a handle;
//! extension fragments alias the handle of the entity they extend, so several
//! names may resolve to the same entity.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use entitygen_foundation::EntityId;
use entitygen_schema::{AttributeDescriptor, CollectionType, Side};

/// Kind of a relation, derived from the cardinality of both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// Both sides are [`Side::One`].
    OneToOne,
    /// The sides differ.
    OneToMany,
    /// Both sides are [`Side::Many`].
    ManyToMany,
}

impl RelationType {
    /// Derives the relation type from the cardinalities of its two sides.
    #[must_use]
    pub const fn from_sides(a: Side, b: Side) -> Self {
        match (a, b) {
            (Side::One, Side::One) => Self::OneToOne,
            (Side::Many, Side::Many) => Self::ManyToMany,
            (Side::One, Side::Many) | (Side::Many, Side::One) => Self::OneToMany,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToOne => write!(f, "ONE_TO_ONE"),
            Self::OneToMany => write!(f, "ONE_TO_MANY"),
            Self::ManyToMany => write!(f, "MANY_TO_MANY"),
        }
    }
}

/// Relation metadata attached to a synthesized attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationInfo {
    /// Entity on the other side.
    pub target: EntityId,
    /// Attribute synthesized on the other side.
    pub target_attribute: String,
    /// Join table identifier.
    pub join_table: Option<String>,
    /// Join column identifier.
    pub join_column: Option<String>,
    /// Collection kind when this attribute holds many entities.
    pub collection_type: Option<CollectionType>,
    /// Cardinality of this attribute's side.
    pub side: Side,
    /// Cardinality of the other side.
    pub target_side: Side,
    /// Whether this attribute belongs to the relation's source side.
    pub is_source: bool,
}

impl RelationInfo {
    /// Returns the derived relation type.
    #[must_use]
    pub const fn relation_type(&self) -> RelationType {
        RelationType::from_sides(self.side, self.target_side)
    }

    /// Returns true if this attribute holds a collection of target entities.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.target_side == Side::Many
    }
}

/// A resolved attribute. Identity is the name alone.
#[derive(Clone, Debug)]
pub struct ResolvedAttribute {
    /// Attribute name.
    pub name: String,
    /// Opaque type identifier.
    pub ty: String,
    /// Whether this definition replaced an earlier one.
    pub reintroduced: bool,
    /// Free-form tags.
    pub flags: BTreeSet<String>,
    /// Relation metadata for synthesized relation attributes.
    pub relation: Option<RelationInfo>,
}

impl ResolvedAttribute {
    /// Creates a plain attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            reintroduced: false,
            flags: BTreeSet::new(),
            relation: None,
        }
    }

    /// Builds an attribute from its descriptor.
    #[must_use]
    pub fn from_descriptor(descriptor: &AttributeDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            ty: descriptor.ty.clone(),
            reintroduced: descriptor.reintroduce,
            flags: descriptor.flags.clone(),
            relation: None,
        }
    }

    /// Attaches relation metadata.
    #[must_use]
    pub fn with_relation(mut self, relation: RelationInfo) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Returns true if the attribute carries the given flag.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

impl PartialEq for ResolvedAttribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResolvedAttribute {}

impl Hash for ResolvedAttribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Name-keyed attribute container. Iteration is sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: BTreeMap<String, ResolvedAttribute>,
}

impl AttributeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns true if an attribute with exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Looks up an attribute by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedAttribute> {
        self.attributes.get(name)
    }

    /// Inserts an attribute, overwriting any entry with the same name.
    ///
    /// Returns the replaced attribute.
    pub fn insert(&mut self, attribute: ResolvedAttribute) -> Option<ResolvedAttribute> {
        self.attributes.insert(attribute.name.clone(), attribute)
    }

    /// Inserts an attribute unless one with the same name exists.
    ///
    /// Returns true if the attribute was inserted.
    pub fn insert_if_absent(&mut self, attribute: ResolvedAttribute) -> bool {
        if self.contains(&attribute.name) {
            return false;
        }
        self.insert(attribute);
        true
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAttribute> {
        self.attributes.values()
    }

    /// Iterates attribute names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a ResolvedAttribute;
    type IntoIter = std::collections::btree_map::Values<'a, String, ResolvedAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.values()
    }
}

impl FromIterator<ResolvedAttribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = ResolvedAttribute>>(iter: T) -> Self {
        let mut set = Self::new();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

/// A resolved entity. Identity is the name alone.
#[derive(Clone, Debug)]
pub struct ResolvedEntity {
    /// Handle of this entity in its model.
    pub id: EntityId,
    /// Entity name.
    pub name: String,
    /// Storage (table) identifier.
    pub deployment: Option<String>,
    /// Fully-qualified output identifier.
    pub class_file: Option<String>,
    /// Entity this one inherits from.
    pub root: Option<EntityId>,
    /// Attributes keyed by name.
    pub attributes: AttributeSet,
}

impl ResolvedEntity {
    fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            deployment: None,
            class_file: None,
            root: None,
            attributes: AttributeSet::new(),
        }
    }

    /// Looks up an attribute by exact name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ResolvedAttribute> {
        self.attributes.get(name)
    }
}

impl PartialEq for ResolvedEntity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResolvedEntity {}

impl Hash for ResolvedEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Result of a resolution run.
#[derive(Clone, Debug, Default)]
pub struct ResolvedModel {
    arena: Vec<ResolvedEntity>,
    names: BTreeMap<String, EntityId>,
}

impl ResolvedModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle bound to a descriptor name, following aliases.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    /// Returns the entity bound to a descriptor name, following aliases.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedEntity> {
        self.id_of(name).and_then(|id| self.entity(id))
    }

    /// Returns the entity behind a handle.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&ResolvedEntity> {
        self.arena.get(id.index())
    }

    /// Returns the root an entity inherits from.
    #[must_use]
    pub fn root_of(&self, entity: &ResolvedEntity) -> Option<&ResolvedEntity> {
        entity.root.and_then(|id| self.entity(id))
    }

    /// Returns true if the name is an extension alias of another entity.
    #[must_use]
    pub fn is_alias(&self, name: &str) -> bool {
        self.get(name).is_some_and(|entity| entity.name != name)
    }

    /// Iterates all bound names with their handles, aliases included.
    pub fn names(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Returns the distinct resolved entities, sorted by name.
    #[must_use]
    pub fn entities(&self) -> Vec<&ResolvedEntity> {
        let ids: BTreeSet<EntityId> = self.names.values().copied().collect();
        let mut entities: Vec<_> = ids.into_iter().filter_map(|id| self.entity(id)).collect();
        entities.sort_by(|a, b| a.name.cmp(&b.name));
        entities
    }

    /// Number of distinct resolved entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.values().collect::<BTreeSet<_>>().len()
    }

    /// Returns true if nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn allocate(&mut self, name: &str) -> EntityId {
        let index = u32::try_from(self.arena.len()).unwrap_or(u32::MAX);
        let id = EntityId::new(index);
        self.arena.push(ResolvedEntity::new(id, name.to_string()));
        id
    }

    pub(crate) fn bind(&mut self, name: &str, id: EntityId) {
        self.names.insert(name.to_string(), id);
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut ResolvedEntity> {
        self.arena.get_mut(id.index())
    }
}
