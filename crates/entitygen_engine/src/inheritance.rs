//! Inheritance resolution.
//!
//! Entity descriptors from every schema are grouped by name, checked for
//! duplicate definitions and dangling roots, ordered so that roots are resolved
//! before the entities referencing them, and merged one descriptor at a time
//! into a [`ResolvedModel`].

use std::collections::HashMap;

use entitygen_foundation::naming::{is_blank_opt, package_of, qualify};
use entitygen_foundation::{EntityId, Error, ErrorContext, Result};
use entitygen_schema::{EntityDescriptor, SchemaDescriptor};
use tracing::{debug, trace};

use crate::model::{ResolvedAttribute, ResolvedModel};

/// All descriptors sharing one entity name, in input order.
#[derive(Debug)]
struct Group<'a> {
    name: &'a str,
    descriptors: Vec<&'a EntityDescriptor>,
}

impl<'a> Group<'a> {
    fn has_rootless(&self) -> bool {
        self.descriptors.iter().any(|d| d.is_rootless())
    }

    /// Rootless descriptor first, then the fragments in input order.
    fn processing_order(&self) -> impl Iterator<Item = &'a EntityDescriptor> + '_ {
        let rootless = self.descriptors.iter().filter(|d| d.is_rootless());
        let fragments = self.descriptors.iter().filter(|d| !d.is_rootless());
        rootless.chain(fragments).copied()
    }
}

/// Groups entity descriptors by name, preserving first-appearance order.
struct Groups<'a> {
    groups: Vec<Group<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> Groups<'a> {
    fn collect(schemas: &'a [SchemaDescriptor]) -> Self {
        let mut groups: Vec<Group<'a>> = Vec::new();
        let mut index = HashMap::new();

        for descriptor in schemas.iter().flat_map(|s| &s.entities) {
            let name = descriptor.name.as_str();
            let slot = *index.entry(name).or_insert_with(|| {
                groups.push(Group {
                    name,
                    descriptors: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].descriptors.push(descriptor);
        }

        Self { groups, index }
    }

    fn check_duplicates(&self) -> Result<()> {
        for group in &self.groups {
            let rootless = group.descriptors.iter().filter(|d| d.is_rootless()).count();
            if rootless > 1 {
                return Err(Error::duplicate_entity(group.name));
            }
        }
        Ok(())
    }

    fn check_roots(&self) -> Result<()> {
        for group in &self.groups {
            for descriptor in &group.descriptors {
                let Some(root) = &descriptor.root else {
                    continue;
                };
                if !self.index.contains_key(root.name.as_str()) {
                    return Err(Error::unknown_root(group.name, &root.name));
                }
                if !root.extend && root.name == group.name {
                    return Err(Error::schema(format!(
                        "entity '{}' cannot inherit from itself",
                        group.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Groups extending `root`, directly or through another extension.
    fn extenders_of(&self, root: usize) -> Vec<usize> {
        let mut targets = vec![root];
        let mut found = Vec::new();
        let mut changed = true;

        while changed {
            changed = false;
            for (idx, group) in self.groups.iter().enumerate() {
                if found.contains(&idx) || idx == root {
                    continue;
                }
                let extends_target = group.descriptors.iter().any(|d| {
                    d.root.as_ref().is_some_and(|r| {
                        r.extend && targets.contains(&self.index[r.name.as_str()])
                    })
                });
                if extends_target {
                    found.push(idx);
                    targets.push(idx);
                    changed = true;
                }
            }
        }

        found
    }

    /// The group holding the entity `idx` names. A group made only of extension
    /// fragments is an alias, so the chain is followed to the group that defines
    /// or inherits the entity.
    fn holder(&self, idx: usize) -> usize {
        let mut current = idx;
        let mut seen = vec![idx];
        loop {
            let group = &self.groups[current];
            let defines = group
                .descriptors
                .iter()
                .any(|d| d.is_rootless() || d.root.as_ref().is_some_and(|r| !r.extend));
            if defines {
                return current;
            }
            let next = group
                .descriptors
                .iter()
                .find_map(|d| d.root.as_ref())
                .map(|r| self.index[r.name.as_str()]);
            match next {
                Some(next) if !seen.contains(&next) => {
                    seen.push(next);
                    current = next;
                }
                // Cycles are reported by the ordering pass.
                _ => return current,
            }
        }
    }

    /// Groups that must be fully processed before `idx`.
    fn dependencies(&self, idx: usize) -> Result<Vec<usize>> {
        let group = &self.groups[idx];
        let mut deps = Vec::new();

        for descriptor in &group.descriptors {
            let Some(root) = &descriptor.root else {
                continue;
            };
            let root_idx = self.index[root.name.as_str()];

            if root_idx == idx {
                // Self-extension merges into this group's own rootless definition.
                if !group.has_rootless() {
                    return Err(cycle_error(group.name));
                }
                continue;
            }
            deps.push(root_idx);

            if !root.extend {
                let holder = self.holder(root_idx);
                if holder != idx {
                    deps.push(holder);
                }
                deps.extend(self.extenders_of(holder).into_iter().filter(|&e| e != idx));
            }
        }

        deps.sort_unstable();
        deps.dedup();
        Ok(deps)
    }

    /// Rootless groups first, then the rest, each placed after its dependencies.
    fn resolution_order(&self) -> Result<Vec<usize>> {
        let priority: Vec<usize> = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.has_rootless())
            .chain(self.groups.iter().enumerate().filter(|(_, g)| !g.has_rootless()))
            .map(|(idx, _)| idx)
            .collect();

        let mut rank = vec![0; self.groups.len()];
        for (position, &idx) in priority.iter().enumerate() {
            rank[idx] = position;
        }

        let mut state = vec![Visit::Pending; self.groups.len()];
        let mut order = Vec::with_capacity(self.groups.len());
        for &idx in &priority {
            self.visit(idx, &rank, &mut state, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        idx: usize,
        rank: &[usize],
        state: &mut [Visit],
        order: &mut Vec<usize>,
    ) -> Result<()> {
        match state[idx] {
            Visit::Done => return Ok(()),
            Visit::Active => return Err(cycle_error(self.groups[idx].name)),
            Visit::Pending => {}
        }
        state[idx] = Visit::Active;

        let mut deps = self.dependencies(idx)?;
        deps.sort_by_key(|&d| rank[d]);
        for dep in deps {
            self.visit(dep, rank, state, order)?;
        }

        state[idx] = Visit::Done;
        order.push(idx);
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    Active,
    Done,
}

fn cycle_error(name: &str) -> Error {
    Error::schema(format!("cyclic root reference involving entity '{name}'"))
}

/// Resolves every entity descriptor of every schema into a model.
///
/// # Errors
///
/// Returns a schema error for duplicate rootless definitions, unknown or cyclic
/// roots, and duplicate attributes without reintroduction.
pub fn resolve_inheritance(schemas: &[SchemaDescriptor]) -> Result<ResolvedModel> {
    let groups = Groups::collect(schemas);
    groups.check_duplicates()?;
    groups.check_roots()?;
    let order = groups.resolution_order()?;

    let mut model = ResolvedModel::new();
    let mut inheritors = Vec::new();

    for idx in order {
        let group = &groups.groups[idx];
        debug!(entity = group.name, fragments = group.descriptors.len(), "resolving entity");

        for descriptor in group.processing_order() {
            let id = process_entity_descriptor(descriptor, &mut model)
                .map_err(|e| e.with_context(ErrorContext::new().with_entity(group.name)))?;
            if descriptor.root.as_ref().is_some_and(|r| !r.extend) && !inheritors.contains(&id) {
                inheritors.push(id);
            }
        }
    }

    for id in inheritors {
        complete_inheritor(&mut model, id);
    }

    Ok(model)
}

/// Merges one descriptor into the model and returns the handle it resolved to.
///
/// # Errors
///
/// Returns a schema error if the root is not resolved yet or an attribute is
/// duplicated without being reintroduced.
pub fn process_entity_descriptor(
    descriptor: &EntityDescriptor,
    model: &mut ResolvedModel,
) -> Result<EntityId> {
    let id = match &descriptor.root {
        Some(root) => {
            let root_id = model
                .id_of(&root.name)
                .ok_or_else(|| Error::unknown_root(&descriptor.name, &root.name))?;

            if root.extend {
                trace!(fragment = %descriptor.name, root = %root.name, "extending root");
                root_id
            } else {
                let id = current_or_allocate(model, &descriptor.name);
                if id == root_id {
                    return Err(Error::schema(format!(
                        "entity '{}' cannot inherit from itself",
                        descriptor.name
                    )));
                }
                seed_from_root(model, id, root_id);
                id
            }
        }
        None => current_or_allocate(model, &descriptor.name),
    };

    let Some(current) = model.entity_mut(id) else {
        return Err(Error::schema(format!(
            "entity '{}' has no resolved definition",
            descriptor.name
        )));
    };

    if is_blank_opt(current.deployment.as_deref()) && !is_blank_opt(descriptor.deployment.as_deref()) {
        current.deployment.clone_from(&descriptor.deployment);
    }
    if is_blank_opt(current.class_file.as_deref()) && !is_blank_opt(descriptor.class_file.as_deref()) {
        current.class_file.clone_from(&descriptor.class_file);
    }

    for attribute in &descriptor.attributes {
        if current.attributes.contains(&attribute.name) && !attribute.reintroduce {
            return Err(Error::duplicate_attribute(&current.name, &attribute.name));
        }
        current.attributes.insert(ResolvedAttribute::from_descriptor(attribute));
    }

    model.bind(&descriptor.name, id);
    Ok(id)
}

fn current_or_allocate(model: &mut ResolvedModel, name: &str) -> EntityId {
    match model.id_of(name) {
        Some(id) => id,
        None => model.allocate(name),
    }
}

fn seed_from_root(model: &mut ResolvedModel, id: EntityId, root_id: EntityId) {
    let seed: Vec<ResolvedAttribute> = model
        .entity(root_id)
        .map(|root| root.attributes.iter().cloned().collect())
        .unwrap_or_default();

    if let Some(current) = model.entity_mut(id) {
        current.root = Some(root_id);
        for attribute in seed {
            current.attributes.insert_if_absent(attribute);
        }
    }
}

/// Gives an inheriting entity the root's deployment and a class file in the
/// root's package when its own descriptors left them unset.
fn complete_inheritor(model: &mut ResolvedModel, id: EntityId) {
    let Some(root) = model.entity(id).and_then(|e| model.root_of(e)) else {
        return;
    };
    let root_deployment = root.deployment.clone();
    let root_package = root.class_file.as_deref().map(|cf| package_of(cf).to_string());

    if let Some(entity) = model.entity_mut(id) {
        if is_blank_opt(entity.deployment.as_deref()) {
            entity.deployment = root_deployment;
        }
        if is_blank_opt(entity.class_file.as_deref()) {
            if let Some(package) = root_package {
                entity.class_file = Some(qualify(&package, &entity.name));
            }
        }
    }
}
