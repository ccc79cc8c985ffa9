//! Integration tests for inheritance and extension resolution

use entitygen_engine::{ResolvedModel, resolve};
use entitygen_schema::{AttributeDescriptor, EntityDescriptor, RootDescriptor, SchemaDescriptor};

use crate::fixture;

fn names(model: &ResolvedModel, entity: &str) -> Vec<String> {
    model
        .get(entity)
        .unwrap()
        .attributes
        .names()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Fixtures
// =============================================================================

#[test]
fn people_fixture_has_three_entities() {
    let model = resolve(&[fixture("people/people-entities.json")]).unwrap();
    assert_eq!(model.len(), 3);

    let user = model.get("User").unwrap();
    let customer = model.get("Customer").unwrap();
    let employee = model.get("Employee").unwrap();

    assert!(user.root.is_none());
    assert_eq!(customer.root, Some(user.id));
    assert_eq!(employee.root, Some(user.id));
    assert_eq!(model.root_of(customer), Some(user));
    assert_eq!(names(&model, "User"), vec!["email", "id"]);
}

#[test]
fn people_fixture_inheritors_copy_root_attributes() {
    let model = resolve(&[fixture("people/people-entities.json")]).unwrap();
    assert_eq!(names(&model, "Customer"), vec!["email", "id", "loyaltyNumber"]);
    assert_eq!(names(&model, "Employee"), vec!["email", "id", "salary"]);
    assert!(model.get("Employee").unwrap().attribute("id").unwrap().has_flag("id"));
}

#[test]
fn inheritor_without_deployment_takes_roots() {
    let model = resolve(&[fixture("people/people-entities.json")]).unwrap();
    let employee = model.get("Employee").unwrap();
    assert_eq!(employee.deployment.as_deref(), Some("users"));
    assert_eq!(employee.class_file.as_deref(), Some("com.acme.people.Employee"));

    let customer = model.get("Customer").unwrap();
    assert_eq!(customer.deployment.as_deref(), Some("customers"));
}

#[test]
fn reintroduction_across_files() {
    let model = resolve(&[
        fixture("reintroduce/user-details-entities.json"),
        fixture("reintroduce/user-entities.json"),
    ])
    .unwrap();

    assert_eq!(model.len(), 1);
    assert!(model.is_alias("UserDetails"));
    let user = model.get("User").unwrap();
    assert_eq!(model.get("UserDetails").unwrap().id, user.id);

    let dob = user.attribute("dateOfBirth").unwrap();
    assert_eq!(dob.ty, "java.time.LocalDate");
    assert!(dob.reintroduced);
    assert_eq!(
        user.attributes.iter().filter(|a| a.name == "dateOfBirth").count(),
        1
    );
    assert!(user.attribute("nickname").is_some());
}

#[test]
fn duplicate_attribute_fixture_fails() {
    let err = resolve(&[fixture("invalid/entitiesWithDuplicateAttributes.json")]).unwrap_err();
    assert!(err.is_schema());
    assert!(format!("{err}").contains("duplicate attribute 'email'"));
}

#[test]
fn duplicate_entity_fixture_fails() {
    let err = resolve(&[fixture("invalid/duplicatedEntities1.json")]).unwrap_err();
    assert!(format!("{err}").contains("duplicate 'User' entity"));
}

#[test]
fn missing_deployment_fixture_fails() {
    let err = resolve(&[fixture("invalid/entitiesWithoutDeployment.json")]).unwrap_err();
    assert!(err.is_schema());
}

// =============================================================================
// Extension Semantics
// =============================================================================

fn user() -> EntityDescriptor {
    EntityDescriptor::new("User")
        .with_deployment("users")
        .with_class_file("com.acme.User")
        .with_attribute(AttributeDescriptor::new("id", "java.lang.Long"))
}

#[test]
fn extension_is_the_root_entity() {
    let schema = SchemaDescriptor::new().with_entity(user()).with_entity(
        EntityDescriptor::new("Audit")
            .with_root(RootDescriptor::extend("User"))
            .with_attribute(AttributeDescriptor::new("createdAt", "java.time.Instant")),
    );
    let model = resolve(&[schema]).unwrap();

    let audit = model.get("Audit").unwrap();
    assert_eq!(audit.name, "User");
    assert!(audit.attribute("createdAt").is_some());
    assert_eq!(model.entities().len(), 1);
}

#[test]
fn reintroduce_replaces_type_and_flags() {
    let schema = SchemaDescriptor::new().with_entity(user()).with_entity(
        EntityDescriptor::new("UserIds").with_root(RootDescriptor::extend("User")).with_attribute(
            AttributeDescriptor::new("id", "java.util.UUID")
                .reintroduced()
                .with_flag("generated"),
        ),
    );
    let model = resolve(&[schema]).unwrap();
    let id = model.get("User").unwrap().attribute("id").unwrap();
    assert_eq!(id.ty, "java.util.UUID");
    assert!(id.has_flag("generated"));
}

#[test]
fn extension_declared_before_root_still_resolves() {
    let schema = SchemaDescriptor::new()
        .with_entity(
            EntityDescriptor::new("UserExtras")
                .with_root(RootDescriptor::extend("User"))
                .with_attribute(AttributeDescriptor::new("nickname", "java.lang.String")),
        )
        .with_entity(user());
    let model = resolve(&[schema]).unwrap();
    assert!(model.get("User").unwrap().attribute("nickname").is_some());
}

#[test]
fn inheritor_sees_attributes_added_by_extensions() {
    let schema = SchemaDescriptor::new()
        .with_entity(
            EntityDescriptor::new("Admin")
                .with_root(RootDescriptor::inherit("User"))
                .with_attribute(AttributeDescriptor::new("level", "int")),
        )
        .with_entity(user())
        .with_entity(
            EntityDescriptor::new("UserExtras")
                .with_root(RootDescriptor::extend("User"))
                .with_attribute(AttributeDescriptor::new("nickname", "java.lang.String")),
        );
    let model = resolve(&[schema]).unwrap();
    let admin = model.get("Admin").unwrap();
    assert!(admin.attribute("nickname").is_some());
    assert!(admin.attribute("level").is_some());
    assert!(model.get("User").unwrap().attribute("level").is_none());
}

#[test]
fn inheriting_from_an_extension_alias_inherits_the_root() {
    let schema = SchemaDescriptor::new()
        .with_entity(user())
        .with_entity(
            EntityDescriptor::new("UserExtras")
                .with_root(RootDescriptor::extend("User"))
                .with_attribute(AttributeDescriptor::new("nickname", "java.lang.String")),
        )
        .with_entity(
            EntityDescriptor::new("Customer")
                .with_root(RootDescriptor::inherit("UserExtras"))
                .with_attribute(AttributeDescriptor::new("loyaltyNumber", "java.lang.String")),
        );
    let model = resolve(&[schema]).unwrap();

    let customer = model.get("Customer").unwrap();
    assert_eq!(model.root_of(customer).unwrap().name, "User");
    assert_eq!(names(&model, "Customer"), vec!["id", "loyaltyNumber", "nickname"]);
    assert_eq!(customer.deployment.as_deref(), Some("users"));
    assert_eq!(customer.class_file.as_deref(), Some("com.acme.Customer"));
}

#[test]
fn inheritor_of_alias_listed_before_second_extension() {
    let schema = SchemaDescriptor::new()
        .with_entity(user())
        .with_entity(EntityDescriptor::new("UserExtras").with_root(RootDescriptor::extend("User")))
        .with_entity(
            EntityDescriptor::new("Customer").with_root(RootDescriptor::inherit("UserExtras")),
        )
        .with_entity(
            EntityDescriptor::new("MoreExtras")
                .with_root(RootDescriptor::extend("User"))
                .with_attribute(AttributeDescriptor::new("avatar", "java.net.URI")),
        );
    let model = resolve(&[schema]).unwrap();

    assert_eq!(names(&model, "User"), vec!["avatar", "id"]);
    assert_eq!(names(&model, "Customer"), vec!["avatar", "id"]);
}

#[test]
fn unknown_root_fails() {
    let schema = SchemaDescriptor::new().with_entity(user()).with_entity(
        EntityDescriptor::new("Customer").with_root(RootDescriptor::inherit("Person")),
    );
    let err = resolve(&[schema]).unwrap_err();
    assert!(format!("{err}").contains("unknown root 'Person'"));
}

#[test]
fn cyclic_roots_fail() {
    let schema = SchemaDescriptor::new()
        .with_entity(EntityDescriptor::new("A").with_root(RootDescriptor::inherit("B")))
        .with_entity(EntityDescriptor::new("B").with_root(RootDescriptor::inherit("A")));
    let err = resolve(&[schema]).unwrap_err();
    assert!(format!("{err}").contains("cyclic"));
}

#[test]
fn names_are_case_sensitive() {
    let schema = SchemaDescriptor::new().with_entity(user()).with_entity(
        EntityDescriptor::new("UserExtras")
            .with_root(RootDescriptor::extend("User"))
            .with_attribute(AttributeDescriptor::new("ID", "java.lang.Long")),
    );
    let model = resolve(&[schema]).unwrap();
    assert!(model.get("user").is_none());
    assert_eq!(names(&model, "User"), vec!["ID", "id"]);
}
