//! Scan → parse → resolve over the fixture tree

use entitygen_engine::resolve;
use entitygen_foundation::Result;
use entitygen_schema::{SchemaDescriptor, SchemaScanner, parse_source};

use crate::fixtures;

fn load(scanner: &SchemaScanner, pattern: &str) -> Result<Vec<SchemaDescriptor>> {
    let found = scanner.find_schemas(pattern)?;
    scanner.open(&found)?.into_iter().map(parse_source).collect()
}

#[test]
fn reintroduction_fixture_resolves_from_disk() {
    let scanner = SchemaScanner::new([fixtures().join("reintroduce")]);
    let schemas = load(&scanner, entitygen_schema::DEFAULT_SCHEMA_PATTERN).unwrap();
    assert_eq!(schemas.len(), 2);

    let model = resolve(&schemas).unwrap();
    let dob = model.get("User").unwrap().attribute("dateOfBirth").unwrap();
    assert_eq!(dob.ty, "java.time.LocalDate");
    assert!(dob.reintroduced);
}

#[test]
fn people_and_shop_resolve_together() {
    let scanner = SchemaScanner::new([fixtures().join("people"), fixtures().join("shop")]);
    let schemas = load(&scanner, entitygen_schema::DEFAULT_SCHEMA_PATTERN).unwrap();
    let model = resolve(&schemas).unwrap();

    let names: Vec<_> = model.entities().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Customer", "Employee", "Item", "Order", "User"]);
}

#[test]
fn duplicate_entities_fixture_is_found_by_pattern() {
    let scanner = SchemaScanner::new([fixtures()]);
    let schemas = load(&scanner, r"duplicatedEntities1\.json").unwrap();
    assert_eq!(schemas.len(), 1);
    assert!(resolve(&schemas).unwrap_err().is_schema());
}

#[test]
fn nothing_matched_is_an_argument_error_for_resolve() {
    let scanner = SchemaScanner::new([fixtures()]);
    let schemas = load(&scanner, r"no-such-file\.json").unwrap();
    assert!(schemas.is_empty());
    assert!(resolve(&schemas).unwrap_err().is_argument());
}
