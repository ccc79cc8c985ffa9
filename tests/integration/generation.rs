//! Full generation runs through the runtime layer

use std::fs;

use entitygen_foundation::ErrorKind;
use entitygen_runtime::{Cli, Generator, GeneratorConfig, RunOutcome};
use clap::Parser;

use crate::fixtures;

fn generate(config: GeneratorConfig) -> (tempfile::TempDir, RunOutcome) {
    let out = tempfile::tempdir().unwrap();
    let outcome = Generator::new(config).generate(out.path()).unwrap();
    (out, outcome)
}

#[test]
fn writes_every_entity_below_its_package() {
    let config = GeneratorConfig::new()
        .with_schema_roots([fixtures().join("people"), fixtures().join("shop")]);
    let (out, outcome) = generate(config);

    let RunOutcome::Generated(summary) = outcome else {
        panic!("expected generated output");
    };
    assert_eq!(summary.schemas, 2);
    assert_eq!(summary.entities, 5);
    assert!(summary.writes.is_complete());

    for path in [
        "com/acme/people/User.java",
        "com/acme/people/Customer.java",
        "com/acme/people/Employee.java",
        "com/acme/shop/Order.java",
        "com/acme/shop/Item.java",
    ] {
        assert!(out.path().join(path).is_file(), "missing {path}");
    }

    let order = fs::read_to_string(out.path().join("com/acme/shop/Order.java")).unwrap();
    assert!(order.contains("import java.util.List;"));
    assert!(order.contains("private List<Item> items;"));
}

#[test]
fn extension_aliases_do_not_produce_files() {
    let config = GeneratorConfig::new().with_schema_roots([fixtures().join("reintroduce")]);
    let (out, outcome) = generate(config);

    let RunOutcome::Generated(summary) = outcome else {
        panic!("expected generated output");
    };
    assert_eq!(summary.writes.written, vec![out.path().join("com/acme/User.java")]);

    let user = fs::read_to_string(&summary.writes.written[0]).unwrap();
    assert!(user.contains("private LocalDate dateOfBirth;"));
    assert!(user.contains("private String nickname;"));
}

#[test]
fn custom_extension_and_template() {
    let templates = tempfile::tempdir().unwrap();
    fs::write(templates.path().join("names.txt"), "{{ entity.class_file }}\n").unwrap();

    let config = GeneratorConfig::new()
        .with_schema_roots([fixtures().join("shop")])
        .with_template_dir(templates.path())
        .with_template("names.txt")
        .with_extension("txt");
    let (out, _) = generate(config);

    let text = fs::read_to_string(out.path().join("com/acme/shop/Item.txt")).unwrap();
    assert_eq!(text, "com.acme.shop.Item\n");
}

#[test]
fn no_schemas_found() {
    let empty = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new().with_schema_roots([empty.path()]);
    let (out, outcome) = generate(config);
    assert!(matches!(outcome, RunOutcome::NoSchemas));
    assert!(fs::read_dir(out.path()).unwrap().next().is_none());
}

#[test]
fn invalid_fixture_aborts_the_run() {
    let out = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new().with_schema_roots([fixtures().join("invalid")]);
    let err = Generator::new(config).generate(out.path()).unwrap_err();

    // malformed-entities.json is the only default-pattern match in that directory.
    assert!(matches!(err.kind, ErrorKind::Parse { .. }));
    assert!(
        err.context
            .unwrap()
            .source
            .unwrap()
            .ends_with("malformed-entities.json")
    );
}

#[test]
fn cli_patterns_extend_the_default() {
    let root = fixtures().join("invalid");
    let cli = Cli::try_parse_from([
        "entitygen",
        "out",
        r"entitiesWithoutDeployment\.json",
        "--schema-dir",
        root.to_str().unwrap(),
    ])
    .unwrap();
    let config = cli.apply(GeneratorConfig::new());
    let found = Generator::new(config).discover().unwrap();

    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["entitiesWithoutDeployment.json", "malformed-entities.json"]
    );
}

#[test]
fn blank_cli_pattern_is_ignored() {
    let root = fixtures().join("shop");
    let cli = Cli::try_parse_from(["entitygen", "out", "", "--schema-dir", root.to_str().unwrap()])
        .unwrap();
    let config = cli.apply(GeneratorConfig::new());
    let found = Generator::new(config).discover().unwrap();

    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|p| p.ends_with("shop-entities.json")));
}
