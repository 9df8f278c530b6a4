use std::fs;

use vixen::config::{load_and_validate, load_from_path};
use vixen::errors::VixenError;
use vixen::types::MissingProviderPolicy;
use vixen::{construction_order, root_providers, write_dry_run};
use vixen_test_utils::builders::{ManifestBuilder, ProviderConfigBuilder};
use vixen_test_utils::init_tracing;

fn write_manifest(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("Vixen.toml"), contents).expect("write manifest");
    dir
}

#[test]
fn test_load_and_resolve_from_disk() {
    init_tracing();

    let dir = write_manifest(
        r#"
[provider.config]
description = "reads settings"

[provider.logger]
needs = ["config"]

[provider.database]
needs = ["config", "logger"]
"#,
    );

    let manifest = load_and_validate(dir.path().join("Vixen.toml")).expect("valid manifest");
    assert_eq!(manifest.config.missing, MissingProviderPolicy::Error);
    assert_eq!(manifest.provider.len(), 3);

    let order = construction_order(&manifest).expect("acyclic");
    assert_eq!(order, vec!["config", "logger", "database"]);
    assert_eq!(root_providers(&manifest), vec!["config"]);
}

#[test]
fn test_load_from_path_does_not_validate() {
    let dir = write_manifest(
        r#"
[provider.a]
needs = ["a"]
"#,
    );

    let raw = load_from_path(dir.path().join("Vixen.toml")).expect("parses");
    assert_eq!(raw.provider["a"].needs, vec!["a"]);

    let err = load_and_validate(dir.path().join("Vixen.toml")).expect_err("self need");
    assert!(matches!(err, VixenError::ConfigError(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let err = load_and_validate(dir.path().join("nope.toml")).expect_err("no file");
    assert!(matches!(err, VixenError::IoError(_)));
}

#[test]
fn test_bad_toml_is_a_toml_error() {
    let dir = write_manifest("[provider.a\nneeds = 3");

    let err = load_and_validate(dir.path().join("Vixen.toml")).expect_err("bad toml");
    assert!(matches!(err, VixenError::TomlError(_)));
}

#[test]
fn test_unknown_policy_value_is_rejected_at_parse_time() {
    let dir = write_manifest(
        r#"
[config]
missing = "shrug"

[provider.a]
"#,
    );

    let err = load_and_validate(dir.path().join("Vixen.toml")).expect_err("bad policy");
    assert!(matches!(err, VixenError::TomlError(_)));
}

#[test]
fn test_empty_manifest_is_rejected() {
    let raw = ManifestBuilder::new().raw();

    let err = vixen::config::Manifest::try_from(raw).expect_err("no providers");
    assert!(err.to_string().contains("at least one [provider.<name>]"));
}

#[test]
fn test_unknown_need_is_an_error_by_default() {
    let raw = ManifestBuilder::new()
        .with_provider("server", ProviderConfigBuilder::new().needs("database").build())
        .raw();

    let err = vixen::config::Manifest::try_from(raw).expect_err("unknown need");
    assert!(err.to_string().contains("'database'"));
}

#[test]
fn test_unknown_need_is_dropped_when_ignored() {
    init_tracing();

    let manifest = ManifestBuilder::new()
        .missing(MissingProviderPolicy::Ignore)
        .with_provider("logger", ProviderConfigBuilder::new().build())
        .with_provider(
            "server",
            ProviderConfigBuilder::new()
                .needs("database")
                .needs("logger")
                .build(),
        )
        .build();

    let order = construction_order(&manifest).expect("acyclic");
    assert_eq!(order, vec!["logger", "server"]);
    assert!(manifest.registry().missing().is_empty());
}

#[test]
fn test_cycle_names_the_providers_involved() {
    init_tracing();

    let raw = ManifestBuilder::new()
        .with_provider("entry", ProviderConfigBuilder::new().build())
        .with_provider("a", ProviderConfigBuilder::new().needs("entry").needs("c").build())
        .with_provider("b", ProviderConfigBuilder::new().needs("a").build())
        .with_provider("c", ProviderConfigBuilder::new().needs("b").build())
        .raw();

    let err = vixen::config::Manifest::try_from(raw).expect_err("cycle");
    match err {
        VixenError::DependencyCycle(msg) => assert_eq!(msg, "providers involved: a, b, c"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_policy_from_str() {
    assert_eq!(" Ignore ".parse::<MissingProviderPolicy>(), Ok(MissingProviderPolicy::Ignore));
    assert_eq!("error".parse::<MissingProviderPolicy>(), Ok(MissingProviderPolicy::Error));
    assert!("maybe".parse::<MissingProviderPolicy>().is_err());
}

#[test]
fn test_dry_run_lists_providers_and_needs() {
    let manifest = ManifestBuilder::new()
        .with_provider(
            "config",
            ProviderConfigBuilder::new().description("reads settings").build(),
        )
        .with_provider("logger", ProviderConfigBuilder::new().needs("config").build())
        .build();

    let mut out = Vec::new();
    write_dry_run(&mut out, &manifest).expect("write to vec");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.starts_with("vixen dry-run\n"));
    assert!(text.contains("providers (2):"));
    assert!(text.contains("      description: reads settings"));
    assert!(text.contains("      needs: [\"config\"]"));
}
