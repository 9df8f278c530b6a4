use vixen::{Registry, RegistryError, TypeKey};
use vixen_test_utils::graphs::assert_topological;
use vixen_test_utils::init_tracing;

struct Config;
struct Logger;
struct Database;
struct Server;

fn s(name: &str) -> String {
    name.to_string()
}

#[test]
fn test_construction_order_puts_needs_first() {
    init_tracing();

    let mut registry = Registry::new();
    registry.provide(TypeKey::of::<Config>(), []);
    registry.provide(TypeKey::of::<Logger>(), [TypeKey::of::<Config>()]);
    registry.provide(
        TypeKey::of::<Database>(),
        [TypeKey::of::<Config>(), TypeKey::of::<Logger>()],
    );
    registry.provide(
        TypeKey::of::<Server>(),
        [TypeKey::of::<Database>(), TypeKey::of::<Logger>()],
    );

    let order = registry.resolve().expect("no cycles, nothing missing");
    assert_eq!(
        order,
        vec![
            TypeKey::of::<Config>(),
            TypeKey::of::<Logger>(),
            TypeKey::of::<Database>(),
            TypeKey::of::<Server>(),
        ]
    );
    assert_topological(registry.graph(), &order);
}

#[test]
fn test_provider_without_needs_is_still_ordered() {
    let mut registry = Registry::new();
    registry.provide(s("standalone"), []);

    assert_eq!(registry.construction_order(), Ok(vec![s("standalone")]));
    assert!(registry.is_provided(&s("standalone")));
}

#[test]
fn test_cycle_is_unsatisfiable() {
    init_tracing();

    let mut registry = Registry::new();
    registry.provide(s("a"), [s("b")]);
    registry.provide(s("b"), [s("c")]);
    registry.provide(s("c"), [s("a")]);

    let err = registry.construction_order().expect_err("cycle must be rejected");
    assert!(matches!(err, RegistryError::Unsatisfiable(_)));
    assert_eq!(err.to_string(), "unsatisfiable dependencies: graph is cyclic");
}

#[test]
fn test_missing_provider() {
    let mut registry = Registry::new();
    registry.provide(s("server"), [s("database")]);

    assert_eq!(registry.missing(), vec!["database"]);
    // Without the provider check the order is still computable.
    assert_eq!(
        registry.construction_order(),
        Ok(vec![s("database"), s("server")])
    );
    assert_eq!(
        registry.resolve(),
        Err(RegistryError::MissingProvider(s("database")))
    );
}

#[test]
fn test_needs_of_and_re_registration() {
    let mut registry = Registry::new();
    registry.provide(s("server"), [s("database")]);
    registry.provide(s("server"), [s("logger"), s("database")]);

    let mut needs = registry.needs_of(&s("server"));
    needs.sort();
    assert_eq!(needs, vec!["database", "logger"]);

    let mut providers: Vec<&String> = registry.providers().collect();
    providers.sort();
    assert_eq!(providers, vec!["server"]);
}

#[test]
fn test_type_key_display_uses_type_name() {
    let key = TypeKey::of::<Database>();

    assert!(key.to_string().ends_with("Database"));
    assert_eq!(key.name(), std::any::type_name::<Database>());
    assert_ne!(key, TypeKey::of::<Server>());
}
