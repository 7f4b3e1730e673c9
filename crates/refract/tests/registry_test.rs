//! Tests for discovery: registry indexing, queries and configuration

mod common;

use refract::refract_host::{ClassDecl, ClassLoader, ClassMap, Runtime};
use refract::{IndexScope, RegistryConfig, TypeRegistry, TypeView, UnresolvedPolicy};

fn names(views: &[TypeView]) -> Vec<&str> {
    views.iter().map(TypeView::name).collect()
}

#[test]
fn test_classes_query_keeps_order() {
    let rt = Runtime::new();
    rt.declare(ClassDecl::interface("Shape")).unwrap();
    rt.declare(ClassDecl::class("Circle").implements("Shape")).unwrap();
    rt.declare(ClassDecl::trait_("Scalable")).unwrap();
    rt.declare(ClassDecl::enumeration("Color")).unwrap();
    rt.declare(ClassDecl::class("Square").implements("Shape")).unwrap();

    let mut registry = TypeRegistry::for_runtime(&rt);
    registry.index_all().unwrap();
    assert_eq!(registry.len(), 5);

    let query = registry.query().unwrap().classes();
    assert_eq!(names(query.get()), vec!["Circle", "Square"]);
    assert_eq!(names(query.get()), vec!["Circle", "Square"]);

    let shapes = registry.query().unwrap().implements("Shape").classes();
    assert_eq!(names(shapes.get()), vec!["Circle", "Square"]);
}

#[test]
fn test_index_twice_unions_without_duplicates() {
    let rt = common::runtime();
    let config = RegistryConfig {
        index_scope: IndexScope::Paths,
        ..RegistryConfig::default()
    };
    let mut registry = TypeRegistry::with_config(&rt, rt.clone(), config);

    assert_eq!(registry.index(["src/Http"]).unwrap(), 2);
    assert_eq!(registry.index(["src/Http", "src/Leaf.php"]).unwrap(), 1);
    assert_eq!(
        registry.classes(),
        &["App\\Http\\Controller", "App\\Http\\UserController", "App\\Leaf"]
    );

    let mut everything = TypeRegistry::new(&rt, ClassMap::from_iter(rt.class_map()));
    everything.index_all().unwrap();
    let first = everything.classes().to_vec();
    assert_eq!(everything.index_all().unwrap(), 0);
    assert_eq!(everything.classes(), first.as_slice());
    assert_eq!(first.len(), 11);
}

#[test]
fn test_discover_controllers() {
    let rt = common::runtime();
    let mut registry = TypeRegistry::for_runtime(&rt);
    registry.index(["src/Http"]).unwrap();

    let handlers = registry
        .query()
        .unwrap()
        .classes()
        .instantiable()
        .implements("App\\Contracts\\Handler")
        .with_attribute("App\\Attributes\\Route", true)
        .into_vec();
    assert_eq!(names(&handlers), vec!["App\\Http\\UserController"]);

    let in_http = registry.query().unwrap().in_path("src/Http/*").unwrap();
    assert_eq!(
        names(in_http.get()),
        vec!["App\\Http\\Controller", "App\\Http\\UserController"]
    );
}

#[test]
fn test_registry_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refract.toml");
    std::fs::write(&path, "index-scope = \"paths\"\nunresolved = \"skip\"\n").unwrap();

    let config = RegistryConfig::load(&path).unwrap();
    assert_eq!(config.index_scope, IndexScope::Paths);
    assert_eq!(config.unresolved, UnresolvedPolicy::Skip);

    let rt = common::runtime();
    let mut registry = TypeRegistry::with_config(&rt, rt.clone(), config);
    registry.index(["src/Attributes"]).unwrap();
    assert_eq!(
        registry.classes(),
        &["App\\Attributes\\Route", "App\\Attributes\\Get"]
    );
    registry.index(["src/*.php"]).unwrap();
    assert_eq!(registry.len(), 7);
}
