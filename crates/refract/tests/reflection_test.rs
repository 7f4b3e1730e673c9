//! Tests for type, member and attribute views over a shared fixture

mod common;

use refract::refract_host::{AttributeTarget, Value};
use refract::{HasAttributes, ReflectError, TypeView};

fn view(name: &str) -> TypeView {
    TypeView::new(&common::runtime(), name).unwrap()
}

#[test]
fn test_type_without_attributes() {
    let leaf = view("App\\Leaf");
    assert!(leaf.attributes().is_empty());
    assert!(leaf.attribute("App\\Attributes\\Route", true).is_none());
    assert!(leaf.attributes_matching("App\\Attributes\\Route", true).is_empty());
}

#[test]
fn test_attribute_inheritance() {
    let controller = view("App\\Http\\UserController");

    let inherited = controller.attributes_matching("App\\Attributes\\Route", true);
    assert_eq!(inherited.len(), 1);
    assert_eq!(inherited[0].name(), "App\\Attributes\\Get");
    assert_eq!(inherited[0].target(), AttributeTarget::CLASS);

    assert!(controller
        .attributes_matching("App\\Attributes\\Route", false)
        .is_empty());
    assert!(controller.has_attribute("\\App\\Attributes\\Get", false));
    assert_eq!(
        controller
            .attributes_matching(["App\\Attributes\\Route", "App\\Attributes\\Get"], false)
            .len(),
        1
    );
}

#[test]
fn test_attribute_create() {
    let controller = view("App\\Http\\UserController");
    let route = controller
        .attribute("App\\Attributes\\Route", true)
        .unwrap()
        .create()
        .unwrap();
    assert_eq!(route.class_name(), "App\\Attributes\\Get");
    assert_eq!(route.get("path"), Some(Value::from("/users")));
}

#[test]
fn test_class_classifier() {
    let rt = common::runtime();
    let cases = [
        ("App\\Leaf", true),
        ("App\\Http\\Controller", true),
        ("App\\Contracts\\Handler", false),
        ("App\\Concerns\\TraitX", false),
        ("App\\Status", false),
    ];
    for (name, is_class) in cases {
        let view = TypeView::new(&rt, name).unwrap();
        assert_eq!(view.class(), is_class, "{}", name);
        assert_eq!(
            view.class(),
            !view.interface() && !view.trait_() && !view.enum_(),
            "{}",
            name
        );
    }
    assert!(view("App\\Http\\Controller").abstract_());
    assert!(view("App\\Contracts\\Handler").abstract_());
}

#[test]
fn test_uses_only_consults_root_traits() {
    let leaf = view("App\\Leaf");
    assert!(leaf.uses("App\\Concerns\\TraitX", true));
    assert!(!leaf.uses("App\\Concerns\\TraitY", true));
    assert!(!leaf.uses("App\\Concerns\\TraitX", false));

    let mid = view("App\\Mid");
    assert!(mid.uses("App\\Concerns\\TraitY", false));
    assert!(mid.uses("App\\Concerns\\TraitX", true));
}

#[test]
fn test_trait_methods_are_inherited() {
    let leaf = view("App\\Leaf");
    let names: Vec<String> = leaf
        .public_methods()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["y", "x"]);
    assert_eq!(leaf.method("x").unwrap().declaring_type_name(), "App\\Root");
}

#[test]
fn test_default_distinguishes_null_from_absent() {
    let controller = view("App\\Http\\UserController");
    assert_eq!(controller.property("a").unwrap().default(), Some(&Value::Null));
    assert_eq!(controller.property("b").unwrap().default(), None);
}

#[test]
fn test_abstract_class_instantiation_fails() {
    let controller = view("App\\Http\\Controller");
    assert!(!controller.instantiable());
    assert!(matches!(
        controller.new_instance(&[]),
        Err(ReflectError::Instantiation { .. })
    ));
    assert!(matches!(
        controller.new_instance_without_constructor(),
        Err(ReflectError::Instantiation { .. })
    ));
}

#[test]
fn test_hierarchy_predicates() {
    let users = view("App\\Http\\UserController");
    assert!(users.extends("App\\Http\\Controller"));
    assert!(!users.extends("App\\Http\\UserController"));
    assert!(users.implements("App\\Contracts\\Handler"));
    assert!(!users.implements("App\\Missing"));
    assert_eq!(users.parent().unwrap().name(), "App\\Http\\Controller");
    assert_eq!(users.interface_names(), vec!["App\\Contracts\\Handler"]);

    let instance = users.new_instance(&[]).unwrap();
    let handle = users.method("HANDLE").unwrap();
    assert_eq!(handle.invoke(Some(&instance), &[]).unwrap(), Value::from("ok"));
}
