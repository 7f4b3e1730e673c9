//! Shared fixture: a small application model
//!
//! ```text
//! interface App\Contracts\Handler
//! trait     App\Concerns\TraitX, App\Concerns\TraitY
//! attribute App\Attributes\Route  <- App\Attributes\Get
//! class     App\Root (uses TraitX) <- App\Mid (uses TraitY) <- App\Leaf
//! abstract  App\Http\Controller implements Handler
//! class     App\Http\UserController extends Controller   #[Get('/users')]
//! enum      App\Status
//! ```

#![allow(dead_code)]

use refract::refract_host::{
    AttributeDecl, AttributeFlags, AttributeTarget, ClassDecl, MethodDecl, ParamDecl,
    PropertyDecl, Runtime, TypeHint, Value,
};

pub fn runtime() -> Runtime {
    let rt = Runtime::new();

    rt.declare(ClassDecl::interface("App\\Contracts\\Handler").with_method(MethodDecl::new("handle")))
        .unwrap();
    rt.declare(ClassDecl::trait_("App\\Concerns\\TraitX").with_method(MethodDecl::new("x")))
        .unwrap();
    rt.declare(ClassDecl::trait_("App\\Concerns\\TraitY").with_method(MethodDecl::new("y")))
        .unwrap();

    rt.declare(
        ClassDecl::class("App\\Attributes\\Route")
            .as_attribute(AttributeFlags::new(AttributeTarget::CLASS | AttributeTarget::METHOD))
            .declared_in("src/Attributes/Route.php")
            .with_property(PropertyDecl::new("path").typed(TypeHint::named("string")))
            .with_method(MethodDecl::constructor().with_param(ParamDecl::new("path"))),
    )
    .unwrap();
    rt.declare(
        ClassDecl::class("App\\Attributes\\Get")
            .extends("App\\Attributes\\Route")
            .as_attribute(AttributeFlags::new(AttributeTarget::CLASS | AttributeTarget::METHOD))
            .declared_in("src/Attributes/Get.php"),
    )
    .unwrap();

    rt.declare(
        ClassDecl::class("App\\Root")
            .uses("App\\Concerns\\TraitX")
            .declared_in("src/Root.php"),
    )
    .unwrap();
    rt.declare(
        ClassDecl::class("App\\Mid")
            .extends("App\\Root")
            .uses("App\\Concerns\\TraitY")
            .declared_in("src/Mid.php"),
    )
    .unwrap();
    rt.declare(
        ClassDecl::class("App\\Leaf")
            .extends("App\\Mid")
            .declared_in("src/Leaf.php"),
    )
    .unwrap();

    rt.declare(
        ClassDecl::class("App\\Http\\Controller")
            .as_abstract()
            .implements("App\\Contracts\\Handler")
            .declared_in("src/Http/Controller.php")
            .with_property(PropertyDecl::new("a").with_default(Value::Null))
            .with_property(PropertyDecl::new("b")),
    )
    .unwrap();
    rt.declare(
        ClassDecl::class("App\\Http\\UserController")
            .extends("App\\Http\\Controller")
            .declared_in("src/Http/UserController.php")
            .with_attribute(AttributeDecl::new("App\\Attributes\\Get").arg("/users"))
            .with_method(MethodDecl::new("handle").with_body(|_, _| Ok(Value::from("ok")))),
    )
    .unwrap();

    rt.declare(ClassDecl::enumeration("App\\Status")).unwrap();
    rt
}
