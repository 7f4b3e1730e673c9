//! Type views
//!
//! A [`TypeView`] wraps exactly one declared type. All classifiers read the
//! declaration on every call; nothing is cached beyond the handle itself.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use refract_host::{
    canonical_name, Arguments, AttributeList, ClassDecl, ObjectRef, Runtime, TypeKind, Value,
    Visibility,
};

use crate::attribute::HasAttributes;
use crate::error::{ReflectError, ReflectResult};
use crate::method::{run_constructor, MethodView};
use crate::property::PropertyView;

/// Reported by [`TypeView::path`] for types with no source file
pub const UNKNOWN_PATH: &str = "unknown";

/// One declared type
#[derive(Clone)]
pub struct TypeView {
    runtime: Runtime,
    decl: Arc<ClassDecl>,
}

impl TypeView {
    /// Resolve a type by name
    pub fn new(runtime: &Runtime, name: &str) -> ReflectResult<Self> {
        let decl = runtime
            .get(name)
            .ok_or_else(|| ReflectError::resolution(canonical_name(name)))?;
        Ok(Self::from_decl(runtime, decl))
    }

    /// Wrap a declaration handle
    pub fn from_decl(runtime: &Runtime, decl: Arc<ClassDecl>) -> Self {
        Self {
            runtime: runtime.clone(),
            decl,
        }
    }

    /// Qualified name
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Name without its namespace
    pub fn short_name(&self) -> &str {
        match self.decl.name.rfind('\\') {
            Some(index) => &self.decl.name[index + 1..],
            None => &self.decl.name,
        }
    }

    /// Namespace, empty for global types
    pub fn namespace(&self) -> &str {
        match self.decl.name.rfind('\\') {
            Some(index) => &self.decl.name[..index],
            None => "",
        }
    }

    /// Underlying declaration
    pub fn decl(&self) -> &Arc<ClassDecl> {
        &self.decl
    }

    // ========================================================================
    // Classifiers
    // ========================================================================

    /// Whether the type is an interface
    pub fn interface(&self) -> bool {
        self.decl.kind == TypeKind::Interface
    }

    /// Whether the type is a trait
    pub fn trait_(&self) -> bool {
        self.decl.kind == TypeKind::Trait
    }

    /// Whether the type is an enum
    pub fn enum_(&self) -> bool {
        self.decl.kind == TypeKind::Enum
    }

    /// Whether the type is a class: neither interface, enum nor trait
    pub fn class(&self) -> bool {
        !self.interface() && !self.enum_() && !self.trait_()
    }

    /// Whether the type is abstract: declared so, or declaring an abstract
    /// method
    pub fn abstract_(&self) -> bool {
        self.decl.is_abstract || self.decl.has_abstract_methods()
    }

    /// Whether the type is final
    pub fn final_(&self) -> bool {
        self.decl.is_final
    }

    /// Whether the type is anonymous
    pub fn anonymous(&self) -> bool {
        self.decl.is_anonymous
    }

    /// Whether instances can be created with [`new_instance`](Self::new_instance)
    pub fn instantiable(&self) -> bool {
        self.instantiation_blocker().is_none()
    }

    /// Reason the type cannot be allocated, if any
    fn allocation_blocker(&self) -> Option<String> {
        match self.decl.kind {
            TypeKind::Interface => Some("cannot instantiate interface".to_string()),
            TypeKind::Trait => Some("cannot instantiate trait".to_string()),
            TypeKind::Enum => Some("cannot instantiate enum".to_string()),
            TypeKind::Class if self.abstract_() => {
                Some("cannot instantiate abstract class".to_string())
            }
            TypeKind::Class => None,
        }
    }

    fn instantiation_blocker(&self) -> Option<String> {
        if let Some(reason) = self.allocation_blocker() {
            return Some(reason);
        }
        match self.runtime.constructor_of(&self.decl) {
            Some(ctor) if ctor.visibility != Visibility::Public => {
                Some(format!("constructor is {}", ctor.visibility))
            }
            _ => None,
        }
    }

    pub(crate) fn ensure_instantiable(&self) -> ReflectResult<()> {
        match self.instantiation_blocker() {
            Some(reason) => Err(ReflectError::instantiation(self.name(), reason)),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Instantiation
    // ========================================================================

    /// Create an instance, running the constructor (own or inherited) with
    /// `args`. Errors raised by the constructor propagate unmodified.
    pub fn new_instance(&self, args: &[Value]) -> ReflectResult<ObjectRef> {
        self.ensure_instantiable()?;
        let ctor = self.runtime.constructor_of(&self.decl);
        let instance = self.runtime.allocate(&self.decl);
        match ctor {
            Some(ctor) => {
                ctor.check_arity(args.len())
                    .map_err(|e| ReflectError::instantiation(self.name(), e.to_string()))?;
                let bound = ctor
                    .bind(&Arguments::from(args.to_vec()))
                    .map_err(|e| ReflectError::instantiation(self.name(), e.to_string()))?;
                run_constructor(&ctor, &instance, bound)?;
            }
            None if !args.is_empty() => {
                return Err(ReflectError::instantiation(
                    self.name(),
                    "class has no constructor, cannot pass arguments",
                ));
            }
            None => {}
        }
        Ok(instance)
    }

    /// Create an instance with property defaults only; the constructor does
    /// not run. Abstract classes, interfaces, traits and enums still fail.
    pub fn new_instance_without_constructor(&self) -> ReflectResult<ObjectRef> {
        if let Some(reason) = self.allocation_blocker() {
            return Err(ReflectError::instantiation(self.name(), reason));
        }
        Ok(self.runtime.allocate(&self.decl))
    }

    // ========================================================================
    // Source location
    // ========================================================================

    /// Source file, if the type has one
    pub fn file(&self) -> Option<&Path> {
        self.decl.file()
    }

    /// Source file as a string, or [`UNKNOWN_PATH`] for synthesized types
    pub fn path(&self) -> String {
        match self.decl.file() {
            Some(file) => file.to_string_lossy().into_owned(),
            None => UNKNOWN_PATH.to_string(),
        }
    }

    /// Match the source file against a glob pattern. `*` also matches path
    /// separators. Types without a source file never match.
    pub fn path_matches(&self, pattern: &str) -> ReflectResult<bool> {
        let pattern = glob::Pattern::new(pattern)?;
        Ok(self.matches_compiled(&pattern))
    }

    pub(crate) fn matches_compiled(&self, pattern: &glob::Pattern) -> bool {
        self.decl
            .file()
            .is_some_and(|file| pattern.matches_path(file))
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Parent class
    pub fn parent(&self) -> Option<TypeView> {
        self.runtime
            .parent_of(&self.decl)
            .map(|decl| TypeView::from_decl(&self.runtime, decl))
    }

    /// Whether `name` is a strict ancestor in the parent chain
    pub fn extends(&self, name: &str) -> bool {
        self.runtime
            .ancestors(&self.decl)
            .iter()
            .any(|ancestor| ancestor.is_named(name))
    }

    /// Whether the type implements the interface `name`, directly, through
    /// an ancestor, or through an extended interface. An interface
    /// implements itself; unknown names are never implemented.
    pub fn implements(&self, name: &str) -> bool {
        self.runtime.implements_interface(&self.decl, name)
    }

    /// Every implemented interface
    pub fn interface_names(&self) -> Vec<String> {
        self.runtime.interface_names(&self.decl)
    }

    /// Directly used traits
    pub fn trait_names(&self) -> &[String] {
        &self.decl.traits
    }

    /// Whether the type uses the trait `name`.
    ///
    /// With `recursive`, the traits of the root of the parent chain are also
    /// considered; those of intermediate ancestors are not.
    pub fn uses(&self, name: &str, recursive: bool) -> bool {
        if self.decl.uses_trait(name) {
            return true;
        }
        if !recursive {
            return false;
        }
        self.runtime
            .ancestors(&self.decl)
            .last()
            .is_some_and(|root| root.uses_trait(name))
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// All methods, own first, then inherited ones
    pub fn methods(&self) -> Vec<MethodView> {
        self.runtime
            .methods_of(&self.decl)
            .into_iter()
            .map(|decl| MethodView::new(&self.runtime, decl))
            .collect()
    }

    /// Public methods, own first, then inherited ones
    pub fn public_methods(&self) -> Vec<MethodView> {
        self.runtime
            .methods_of(&self.decl)
            .into_iter()
            .filter(|decl| decl.visibility == Visibility::Public)
            .map(|decl| MethodView::new(&self.runtime, decl))
            .collect()
    }

    /// Look up a method by name (case-insensitive)
    pub fn method(&self, name: &str) -> Option<MethodView> {
        self.runtime
            .find_method(&self.decl, name)
            .map(|decl| MethodView::new(&self.runtime, decl))
    }

    /// All properties, own first, then inherited non-private ones
    pub fn properties(&self) -> Vec<PropertyView> {
        self.runtime
            .properties_of(&self.decl)
            .into_iter()
            .map(|decl| PropertyView::new(&self.runtime, decl))
            .collect()
    }

    /// Look up a property by name (case-sensitive)
    pub fn property(&self, name: &str) -> Option<PropertyView> {
        self.runtime
            .find_property(&self.decl, name)
            .map(|decl| PropertyView::new(&self.runtime, decl))
    }

    /// Current value of a static property, or `default` if there is no such
    /// static property or it is uninitialized
    pub fn static_property_value(&self, name: &str, default: Value) -> Value {
        self.runtime
            .find_property(&self.decl, name)
            .filter(|property| property.is_static)
            .and_then(|property| property.static_value())
            .unwrap_or(default)
    }
}

impl HasAttributes for TypeView {
    fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn attribute_decls(&self) -> &AttributeList {
        &self.decl.attributes
    }
}

impl PartialEq for TypeView {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.decl, &other.decl)
    }
}

impl fmt::Debug for TypeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeView")
            .field("name", &self.decl.name)
            .field("kind", &self.decl.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refract_host::{ClassDecl, HostError, MethodDecl, ParamDecl, PropertyDecl, TypeHint};

    fn runtime() -> Runtime {
        let rt = Runtime::new();
        rt.declare(ClassDecl::interface("App\\Contracts\\Shape")).unwrap();
        rt.declare(
            ClassDecl::class("App\\Point")
                .declared_in("src/App/Point.php")
                .implements("App\\Contracts\\Shape")
                .with_property(PropertyDecl::new("x").with_default(0))
                .with_property(PropertyDecl::new("y").with_default(0))
                .with_property(PropertyDecl::new("made").as_static().with_default(0))
                .with_method(
                    MethodDecl::constructor()
                        .with_param(ParamDecl::new("x"))
                        .with_param(ParamDecl::new("y").optional(0)),
                )
                .with_method(MethodDecl::new("norm").private()),
        )
        .unwrap();
        rt.declare(
            ClassDecl::class("App\\Strict")
                .with_method(MethodDecl::constructor().with_body(|_, _| {
                    Err(HostError::exception("LogicException", "refused"))
                })),
        )
        .unwrap();
        rt.declare(
            ClassDecl::class("App\\Singleton").with_method(MethodDecl::constructor().private()),
        )
        .unwrap();
        rt
    }

    #[test]
    fn test_resolution() {
        let rt = runtime();
        let view = TypeView::new(&rt, "\\app\\point").unwrap();
        assert_eq!(view.name(), "App\\Point");
        assert_eq!(view.short_name(), "Point");
        assert_eq!(view.namespace(), "App");
        assert!(matches!(
            TypeView::new(&rt, "\\App\\Missing"),
            Err(ReflectError::Resolution { name }) if name == "App\\Missing"
        ));
    }

    #[test]
    fn test_new_instance_runs_constructor() {
        let rt = runtime();
        let point = TypeView::new(&rt, "App\\Point").unwrap();
        let obj = point.new_instance(&[Value::Int(3)]).unwrap();
        assert_eq!(obj.get("x"), Some(Value::Int(3)));
        assert_eq!(obj.get("y"), Some(Value::Int(0)));

        assert!(matches!(
            point.new_instance(&[]),
            Err(ReflectError::Instantiation { .. })
        ));
        let raw = point.new_instance_without_constructor().unwrap();
        assert_eq!(raw.get("x"), Some(Value::Int(0)));
    }

    #[test]
    fn test_constructor_errors_propagate() {
        let rt = runtime();
        let strict = TypeView::new(&rt, "App\\Strict").unwrap();
        assert!(matches!(
            strict.new_instance(&[]),
            Err(ReflectError::Host(HostError::Exception { class, .. })) if class == "LogicException"
        ));
        assert!(strict.new_instance_without_constructor().is_ok());
    }

    #[test]
    fn test_private_constructor() {
        let rt = runtime();
        let singleton = TypeView::new(&rt, "App\\Singleton").unwrap();
        assert!(singleton.class());
        assert!(!singleton.instantiable());
        assert!(singleton.new_instance(&[]).is_err());
        assert!(singleton.new_instance_without_constructor().is_ok());
    }

    #[test]
    fn test_path() {
        let rt = runtime();
        let point = TypeView::new(&rt, "App\\Point").unwrap();
        assert_eq!(point.path(), "src/App/Point.php");
        assert!(point.path_matches("src/*.php").unwrap());
        assert!(!point.path_matches("tests/*").unwrap());
        assert!(point.path_matches("[").is_err());

        let strict = TypeView::new(&rt, "App\\Strict").unwrap();
        assert_eq!(strict.path(), UNKNOWN_PATH);
        assert!(!strict.path_matches("*").unwrap());
    }

    #[test]
    fn test_members() {
        let rt = runtime();
        let point = TypeView::new(&rt, "App\\Point").unwrap();
        let public: Vec<String> = point.public_methods().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(public, vec!["__construct"]);
        assert_eq!(point.methods().len(), 2);
        assert!(point.method("NORM").is_some());
        assert!(point.property("X").is_none());
        assert_eq!(point.properties().len(), 3);

        assert_eq!(point.static_property_value("made", Value::Null), Value::Int(0));
        assert_eq!(point.static_property_value("x", Value::from("d")), Value::from("d"));
        assert_eq!(point.static_property_value("nope", Value::from("d")), Value::from("d"));
    }

    #[test]
    fn test_anonymous_and_uninitialized_static() {
        let rt = runtime();
        rt.declare(
            ClassDecl::class("class@anonymous")
                .as_anonymous()
                .with_property(
                    PropertyDecl::new("logger")
                        .as_static()
                        .typed(TypeHint::nullable("App\\Logger")),
                ),
        )
        .unwrap();
        let anonymous = TypeView::new(&rt, "class@anonymous").unwrap();
        assert!(anonymous.anonymous());
        assert!(!TypeView::new(&rt, "App\\Point").unwrap().anonymous());

        assert!(anonymous.property("logger").unwrap().static_());
        assert_eq!(
            anonymous.static_property_value("logger", Value::from("fallback")),
            Value::from("fallback")
        );
    }

    #[test]
    fn test_interface_implements_itself() {
        let rt = runtime();
        let shape = TypeView::new(&rt, "App\\Contracts\\Shape").unwrap();
        assert!(shape.implements("App\\Contracts\\Shape"));
        assert!(!shape.class());
        assert!(!shape.instantiable());
        assert!(TypeView::new(&rt, "App\\Point").unwrap().implements("\\App\\Contracts\\Shape"));
    }
}
