//! Attribute views
//!
//! [`HasAttributes`] is implemented by every view of a declaration that can
//! carry attributes. It turns the declaration's raw attribute list into
//! [`AttributeView`]s and filters them by attribute class, optionally
//! accepting subtypes of the requested classes.

use std::sync::Arc;

use refract_host::{
    same_type_name, Arguments, AttributeDecl, AttributeList, AttributeTarget, ObjectRef, Runtime,
};

use crate::error::{ReflectError, ReflectResult};
use crate::method::run_constructor;
use crate::names::Names;
use crate::ty::TypeView;

/// One attribute attached to a declaration
#[derive(Debug, Clone)]
pub struct AttributeView {
    runtime: Runtime,
    decl: Arc<AttributeDecl>,
}

impl AttributeView {
    /// Create a view of an attribute declared in `runtime`
    pub fn new(runtime: &Runtime, decl: Arc<AttributeDecl>) -> Self {
        Self {
            runtime: runtime.clone(),
            decl,
        }
    }

    /// Qualified name of the attribute class
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Arguments exactly as written at the attachment site
    pub fn arguments(&self) -> &Arguments {
        &self.decl.arguments
    }

    /// Kind of declaration the attribute is attached to
    pub fn target(&self) -> AttributeTarget {
        self.decl.target
    }

    /// Whether the same attribute appears more than once on the declaration
    pub fn repeated(&self) -> bool {
        self.decl.repeated
    }

    /// Underlying declaration
    pub fn decl(&self) -> &Arc<AttributeDecl> {
        &self.decl
    }

    /// Instantiate the attribute class with the declared arguments.
    ///
    /// The class must be declared as an attribute class, allowed on this
    /// attribute's target, and repeatable if the attribute is repeated.
    /// Each call returns a new instance.
    pub fn create(&self) -> ReflectResult<ObjectRef> {
        let name = self.name();
        let class = self
            .runtime
            .get(name)
            .ok_or_else(|| ReflectError::resolution(name))?;

        let flags = class.attribute_flags.ok_or_else(|| {
            ReflectError::instantiation(
                &class.name,
                format!("cannot use non-attribute class \"{}\" as attribute", class.name),
            )
        })?;
        if !flags.targets.intersects(self.target()) {
            return Err(ReflectError::instantiation(
                &class.name,
                format!(
                    "attribute cannot target {} (allowed targets: {})",
                    self.target(),
                    flags.targets
                ),
            ));
        }
        if self.repeated() && !flags.repeatable {
            return Err(ReflectError::instantiation(
                &class.name,
                "attribute must not be repeated",
            ));
        }

        let view = TypeView::from_decl(&self.runtime, class);
        view.ensure_instantiable()?;
        let instance = self.runtime.allocate(view.decl());
        match self.runtime.constructor_of(view.decl()) {
            Some(ctor) => {
                let args = ctor
                    .bind(self.arguments())
                    .map_err(|e| ReflectError::instantiation(view.name(), e.to_string()))?;
                run_constructor(&ctor, &instance, args)?;
            }
            None if !self.arguments().is_empty() => {
                return Err(ReflectError::instantiation(
                    view.name(),
                    "attribute class has no constructor, cannot pass arguments",
                ));
            }
            None => {}
        }
        Ok(instance)
    }
}

/// Access to the attributes attached to a declaration
pub trait HasAttributes {
    /// Runtime the declaration belongs to
    fn runtime(&self) -> &Runtime;

    /// Raw attribute list of the declaration
    fn attribute_decls(&self) -> &AttributeList;

    /// All attributes, in declaration order
    fn attributes(&self) -> Vec<AttributeView> {
        self.attribute_decls()
            .iter()
            .map(|decl| AttributeView::new(self.runtime(), Arc::clone(decl)))
            .collect()
    }

    /// Attributes whose class is one of `names`, or with `inherit` a
    /// subtype of one of them. Results keep declaration order.
    fn attributes_matching<N: Into<Names>>(&self, names: N, inherit: bool) -> Vec<AttributeView>
    where
        Self: Sized,
    {
        let names = names.into();
        let runtime = self.runtime();
        self.attribute_decls()
            .iter()
            .filter(|decl| attribute_matches(runtime, decl, &names, inherit))
            .map(|decl| AttributeView::new(runtime, Arc::clone(decl)))
            .collect()
    }

    /// First attribute matching `name`, if any
    fn attribute(&self, name: &str, inherit: bool) -> Option<AttributeView>
    where
        Self: Sized,
    {
        let names = Names::from(name);
        let runtime = self.runtime();
        self.attribute_decls()
            .iter()
            .find(|decl| attribute_matches(runtime, decl, &names, inherit))
            .map(|decl| AttributeView::new(runtime, Arc::clone(decl)))
    }

    /// Check if an attribute matching `name` is attached
    fn has_attribute(&self, name: &str, inherit: bool) -> bool
    where
        Self: Sized,
    {
        self.attribute(name, inherit).is_some()
    }
}

fn attribute_matches(runtime: &Runtime, decl: &AttributeDecl, names: &Names, inherit: bool) -> bool {
    if names.any(|name| same_type_name(&decl.name, name)) {
        return true;
    }
    if !inherit {
        return false;
    }
    match runtime.get(&decl.name) {
        Some(class) => names.any(|name| runtime.is_subclass_of(&class, name)),
        None => false,
    }
}
