//! Method views

use std::sync::Arc;

use refract_host::{
    Arguments, AttributeList, MethodDecl, MethodKind, ObjectRef, ParamDecl, Runtime, Value,
    Visibility,
};

use crate::attribute::HasAttributes;
use crate::error::{ReflectError, ReflectResult};
use crate::ty::TypeView;

/// One method of a type
#[derive(Debug, Clone)]
pub struct MethodView {
    runtime: Runtime,
    decl: Arc<MethodDecl>,
}

impl MethodView {
    /// Create a view of a method declared in `runtime`
    pub fn new(runtime: &Runtime, decl: Arc<MethodDecl>) -> Self {
        Self {
            runtime: runtime.clone(),
            decl,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Underlying declaration
    pub fn decl(&self) -> &Arc<MethodDecl> {
        &self.decl
    }

    /// Whether this is the type's constructor
    pub fn constructor(&self) -> bool {
        self.decl.kind == MethodKind::Constructor
    }

    /// Whether this is the type's destructor
    pub fn destructor(&self) -> bool {
        self.decl.kind == MethodKind::Destructor
    }

    /// Whether the method is abstract
    pub fn abstract_(&self) -> bool {
        self.decl.is_abstract
    }

    /// Whether the method is static
    pub fn static_(&self) -> bool {
        self.decl.is_static
    }

    /// Whether the method is final
    pub fn final_(&self) -> bool {
        self.decl.is_final
    }

    /// Visibility
    pub fn visibility(&self) -> Visibility {
        self.decl.visibility
    }

    /// Whether the method is public
    pub fn public(&self) -> bool {
        self.decl.visibility == Visibility::Public
    }

    /// Whether the method is protected
    pub fn protected(&self) -> bool {
        self.decl.visibility == Visibility::Protected
    }

    /// Whether the method is private
    pub fn private(&self) -> bool {
        self.decl.visibility == Visibility::Private
    }

    /// Declared parameters
    pub fn parameters(&self) -> &[ParamDecl] {
        &self.decl.params
    }

    /// Number of parameters without a default
    pub fn required_parameters(&self) -> usize {
        self.decl.required_params()
    }

    /// Name of the type that declares the method
    pub fn declaring_type_name(&self) -> &str {
        &self.decl.declaring_class
    }

    /// Type that declares the method
    pub fn declaring_type(&self) -> ReflectResult<TypeView> {
        TypeView::new(&self.runtime, &self.decl.declaring_class)
    }

    /// Call the method.
    ///
    /// Static methods ignore `instance`; instance methods need an instance of
    /// the declaring type or one of its subtypes. Errors raised by the body
    /// propagate unmodified.
    pub fn invoke(&self, instance: Option<&ObjectRef>, args: &[Value]) -> ReflectResult<Value> {
        let qualified = format!("{}::{}", self.decl.declaring_class, self.decl.name);
        if self.decl.is_abstract {
            return Err(ReflectError::invocation(qualified, "cannot invoke abstract method"));
        }

        let instance = if self.decl.is_static {
            None
        } else {
            let instance = instance.ok_or_else(|| {
                ReflectError::invocation(&qualified, "non-static method requires an instance")
            })?;
            if !self.runtime.is_a(&instance.class(), &self.decl.declaring_class) {
                return Err(ReflectError::invocation(
                    &qualified,
                    format!(
                        "given object of class {} is not an instance of the declaring class",
                        instance.class_name()
                    ),
                ));
            }
            Some(instance)
        };

        let body = self
            .decl
            .body
            .as_ref()
            .ok_or_else(|| ReflectError::invocation(&qualified, "method has no body"))?;
        let bound = self
            .decl
            .bind(&Arguments::from(args.to_vec()))
            .map_err(|e| ReflectError::invocation(&qualified, e.to_string()))?;
        Ok(body(instance, bound.as_slice())?)
    }
}

impl HasAttributes for MethodView {
    fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn attribute_decls(&self) -> &AttributeList {
        &self.decl.attributes
    }
}

/// Run a constructor on a freshly allocated instance.
///
/// A constructor without a body promotes its bound arguments: each one is
/// stored in the instance slot of the same name visible from the declaring
/// type, if there is one. A private slot of that type wins over a shared one.
pub(crate) fn run_constructor(
    ctor: &MethodDecl,
    instance: &ObjectRef,
    args: Vec<Value>,
) -> ReflectResult<()> {
    match &ctor.body {
        Some(body) => {
            body(Some(instance), args.as_slice())?;
        }
        None => {
            let own = Some(ctor.declaring_class.as_str());
            for (param, value) in ctor.params.iter().zip(args) {
                if instance.slot_in(own, &param.name).is_some() {
                    instance.set_in(own, &param.name, value);
                } else if instance.slot_in(None, &param.name).is_some() {
                    instance.set_in(None, &param.name, value);
                }
            }
        }
    }
    Ok(())
}
