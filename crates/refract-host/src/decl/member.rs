//! Method, parameter and property declarations

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{BindError, HostResult};
use crate::object::ObjectRef;
use crate::value::Value;

use super::attribute::{Arguments, AttributeDecl, AttributeList, AttributeTarget};
use super::type_hint::TypeHint;
use super::Visibility;

/// Native body of a method: receives the instance (absent for static calls)
/// and the bound arguments
pub type NativeMethod = Arc<dyn Fn(Option<&ObjectRef>, &[Value]) -> HostResult<Value> + Send + Sync>;

/// `get` hook of a property
pub type GetHook = Arc<dyn Fn(&ObjectRef) -> HostResult<Value> + Send + Sync>;

/// `set` hook of a property
pub type SetHook = Arc<dyn Fn(&ObjectRef, Value) -> HostResult<()> + Send + Sync>;

// ============================================================================
// Parameters
// ============================================================================

/// A declared method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Parameter name (without `$`)
    pub name: String,
    /// Default value, making the parameter optional
    pub default: Option<Value>,
    /// Declared type
    pub ty: Option<TypeHint>,
    /// Attached attributes
    pub attributes: AttributeList,
}

impl ParamDecl {
    /// A required parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            ty: None,
            attributes: AttributeList::new(),
        }
    }

    /// Give the parameter a default value
    pub fn optional(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the declared type
    pub fn typed(mut self, ty: TypeHint) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute, AttributeTarget::PARAMETER);
        self
    }

    /// Check if the parameter may be omitted
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

// ============================================================================
// Methods
// ============================================================================

/// Role of a method in the object lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MethodKind {
    /// Ordinary method
    #[default]
    Regular,
    /// Initializer run by instantiation
    Constructor,
    /// Finalizer
    Destructor,
}

/// A declared method
#[derive(Clone)]
pub struct MethodDecl {
    /// Method name
    pub name: String,
    /// Lifecycle role
    pub kind: MethodKind,
    /// Visibility
    pub visibility: Visibility,
    /// Static method
    pub is_static: bool,
    /// Abstract method (no body)
    pub is_abstract: bool,
    /// Final method
    pub is_final: bool,
    /// Declared parameters
    pub params: Vec<ParamDecl>,
    /// Attached attributes
    pub attributes: AttributeList,
    /// Canonical name of the declaring type (filled in when attached to a type)
    pub declaring_class: String,
    /// Native body
    pub body: Option<NativeMethod>,
}

impl MethodDecl {
    /// A public instance method
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Regular,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            params: Vec::new(),
            attributes: AttributeList::new(),
            declaring_class: String::new(),
            body: None,
        }
    }

    /// A public constructor
    pub fn constructor() -> Self {
        let mut method = Self::new("__construct");
        method.kind = MethodKind::Constructor;
        method
    }

    /// A public destructor
    pub fn destructor() -> Self {
        let mut method = Self::new("__destruct");
        method.kind = MethodKind::Destructor;
        method
    }

    /// Add a parameter
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Set the native body
    pub fn with_body<F>(mut self, body: F) -> Self
    where
        F: Fn(Option<&ObjectRef>, &[Value]) -> HostResult<Value> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute, AttributeTarget::METHOD);
        self
    }

    /// Set visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Make the method protected
    pub fn protected(self) -> Self {
        self.with_visibility(Visibility::Protected)
    }

    /// Make the method private
    pub fn private(self) -> Self {
        self.with_visibility(Visibility::Private)
    }

    /// Make the method static
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Make the method abstract
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Make the method final
    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Number of parameters without a default
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| !p.is_optional()).count()
    }

    /// Check a positional argument count against the declared parameters
    pub fn check_arity(&self, count: usize) -> Result<(), BindError> {
        let required = self.required_params();
        if count < required {
            return Err(BindError::TooFew {
                expected: required,
                actual: count,
            });
        }
        if count > self.params.len() {
            return Err(BindError::TooMany {
                expected: self.params.len(),
                actual: count,
            });
        }
        Ok(())
    }

    /// Bind positional and named arguments to the declared parameters.
    ///
    /// Positional arguments fill parameters in order, named arguments fill
    /// the parameter with the same name, and omitted optional parameters take
    /// their default. The result holds one value per declared parameter.
    pub fn bind(&self, args: &Arguments) -> Result<Vec<Value>, BindError> {
        let mut slots: Vec<Option<Value>> = vec![None; self.params.len()];

        let positional: Vec<&Value> = args.positional().collect();
        if positional.len() > self.params.len() {
            return Err(BindError::TooMany {
                expected: self.params.len(),
                actual: positional.len(),
            });
        }
        for (slot, value) in slots.iter_mut().zip(positional.iter()) {
            *slot = Some((*value).clone());
        }

        for (name, value) in args.named_entries() {
            let index = self
                .params
                .iter()
                .position(|p| p.name == name)
                .ok_or_else(|| BindError::UnknownParameter(name.to_string()))?;
            if slots[index].is_some() {
                return Err(BindError::Overwrite(name.to_string()));
            }
            slots[index] = Some(value.clone());
        }

        let has_named = args.named_entries().next().is_some();
        let mut bound = Vec::with_capacity(slots.len());
        for (param, slot) in self.params.iter().zip(slots) {
            match slot.or_else(|| param.default.clone()) {
                Some(value) => bound.push(value),
                None if has_named => return Err(BindError::Missing(param.name.clone())),
                None => {
                    return Err(BindError::TooFew {
                        expected: self.required_params(),
                        actual: positional.len(),
                    })
                }
            }
        }
        Ok(bound)
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("is_abstract", &self.is_abstract)
            .field("is_final", &self.is_final)
            .field("params", &self.params)
            .field("declaring_class", &self.declaring_class)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

// ============================================================================
// Properties
// ============================================================================

/// `get`/`set` hooks of a property
#[derive(Clone, Default)]
pub struct PropertyHooks {
    /// Runs instead of reading the backing slot
    pub get: Option<GetHook>,
    /// Runs instead of writing the backing slot
    pub set: Option<SetHook>,
}

impl PropertyHooks {
    /// Check if no hook is declared
    pub fn is_empty(&self) -> bool {
        self.get.is_none() && self.set.is_none()
    }
}

impl fmt::Debug for PropertyHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyHooks")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

/// A declared property
#[derive(Debug)]
pub struct PropertyDecl {
    /// Property name (without `$`)
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Static property
    pub is_static: bool,
    /// Read-only property (writable once)
    pub is_readonly: bool,
    /// Abstract property
    pub is_abstract: bool,
    /// Virtual property (hooks only, no backing slot)
    pub is_virtual: bool,
    /// Declared type
    pub ty: Option<TypeHint>,
    /// Declared default; `Some(Value::Null)` is a literal `null` default
    pub default: Option<Value>,
    /// Hooks
    pub hooks: PropertyHooks,
    /// Attached attributes
    pub attributes: AttributeList,
    /// Canonical name of the declaring type (filled in when attached to a type)
    pub declaring_class: String,
    /// Current value of a static property
    static_slot: RwLock<Option<Value>>,
}

impl PropertyDecl {
    /// A public instance property without type or default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
            is_abstract: false,
            is_virtual: false,
            ty: None,
            default: None,
            hooks: PropertyHooks::default(),
            attributes: AttributeList::new(),
            declaring_class: String::new(),
            static_slot: RwLock::new(None),
        }
    }

    /// Set visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Make the property protected
    pub fn protected(self) -> Self {
        self.with_visibility(Visibility::Protected)
    }

    /// Make the property private
    pub fn private(self) -> Self {
        self.with_visibility(Visibility::Private)
    }

    /// Make the property static
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self.reset_static_slot();
        self
    }

    /// Make the property read-only
    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    /// Make the property abstract
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Make the property virtual (no backing storage)
    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Set the declared type
    pub fn typed(mut self, ty: TypeHint) -> Self {
        self.ty = Some(ty);
        self.reset_static_slot();
        self
    }

    /// Set the declared default
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self.reset_static_slot();
        self
    }

    /// Declare a `get` hook
    pub fn with_get_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ObjectRef) -> HostResult<Value> + Send + Sync + 'static,
    {
        self.hooks.get = Some(Arc::new(hook));
        self
    }

    /// Declare a `set` hook
    pub fn with_set_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ObjectRef, Value) -> HostResult<()> + Send + Sync + 'static,
    {
        self.hooks.set = Some(Arc::new(hook));
        self
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute, AttributeTarget::PROPERTY);
        self
    }

    /// Initial slot value: the declared default, `null` for untyped
    /// properties without one, uninitialized otherwise
    pub fn initial_value(&self) -> Option<Value> {
        match (&self.default, &self.ty) {
            (Some(default), _) => Some(default.clone()),
            (None, None) => Some(Value::Null),
            (None, Some(_)) => None,
        }
    }

    /// Owner of the instance slot backing this property: the declaring
    /// class for private properties, `None` for slots shared along the
    /// hierarchy
    pub fn slot_owner(&self) -> Option<&str> {
        match self.visibility {
            Visibility::Private => Some(self.declaring_class.as_str()),
            _ => None,
        }
    }

    /// Current value of a static property (`None` if uninitialized)
    pub fn static_value(&self) -> Option<Value> {
        self.static_slot.read().clone()
    }

    /// Replace the current value of a static property
    pub fn set_static_value(&self, value: Value) {
        *self.static_slot.write() = Some(value);
    }

    /// Check if the static slot holds a value
    pub fn is_static_initialized(&self) -> bool {
        self.static_slot.read().is_some()
    }

    /// Copy of this property as composed into `class` by a trait import.
    ///
    /// The copy gets its own static slot, initialized from the declaration.
    pub(crate) fn imported_into(&self, class: &str) -> Self {
        let mut copy = Self {
            name: self.name.clone(),
            visibility: self.visibility,
            is_static: self.is_static,
            is_readonly: self.is_readonly,
            is_abstract: self.is_abstract,
            is_virtual: self.is_virtual,
            ty: self.ty.clone(),
            default: self.default.clone(),
            hooks: self.hooks.clone(),
            attributes: self.attributes.clone(),
            declaring_class: class.to_string(),
            static_slot: RwLock::new(None),
        };
        copy.reset_static_slot();
        copy
    }

    fn reset_static_slot(&mut self) {
        let initial = if self.is_static {
            self.initial_value()
        } else {
            None
        };
        *self.static_slot.get_mut() = initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greet() -> MethodDecl {
        MethodDecl::new("greet")
            .with_param(ParamDecl::new("name"))
            .with_param(ParamDecl::new("greeting").optional("Hello"))
    }

    #[test]
    fn test_check_arity() {
        let method = greet();
        assert_eq!(method.required_params(), 1);
        assert!(method.check_arity(1).is_ok());
        assert!(method.check_arity(2).is_ok());
        assert_eq!(
            method.check_arity(0),
            Err(BindError::TooFew {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            method.check_arity(3),
            Err(BindError::TooMany {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_bind_positional_and_defaults() {
        let method = greet();
        let bound = method.bind(&Arguments::from(vec![Value::from("Ada")])).unwrap();
        assert_eq!(bound, vec![Value::from("Ada"), Value::from("Hello")]);
    }

    #[test]
    fn test_bind_named() {
        let method = greet();
        let mut args = Arguments::new();
        args.push_named("greeting", Value::from("Hi"));
        args.push_named("name", Value::from("Ada"));
        let bound = method.bind(&args).unwrap();
        assert_eq!(bound, vec![Value::from("Ada"), Value::from("Hi")]);
    }

    #[test]
    fn test_bind_errors() {
        let method = greet();

        let mut unknown = Arguments::new();
        unknown.push(Value::from("Ada"));
        unknown.push_named("salutation", Value::from("Hi"));
        assert_eq!(
            method.bind(&unknown),
            Err(BindError::UnknownParameter("salutation".to_string()))
        );

        let mut overwrite = Arguments::new();
        overwrite.push(Value::from("Ada"));
        overwrite.push_named("name", Value::from("Bob"));
        assert_eq!(
            method.bind(&overwrite),
            Err(BindError::Overwrite("name".to_string()))
        );

        let mut missing = Arguments::new();
        missing.push_named("greeting", Value::from("Hi"));
        assert_eq!(
            method.bind(&missing),
            Err(BindError::Missing("name".to_string()))
        );
    }

    #[test]
    fn test_property_initial_value() {
        assert_eq!(PropertyDecl::new("a").initial_value(), Some(Value::Null));
        assert_eq!(
            PropertyDecl::new("b").typed(TypeHint::named("int")).initial_value(),
            None
        );
        assert_eq!(
            PropertyDecl::new("c")
                .typed(TypeHint::named("int"))
                .with_default(3)
                .initial_value(),
            Some(Value::Int(3))
        );
    }

    #[test]
    fn test_static_slot() {
        let counter = PropertyDecl::new("count").as_static().with_default(0);
        assert_eq!(counter.static_value(), Some(Value::Int(0)));

        counter.set_static_value(Value::Int(5));
        assert_eq!(counter.static_value(), Some(Value::Int(5)));

        let typed = PropertyDecl::new("instance")
            .typed(TypeHint::nullable("Logger"))
            .as_static();
        assert!(!typed.is_static_initialized());
    }
}
