//! Property views

use std::sync::Arc;

use refract_host::{AttributeList, ObjectRef, PropertyDecl, Runtime, TypeHint, Value, Visibility};

use crate::attribute::HasAttributes;
use crate::error::{ReflectError, ReflectResult};

/// One property of a type
#[derive(Debug, Clone)]
pub struct PropertyView {
    runtime: Runtime,
    decl: Arc<PropertyDecl>,
}

impl PropertyView {
    /// Create a view of a property declared in `runtime`
    pub fn new(runtime: &Runtime, decl: Arc<PropertyDecl>) -> Self {
        Self {
            runtime: runtime.clone(),
            decl,
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Underlying declaration
    pub fn decl(&self) -> &Arc<PropertyDecl> {
        &self.decl
    }

    /// Name of the type that declares the property
    pub fn declaring_type_name(&self) -> &str {
        &self.decl.declaring_class
    }

    /// Declared default value.
    ///
    /// `None` means no default was declared; `Some(&Value::Null)` means the
    /// declared default is `null`.
    pub fn default(&self) -> Option<&Value> {
        self.decl.default.as_ref()
    }

    /// Declared type
    pub fn ty(&self) -> Option<&TypeHint> {
        self.decl.ty.as_ref()
    }

    /// Whether the property is abstract
    pub fn abstract_(&self) -> bool {
        self.decl.is_abstract
    }

    /// Visibility
    pub fn visibility(&self) -> Visibility {
        self.decl.visibility
    }

    /// Whether the property is public
    pub fn public(&self) -> bool {
        self.decl.visibility == Visibility::Public
    }

    /// Whether the property is protected
    pub fn protected(&self) -> bool {
        self.decl.visibility == Visibility::Protected
    }

    /// Whether the property is private
    pub fn private(&self) -> bool {
        self.decl.visibility == Visibility::Private
    }

    /// Whether the property is static
    pub fn static_(&self) -> bool {
        self.decl.is_static
    }

    /// Whether the property is read-only
    pub fn readonly(&self) -> bool {
        self.decl.is_readonly
    }

    /// Whether the property has no backing storage
    pub fn virtual_(&self) -> bool {
        self.decl.is_virtual
    }

    /// Whether the property declares a get or set hook
    pub fn hooked(&self) -> bool {
        !self.decl.hooks.is_empty()
    }

    fn qualified(&self) -> String {
        format!("{}::{}", self.decl.declaring_class, self.decl.name)
    }

    /// Check the instance argument of an instance property access
    fn receiver<'a>(&self, instance: Option<&'a ObjectRef>) -> ReflectResult<&'a ObjectRef> {
        let instance = instance.ok_or_else(|| {
            ReflectError::access(self.qualified(), "an instance is required for a non-static property")
        })?;
        if !self
            .runtime
            .is_a(&instance.class(), &self.decl.declaring_class)
        {
            return Err(ReflectError::access(
                self.qualified(),
                format!(
                    "given object of class {} is not an instance of {}",
                    instance.class_name(),
                    self.decl.declaring_class
                ),
            ));
        }
        Ok(instance)
    }

    /// Read the property.
    ///
    /// Static properties ignore `instance`. A get hook runs instead of the
    /// slot read and its errors propagate unmodified.
    pub fn value(&self, instance: Option<&ObjectRef>) -> ReflectResult<Value> {
        if self.decl.is_abstract {
            return Err(ReflectError::access(self.qualified(), "cannot access abstract property"));
        }
        if self.decl.is_static {
            return self.decl.static_value().ok_or_else(|| {
                ReflectError::access(self.qualified(), "must not be accessed before initialization")
            });
        }

        let instance = self.receiver(instance)?;
        if let Some(get) = &self.decl.hooks.get {
            return Ok(get(instance)?);
        }
        if self.decl.is_virtual {
            return Err(ReflectError::access(self.qualified(), "property is write-only"));
        }
        match instance.slot_in(self.decl.slot_owner(), &self.decl.name) {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(ReflectError::access(
                self.qualified(),
                "must not be accessed before initialization",
            )),
            None => Err(ReflectError::access(self.qualified(), "undefined property")),
        }
    }

    /// Write the property.
    ///
    /// Static properties ignore `instance`. A set hook runs instead of the
    /// slot write and its errors propagate unmodified.
    pub fn set_value(&self, instance: Option<&ObjectRef>, value: Value) -> ReflectResult<()> {
        if self.decl.is_abstract {
            return Err(ReflectError::access(self.qualified(), "cannot access abstract property"));
        }
        if self.decl.is_static {
            if self.decl.is_readonly && self.decl.is_static_initialized() {
                return Err(ReflectError::access(self.qualified(), "cannot modify readonly property"));
            }
            self.decl.set_static_value(value);
            return Ok(());
        }

        let instance = self.receiver(instance)?;
        if let Some(set) = &self.decl.hooks.set {
            set(instance, value)?;
            return Ok(());
        }
        if self.decl.is_virtual {
            return Err(ReflectError::access(self.qualified(), "property is read-only"));
        }
        let owner = self.decl.slot_owner();
        if self.decl.is_readonly && instance.is_initialized_in(owner, &self.decl.name) {
            return Err(ReflectError::access(self.qualified(), "cannot modify readonly property"));
        }
        instance.set_in(owner, &self.decl.name, value);
        Ok(())
    }

    /// Check if the property holds a value on `instance` (or statically)
    pub fn initialized(&self, instance: Option<&ObjectRef>) -> ReflectResult<bool> {
        if self.decl.is_static {
            return Ok(self.decl.is_static_initialized());
        }
        let instance = self.receiver(instance)?;
        if self.decl.is_virtual {
            return Ok(self.decl.hooks.get.is_some());
        }
        Ok(instance.is_initialized_in(self.decl.slot_owner(), &self.decl.name))
    }
}

impl HasAttributes for PropertyView {
    fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn attribute_decls(&self) -> &AttributeList {
        &self.decl.attributes
    }
}
