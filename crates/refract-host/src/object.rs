//! Host objects
//!
//! Instances are shared handles to a lock-protected slot table. A slot holding
//! `None` is declared but uninitialized. Slots backing private properties are
//! owned by their declaring class, so a private property and a same-named one
//! of a subclass never share storage.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::decl::{same_type_name, ClassDecl};
use crate::value::Value;

/// One instance slot
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Declaring class of a private property; `None` for shared slots
    pub owner: Option<String>,
    /// Property name
    pub name: String,
    /// Current value, `None` while uninitialized
    pub value: Option<Value>,
}

impl Slot {
    /// A slot shared along the class hierarchy
    pub fn shared(name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            owner: None,
            name: name.into(),
            value,
        }
    }

    /// A slot private to `owner`
    pub fn private(owner: impl Into<String>, name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            owner: Some(owner.into()),
            name: name.into(),
            value,
        }
    }

    fn is(&self, owner: Option<&str>, name: &str) -> bool {
        if self.name != name {
            return false;
        }
        match (self.owner.as_deref(), owner) {
            (None, None) => true,
            (Some(a), Some(b)) => same_type_name(a, b),
            _ => false,
        }
    }
}

/// Instance state
#[derive(Debug)]
pub struct Object {
    class: Arc<ClassDecl>,
    slots: Vec<Slot>,
}

/// Shared reference to an instance
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<Object>>);

impl ObjectRef {
    /// Create an instance of `class` with the given slots
    pub fn new(class: Arc<ClassDecl>, slots: Vec<Slot>) -> Self {
        ObjectRef(Arc::new(RwLock::new(Object { class, slots })))
    }

    /// Declaration of the instance's class
    pub fn class(&self) -> Arc<ClassDecl> {
        Arc::clone(&self.0.read().class)
    }

    /// Name of the instance's class
    pub fn class_name(&self) -> String {
        self.0.read().class.name.clone()
    }

    /// Read the first slot named `name`, most derived first; `None` if it
    /// does not exist or is uninitialized
    pub fn get(&self, name: &str) -> Option<Value> {
        self.slot(name).flatten()
    }

    /// Read the first slot named `name`, distinguishing missing (`None`)
    /// from uninitialized (`Some(None)`)
    pub fn slot(&self, name: &str) -> Option<Option<Value>> {
        self.0
            .read()
            .slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| slot.value.clone())
    }

    /// Read the slot named `name` owned by `owner` (`None` for shared slots)
    pub fn slot_in(&self, owner: Option<&str>, name: &str) -> Option<Option<Value>> {
        self.0
            .read()
            .slots
            .iter()
            .find(|slot| slot.is(owner, name))
            .map(|slot| slot.value.clone())
    }

    /// Write the first slot named `name`, creating a shared one if missing
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut object = self.0.write();
        match object.slots.iter_mut().find(|slot| slot.name == name) {
            Some(slot) => slot.value = Some(value),
            None => object.slots.push(Slot::shared(name, Some(value))),
        }
    }

    /// Write the slot named `name` owned by `owner`, creating it if missing
    pub fn set_in(&self, owner: Option<&str>, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut object = self.0.write();
        match object.slots.iter_mut().find(|slot| slot.is(owner, name)) {
            Some(slot) => slot.value = Some(value),
            None => object.slots.push(Slot {
                owner: owner.map(str::to_string),
                name: name.to_string(),
                value: Some(value),
            }),
        }
    }

    /// Check if a slot named `name` exists and holds a value
    pub fn is_initialized(&self, name: &str) -> bool {
        matches!(self.slot(name), Some(Some(_)))
    }

    /// Check if the slot named `name` owned by `owner` holds a value
    pub fn is_initialized_in(&self, owner: Option<&str>, name: &str) -> bool {
        matches!(self.slot_in(owner, name), Some(Some(_)))
    }

    /// Slot names in order
    pub fn slot_names(&self) -> Vec<String> {
        self.0.read().slots.iter().map(|slot| slot.name.clone()).collect()
    }

    /// Check if two references point to the same instance
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object({})#{:p}", self.class_name(), Arc::as_ptr(&self.0))
    }
}
