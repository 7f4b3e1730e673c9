//! Type table
//!
//! The [`Runtime`] owns every declared type and answers the hierarchy
//! questions the reflection facade asks: parent chains, transitive interface
//! sets, subtype checks and member resolution across inheritance.
//!
//! Trait members are composed into the using type when it is declared, so a
//! declaration's `methods` and `properties` already include imported members,
//! re-owned by the using type.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::decl::{
    canonical_name, same_type_name, type_key, ClassDecl, MethodDecl, MethodKind, PropertyDecl,
    TypeKind, Visibility,
};
use crate::error::{HostError, HostResult};
use crate::loader::{ClassLoader, ClassMapEntry};
use crate::object::{ObjectRef, Slot};

#[derive(Debug, Default)]
struct TypeTable {
    /// Lookup key (lower-cased canonical name) to index in `types`
    by_key: FxHashMap<String, usize>,
    /// Declarations in declaration order
    types: Vec<Arc<ClassDecl>>,
}

impl TypeTable {
    fn get(&self, name: &str) -> Option<Arc<ClassDecl>> {
        self.by_key
            .get(&type_key(name))
            .map(|&index| Arc::clone(&self.types[index]))
    }

    fn ancestors(&self, decl: &ClassDecl) -> Vec<Arc<ClassDecl>> {
        let mut chain = Vec::new();
        let mut current = decl.parent.as_deref().and_then(|parent| self.get(parent));
        while let Some(parent) = current {
            current = parent.parent.as_deref().and_then(|next| self.get(next));
            chain.push(parent);
        }
        chain
    }

    fn interface_names(&self, decl: &ClassDecl) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen = FxHashSet::default();
        let mut pending: Vec<String> = Vec::new();

        let ancestors = self.ancestors(decl);
        let chain = std::iter::once(decl).chain(ancestors.iter().map(|a| a.as_ref()));
        for class in chain {
            pending.extend(class.interfaces.iter().rev().cloned());
            while let Some(name) = pending.pop() {
                if !seen.insert(type_key(&name)) {
                    continue;
                }
                match self.get(&name) {
                    Some(interface) => {
                        pending.extend(interface.interfaces.iter().rev().cloned());
                        names.push(interface.name.clone());
                    }
                    None => names.push(name),
                }
            }
        }
        names
    }

    fn methods_of(&self, decl: &ClassDecl) -> Vec<Arc<MethodDecl>> {
        let mut methods = Vec::new();
        let mut seen = FxHashSet::default();
        let mut add = |method: &Arc<MethodDecl>| {
            if seen.insert(method.name.to_ascii_lowercase()) {
                methods.push(Arc::clone(method));
            }
        };

        decl.methods.iter().for_each(&mut add);
        for ancestor in self.ancestors(decl) {
            ancestor.methods.iter().for_each(&mut add);
        }
        for name in self.interface_names(decl) {
            if let Some(interface) = self.get(&name) {
                interface.methods.iter().for_each(&mut add);
            }
        }
        methods
    }
}

/// Shared handle to the type table
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    table: Arc<RwLock<TypeTable>>,
}

impl Runtime {
    /// Create an empty runtime
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Declaration
    // ========================================================================

    /// Declare a type.
    ///
    /// Referenced types must already be declared: the parent must be a
    /// non-final class, implemented names must be interfaces and used names
    /// must be traits. Members of used traits are composed into the type.
    pub fn declare(&self, mut decl: ClassDecl) -> HostResult<Arc<ClassDecl>> {
        let mut table = self.table.write();
        let key = type_key(&decl.name);
        if decl.name.is_empty() {
            return Err(HostError::invalid("", "type name is empty"));
        }
        if table.by_key.contains_key(&key) {
            return Err(HostError::DuplicateType {
                name: decl.name.clone(),
            });
        }

        Self::check_relations(&table, &decl)?;

        if decl.kind == TypeKind::Interface {
            for method in &mut decl.methods {
                if !method.is_abstract {
                    Arc::make_mut(method).is_abstract = true;
                }
            }
        }
        Self::compose_traits(&table, &mut decl)?;
        Self::check_abstract_methods(&table, &decl)?;

        tracing::debug!(
            name = %decl.name,
            kind = %decl.kind,
            methods = decl.methods.len(),
            properties = decl.properties.len(),
            "declared type"
        );

        let decl = Arc::new(decl);
        let index = table.types.len();
        table.types.push(Arc::clone(&decl));
        table.by_key.insert(key, index);
        Ok(decl)
    }

    fn check_relations(table: &TypeTable, decl: &ClassDecl) -> HostResult<()> {
        if decl.kind == TypeKind::Enum && decl.is_abstract {
            return Err(HostError::invalid(&decl.name, "an enum cannot be abstract"));
        }

        if let Some(parent) = &decl.parent {
            if decl.kind != TypeKind::Class {
                return Err(HostError::invalid(
                    &decl.name,
                    format!("a {} cannot extend a class", decl.kind),
                ));
            }
            let parent = table.get(parent).ok_or_else(|| HostError::UnknownType {
                name: parent.clone(),
            })?;
            if parent.kind != TypeKind::Class {
                return Err(HostError::invalid(
                    &decl.name,
                    format!("cannot extend {} {}", parent.kind, parent.name),
                ));
            }
            if parent.is_final {
                return Err(HostError::invalid(
                    &decl.name,
                    format!("cannot extend final class {}", parent.name),
                ));
            }
        }

        if decl.kind == TypeKind::Trait && !decl.interfaces.is_empty() {
            return Err(HostError::invalid(
                &decl.name,
                "a trait cannot implement interfaces",
            ));
        }
        for name in &decl.interfaces {
            let interface = table.get(name).ok_or_else(|| HostError::UnknownType {
                name: name.clone(),
            })?;
            if interface.kind != TypeKind::Interface {
                return Err(HostError::invalid(
                    &decl.name,
                    format!("{} is not an interface", interface.name),
                ));
            }
        }

        if decl.kind == TypeKind::Interface && !decl.traits.is_empty() {
            return Err(HostError::invalid(&decl.name, "an interface cannot use traits"));
        }
        for name in &decl.traits {
            let used = table.get(name).ok_or_else(|| HostError::UnknownType {
                name: name.clone(),
            })?;
            if used.kind != TypeKind::Trait {
                return Err(HostError::invalid(
                    &decl.name,
                    format!("{} is not a trait", used.name),
                ));
            }
        }

        Ok(())
    }

    /// A concrete class or enum must implement every abstract method it
    /// declares, inherits, imports or is required to by an interface
    fn check_abstract_methods(table: &TypeTable, decl: &ClassDecl) -> HostResult<()> {
        let concrete = matches!(decl.kind, TypeKind::Class | TypeKind::Enum) && !decl.is_abstract;
        if !concrete {
            return Ok(());
        }
        match table.methods_of(decl).iter().find(|m| m.is_abstract) {
            Some(method) => Err(HostError::invalid(
                &decl.name,
                format!(
                    "contains abstract method {}::{} and must be declared abstract or implement it",
                    method.declaring_class, method.name
                ),
            )),
            None => Ok(()),
        }
    }

    /// Copy members of used traits that the type does not declare itself
    fn compose_traits(table: &TypeTable, decl: &mut ClassDecl) -> HostResult<()> {
        let traits = decl.traits.clone();
        for name in &traits {
            let used = table.get(name).ok_or_else(|| HostError::UnknownType {
                name: name.clone(),
            })?;
            for method in &used.methods {
                if decl.own_method(&method.name).is_none() {
                    let mut imported = MethodDecl::clone(method);
                    imported.declaring_class = decl.name.clone();
                    decl.methods.push(Arc::new(imported));
                }
            }
            for property in &used.properties {
                if decl.own_property(&property.name).is_none() {
                    decl.properties
                        .push(Arc::new(property.imported_into(&decl.name)));
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve a type by name
    pub fn resolve(&self, name: &str) -> HostResult<Arc<ClassDecl>> {
        self.get(name).ok_or_else(|| HostError::UnknownType {
            name: canonical_name(name).to_string(),
        })
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<Arc<ClassDecl>> {
        self.table.read().get(name)
    }

    /// Check if a type is declared
    pub fn contains(&self, name: &str) -> bool {
        self.table.read().by_key.contains_key(&type_key(name))
    }

    /// Number of declared types
    pub fn len(&self) -> usize {
        self.table.read().types.len()
    }

    /// Check if no type is declared
    pub fn is_empty(&self) -> bool {
        self.table.read().types.is_empty()
    }

    /// Declared type names, in declaration order
    pub fn names(&self) -> Vec<String> {
        self.table
            .read()
            .types
            .iter()
            .map(|decl| decl.name.clone())
            .collect()
    }

    /// Declared types, in declaration order
    pub fn types(&self) -> Vec<Arc<ClassDecl>> {
        self.table.read().types.clone()
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Parent class of a type
    pub fn parent_of(&self, decl: &ClassDecl) -> Option<Arc<ClassDecl>> {
        decl.parent.as_deref().and_then(|parent| self.get(parent))
    }

    /// Parent chain of a type, nearest first, ending at the root
    pub fn ancestors(&self, decl: &ClassDecl) -> Vec<Arc<ClassDecl>> {
        self.table.read().ancestors(decl)
    }

    /// Every interface a type implements: its own, those extended by them,
    /// and those of its ancestors. Each name appears once.
    pub fn interface_names(&self, decl: &ClassDecl) -> Vec<String> {
        self.table.read().interface_names(decl)
    }

    /// Check if a type implements an interface. An interface implements
    /// itself.
    pub fn implements_interface(&self, decl: &ClassDecl, interface: &str) -> bool {
        if decl.kind == TypeKind::Interface && decl.is_named(interface) {
            return true;
        }
        self.interface_names(decl)
            .iter()
            .any(|name| same_type_name(name, interface))
    }

    /// Check if a type is a strict subtype of `name`: a descendant class or
    /// an implementor of the interface
    pub fn is_subclass_of(&self, decl: &ClassDecl, name: &str) -> bool {
        if decl.is_named(name) {
            return false;
        }
        self.ancestors(decl).iter().any(|a| a.is_named(name))
            || self
                .interface_names(decl)
                .iter()
                .any(|i| same_type_name(i, name))
    }

    /// Check if a type is `name` or one of its subtypes
    pub fn is_a(&self, decl: &ClassDecl, name: &str) -> bool {
        decl.is_named(name) || self.is_subclass_of(decl, name)
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// All methods of a type: own ones (trait imports included), then those
    /// inherited from ancestors, then those only declared by interfaces.
    /// Overridden methods appear once, as their most derived declaration.
    pub fn methods_of(&self, decl: &ClassDecl) -> Vec<Arc<MethodDecl>> {
        self.table.read().methods_of(decl)
    }

    /// All properties of a type: own ones (trait imports included), then the
    /// non-private ones of ancestors that are not redeclared
    pub fn properties_of(&self, decl: &ClassDecl) -> Vec<Arc<PropertyDecl>> {
        let mut properties: Vec<Arc<PropertyDecl>> = decl.properties.clone();
        let mut seen: FxHashSet<String> =
            properties.iter().map(|p| p.name.clone()).collect();

        for ancestor in self.ancestors(decl) {
            for property in &ancestor.properties {
                if property.visibility != Visibility::Private && seen.insert(property.name.clone())
                {
                    properties.push(Arc::clone(property));
                }
            }
        }
        properties
    }

    /// Find a method by name (case-insensitive), inherited ones included
    pub fn find_method(&self, decl: &ClassDecl, name: &str) -> Option<Arc<MethodDecl>> {
        if let Some(method) = decl.own_method(name) {
            return Some(Arc::clone(method));
        }
        self.methods_of(decl)
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Find a property by name (case-sensitive), inherited ones included
    pub fn find_property(&self, decl: &ClassDecl, name: &str) -> Option<Arc<PropertyDecl>> {
        if let Some(property) = decl.own_property(name) {
            return Some(Arc::clone(property));
        }
        self.properties_of(decl)
            .into_iter()
            .find(|p| p.name == name)
    }

    /// Constructor run when instantiating a type: its own or the nearest
    /// inherited one
    pub fn constructor_of(&self, decl: &ClassDecl) -> Option<Arc<MethodDecl>> {
        if let Some(ctor) = decl.own_constructor() {
            return Some(Arc::clone(ctor));
        }
        self.ancestors(decl).iter().find_map(|ancestor| {
            ancestor
                .methods
                .iter()
                .find(|m| m.kind == MethodKind::Constructor)
                .cloned()
        })
    }

    /// Allocate an instance with one slot per backed instance property of
    /// the type and its ancestors, each holding its initial value. Private
    /// properties get a slot owned by their declaring class. No constructor
    /// runs.
    pub fn allocate(&self, decl: &Arc<ClassDecl>) -> ObjectRef {
        let mut slots = Vec::new();
        let mut seen = FxHashSet::default();
        let chain = std::iter::once(Arc::clone(decl)).chain(self.ancestors(decl));
        for class in chain {
            for property in &class.properties {
                if property.is_static || property.is_virtual {
                    continue;
                }
                let owner = property.slot_owner();
                if seen.insert((owner.map(type_key), property.name.clone())) {
                    slots.push(Slot {
                        owner: owner.map(str::to_string),
                        name: property.name.clone(),
                        value: property.initial_value(),
                    });
                }
            }
        }
        ObjectRef::new(Arc::clone(decl), slots)
    }
}

impl ClassLoader for Runtime {
    fn class_map(&self) -> Vec<ClassMapEntry> {
        self.table
            .read()
            .types
            .iter()
            .map(|decl| ClassMapEntry {
                name: decl.name.clone(),
                path: decl.file.clone(),
            })
            .collect()
    }
}
