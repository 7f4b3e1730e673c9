//! Type declarations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::attribute::{AttributeDecl, AttributeFlags, AttributeList, AttributeTarget};
use super::member::{MethodDecl, MethodKind, PropertyDecl};
use super::{canonical_name, same_type_name};

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Ordinary (possibly abstract) class
    Class,
    /// Interface
    Interface,
    /// Trait (member set composed into classes)
    Trait,
    /// Enumeration
    Enum,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Trait => write!(f, "trait"),
            TypeKind::Enum => write!(f, "enum"),
        }
    }
}

/// A declared type
///
/// Relations to other types (parent, interfaces, traits) are kept by name and
/// resolved through the [`Runtime`](crate::Runtime) that holds the declaration.
#[derive(Debug)]
pub struct ClassDecl {
    /// Kind of type
    pub kind: TypeKind,
    /// Canonical qualified name
    pub name: String,
    /// Parent class
    pub parent: Option<String>,
    /// Implemented interfaces; for interfaces, the extended ones
    pub interfaces: Vec<String>,
    /// Composed traits
    pub traits: Vec<String>,
    /// Declared abstract
    pub is_abstract: bool,
    /// Declared final
    pub is_final: bool,
    /// Anonymous class
    pub is_anonymous: bool,
    /// Source file; `None` for types synthesized at runtime
    pub file: Option<PathBuf>,
    /// Attached attributes
    pub attributes: AttributeList,
    /// Declared methods, in declaration order
    pub methods: Vec<Arc<MethodDecl>>,
    /// Declared properties, in declaration order
    pub properties: Vec<Arc<PropertyDecl>>,
    /// Present when this type is itself an attribute class
    pub attribute_flags: Option<AttributeFlags>,
}

impl ClassDecl {
    fn with_kind(kind: TypeKind, name: &str) -> Self {
        Self {
            kind,
            name: canonical_name(name).to_string(),
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            is_abstract: false,
            is_final: false,
            is_anonymous: false,
            file: None,
            attributes: AttributeList::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            attribute_flags: None,
        }
    }

    /// Declare a class
    pub fn class(name: impl AsRef<str>) -> Self {
        Self::with_kind(TypeKind::Class, name.as_ref())
    }

    /// Declare an interface
    pub fn interface(name: impl AsRef<str>) -> Self {
        Self::with_kind(TypeKind::Interface, name.as_ref())
    }

    /// Declare a trait
    pub fn trait_(name: impl AsRef<str>) -> Self {
        Self::with_kind(TypeKind::Trait, name.as_ref())
    }

    /// Declare an enum
    pub fn enumeration(name: impl AsRef<str>) -> Self {
        Self::with_kind(TypeKind::Enum, name.as_ref())
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the parent class
    pub fn extends(mut self, parent: impl AsRef<str>) -> Self {
        self.parent = Some(canonical_name(parent.as_ref()).to_string());
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface
    pub fn implements(mut self, interface: impl AsRef<str>) -> Self {
        self.interfaces
            .push(canonical_name(interface.as_ref()).to_string());
        self
    }

    /// Compose a trait
    pub fn uses(mut self, trait_name: impl AsRef<str>) -> Self {
        self.traits
            .push(canonical_name(trait_name.as_ref()).to_string());
        self
    }

    /// Mark as abstract
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark as final
    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Mark as anonymous
    pub fn as_anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }

    /// Record the source file
    pub fn declared_in(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Make this type an attribute class
    pub fn as_attribute(mut self, flags: AttributeFlags) -> Self {
        self.attribute_flags = Some(flags);
        self
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute, AttributeTarget::CLASS);
        self
    }

    /// Add a method
    pub fn with_method(mut self, mut method: MethodDecl) -> Self {
        method.declaring_class = self.name.clone();
        self.methods.push(Arc::new(method));
        self
    }

    /// Add a property
    pub fn with_property(mut self, mut property: PropertyDecl) -> Self {
        property.declaring_class = self.name.clone();
        self.properties.push(Arc::new(property));
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Source file, if any
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Check if this declaration has the given name
    pub fn is_named(&self, name: &str) -> bool {
        same_type_name(&self.name, name)
    }

    /// Find an own method by name (case-insensitive)
    pub fn own_method(&self, name: &str) -> Option<&Arc<MethodDecl>> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Find an own property by name (case-sensitive)
    pub fn own_property(&self, name: &str) -> Option<&Arc<PropertyDecl>> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Own constructor, if declared
    pub fn own_constructor(&self) -> Option<&Arc<MethodDecl>> {
        self.methods
            .iter()
            .find(|m| m.kind == MethodKind::Constructor)
    }

    /// Check if any own method is abstract
    pub fn has_abstract_methods(&self) -> bool {
        self.methods.iter().any(|m| m.is_abstract)
    }

    /// Check if this type composes the given trait directly
    pub fn uses_trait(&self, trait_name: &str) -> bool {
        self.traits.iter().any(|t| same_type_name(t, trait_name))
    }
}
