//! Attribute declarations
//!
//! An attribute is structured metadata attached to a type, method, property or
//! parameter: the name of the attribute class plus the arguments written at
//! the attachment site.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::value::Value;

use super::same_type_name;

bitflags! {
    /// Kinds of declaration an attribute can be attached to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttributeTarget: u8 {
        /// Type declarations
        const CLASS = 0x01;
        /// Free functions
        const FUNCTION = 0x02;
        /// Methods
        const METHOD = 0x04;
        /// Properties
        const PROPERTY = 0x08;
        /// Class constants
        const CLASS_CONSTANT = 0x10;
        /// Parameters
        const PARAMETER = 0x20;
        /// Every target
        const ALL = 0x3F;
    }
}

impl fmt::Display for AttributeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .iter_names()
            .filter(|(name, _)| *name != "ALL")
            .map(|(name, _)| match name {
                "CLASS" => "class",
                "FUNCTION" => "function",
                "METHOD" => "method",
                "PROPERTY" => "property",
                "CLASS_CONSTANT" => "class constant",
                _ => "parameter",
            })
            .collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Declared usage of an attribute class: where it may appear and whether it
/// may appear more than once on the same declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeFlags {
    /// Allowed targets
    pub targets: AttributeTarget,
    /// Whether the attribute may be repeated
    pub repeatable: bool,
}

impl AttributeFlags {
    /// Attribute usable on the given targets, not repeatable
    pub fn new(targets: AttributeTarget) -> Self {
        Self {
            targets,
            repeatable: false,
        }
    }

    /// Mark the attribute as repeatable
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

impl Default for AttributeFlags {
    fn default() -> Self {
        Self::new(AttributeTarget::ALL)
    }
}

/// Key of a single attribute argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentKey {
    /// Positional argument at the given index
    Positional(usize),
    /// Named argument
    Named(String),
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentKey::Positional(index) => write!(f, "{}", index),
            ArgumentKey::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Arguments exactly as written at the attachment site, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(ArgumentKey, Value)>,
}

impl Arguments {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn push(&mut self, value: Value) {
        let index = self.positional().count();
        self.entries.push((ArgumentKey::Positional(index), value));
    }

    /// Append a named argument
    pub fn push_named(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((ArgumentKey::Named(name.into()), value));
    }

    /// Get an argument by key
    pub fn get(&self, key: &ArgumentKey) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a positional argument
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.get(&ArgumentKey::Positional(index))
    }

    /// Get a named argument
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, ArgumentKey::Named(n) if n == name))
            .map(|(_, v)| v)
    }

    /// Positional arguments in order
    pub fn positional(&self) -> impl Iterator<Item = &Value> {
        self.entries
            .iter()
            .filter(|(k, _)| matches!(k, ArgumentKey::Positional(_)))
            .map(|(_, v)| v)
    }

    /// Named arguments in order
    pub fn named_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            ArgumentKey::Named(name) => Some((name.as_str(), v)),
            ArgumentKey::Positional(_) => None,
        })
    }

    /// All arguments in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&ArgumentKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no arguments
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        let mut args = Arguments::new();
        for value in values {
            args.push(value);
        }
        args
    }
}

/// A single attribute attached to a declaration
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDecl {
    /// Canonical name of the attribute class
    pub name: String,
    /// Arguments as written
    pub arguments: Arguments,
    /// Kind of declaration the attribute is attached to
    pub target: AttributeTarget,
    /// Whether another attribute of the same class sits on the same declaration
    pub repeated: bool,
}

impl AttributeDecl {
    /// Create an attribute with no arguments.
    ///
    /// The target is filled in when the attribute is attached.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: super::canonical_name(name.as_ref()).to_string(),
            arguments: Arguments::new(),
            target: AttributeTarget::CLASS,
            repeated: false,
        }
    }

    /// Add a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.arguments.push(value.into());
        self
    }

    /// Add a named argument
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push_named(name, value.into());
        self
    }
}

/// Attributes attached to one declaration, in declaration order.
///
/// Keeps the `repeated` flag of every entry up to date as attributes are added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    items: Vec<Arc<AttributeDecl>>,
}

impl AttributeList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an attribute to a declaration of the given kind
    pub fn push(&mut self, mut attribute: AttributeDecl, target: AttributeTarget) {
        attribute.target = target;

        let mut repeated = false;
        for existing in &mut self.items {
            if same_type_name(&existing.name, &attribute.name) {
                repeated = true;
                if !existing.repeated {
                    Arc::make_mut(existing).repeated = true;
                }
            }
        }
        attribute.repeated = repeated;

        self.items.push(Arc::new(attribute));
    }

    /// Attribute handles in declaration order
    pub fn as_slice(&self) -> &[Arc<AttributeDecl>] {
        &self.items
    }

    /// Iterate over attribute handles
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AttributeDecl>> {
        self.items.iter()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no attribute is attached
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_keys() {
        let attr = AttributeDecl::new("Route")
            .arg("/users")
            .named("methods", Value::List(vec!["GET".into()]))
            .arg(10);

        let args = &attr.arguments;
        assert_eq!(args.len(), 3);
        assert_eq!(args.at(0), Some(&Value::from("/users")));
        assert_eq!(args.at(1), Some(&Value::Int(10)));
        assert!(args.named("methods").is_some());
        assert!(args.named("missing").is_none());

        let keys: Vec<String> = args.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["0", "methods", "1"]);
    }

    #[test]
    fn test_attribute_name_is_canonical() {
        let attr = AttributeDecl::new("\\App\\Attributes\\Route");
        assert_eq!(attr.name, "App\\Attributes\\Route");
    }

    #[test]
    fn test_attribute_list_marks_repeated() {
        let mut list = AttributeList::new();
        list.push(AttributeDecl::new("Tag").arg("a"), AttributeTarget::METHOD);
        list.push(AttributeDecl::new("Route"), AttributeTarget::METHOD);
        list.push(AttributeDecl::new("tag").arg("b"), AttributeTarget::METHOD);

        let flags: Vec<bool> = list.iter().map(|a| a.repeated).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert!(list.iter().all(|a| a.target == AttributeTarget::METHOD));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(AttributeTarget::CLASS.to_string(), "class");
        assert_eq!(
            (AttributeTarget::METHOD | AttributeTarget::PROPERTY).to_string(),
            "method, property"
        );
    }
}
