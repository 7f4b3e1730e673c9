//! Class loading
//!
//! A class loader knows which types exist and where they were declared. The
//! [`Runtime`](crate::Runtime) is a loader for everything it holds;
//! [`ClassMap`] is a static map that can be filled independently, e.g. from a
//! pre-built class index.

use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::decl::{canonical_name, type_key};

/// One entry of a class map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassMapEntry {
    /// Canonical type name
    pub name: String,
    /// Declaring source file, if known
    pub path: Option<PathBuf>,
}

impl ClassMapEntry {
    /// Create a new entry
    pub fn new(name: impl AsRef<str>, path: Option<PathBuf>) -> Self {
        Self {
            name: canonical_name(name.as_ref()).to_string(),
            path,
        }
    }
}

/// Source of known types
pub trait ClassLoader {
    /// Known types with their source files, in a stable order
    fn class_map(&self) -> Vec<ClassMapEntry>;
}

impl<T: ClassLoader + ?Sized> ClassLoader for &T {
    fn class_map(&self) -> Vec<ClassMapEntry> {
        (**self).class_map()
    }
}

impl<T: ClassLoader + ?Sized> ClassLoader for Arc<T> {
    fn class_map(&self) -> Vec<ClassMapEntry> {
        (**self).class_map()
    }
}

/// Static class map
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    entries: Vec<ClassMapEntry>,
    keys: FxHashSet<String>,
}

impl ClassMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type. Returns `false` if a type with the same name is already
    /// mapped.
    pub fn insert(&mut self, name: impl AsRef<str>, path: Option<PathBuf>) -> bool {
        let entry = ClassMapEntry::new(name, path);
        if !self.keys.insert(type_key(&entry.name)) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Number of mapped types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<ClassMapEntry> for ClassMap {
    fn extend<I: IntoIterator<Item = ClassMapEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry.name, entry.path);
        }
    }
}

impl FromIterator<ClassMapEntry> for ClassMap {
    fn from_iter<I: IntoIterator<Item = ClassMapEntry>>(iter: I) -> Self {
        let mut map = ClassMap::new();
        map.extend(iter);
        map
    }
}

impl ClassLoader for ClassMap {
    fn class_map(&self) -> Vec<ClassMapEntry> {
        self.entries.clone()
    }
}
