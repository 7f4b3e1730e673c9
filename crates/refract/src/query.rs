//! Type queries
//!
//! A [`TypeQueryBuilder`] owns a list of type views and narrows it with each
//! filter. Filters are stable: surviving views keep their original order.
//!
//! ```rust,ignore
//! let handlers = registry
//!     .query()?
//!     .classes()
//!     .instantiable()
//!     .implements("App\\Contracts\\Handler")
//!     .with_attribute("App\\Attributes\\AsHandler", true)
//!     .into_vec();
//! ```

use crate::attribute::HasAttributes;
use crate::error::ReflectResult;
use crate::names::Names;
use crate::ty::TypeView;

/// Fluent filter chain over type views
#[derive(Debug, Clone, Default)]
pub struct TypeQueryBuilder {
    types: Vec<TypeView>,
}

impl TypeQueryBuilder {
    /// Start a query over `types`
    pub fn new(types: Vec<TypeView>) -> Self {
        Self { types }
    }

    fn retain(mut self, filter: &str, mut predicate: impl FnMut(&TypeView) -> bool) -> Self {
        let before = self.types.len();
        self.types.retain(|t| predicate(t));
        tracing::trace!(filter, before, after = self.types.len(), "applied type filter");
        self
    }

    /// Keep classes: types that are neither interfaces, enums nor traits
    pub fn classes(self) -> Self {
        self.retain("classes", TypeView::class)
    }

    /// Keep interfaces
    pub fn interfaces(self) -> Self {
        self.retain("interfaces", TypeView::interface)
    }

    /// Keep traits
    pub fn traits(self) -> Self {
        self.retain("traits", TypeView::trait_)
    }

    /// Keep enums
    pub fn enums(self) -> Self {
        self.retain("enums", TypeView::enum_)
    }

    /// Keep types that can be instantiated
    pub fn instantiable(self) -> Self {
        self.retain("instantiable", TypeView::instantiable)
    }

    /// Keep types implementing any of `names`
    pub fn implements(self, names: impl Into<Names>) -> Self {
        let names = names.into();
        self.retain("implements", |t| names.any(|name| t.implements(name)))
    }

    /// Keep strict descendants of `name`
    pub fn extends(self, name: &str) -> Self {
        self.retain("extends", |t| t.extends(name))
    }

    /// Keep types using any of the traits `names`
    pub fn uses(self, names: impl Into<Names>, recursive: bool) -> Self {
        let names = names.into();
        self.retain("uses", |t| names.any(|name| t.uses(name, recursive)))
    }

    /// Keep types carrying an attribute of any of the classes `names`
    /// (or, with `inherit`, of a subtype of them)
    pub fn with_attribute(self, names: impl Into<Names>, inherit: bool) -> Self {
        let names = names.into();
        self.retain("with_attribute", |t| {
            !t.attributes_matching(names.clone(), inherit).is_empty()
        })
    }

    /// Keep types whose source file matches the glob `pattern`
    pub fn in_path(self, pattern: &str) -> ReflectResult<Self> {
        let pattern = glob::Pattern::new(pattern)?;
        Ok(self.retain("in_path", |t| t.matches_compiled(&pattern)))
    }

    /// Keep types for which `predicate` holds
    pub fn filter(self, predicate: impl FnMut(&TypeView) -> bool) -> Self {
        self.retain("filter", predicate)
    }

    /// Matching types, in original order
    pub fn get(&self) -> &[TypeView] {
        &self.types
    }

    /// Take the matching types
    pub fn into_vec(self) -> Vec<TypeView> {
        self.types
    }

    /// Number of matching types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no type matches
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl IntoIterator for TypeQueryBuilder {
    type Item = TypeView;
    type IntoIter = std::vec::IntoIter<TypeView>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}
