//! Type registry
//!
//! The registry collects the names of every type a [`ClassLoader`] knows
//! into an insertion-ordered, duplicate-free set. Indexing is additive: each
//! [`index`](TypeRegistry::index) call appends names not seen before and
//! never removes any.

use std::path::Path;

use refract_host::{canonical_name, ClassLoader, ClassMapEntry, Runtime};
use rustc_hash::FxHashSet;

use crate::config::{IndexScope, RegistryConfig, UnresolvedPolicy};
use crate::error::{ReflectError, ReflectResult};
use crate::query::TypeQueryBuilder;
use crate::ty::TypeView;

/// Catalog of indexed type names
#[derive(Debug)]
pub struct TypeRegistry<L = Runtime> {
    runtime: Runtime,
    loader: L,
    config: RegistryConfig,
    classes: Vec<String>,
    seen: FxHashSet<String>,
}

impl TypeRegistry<Runtime> {
    /// Registry over every type declared in `runtime`
    pub fn for_runtime(runtime: &Runtime) -> Self {
        Self::new(runtime, runtime.clone())
    }
}

impl<L: ClassLoader> TypeRegistry<L> {
    /// Create an empty registry resolving names in `runtime` and discovering
    /// them through `loader`
    pub fn new(runtime: &Runtime, loader: L) -> Self {
        Self::with_config(runtime, loader, RegistryConfig::default())
    }

    /// Create an empty registry with an explicit configuration
    pub fn with_config(runtime: &Runtime, loader: L, config: RegistryConfig) -> Self {
        Self {
            runtime: runtime.clone(),
            loader,
            config,
            classes: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Pull the loader's class map into the registry.
    ///
    /// Under [`IndexScope::All`] every entry is taken and `paths` is ignored.
    /// Under [`IndexScope::Paths`] only entries whose source file lies under
    /// one of `paths`, or matches one of them as a glob pattern, are taken;
    /// an empty `paths` takes every entry. Returns the number of names added.
    pub fn index<I, P>(&mut self, paths: I) -> ReflectResult<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<P> = paths.into_iter().collect();
        let entries = self.loader.class_map();
        let total = entries.len();

        let filter = match self.config.index_scope {
            IndexScope::All => {
                if !paths.is_empty() {
                    tracing::warn!(
                        paths = paths.len(),
                        "index paths ignored under index-scope = all"
                    );
                }
                None
            }
            IndexScope::Paths if paths.is_empty() => None,
            IndexScope::Paths => Some(PathFilter::new(&paths)?),
        };

        let mut added = 0;
        for entry in entries {
            if let Some(filter) = &filter {
                if !filter.accepts(&entry) {
                    continue;
                }
            }
            let name = canonical_name(&entry.name);
            if self.seen.insert(name.to_ascii_lowercase()) {
                self.classes.push(name.to_string());
                added += 1;
            }
        }

        tracing::debug!(
            known = total,
            added,
            indexed = self.classes.len(),
            "indexed class map"
        );
        Ok(added)
    }

    /// Index every entry of the loader
    pub fn index_all(&mut self) -> ReflectResult<usize> {
        self.index(std::iter::empty::<&Path>())
    }

    /// Indexed names, in insertion order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Check if a name is indexed
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(&canonical_name(name).to_ascii_lowercase())
    }

    /// A fresh view of every indexed type, in insertion order
    pub fn reflectors(&self) -> ReflectResult<Vec<TypeView>> {
        let mut views = Vec::with_capacity(self.classes.len());
        for name in &self.classes {
            match self.runtime.get(name) {
                Some(decl) => views.push(TypeView::from_decl(&self.runtime, decl)),
                None => match self.config.unresolved {
                    UnresolvedPolicy::Abort => return Err(ReflectError::resolution(name)),
                    UnresolvedPolicy::Skip => {
                        tracing::warn!(name = %name, "skipping unresolved indexed type");
                    }
                },
            }
        }
        Ok(views)
    }

    /// Start a query over every indexed type
    pub fn query(&self) -> ReflectResult<TypeQueryBuilder> {
        Ok(TypeQueryBuilder::new(self.reflectors()?))
    }
}

/// Source-file filter of [`IndexScope::Paths`]
struct PathFilter<'a> {
    prefixes: Vec<&'a Path>,
    patterns: Vec<glob::Pattern>,
}

impl<'a> PathFilter<'a> {
    fn new<P: AsRef<Path>>(paths: &'a [P]) -> ReflectResult<Self> {
        let mut patterns = Vec::new();
        for path in paths {
            let text = path.as_ref().to_string_lossy();
            if text.contains(['*', '?', '[']) {
                patterns.push(glob::Pattern::new(&text)?);
            }
        }
        Ok(Self {
            prefixes: paths.iter().map(|p| p.as_ref()).collect(),
            patterns,
        })
    }

    fn accepts(&self, entry: &ClassMapEntry) -> bool {
        let Some(file) = entry.path.as_deref() else {
            return false;
        };
        self.prefixes.iter().any(|prefix| file.starts_with(prefix))
            || self.patterns.iter().any(|pattern| pattern.matches_path(file))
    }
}
