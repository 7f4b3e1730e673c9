//! Refract
//!
//! Reflective introspection over the types declared in a
//! [`refract_host::Runtime`]:
//! - **Views**: [`TypeView`], [`MethodView`], [`PropertyView`] and
//!   [`AttributeView`] wrap one declaration each and classify it
//! - **Attributes**: [`HasAttributes`] filters attached attributes by class,
//!   optionally including subclasses
//! - **Discovery**: [`TypeRegistry`] indexes the types a class loader knows and
//!   [`TypeQueryBuilder`] narrows them with chained filters
//! - **Configuration**: [`RegistryConfig`], loadable from TOML
//!
//! # Example
//!
//! ```rust,ignore
//! use refract::{HasAttributes, TypeRegistry};
//!
//! let mut registry = TypeRegistry::for_runtime(&runtime);
//! registry.index_all()?;
//!
//! for controller in registry.query()?.classes().implements("App\\Controller") {
//!     if let Some(route) = controller.attribute("App\\Route", true) {
//!         let route = route.create()?;
//!         println!("{} -> {:?}", controller.name(), route.get("path"));
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod attribute;
pub mod config;
pub mod error;
pub mod method;
pub mod names;
pub mod property;
pub mod query;
pub mod registry;
pub mod ty;

pub use attribute::{AttributeView, HasAttributes};
pub use config::{IndexScope, RegistryConfig, UnresolvedPolicy};
pub use error::{ConfigError, ReflectError, ReflectResult};
pub use method::MethodView;
pub use names::Names;
pub use property::PropertyView;
pub use query::TypeQueryBuilder;
pub use registry::TypeRegistry;
pub use ty::{TypeView, UNKNOWN_PATH};

pub use refract_host;
