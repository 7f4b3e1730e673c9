//! Refract Host Runtime
//!
//! The metadata catalog the `refract` facade reflects over:
//! - **Declarations**: types, methods, properties, parameters and attributes (`decl` module)
//! - **Values and objects**: tagged values and shared instances (`value`, `object` modules)
//! - **Runtime**: the type table with hierarchy and member resolution (`runtime` module)
//! - **Loader**: the class-map abstraction used for discovery (`loader` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use refract_host::{ClassDecl, MethodDecl, Runtime};
//!
//! let rt = Runtime::new();
//! rt.declare(ClassDecl::interface("Shape").with_method(MethodDecl::new("area")))?;
//! let square = rt.declare(
//!     ClassDecl::class("Square").implements("Shape").with_method(MethodDecl::new("area")),
//! )?;
//! assert!(rt.implements_interface(&square, "Shape"));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod decl;
pub mod error;
pub mod loader;
pub mod object;
pub mod runtime;
pub mod value;

pub use decl::{
    canonical_name, same_type_name, ArgumentKey, Arguments, AttributeDecl, AttributeFlags,
    AttributeList, AttributeTarget, ClassDecl, GetHook, MethodDecl, MethodKind, NamedType,
    NativeMethod, ParamDecl, PropertyDecl, PropertyHooks, SetHook, TypeHint, TypeKind,
    Visibility,
};
pub use error::{BindError, HostError, HostResult};
pub use loader::{ClassLoader, ClassMap, ClassMapEntry};
pub use object::{ObjectRef, Slot};
pub use runtime::Runtime;
pub use value::Value;
