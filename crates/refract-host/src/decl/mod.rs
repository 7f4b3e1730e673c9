//! Declaration handles
//!
//! Declarations are the host's metadata records for types, members and the
//! attributes attached to them. They are built with the `with_*` builder
//! methods, handed to [`Runtime::declare`](crate::Runtime::declare), and from
//! then on shared as immutable `Arc` handles.

mod attribute;
mod class;
mod member;
mod type_hint;

pub use attribute::{
    ArgumentKey, Arguments, AttributeDecl, AttributeFlags, AttributeList, AttributeTarget,
};
pub use class::{ClassDecl, TypeKind};
pub use member::{
    GetHook, MethodDecl, MethodKind, NativeMethod, ParamDecl, PropertyDecl, PropertyHooks,
    SetHook,
};
pub use type_hint::{NamedType, TypeHint};

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Accessible from anywhere
    #[default]
    Public,
    /// Accessible from the declaring type and its descendants
    Protected,
    /// Accessible from the declaring type only
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Strip the leading namespace separator from a qualified name.
///
/// `\App\User` and `App\User` name the same type.
pub fn canonical_name(name: &str) -> &str {
    name.trim_start_matches('\\')
}

/// Lookup key for a type name: canonical and lower-cased
pub(crate) fn type_key(name: &str) -> String {
    canonical_name(name).to_ascii_lowercase()
}

/// Compare two type names the way the host does (canonical, case-insensitive)
pub fn same_type_name(a: &str, b: &str) -> bool {
    canonical_name(a).eq_ignore_ascii_case(canonical_name(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("\\App\\User"), "App\\User");
        assert_eq!(canonical_name("App\\User"), "App\\User");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn test_same_type_name() {
        assert!(same_type_name("\\App\\User", "app\\user"));
        assert!(!same_type_name("App\\User", "App\\Users"));
    }

    #[test]
    fn test_visibility_display() {
        assert_eq!(Visibility::default().to_string(), "public");
        assert_eq!(Visibility::Protected.to_string(), "protected");
        assert_eq!(Visibility::Private.to_string(), "private");
    }
}
