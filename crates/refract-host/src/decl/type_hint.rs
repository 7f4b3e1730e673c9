//! Declared type hints

use std::fmt;

const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "array", "object", "callable", "iterable", "mixed",
    "void", "null", "never", "false", "true", "static", "self", "parent",
];

/// A single named type, e.g. `int` or `?App\User`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    /// Type name
    pub name: String,
    /// Whether `null` is also accepted
    pub nullable: bool,
}

impl NamedType {
    /// Check if this names a builtin type rather than a declared one
    pub fn is_builtin(&self) -> bool {
        BUILTIN_TYPES
            .iter()
            .any(|builtin| builtin.eq_ignore_ascii_case(&self.name))
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable && !self.name.eq_ignore_ascii_case("mixed") {
            write!(f, "?{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Declared type of a property or parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHint {
    /// A single type
    Named(NamedType),
    /// `A|B|...`
    Union(Vec<NamedType>),
    /// `A&B&...`
    Intersection(Vec<NamedType>),
}

impl TypeHint {
    /// A non-nullable named type
    pub fn named(name: impl Into<String>) -> Self {
        TypeHint::Named(NamedType {
            name: name.into(),
            nullable: false,
        })
    }

    /// A nullable named type (`?T`)
    pub fn nullable(name: impl Into<String>) -> Self {
        TypeHint::Named(NamedType {
            name: name.into(),
            nullable: true,
        })
    }

    /// A union of named types
    pub fn union<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeHint::Union(
            names
                .into_iter()
                .map(|name| NamedType {
                    name: name.into(),
                    nullable: false,
                })
                .collect(),
        )
    }

    /// An intersection of named types
    pub fn intersection<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeHint::Intersection(
            names
                .into_iter()
                .map(|name| NamedType {
                    name: name.into(),
                    nullable: false,
                })
                .collect(),
        )
    }

    /// Check if `null` satisfies this type
    pub fn allows_null(&self) -> bool {
        match self {
            TypeHint::Named(named) => {
                named.nullable
                    || named.name.eq_ignore_ascii_case("null")
                    || named.name.eq_ignore_ascii_case("mixed")
            }
            TypeHint::Union(members) => members
                .iter()
                .any(|m| m.nullable || m.name.eq_ignore_ascii_case("null")),
            TypeHint::Intersection(_) => false,
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |members: &[NamedType], sep: &str| {
            members
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(sep)
        };
        match self {
            TypeHint::Named(named) => write!(f, "{}", named),
            TypeHint::Union(members) => write!(f, "{}", join(members, "|")),
            TypeHint::Intersection(members) => write!(f, "{}", join(members, "&")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TypeHint::named("int").to_string(), "int");
        assert_eq!(TypeHint::nullable("App\\User").to_string(), "?App\\User");
        assert_eq!(TypeHint::union(["int", "string"]).to_string(), "int|string");
        assert_eq!(
            TypeHint::intersection(["Countable", "Traversable"]).to_string(),
            "Countable&Traversable"
        );
    }

    #[test]
    fn test_allows_null() {
        assert!(!TypeHint::named("int").allows_null());
        assert!(TypeHint::nullable("int").allows_null());
        assert!(TypeHint::named("mixed").allows_null());
        assert!(TypeHint::union(["int", "null"]).allows_null());
        assert!(!TypeHint::intersection(["A", "B"]).allows_null());
    }

    #[test]
    fn test_builtin() {
        let TypeHint::Named(int) = TypeHint::named("INT") else {
            unreachable!()
        };
        assert!(int.is_builtin());
        let TypeHint::Named(user) = TypeHint::named("App\\User") else {
            unreachable!()
        };
        assert!(!user.is_builtin());
    }
}
