//! Name filters
//!
//! Query operations accept either a single qualified name or a list of them.

/// One or more qualified type names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Names {
    /// A single name
    Single(String),
    /// Any of several names
    Many(Vec<String>),
}

impl Names {
    /// Iterate over the names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Names::Single(name) => std::slice::from_ref(name),
            Names::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }

    /// Check if `predicate` holds for any of the names
    pub fn any(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        self.iter().any(|name| predicate(name))
    }

    /// Check if there are no names
    pub fn is_empty(&self) -> bool {
        match self {
            Names::Single(_) => false,
            Names::Many(names) => names.is_empty(),
        }
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names::Single(name.to_string())
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names::Single(name)
    }
}

impl From<&String> for Names {
    fn from(name: &String) -> Self {
        Names::Single(name.clone())
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names::Many(names)
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        Names::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        Names::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[String]> for Names {
    fn from(names: &[String]) -> Self {
        Names::Many(names.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Names::Many(names.iter().map(|n| n.to_string()).collect())
    }
}
