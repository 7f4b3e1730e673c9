//! Registry configuration
//!
//! ```toml
//! index-scope = "paths"
//! unresolved = "skip"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which loader entries [`TypeRegistry::index`](crate::TypeRegistry::index)
/// takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexScope {
    /// Every known type; the paths passed to `index` are ignored
    #[default]
    All,
    /// Only types whose source file lies under, or matches, one of the paths
    Paths,
}

/// What [`TypeRegistry::reflectors`](crate::TypeRegistry::reflectors) does
/// with an indexed name that no longer resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Fail the whole call
    #[default]
    Abort,
    /// Log a warning and leave the name out
    Skip,
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RegistryConfig {
    /// Index scope
    pub index_scope: IndexScope,
    /// Unresolved-name policy
    pub unresolved: UnresolvedPolicy,
}

impl RegistryConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.index_scope, IndexScope::All);
        assert_eq!(config.unresolved, UnresolvedPolicy::Abort);
    }

    #[test]
    fn test_parse() {
        let config = RegistryConfig::from_toml_str(
            r#"
index-scope = "paths"
unresolved = "skip"
"#,
        )
        .unwrap();
        assert_eq!(config.index_scope, IndexScope::Paths);
        assert_eq!(config.unresolved, UnresolvedPolicy::Skip);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            RegistryConfig::from_toml_str("index-scope = \"some\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RegistryConfig::load("/nonexistent/refract.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refract.toml");
        std::fs::write(&path, "unresolved = \"skip\"\n").unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.unresolved, UnresolvedPolicy::Skip);
        assert_eq!(config.index_scope, IndexScope::All);
    }
}
