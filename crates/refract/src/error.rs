//! Error types for the reflection facade

use refract_host::HostError;
use thiserror::Error;

/// Result type for reflection operations
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Errors raised by views, the registry and the query builder
#[derive(Debug, Error)]
pub enum ReflectError {
    /// A type name does not resolve to a declared type
    #[error("Class \"{name}\" does not exist")]
    Resolution {
        /// Name that failed to resolve
        name: String,
    },

    /// A type or attribute cannot be instantiated
    #[error("Cannot instantiate {type_name}: {reason}")]
    Instantiation {
        /// Type that was being instantiated
        type_name: String,
        /// Why instantiation failed
        reason: String,
    },

    /// A property value cannot be read or written
    #[error("Cannot access property ${property}: {reason}")]
    Access {
        /// Qualified property name (`Type::name`)
        property: String,
        /// Why access failed
        reason: String,
    },

    /// A method cannot be invoked
    #[error("Cannot invoke {method}(): {reason}")]
    Invocation {
        /// Qualified method name (`Type::name`)
        method: String,
        /// Why invocation failed
        reason: String,
    },

    /// Invalid glob pattern
    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Error raised by the host or by user code, propagated unmodified
    #[error(transparent)]
    Host(#[from] HostError),
}

impl ReflectError {
    pub(crate) fn resolution(name: impl Into<String>) -> Self {
        ReflectError::Resolution { name: name.into() }
    }

    pub(crate) fn instantiation(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ReflectError::Instantiation {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn access(property: impl Into<String>, reason: impl Into<String>) -> Self {
        ReflectError::Access {
            property: property.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invocation(method: impl Into<String>, reason: impl Into<String>) -> Self {
        ReflectError::Invocation {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a [`RegistryConfig`](crate::RegistryConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
