//! Error types for the host runtime

use thiserror::Error;

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised by the host runtime
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    /// A referenced type has not been declared
    #[error("Undefined type: {name}")]
    UnknownType {
        /// Type name that was not found
        name: String,
    },

    /// A type with the same canonical name is already declared
    #[error("Cannot redeclare type {name}")]
    DuplicateType {
        /// Canonical type name
        name: String,
    },

    /// A declaration is inconsistent (wrong kind of parent, enum with parent, ...)
    #[error("Invalid declaration of {name}: {reason}")]
    InvalidDeclaration {
        /// Declared type name
        name: String,
        /// Why the declaration was rejected
        reason: String,
    },

    /// An exception raised by user code (constructor, hook, method body)
    #[error("{class}: {message}")]
    Exception {
        /// Exception class name
        class: String,
        /// Exception message
        message: String,
    },
}

impl HostError {
    /// Create an exception error, as raised by user code
    pub fn exception(class: impl Into<String>, message: impl Into<String>) -> Self {
        HostError::Exception {
            class: class.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        HostError::InvalidDeclaration {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors produced while binding call arguments to declared parameters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    /// Fewer arguments than required parameters
    #[error("Too few arguments: expected at least {expected}, got {actual}")]
    TooFew {
        /// Number of required parameters
        expected: usize,
        /// Number of arguments passed
        actual: usize,
    },

    /// More positional arguments than declared parameters
    #[error("Too many arguments: expected at most {expected}, got {actual}")]
    TooMany {
        /// Number of declared parameters
        expected: usize,
        /// Number of arguments passed
        actual: usize,
    },

    /// A required parameter received no argument
    #[error("Missing argument for parameter ${0}")]
    Missing(String),

    /// A named argument does not match any parameter
    #[error("Unknown named parameter ${0}")]
    UnknownParameter(String),

    /// A parameter received both a positional and a named argument
    #[error("Named parameter ${0} overwrites previous argument")]
    Overwrite(String),
}
