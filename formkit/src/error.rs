//! Error types.

use thiserror::Error;

/// Errors that can occur when binding a widget to an element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// No element with this ID exists in the document.
    #[error("No element with id '{0}'")]
    NotFound(String),

    /// The element exists but cannot host a select widget.
    #[error("Element '{id}' is a <{tag}>, not a <select>")]
    NotASelect {
        /// The element ID.
        id: String,
        /// The element's tag name.
        tag: String,
    },

    /// The element already has a widget bound to it.
    #[error("Element '{0}' already has a select widget")]
    AlreadyBound(String),
}

/// Errors that can occur when parsing a declarative configuration literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The literal is not wrapped in `{...}`.
    #[error("Expected an object literal, got '{0}'")]
    NotAnObject(String),

    /// The literal is an object but does not describe a valid configuration.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
