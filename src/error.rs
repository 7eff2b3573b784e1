//! Error types for object location and construction.

use thiserror::Error;

/// Errors that can occur while locating or constructing an object.
#[derive(Debug, Error)]
pub enum LocateError {
    /// No registry entry and no loadable recipe exist for the identifier.
    #[error("Failed to locate an object for identifier '{0}'")]
    NotFound(String),

    /// The recipe's target type is abstract, unknown, or missing.
    #[error("Not possible to instantiate '{0}'")]
    NotConstructible(String),

    /// Fewer parameters were supplied than a constructor or enum value
    /// lookup requires. Carries `Type` or `Type::from`.
    #[error("Not enough parameters for {0}")]
    InsufficientArguments(String),

    /// A post-construction method is not declared for the instance's type.
    #[error("No method '{method}' is declared for type '{type_name}'")]
    UnknownMethod {
        /// Runtime type of the instance the method was dispatched on.
        type_name: String,
        /// The recipe's method name.
        method: String,
    },

    /// A method flagged to replace the instance returned nothing.
    #[error("Method '{type_name}::{method}' returned no replacement instance")]
    MissingReplacement {
        /// Runtime type of the instance the method ran on.
        type_name: String,
        /// The recipe's method name.
        method: String,
    },

    /// A resolved argument was rejected by an accessor or a construction
    /// closure.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl LocateError {
    /// Creates a [`NotFound`](Self::NotFound).
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Creates a [`NotConstructible`](Self::NotConstructible).
    pub fn not_constructible(type_name: impl Into<String>) -> Self {
        Self::NotConstructible(type_name.into())
    }

    /// Creates an [`InsufficientArguments`](Self::InsufficientArguments).
    pub fn insufficient_arguments(target: impl Into<String>) -> Self {
        Self::InsufficientArguments(target.into())
    }

    /// Creates an [`UnknownMethod`](Self::UnknownMethod).
    pub fn unknown_method(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// Creates a [`MissingReplacement`](Self::MissingReplacement).
    pub fn missing_replacement(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MissingReplacement {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// Creates an [`InvalidArgument`](Self::InvalidArgument).
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
