//! Resolved argument lists handed to construction and method closures.
//!
//! The parameter resolver turns a recipe's raw parameter list into [`Args`]:
//! literals stay as JSON values, identifier parameters become located
//! [`Object`]s. Closures pull their inputs back out with the typed accessors
//! ([`Args::param`], [`Args::object`]).

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::LocateError;
use crate::object::Object;

/// A single resolved argument.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A literal that passed through resolution unchanged (or with the
    /// escape marker stripped).
    Value(Value),
    /// An object resolved by identifier.
    Object(Object),
}

impl Arg {
    /// The literal value, if this argument is one.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Object(_) => None,
        }
    }

    /// The located object, if this argument is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Value(_) => None,
        }
    }
}

/// An ordered, fully resolved argument list.
#[derive(Debug, Clone, Default)]
pub struct Args {
    args: Vec<Arg>,
}

impl Args {
    /// Creates an argument list from resolved arguments.
    pub fn new(args: Vec<Arg>) -> Self {
        Self { args }
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The raw argument at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }

    /// Iterates over the raw arguments in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Arg> {
        self.args.iter()
    }

    /// Deserializes the literal argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidArgument`] if the index is out of
    /// range, the argument is a located object, or deserialization fails.
    pub fn param<T: DeserializeOwned>(&self, index: usize) -> Result<T, LocateError> {
        let arg = self.arg(index)?;
        let Arg::Value(value) = arg else {
            let object = arg.as_object().map_or("?", Object::type_name);
            return Err(LocateError::invalid_argument(format!(
                "Argument {index} is an object of type '{object}', expected a literal value"
            )));
        };

        serde_json::from_value(value.clone()).map_err(|err| {
            LocateError::invalid_argument(format!("Failed to deserialize argument {index}: {err}"))
        })
    }

    /// Downcasts the object argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidArgument`] if the index is out of
    /// range, the argument is a literal, or the object is not a `T`.
    pub fn object<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>, LocateError> {
        let arg = self.arg(index)?;
        let Arg::Object(object) = arg else {
            return Err(LocateError::invalid_argument(format!(
                "Argument {index} is a literal, expected a located object"
            )));
        };

        object.downcast::<T>().ok_or_else(|| {
            LocateError::invalid_argument(format!(
                "Argument {index} is an object of type '{}', expected '{}'",
                object.type_name(),
                core::any::type_name::<T>()
            ))
        })
    }

    fn arg(&self, index: usize) -> Result<&Arg, LocateError> {
        self.args
            .get(index)
            .ok_or_else(|| LocateError::invalid_argument(format!("Missing argument {index}")))
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Arg;
    type IntoIter = core::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
