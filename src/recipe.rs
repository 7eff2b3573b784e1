//! Recipe declarations.
//!
//! A [`Recipe`] is pure data parsed from a declaration file; nothing in it is
//! executed. The shape is deliberately tolerant: only `params` is required,
//! unknown keys are ignored, and a missing target type is accepted here and
//! rejected at build time.

use serde::Deserialize;
use serde_json::Value;

/// Declarative description of how to build one identifier's object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recipe {
    /// Catalog name of the target type. Absence surfaces as a build-time
    /// failure, not a parse failure.
    pub name: Option<String>,
    /// Constructor parameters: literals, or identifier strings to resolve.
    /// Required; a declaration without a parameter list is malformed.
    pub params: Vec<Value>,
    /// Whether the built instance is promoted into the registry.
    #[serde(default)]
    pub singleton: bool,
    /// Post-construction method calls, in invocation order.
    #[serde(default)]
    pub methods: Vec<MethodCall>,
}

/// One post-construction method call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodCall {
    /// Method name, dispatched on the current instance's runtime type.
    pub name: String,
    /// Method parameters; absent invokes with no arguments.
    pub params: Option<Vec<Value>>,
    /// Whether the method's return value replaces the current instance.
    #[serde(default)]
    pub return_replaces_instance: bool,
}
