//! Authored type signatures.
//!
//! Rust has no runtime reflection, so every type a recipe can name is
//! described up front: a [`TypeSpec`] couples the declared constructor and
//! method parameter lists with the closures that actually build and invoke.
//! The locator consults the declared [`ParamKind`]s to disambiguate literal
//! strings from identifiers, and calls the closures with the resolved
//! [`Args`](crate::args::Args).

use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;

use indexmap::IndexMap;
use serde_json::Value;

use crate::args::Args;
use crate::error::LocateError;
use crate::object::Object;

/// How the resolver treats a parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A primitive string: a plain string value stays a literal.
    Str,
    /// Any other literal value, passed through verbatim.
    Value,
    /// An object reference, resolved by identifier.
    Object,
}

/// One declared parameter of a constructor or method.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    name: String,
    kind: ParamKind,
    optional: bool,
}

impl ParamSpec {
    /// Declares a primitive string parameter.
    pub fn str(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Str)
    }

    /// Declares a non-string literal parameter.
    pub fn value(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Value)
    }

    /// Declares an object reference parameter.
    pub fn object(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Object)
    }

    /// Marks the parameter as having a default, excluding it from the
    /// required count.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The declared parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter kind.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Whether the parameter has a default.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_kind(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }
}

/// Number of parameters without defaults.
pub(crate) fn required_count(params: &[ParamSpec]) -> usize {
    params.iter().filter(|param| !param.is_optional()).count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Erased entries
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) type ConstructFn = Box<dyn Fn(&Args) -> Result<Object, LocateError> + Send + Sync>;
pub(crate) type EnumFromFn = Box<dyn Fn(&Value) -> Option<Object> + Send + Sync>;
pub(crate) type InvokeFn =
    Box<dyn Fn(&Object, &Args) -> Result<Option<Object>, LocateError> + Send + Sync>;

/// How an entry's instances come into being.
pub(crate) enum TypeKind {
    /// Ordinary construction through a closure.
    Class {
        params: Vec<ParamSpec>,
        construct: ConstructFn,
    },
    /// Enumerated values reached through a value lookup.
    Enumeration { from: EnumFromFn },
    /// Abstract target; never constructible.
    Interface,
}

impl TypeKind {
    fn tag(&self) -> &'static str {
        match self {
            Self::Class { .. } => "class",
            Self::Enumeration { .. } => "enumeration",
            Self::Interface => "interface",
        }
    }
}

/// A declared method: its parameter list and invocation closure.
pub(crate) struct MethodSpec {
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) invoke: InvokeFn,
}

/// The catalog's stored, type-erased form of a [`TypeSpec`].
pub(crate) struct TypeEntry {
    pub(crate) name: String,
    pub(crate) type_id: Option<TypeId>,
    pub(crate) kind: TypeKind,
    pub(crate) methods: IndexMap<String, MethodSpec>,
}

impl TypeEntry {
    pub(crate) fn interface(name: String) -> Self {
        Self {
            name,
            type_id: None,
            kind: TypeKind::Interface,
            methods: IndexMap::new(),
        }
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("name", &self.name)
            .field("kind", &self.kind.tag())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed builder
// ─────────────────────────────────────────────────────────────────────────────

/// A consuming builder describing one constructible type `T`.
///
/// The recipe-facing name is independent of the Rust type name; recipes refer
/// to whatever the catalog registers.
///
/// # Example
///
/// ```rust
/// use lodestone::{ParamSpec, TypeCatalog, TypeSpec};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// let spec = TypeSpec::<Greeter>::class(
///     "Greeter",
///     vec![ParamSpec::str("greeting")],
///     |args| {
///         Ok(Greeter {
///             greeting: args.param(0)?,
///         })
///     },
/// )
/// .with_method("reset", vec![], |_greeter, _args| Ok(None));
///
/// let mut catalog = TypeCatalog::new();
/// catalog.register(spec);
/// assert!(catalog.contains("Greeter"));
/// ```
pub struct TypeSpec<T> {
    entry: TypeEntry,
    _marker: PhantomData<fn(T)>,
}

impl<T: Send + Sync + 'static> TypeSpec<T> {
    /// Describes an ordinary type built by `construct` from resolved
    /// arguments.
    pub fn class<F>(name: impl Into<String>, params: Vec<ParamSpec>, construct: F) -> Self
    where
        F: Fn(&Args) -> Result<T, LocateError> + Send + Sync + 'static,
    {
        let construct: ConstructFn = Box::new(move |args| construct(args).map(Object::new));
        Self {
            entry: TypeEntry {
                name: name.into(),
                type_id: Some(TypeId::of::<T>()),
                kind: TypeKind::Class { params, construct },
                methods: IndexMap::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Describes an enumerated type whose values are reached by looking up a
    /// raw key.
    ///
    /// `from` returns `None` when the key matches no value.
    pub fn enumeration<F>(name: impl Into<String>, from: F) -> Self
    where
        F: Fn(&Value) -> Option<T> + Send + Sync + 'static,
    {
        let from: EnumFromFn = Box::new(move |value| from(value).map(Object::new));
        Self {
            entry: TypeEntry {
                name: name.into(),
                type_id: Some(TypeId::of::<T>()),
                kind: TypeKind::Enumeration { from },
                methods: IndexMap::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Declares a post-construction method.
    ///
    /// `invoke` receives the current instance and its resolved arguments; a
    /// `Some` return is the candidate replacement instance for recipes that
    /// set `return_replaces_instance`.
    ///
    /// # Panics
    ///
    /// Panics if a method with the same name is already declared.
    #[must_use]
    pub fn with_method<F>(
        mut self,
        name: impl Into<String>,
        params: Vec<ParamSpec>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&T, &Args) -> Result<Option<Object>, LocateError> + Send + Sync + 'static,
    {
        let name = name.into();
        let invoke: InvokeFn = Box::new(move |object, args| {
            let target = object
                .downcast::<T>()
                .expect("method dispatched to a mismatched instance type (this is a bug)");
            invoke(&target, args)
        });

        let replaced = self.entry.methods.insert(name.clone(), MethodSpec { params, invoke });
        assert!(
            replaced.is_none(),
            "Method '{name}' is already declared for type '{}'",
            self.entry.name
        );
        self
    }

    pub(crate) fn into_entry(self) -> TypeEntry {
        self.entry
    }
}

impl<T> fmt::Debug for TypeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSpec").field("entry", &self.entry).finish()
    }
}
