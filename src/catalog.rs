//! The authored type catalog.
//!
//! The [`TypeCatalog`] is the locator's introspection capability: it answers
//! which recipe-facing type names exist, how their constructors and methods
//! are shaped, and carries the closures that build instances and invoke
//! methods. It is injected into [`Locator::new`](crate::locator::Locator::new)
//! and never mutated afterwards.
//!
//! Method dispatch during post-construction processing follows the *runtime*
//! type of the current instance, so entries are also indexed by [`TypeId`].

use core::any::TypeId;
use core::fmt;

use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::spec::{MethodSpec, TypeEntry, TypeSpec};

/// Catalog of types recipes may name.
///
/// # Example
///
/// ```rust
/// use lodestone::{ParamSpec, TypeCatalog, TypeSpec};
///
/// struct Relay {
///     channel: String,
/// }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.register(TypeSpec::<Relay>::class(
///     "Relay",
///     vec![ParamSpec::str("channel")],
///     |args| {
///         Ok(Relay {
///             channel: args.param(0)?,
///         })
///     },
/// ));
/// catalog.interface("Transport");
///
/// assert!(catalog.contains("Relay"));
/// assert_eq!(catalog.names(), ["Relay", "Transport"]);
/// ```
#[derive(Default)]
pub struct TypeCatalog {
    types: IndexMap<String, TypeEntry>,
    names_by_id: HashMap<TypeId, String>,
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("types", &self.names())
            .finish()
    }
}

impl TypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
            names_by_id: HashMap::new(),
        }
    }

    /// Registers a type description.
    ///
    /// When the same Rust type is registered under several names, method
    /// dispatch by runtime type resolves through the first registration.
    ///
    /// # Panics
    ///
    /// Panics if a type with the same name is already registered.
    pub fn register<T: Send + Sync + 'static>(&mut self, spec: TypeSpec<T>) {
        let entry = spec.into_entry();
        assert!(
            !self.types.contains_key(&entry.name),
            "Type '{}' is already registered",
            entry.name
        );

        if let Some(type_id) = entry.type_id {
            self.names_by_id
                .entry(type_id)
                .or_insert_with(|| entry.name.clone());
        }
        self.types.insert(entry.name.clone(), entry);
    }

    /// Declares an abstract target name.
    ///
    /// Recipes naming it fail construction with
    /// [`NotConstructible`](crate::error::LocateError::NotConstructible).
    ///
    /// # Panics
    ///
    /// Panics if a type with the same name is already registered.
    pub fn interface(&mut self, name: impl Into<String>) {
        let name = name.into();
        assert!(
            !self.types.contains_key(&name),
            "Type '{name}' is already registered"
        );
        self.types.insert(name.clone(), TypeEntry::interface(name));
    }

    /// Whether a type with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Names of all registered types, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// The entry registered under `name`.
    pub(crate) fn entry(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    /// The method declared as `method` for the type with the given runtime
    /// id.
    pub(crate) fn method(&self, type_id: TypeId, method: &str) -> Option<&MethodSpec> {
        let name = self.names_by_id.get(&type_id)?;
        self.types.get(name)?.methods.get(method)
    }
}
