//! The locator: registry, recipe cache, and the lookup algorithm.
//!
//! [`Locator::get`] turns an identifier into a constructed object. The
//! registry of already-resolved instances is consulted first, then the
//! recipe cache, then the [`RecipeStore`]. A freshly loaded recipe is built
//! through the injected [`TypeCatalog`], its parameters resolved literal by
//! literal or recursively by identifier, and the new instance run through
//! its post-construction methods.
//!
//! # Architecture
//!
//! - **Registry** — identifier → resolved [`Object`]; seeded with the
//!   configuration object and the locator itself; singletons land here.
//! - **Recipe cache** — identifier → loaded [`Recipe`]; filled lazily, one
//!   successful load per identifier. Failed loads are not cached and are
//!   re-attempted on the next miss.
//! - Both maps sit behind [`parking_lot::RwLock`]; guards are scoped to
//!   single map operations and never held across recursive resolution, so
//!   nested `get` calls cannot deadlock. Lookup-then-insert sequences are
//!   not atomic: concurrent `get`s for a new identifier may build twice,
//!   with the last singleton write winning.

use core::fmt;
use std::sync::{Arc, Weak};

use hashbrown::HashMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::args::{Arg, Args};
use crate::catalog::TypeCatalog;
use crate::error::LocateError;
use crate::object::Object;
use crate::recipe::{MethodCall, Recipe};
use crate::spec::{required_count, ParamKind, ParamSpec, TypeKind};
use crate::store::RecipeStore;

/// Identifier under which the shared configuration object is seeded.
pub const CONFIG_ID: &str = "config";

/// Identifier under which the locator itself can be located.
pub const LOCATOR_ID: &str = "locator";

/// Leading marker forcing a string parameter to stay a literal.
pub const ESCAPE_MARKER: char = '!';

/// Recipe-driven object locator.
///
/// Construction seeds the registry with the application's configuration
/// object under [`CONFIG_ID`] and a self-reference under [`LOCATOR_ID`], so
/// recipes can ask for either by identifier.
///
/// # Example
///
/// ```rust
/// use lodestone::{Locator, Object, RecipeStore, TypeCatalog};
///
/// let locator = Locator::new(
///     Object::new(String::from("app settings")),
///     TypeCatalog::new(),
///     RecipeStore::default(),
/// );
///
/// assert!(locator.has("config"));
/// assert!(locator.has("locator"));
/// assert!(!locator.has("missing"));
///
/// locator.insert("clock", Object::new(12_u64));
/// assert_eq!(*locator.get("clock").unwrap().downcast::<u64>().unwrap(), 12);
/// ```
pub struct Locator {
    registry: RwLock<HashMap<String, Object>>,
    cache: RwLock<HashMap<String, Recipe>>,
    catalog: TypeCatalog,
    store: RecipeStore,
    self_ref: Weak<Locator>,
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry: Vec<String> = self.registry.read().keys().cloned().collect();
        let cached: Vec<String> = self.cache.read().keys().cloned().collect();
        f.debug_struct("Locator")
            .field("registry", &registry)
            .field("cache", &cached)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl Locator {
    /// Creates a locator over a configuration object, a type catalog, and a
    /// recipe store.
    ///
    /// Returns an [`Arc`] because the locator hands out references to
    /// itself: the registry's [`LOCATOR_ID`] entry is backed by a weak
    /// self-reference established during construction.
    pub fn new(config: Object, catalog: TypeCatalog, store: RecipeStore) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| {
            let mut registry = HashMap::new();
            registry.insert(CONFIG_ID.to_string(), config);
            Self {
                registry: RwLock::new(registry),
                cache: RwLock::new(HashMap::new()),
                catalog,
                store,
                self_ref: self_ref.clone(),
            }
        })
    }

    /// Locates the object for `id`.
    ///
    /// Lookup order, first match wins: an existing registry entry is
    /// returned unchanged; otherwise a cached recipe is built and processed;
    /// otherwise the store is consulted once, a found recipe cached, and the
    /// build retried. A singleton recipe promotes its instance into the
    /// registry, so later calls return that exact instance without
    /// rebuilding or re-running post-methods.
    ///
    /// # Errors
    ///
    /// [`LocateError::NotFound`] when no registry entry and no loadable
    /// recipe exist. Build and post-method failures pass through unchanged,
    /// so a nested resolution failure names the deepest unresolved
    /// identifier.
    pub fn get(&self, id: &str) -> Result<Object, LocateError> {
        if let Some(object) = self.registry_lookup(id) {
            return Ok(object);
        }

        if let Some(recipe) = self.cached_recipe(id) {
            return self.construct(id, &recipe);
        }

        self.load_recipe(id);

        if let Some(recipe) = self.cached_recipe(id) {
            return self.construct(id, &recipe);
        }

        Err(LocateError::not_found(id))
    }

    /// Locates the object for `id`, or `None` if the identifier is unknown.
    ///
    /// Convenience form of [`get`](Self::get) for optional collaborators.
    ///
    /// # Errors
    ///
    /// Suppresses only [`LocateError::NotFound`]; construction failures
    /// propagate unchanged.
    pub fn find(&self, id: &str) -> Result<Option<Object>, LocateError> {
        match self.get(id) {
            Ok(object) => Ok(Some(object)),
            Err(LocateError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Whether `id` can be located: already resolved, already cached, or
    /// loadable from the store.
    ///
    /// Loading has the same caching side effect as [`get`](Self::get). A
    /// `true` result rules out [`LocateError::NotFound`] but not a
    /// construction failure.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        if self.registry_lookup(id).is_some() {
            return true;
        }
        if self.cache.read().contains_key(id) {
            return true;
        }

        self.load_recipe(id);
        self.cache.read().contains_key(id)
    }

    /// Preloads an object under `id`, preempting any recipe-based
    /// resolution for that identifier.
    ///
    /// The registry is consulted before recipes, so the inserted object
    /// always wins; this also replaces the seeded [`CONFIG_ID`] and
    /// [`LOCATOR_ID`] entries when used with those identifiers.
    pub fn insert(&self, id: impl Into<String>, object: Object) {
        self.registry.write().insert(id.into(), object);
    }

    /// The injected type catalog.
    #[must_use]
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup internals
    // ─────────────────────────────────────────────────────────────────────────

    fn registry_lookup(&self, id: &str) -> Option<Object> {
        if let Some(object) = self.registry.read().get(id) {
            return Some(object.clone());
        }
        // The self-reference is weak so the registry cannot keep its own
        // locator alive; an explicit insert under LOCATOR_ID shadows it.
        if id == LOCATOR_ID {
            return self.self_ref.upgrade().map(Object::from_arc);
        }
        None
    }

    fn cached_recipe(&self, id: &str) -> Option<Recipe> {
        self.cache.read().get(id).cloned()
    }

    fn load_recipe(&self, id: &str) {
        if let Some(recipe) = self.store.load(id) {
            self.cache.write().insert(id.to_string(), recipe);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Building
    // ─────────────────────────────────────────────────────────────────────────

    fn construct(&self, id: &str, recipe: &Recipe) -> Result<Object, LocateError> {
        let instance = self.build_instance(recipe)?;
        self.process_new_instance(id, recipe, instance)
    }

    fn build_instance(&self, recipe: &Recipe) -> Result<Object, LocateError> {
        let name = recipe.name.as_deref().unwrap_or_default();
        let Some(entry) = self.catalog.entry(name) else {
            return Err(LocateError::not_constructible(name));
        };

        match &entry.kind {
            TypeKind::Interface => Err(LocateError::not_constructible(name)),
            TypeKind::Enumeration { from } => {
                let Some(key) = recipe.params.first() else {
                    return Err(LocateError::insufficient_arguments(format!("{name}::from")));
                };
                // The key is used raw; it is never treated as an identifier.
                from(key).ok_or_else(|| {
                    LocateError::invalid_argument(format!(
                        "Key {key} matches no value of enumeration '{name}'"
                    ))
                })
            }
            TypeKind::Class { params, construct } => {
                if params.is_empty() {
                    // No declared parameters: supplied params are ignored,
                    // not resolved.
                    return construct(&Args::default());
                }
                if recipe.params.len() < required_count(params) {
                    return Err(LocateError::insufficient_arguments(name));
                }
                let args = self.resolve_params(&recipe.params, params)?;
                construct(&args)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parameter resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_params(
        &self,
        params: &[Value],
        declared: &[ParamSpec],
    ) -> Result<Args, LocateError> {
        let mut resolved = Vec::with_capacity(params.len());
        for (position, value) in params.iter().enumerate() {
            resolved.push(self.resolve_param(position, value, declared)?);
        }
        Ok(Args::new(resolved))
    }

    /// Resolution precedence: non-strings stay literal; the escape marker
    /// wins over declared kinds; a declared primitive string stays literal;
    /// everything else is an identifier, including positions beyond the
    /// declared signature.
    fn resolve_param(
        &self,
        position: usize,
        value: &Value,
        declared: &[ParamSpec],
    ) -> Result<Arg, LocateError> {
        let Value::String(raw) = value else {
            return Ok(Arg::Value(value.clone()));
        };

        if let Some(literal) = raw.strip_prefix(ESCAPE_MARKER) {
            return Ok(Arg::Value(Value::String(literal.to_string())));
        }

        if declared
            .get(position)
            .is_some_and(|param| param.kind() == ParamKind::Str)
        {
            return Ok(Arg::Value(value.clone()));
        }

        self.get(raw).map(Arg::Object)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Post-construction processing
    // ─────────────────────────────────────────────────────────────────────────

    /// Singleton promotion happens before any post-method runs. When a
    /// later method replaces the instance, the registry keeps the
    /// pre-replacement object: the first `get` returns the replacement,
    /// subsequent `get`s return the original.
    fn process_new_instance(
        &self,
        id: &str,
        recipe: &Recipe,
        instance: Object,
    ) -> Result<Object, LocateError> {
        if recipe.singleton {
            tracing::debug!(
                id,
                type_name = instance.type_name(),
                "Promoted instance into the registry"
            );
            self.registry
                .write()
                .insert(id.to_string(), instance.clone());
        }

        let mut current = instance;
        for call in &recipe.methods {
            current = self.run_post_method(current, call)?;
        }
        Ok(current)
    }

    fn run_post_method(&self, current: Object, call: &MethodCall) -> Result<Object, LocateError> {
        // Dispatch follows the runtime type, which a previous replacement
        // may have changed.
        let Some(method) = self.catalog.method(current.type_id(), &call.name) else {
            return Err(LocateError::unknown_method(
                current.type_name(),
                call.name.as_str(),
            ));
        };

        let args = match &call.params {
            Some(params) => self.resolve_params(params, &method.params)?,
            None => Args::default(),
        };

        let output = (method.invoke)(&current, &args)?;

        if call.return_replaces_instance {
            let replacement = output.ok_or_else(|| {
                LocateError::missing_replacement(current.type_name(), call.name.as_str())
            })?;
            tracing::debug!(
                method = call.name.as_str(),
                from = current.type_name(),
                to = replacement.type_name(),
                "Post-method replaced the instance"
            );
            return Ok(replacement);
        }
        Ok(current)
    }
}
