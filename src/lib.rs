//! A recipe-driven object locator.
//!
//! Objects are described by *recipes*, JSON declarations stating which type
//! to construct, with which parameters, and how to finish the instance
//! afterwards. The [`Locator`] resolves identifiers to objects:
//! already-resolved instances come from its registry, everything else is
//! built on demand from a recipe loaded through a [`RecipeStore`] and a
//! constructor registered in a [`TypeCatalog`].
//!
//! String parameters in a recipe are identifiers by default and resolve
//! recursively, so a single `get` can materialize a whole object graph. A
//! leading `!` keeps a string literal, and parameters declared as primitive
//! strings in the catalog stay literal without the marker.
//!
//! # Components
//!
//! - [`Locator`] — registry, recipe cache, and the resolution algorithm.
//! - [`TypeCatalog`] — maps type names to constructors, enumeration lookups,
//!   and post-construction methods, declared via [`TypeSpec`].
//! - [`RecipeStore`] — loads `locator/locate.<id>.json` declaration files
//!   from a list of search paths.
//! - [`Object`] — a shared, type-erased instance handle.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lodestone::{Locator, Object, ParamSpec, RecipeStore, TypeCatalog, TypeSpec};
//!
//! struct AppConfig {
//!     app_name: String,
//! }
//!
//! struct FileLogger {
//!     config: Arc<AppConfig>,
//! }
//!
//! // One declaration file per identifier, under a `locator/` directory.
//! let dir = tempfile::tempdir()?;
//! std::fs::create_dir_all(dir.path().join("locator"))?;
//! std::fs::write(
//!     dir.path().join("locator").join("locate.logger.json"),
//!     r#"{ "logger": { "name": "FileLogger", "params": ["config"], "singleton": true } }"#,
//! )?;
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.register(TypeSpec::<FileLogger>::class(
//!     "FileLogger",
//!     vec![ParamSpec::object("config")],
//!     |args| Ok(FileLogger { config: args.object(0)? }),
//! ));
//!
//! let locator = Locator::new(
//!     Object::new(AppConfig { app_name: "demo".to_string() }),
//!     catalog,
//!     RecipeStore::with_path(dir.path()),
//! );
//!
//! // "config" resolves to the seeded configuration object.
//! let logger = locator.get("logger")?;
//! assert_eq!(logger.downcast::<FileLogger>().unwrap().config.app_name, "demo");
//!
//! // Singletons come back as the same instance.
//! assert!(locator.get("logger")?.ptr_eq(&logger));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod args;
pub mod catalog;
pub mod error;
pub mod locator;
pub mod object;
pub mod recipe;
pub mod spec;
pub mod store;

pub use crate::args::{Arg, Args};
pub use crate::catalog::TypeCatalog;
pub use crate::error::LocateError;
pub use crate::locator::{CONFIG_ID, ESCAPE_MARKER, LOCATOR_ID, Locator};
pub use crate::object::Object;
pub use crate::recipe::{MethodCall, Recipe};
pub use crate::spec::{ParamKind, ParamSpec, TypeSpec};
pub use crate::store::RecipeStore;

/// Re-export of the types needed to wire up a locator.
pub mod prelude {
    pub use crate::args::{Arg, Args};
    pub use crate::catalog::TypeCatalog;
    pub use crate::error::LocateError;
    pub use crate::locator::Locator;
    pub use crate::object::Object;
    pub use crate::recipe::{MethodCall, Recipe};
    pub use crate::spec::{ParamKind, ParamSpec, TypeSpec};
    pub use crate::store::RecipeStore;
}
