//! Recipe store: locating and loading declaration files.
//!
//! Declarations live in JSON files named `locator/locate.<id>.json` under an
//! ordered list of search directories. A file holds a top-level object keyed
//! by identifier, so one file may declare several identifiers:
//!
//! ```json
//! {
//!     "logger": { "name": "FileLogger", "params": ["config"], "singleton": true }
//! }
//! ```
//!
//! Loading is deliberately permissive: any failure (absent file, unreadable
//! file, malformed JSON, missing identifier key, wrong recipe shape) yields
//! "no recipe" rather than an error, and nothing is cached about the failure.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::recipe::Recipe;

/// Locates and parses recipe declarations on disk.
#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    search_paths: Vec<PathBuf>,
}

impl RecipeStore {
    /// Creates a store searching the given base directories in order.
    pub fn new<I, P>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a store searching a single base directory.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new([path.into()])
    }

    /// The configured search directories, in order.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Loads the declaration for `id`, or `None` if absent or malformed.
    ///
    /// The first search directory containing the file wins; later
    /// directories are not consulted even if that file turns out to be
    /// malformed.
    #[must_use]
    pub fn load(&self, id: &str) -> Option<Recipe> {
        // Identifiers must not be able to escape the search path.
        if id.contains(['/', '\\']) {
            tracing::debug!(id, "Refused identifier containing a path separator");
            return None;
        }

        let relative = format!("locator/locate.{id}.json");
        let Some(path) = self
            .search_paths
            .iter()
            .map(|base| base.join(&relative))
            .find(|candidate| candidate.is_file())
        else {
            tracing::debug!(id, "No recipe declaration found");
            return None;
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(
                    id,
                    path = %path.display(),
                    error = %err,
                    "Failed to read recipe declaration"
                );
                return None;
            }
        };

        let declarations: Value = match serde_json::from_str(&text) {
            Ok(declarations) => declarations,
            Err(err) => {
                tracing::debug!(
                    id,
                    path = %path.display(),
                    error = %err,
                    "Ignoring malformed recipe declaration"
                );
                return None;
            }
        };

        let Some(entry) = declarations.get(id) else {
            tracing::debug!(
                id,
                path = %path.display(),
                "Declaration file does not declare the identifier"
            );
            return None;
        };

        match serde_json::from_value::<Recipe>(entry.clone()) {
            Ok(recipe) => {
                tracing::debug!(id, path = %path.display(), "Loaded recipe declaration");
                Some(recipe)
            }
            Err(err) => {
                tracing::debug!(
                    id,
                    path = %path.display(),
                    error = %err,
                    "Ignoring recipe declaration of the wrong shape"
                );
                None
            }
        }
    }
}
