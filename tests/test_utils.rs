//! Shared fixtures for the locator test suite.
//!
//! Declaration-file helpers, a populated [`TypeCatalog`], and the object
//! types the recipes refer to. Import via `mod test_utils;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared fixtures — not every test binary uses every item"
)]

use lodestone::{Locator, Object, ParamSpec, RecipeStore, TypeCatalog, TypeSpec};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ═══════════════════════════════════════════════════════════════════════════════
// FIXTURE OBJECT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Application configuration seeded into every test locator.
pub struct AppConfig {
    pub app_name: String,
}

/// A logger depending on the configuration object.
pub struct FileLogger {
    pub config: Arc<AppConfig>,
    pub level: Mutex<String>,
}

/// Replacement target for `FileLogger::into_null`.
#[derive(Default)]
pub struct NullLogger {
    pub silenced: AtomicBool,
}

/// Two-level dependency: a pipeline owning a logger.
pub struct Pipeline {
    pub logger: Arc<FileLogger>,
    pub workers: u64,
}

/// Holds the locator that constructed it.
pub struct Injected {
    pub locator: Arc<Locator>,
}

/// Mixed literal and located constructor parameters.
pub struct Report {
    pub config: Arc<AppConfig>,
    pub tag: String,
    pub note: String,
}

/// Constructed without arguments regardless of supplied params.
pub struct Beacon;

/// Enumeration constructed from a raw key.
#[derive(Debug, PartialEq)]
pub enum Mode {
    Live,
    Replay,
    Config,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CATALOG AND LOCATOR SETUP
// ═══════════════════════════════════════════════════════════════════════════════

/// A catalog covering every fixture type, plus a `Sink` interface.
pub fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();

    catalog.register(
        TypeSpec::<FileLogger>::class(
            "FileLogger",
            vec![ParamSpec::object("config")],
            |args| {
                Ok(FileLogger {
                    config: args.object(0)?,
                    level: Mutex::new("info".to_string()),
                })
            },
        )
        .with_method("set_level", vec![ParamSpec::str("level")], |logger, args| {
            *logger.level.lock() = args.param(0)?;
            Ok(None)
        })
        .with_method("into_null", vec![], |_logger, _args| {
            Ok(Some(Object::new(NullLogger::default())))
        }),
    );

    catalog.register(
        TypeSpec::<NullLogger>::class("NullLogger", vec![], |_| Ok(NullLogger::default()))
            .with_method("silence", vec![], |logger, _args| {
                logger.silenced.store(true, Ordering::SeqCst);
                Ok(None)
            }),
    );

    catalog.register(TypeSpec::<Pipeline>::class(
        "Pipeline",
        vec![ParamSpec::object("logger"), ParamSpec::value("workers")],
        |args| {
            Ok(Pipeline {
                logger: args.object(0)?,
                workers: args.param(1)?,
            })
        },
    ));

    catalog.register(TypeSpec::<Injected>::class(
        "Injected",
        vec![ParamSpec::object("locator")],
        |args| {
            Ok(Injected {
                locator: args.object(0)?,
            })
        },
    ));

    catalog.register(TypeSpec::<Report>::class(
        "Report",
        vec![
            ParamSpec::object("config"),
            ParamSpec::object("tag"),
            ParamSpec::str("note"),
        ],
        |args| {
            Ok(Report {
                config: args.object(0)?,
                tag: args.param(1)?,
                note: args.param(2)?,
            })
        },
    ));

    catalog.register(TypeSpec::<Beacon>::class("Beacon", vec![], |_| Ok(Beacon)));

    catalog.register(TypeSpec::<Mode>::enumeration("Mode", |key| {
        match key.as_str()? {
            "live" => Some(Mode::Live),
            "replay" => Some(Mode::Replay),
            "config" => Some(Mode::Config),
            _ => None,
        }
    }));

    catalog.interface("Sink");

    catalog
}

/// A locator over the fixture catalog, seeded with an [`AppConfig`].
pub fn seeded_locator(store: RecipeStore) -> Arc<Locator> {
    Locator::new(
        Object::new(AppConfig {
            app_name: "fixture-app".to_string(),
        }),
        catalog(),
        store,
    )
}

/// Writes a declaration file for `id` under `base/locator/`.
pub fn write_declaration(base: &Path, id: &str, content: &str) {
    let dir = base.join("locator");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("locate.{id}.json")), content).unwrap();
}
