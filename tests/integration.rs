//! Integration tests for the full store → catalog → locator flow.
//!
//! Declaration files on disk drive every resolution here; nothing reaches
//! into locator internals. These tests verify that:
//! - identifier resolution walks registry, recipe cache, and store in order
//! - recipes compose recursively into whole object graphs
//! - singletons are promoted once and reused across lookups
//! - post-construction methods from declaration files run with resolved
//!   parameters and can replace the instance

mod test_utils;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use lodestone::{Object, RecipeStore};
use test_utils::{
    seeded_locator, write_declaration, FileLogger, Injected, Mode, NullLogger, Pipeline,
};

// ─────────────────────────────────────────────────────────────────────────────
// Dependency graphs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolves_a_dependency_graph_from_declaration_files() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{ "logger": { "name": "FileLogger", "params": ["config"], "singleton": true } }"#,
    );
    write_declaration(
        dir.path(),
        "pipeline",
        r#"{ "pipeline": { "name": "Pipeline", "params": ["logger", 4] } }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    let pipeline = locator.get("pipeline").unwrap();
    let pipeline = pipeline.downcast::<Pipeline>().unwrap();
    assert_eq!(pipeline.workers, 4);
    assert_eq!(pipeline.logger.config.app_name, "fixture-app");

    // The singleton logger built during pipeline resolution is the one a
    // direct lookup returns afterwards.
    let logger = locator.get("logger").unwrap();
    let logger = logger.downcast::<FileLogger>().unwrap();
    assert!(Arc::ptr_eq(&pipeline.logger, &logger));
}

#[test]
fn non_singletons_rebuild_but_share_singleton_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{ "logger": { "name": "FileLogger", "params": ["config"], "singleton": true } }"#,
    );
    write_declaration(
        dir.path(),
        "pipeline",
        r#"{ "pipeline": { "name": "Pipeline", "params": ["logger", 2] } }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    let first = locator.get("pipeline").unwrap().downcast::<Pipeline>().unwrap();
    let second = locator.get("pipeline").unwrap().downcast::<Pipeline>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.logger, &second.logger));
}

#[test]
fn recipes_can_depend_on_the_locator_itself() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "injected",
        r#"{ "injected": { "name": "Injected", "params": ["locator"] } }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    let injected = locator.get("injected").unwrap();
    let injected = injected.downcast::<Injected>().unwrap();
    assert!(Arc::ptr_eq(&injected.locator, &locator));
}

// ─────────────────────────────────────────────────────────────────────────────
// Overrides
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inserted_objects_preempt_declaration_files() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{ "logger": { "name": "FileLogger", "params": ["config"] } }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));
    locator.insert("logger", Object::new(NullLogger::default()));

    assert!(locator.get("logger").unwrap().is::<NullLogger>());
}

#[test]
fn inserted_objects_replace_the_seeded_identifiers() {
    let locator = seeded_locator(RecipeStore::default());

    locator.insert("locator", Object::new(7_u8));
    assert!(locator.get("locator").unwrap().is::<u8>());

    locator.insert("config", Object::new(String::from("swapped")));
    assert!(locator.get("config").unwrap().is::<String>());
}

// ─────────────────────────────────────────────────────────────────────────────
// Post-construction methods
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn post_methods_from_declaration_files_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{
            "logger": {
                "name": "FileLogger",
                "params": ["config"],
                "methods": [ { "name": "set_level", "params": ["debug"] } ]
            }
        }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    let logger = locator.get("logger").unwrap();
    let logger = logger.downcast::<FileLogger>().unwrap();
    assert_eq!(*logger.level.lock(), "debug");
}

#[test]
fn replacement_methods_swap_the_returned_instance() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{
            "logger": {
                "name": "FileLogger",
                "params": ["config"],
                "methods": [
                    { "name": "into_null", "return_replaces_instance": true },
                    { "name": "silence" }
                ]
            }
        }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    // The second method is declared on the replacement type, so dispatch
    // has to follow the swap.
    let logger = locator.get("logger").unwrap();
    let logger = logger.downcast::<NullLogger>().unwrap();
    assert!(logger.silenced.load(Ordering::SeqCst));
}

#[test]
fn singleton_replacement_keeps_the_original_in_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{
            "logger": {
                "name": "FileLogger",
                "params": ["config"],
                "singleton": true,
                "methods": [ { "name": "into_null", "return_replaces_instance": true } ]
            }
        }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    // Promotion happens before the post-methods, so only the first caller
    // sees the replacement.
    assert!(locator.get("logger").unwrap().is::<NullLogger>());
    assert!(locator.get("logger").unwrap().is::<FileLogger>());
}

// ─────────────────────────────────────────────────────────────────────────────
// Store interaction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn the_first_search_path_wins() {
    let primary = tempfile::tempdir().unwrap();
    let fallback = tempfile::tempdir().unwrap();
    write_declaration(
        primary.path(),
        "mode",
        r#"{ "mode": { "name": "Mode", "params": ["live"] } }"#,
    );
    write_declaration(
        fallback.path(),
        "mode",
        r#"{ "mode": { "name": "Mode", "params": ["replay"] } }"#,
    );

    let locator = seeded_locator(RecipeStore::new([primary.path(), fallback.path()]));

    let mode = locator.get("mode").unwrap();
    assert_eq!(*mode.downcast::<Mode>().unwrap(), Mode::Live);
}

#[test]
fn has_reports_loadable_identifiers_without_constructing() {
    let dir = tempfile::tempdir().unwrap();
    write_declaration(
        dir.path(),
        "logger",
        r#"{ "logger": { "name": "FileLogger", "params": ["config"] } }"#,
    );

    let locator = seeded_locator(RecipeStore::with_path(dir.path()));

    assert!(locator.has("config"));
    assert!(locator.has("locator"));
    assert!(locator.has("logger"));
    assert!(!locator.has("nope"));
}

#[test]
fn missing_identifiers_report_not_found() {
    let locator = seeded_locator(RecipeStore::default());

    let err = locator.get("nope").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to locate an object for identifier 'nope'"
    );

    assert!(locator.find("nope").unwrap().is_none());
    assert!(locator.find("config").unwrap().is_some());
}
