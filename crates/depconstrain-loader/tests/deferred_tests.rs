#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixture_dir;
use depconstrain_core::config::LoaderConfig;
use depconstrain_core::errors::ConstrainErrorKind;
use depconstrain_loader::DeferredConstraints;
use tempfile::TempDir;

#[tokio::test]
async fn test_spawned_loads_merge_in_order() {
    let xml = DeferredConstraints::spawn_load(fixture_dir("xml-valid"), LoaderConfig::strict());
    let json = DeferredConstraints::spawn_load(fixture_dir("json-valid"), LoaderConfig::default());

    let merged = xml.union(json).resolve().await.unwrap();

    let names: Vec<&str> = merged.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec!["jackson-databind", "log4j-core", "jackson-databind", "snakeyaml"]
    );
}

#[tokio::test]
async fn test_union_with_empty_directory() {
    let dir = TempDir::new().unwrap();
    let merged = DeferredConstraints::spawn_load(dir.path(), LoaderConfig::default())
        .union(DeferredConstraints::spawn_load(
            fixture_dir("json-valid"),
            LoaderConfig::default(),
        ))
        .resolve()
        .await
        .unwrap();

    assert_eq!(merged.len(), 2);
}

#[tokio::test]
async fn test_union_propagates_load_failure() {
    let good = DeferredConstraints::spawn_load(fixture_dir("xml-valid"), LoaderConfig::default());
    let bad = DeferredConstraints::spawn_load(fixture_dir("json-v2"), LoaderConfig::default());

    let err = good.union(bad).resolve().await.unwrap_err();
    assert_eq!(
        err.kinds(),
        vec![
            ConstrainErrorKind::LoadFailed,
            ConstrainErrorKind::UnsupportedVersion
        ]
    );
}

#[tokio::test]
async fn test_failure_on_left_side_propagates() {
    let bad = DeferredConstraints::spawn_load(fixture_dir("xml-unsorted"), LoaderConfig::strict());
    let good = DeferredConstraints::spawn_load(fixture_dir("json-valid"), LoaderConfig::default());

    let err = bad.union(good).resolve().await.unwrap_err();
    assert_eq!(err.kind(), ConstrainErrorKind::LoadFailed);
    assert_eq!(
        err.innermost().kind(),
        ConstrainErrorKind::SortOrderViolation
    );
}
