#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixture_dir;
use depconstrain_core::config::LoaderConfig;
use depconstrain_core::core_types::schema::EVENT_START;
use depconstrain_core::errors::ConstrainErrorKind;
use depconstrain_core::logging_facility::test_capture::init_test_capture;
use depconstrain_core::model::SortPolicy;
use depconstrain_core::{apply_to_all, ConstraintSink, RecordingSink};
use depconstrain_loader::{load_constraints, load_constraints_from_file, locate_constraints_file};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_empty_directory_yields_empty_set() {
    let dir = TempDir::new().unwrap();
    let set = load_constraints(dir.path(), &LoaderConfig::default()).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_loads_xml_directory() {
    let set = load_constraints(&fixture_dir("xml-valid"), &LoaderConfig::strict()).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_loads_json_directory() {
    let set = load_constraints(&fixture_dir("json-valid"), &LoaderConfig::default()).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_strict_policy_applies_to_xml() {
    let dir = fixture_dir("xml-unsorted");

    assert!(load_constraints(&dir, &LoaderConfig::default()).is_ok());

    let err = load_constraints(&dir, &LoaderConfig::strict()).unwrap_err();
    assert_eq!(
        err.kinds(),
        vec![
            ConstrainErrorKind::LoadFailed,
            ConstrainErrorKind::SortOrderViolation
        ]
    );
}

#[test]
fn test_both_files_present_is_ambiguous() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("constraints.xml"), "<constraints/>").unwrap();
    fs::write(
        dir.path().join("dependency-constraints.json"),
        "{\n  \"version\": \"1.0.0\",\n  \"dependencyConstraints\": []\n}\n",
    )
    .unwrap();

    let err = load_constraints(dir.path(), &LoaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ConstrainErrorKind::AmbiguousSource);
    assert_eq!(err.path(), Some(dir.path()));

    let located = locate_constraints_file(dir.path(), &LoaderConfig::default()).unwrap_err();
    assert_eq!(located.kind(), ConstrainErrorKind::AmbiguousSource);
}

#[test]
fn test_failure_wrapped_with_file_path_and_cause() {
    let dir = fixture_dir("json-v2");
    let err = load_constraints(&dir, &LoaderConfig::default()).unwrap_err();

    let file = dir.join("dependency-constraints.json");
    assert_eq!(err.kind(), ConstrainErrorKind::LoadFailed);
    assert_eq!(err.path(), Some(file.as_path()));
    assert_eq!(
        err.message(),
        format!("Failed to load constraints from {}", file.display())
    );

    let cause = err.source_error().expect("reader error kept as cause");
    assert_eq!(cause.kind(), ConstrainErrorKind::UnsupportedVersion);
    assert_eq!(
        cause.message(),
        "Unsupported dependency constraints version: 2.0.0"
    );
    assert!(err.render_chain().contains("\nCaused by: "));
}

#[test]
fn test_wrapped_exactly_once() {
    let err = load_constraints(&fixture_dir("xml-missing-because"), &LoaderConfig::default())
        .unwrap_err();
    assert_eq!(
        err.kinds(),
        vec![ConstrainErrorKind::LoadFailed, ConstrainErrorKind::MissingField]
    );
}

#[test]
fn test_load_single_file_by_extension() {
    let path = fixture_dir("json-valid").join("dependency-constraints.json");
    let set = load_constraints_from_file(&path, &LoaderConfig::default()).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_custom_file_names_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("deps.xml"),
        "<constraints><constraint><group>g</group><name>n</name>\
         <suggested-version>1</suggested-version><because>r</because>\
         </constraint></constraints>",
    )
    .unwrap();

    let config = LoaderConfig::from_toml_str("xml-file-name = \"deps.xml\"\n").unwrap();
    let set = load_constraints(dir.path(), &config).unwrap();
    assert_eq!(set.constraints()[0].coordinate(), "g:n:1");
}

#[test]
fn test_loaded_set_applied_to_every_sink() {
    let set = load_constraints(&fixture_dir("xml-valid"), &LoaderConfig::default()).unwrap();

    let mut compile = RecordingSink::new();
    let mut runtime = RecordingSink::new();
    let sinks: Vec<&mut dyn ConstraintSink> = vec![&mut compile, &mut runtime];
    let applied = apply_to_all(&set, sinks).unwrap();

    assert_eq!(applied, 2);
    assert_eq!(compile.received(), set.constraints());
    assert_eq!(runtime.received(), set.constraints());
}

#[test]
fn test_load_logs_end_with_constraint_count() {
    let capture = init_test_capture();
    let dir = fixture_dir("xml-valid");
    let dir_field = dir.display().to_string();

    load_constraints(&dir, &LoaderConfig::default()).unwrap();

    let starts = capture.count_events(|e| {
        e.is("load_constraints", EVENT_START) && e.field("dir") == Some(dir_field.as_str())
    });
    assert!(starts >= 1, "start event carries the directory");

    assert!(capture
        .ends_of("load_constraints")
        .iter()
        .any(|e| e.constraint_count() == Some(2)));
}

#[test]
fn test_failed_load_logs_error_kind() {
    let capture = init_test_capture();
    let path = fixture_dir("json-schema-errors").join("dependency-constraints.json");

    let err = load_constraints_from_file(&path, &LoaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ConstrainErrorKind::LoadFailed);

    assert!(capture
        .errors_of("load_constraints_file")
        .iter()
        .any(|e| {
            e.err_code() == Some("ERR_LOAD_FAILED") && e.field("err.kind") == Some("LoadFailed")
        }));
}

#[test]
fn test_strict_config_helper() {
    assert_eq!(LoaderConfig::strict().sort_policy, SortPolicy::Strict);
}
