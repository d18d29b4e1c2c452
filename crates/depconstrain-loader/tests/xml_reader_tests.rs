#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fixture_file, DropCounter, FailingRead};
use depconstrain_core::errors::{ConstrainError, ConstrainErrorKind};
use depconstrain_core::model::SortPolicy;
use depconstrain_loader::xml::{read_from_xml, read_from_xml_str};
use std::fs::File;
use std::io::Cursor;

#[test]
fn test_read_fixture_in_strict_order() {
    let input = File::open(fixture_file("xml-valid", "constraints.xml")).unwrap();
    let set = read_from_xml(input, SortPolicy::Strict).unwrap();

    assert_eq!(set.len(), 2);
    let jackson = &set.constraints()[0];
    assert_eq!(
        jackson.coordinate(),
        "com.fasterxml.jackson.core:jackson-databind:2.12.7.1"
    );
    assert_eq!(jackson.rejected_versions(), &["[2.0,2.12.7.1)"]);
    assert_eq!(
        jackson.reason(),
        "CVE-2022-42003: Deep wrapper array nesting & resource exhaustion"
    );

    let log4j = &set.constraints()[1];
    assert_eq!(log4j.coordinate(), "org.apache.logging.log4j:log4j-core:2.17.1");
    assert_eq!(
        log4j.rejected_versions(),
        &["[2.0-beta9,2.3.2)", "[2.4,2.12.4)", "[2.13.0,2.17.1)"]
    );
    assert_eq!(log4j.reason(), "Log4Shell <JNDI> lookups and follow-ups");
}

#[test]
fn test_unsorted_fixture_rejected_when_strict() {
    let input = File::open(fixture_file("xml-unsorted", "constraints.xml")).unwrap();
    let err = read_from_xml(input, SortPolicy::Strict).unwrap_err();

    assert_eq!(err.kind(), ConstrainErrorKind::SortOrderViolation);
    assert!(err
        .message()
        .starts_with("Constraints were not sorted by group:name:suggestedVersion"));
    assert!(
        err.message().contains("\"group\":\"org.yaml\"")
            || err.message().contains("\"group\":\"commons-io\"")
    );
}

#[test]
fn test_unsorted_fixture_kept_in_document_order_when_preserving() {
    let input = File::open(fixture_file("xml-unsorted", "constraints.xml")).unwrap();
    let set = read_from_xml(input, SortPolicy::Preserve).unwrap();

    let names: Vec<&str> = set.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["snakeyaml", "commons-io"]);
}

#[test]
fn test_missing_because_names_the_field() {
    let input = File::open(fixture_file("xml-missing-because", "constraints.xml")).unwrap();
    let err = read_from_xml(input, SortPolicy::Preserve).unwrap_err();

    assert_eq!(err.kind(), ConstrainErrorKind::MissingField);
    assert_eq!(
        err.message(),
        "Invalid dependency constraints file: <because> tag must appear under the <constraint> tag"
    );
}

fn read_single_constraint(fields: &str) -> ConstrainError {
    let xml = format!("<constraints><constraint>{}</constraint></constraints>", fields);
    read_from_xml(Cursor::new(xml.into_bytes()), SortPolicy::Preserve).unwrap_err()
}

#[test]
fn test_missing_group_names_the_field() {
    let err = read_single_constraint(
        "<name>n</name><suggested-version>1</suggested-version><because>r</because>",
    );

    assert_eq!(err.kind(), ConstrainErrorKind::MissingField);
    assert_eq!(
        err.message(),
        "Invalid dependency constraints file: <group> tag must appear under the <constraint> tag"
    );
}

#[test]
fn test_missing_suggested_version_names_the_field() {
    let err = read_single_constraint(
        "<group>g</group><name>n</name>\
         <rejected><reject>0.9</reject></rejected><because>r</because>",
    );

    assert_eq!(err.kind(), ConstrainErrorKind::MissingField);
    assert_eq!(
        err.message(),
        "Invalid dependency constraints file: <suggested-version> tag must appear under the <constraint> tag"
    );
}

#[test]
fn test_reject_outside_rejected() {
    let input = File::open(fixture_file("xml-reject-outside", "constraints.xml")).unwrap();
    let err = read_from_xml(input, SortPolicy::Preserve).unwrap_err();

    assert_eq!(err.kind(), ConstrainErrorKind::NestingViolation);
    assert_eq!(
        err.message(),
        "Invalid dependency constraints file: <reject> must be found under the <rejected> tag"
    );
}

#[test]
fn test_text_split_across_entities_and_cdata() {
    let xml = "<constraints><constraint>\
               <group>org.<![CDATA[exa]]>mple</group>\
               <name>a&amp;b</name>\
               <suggested-version>1.0</suggested-version>\
               <because>one<!-- note -->two</because>\
               </constraint></constraints>";

    let set = read_from_xml_str(xml, SortPolicy::Strict).unwrap();
    let constraint = &set.constraints()[0];
    assert_eq!(constraint.group(), "org.example");
    assert_eq!(constraint.name(), "a&b");
    assert_eq!(constraint.reason(), "onetwo");
}

#[test]
fn test_doctype_rejected() {
    let xml = "<!DOCTYPE constraints [<!ENTITY x \"y\">]><constraints/>";
    let err = read_from_xml_str(xml, SortPolicy::Preserve).unwrap_err();
    assert_eq!(err.kind(), ConstrainErrorKind::MalformedDocument);
}

#[test]
fn test_empty_constraints_region() {
    let set = read_from_xml_str("<constraints></constraints>", SortPolicy::Strict).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_input_dropped_once_on_success() {
    let (input, drops) = DropCounter::new(Cursor::new(b"<constraints/>".to_vec()));
    read_from_xml(input, SortPolicy::Preserve).unwrap();
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_input_dropped_once_on_validation_failure() {
    let xml = b"<constraints><group>g</group></constraints>".to_vec();
    let (input, drops) = DropCounter::new(Cursor::new(xml));
    let err = read_from_xml(input, SortPolicy::Preserve).unwrap_err();

    assert_eq!(err.kind(), ConstrainErrorKind::NestingViolation);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_input_dropped_once_on_read_failure() {
    let (input, drops) = DropCounter::new(FailingRead);
    let err = read_from_xml(input, SortPolicy::Preserve).unwrap_err();

    assert_eq!(err.kind(), ConstrainErrorKind::Io);
    assert_eq!(drops.get(), 1);
}
