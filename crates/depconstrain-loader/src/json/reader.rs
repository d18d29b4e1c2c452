//! dependency-constraints.json reader
//!
//! Pipeline, each stage short-circuiting the rest:
//! 1. read the whole input as text and parse it into a raw tree
//! 2. validate the raw tree against the embedded schema, collecting every violation
//! 3. map it to the typed document and check the format version
//! 4. build the constraint set, order preserved
//! 5. re-render the raw tree canonically and diff it against the input lines

use crate::errors::{
    empty_document, formatting_violation, io_error, malformed, schema_violation,
    unsupported_version, Result,
};
use crate::json::canonical::{canonical_file_content, canonical_lines};
use crate::json::document::ConstraintsDocument;
use crate::json::schema;
use depconstrain_core::diff::{diff_eq, render_unified_diff};
use depconstrain_core::model::{
    constraint_from_fields, with_advisory_list, ConstraintSet, SortPolicy,
};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

const OP: &str = "read_json";

/// Read a constraint set from a schema-tree encoded input
///
/// `label` names the file in the formatting patch (`--- label` / `+++ label`).
/// `input` is consumed and dropped before any validation runs.
///
/// # Errors
///
/// `Io`, `MalformedDocument`, `EmptyDocument`, `SchemaViolation`,
/// `UnsupportedVersion`, `EmptyField` or `FormattingViolation`.
pub fn read_from_json<R: Read>(input: R, label: &str) -> Result<ConstraintSet> {
    let text = read_text(input)?;
    read_from_json_str(&text, label)
}

/// Read a constraint set from an in-memory document
///
/// # Errors
///
/// As for [`read_from_json`].
pub fn read_from_json_str(text: &str, label: &str) -> Result<ConstraintSet> {
    let tree = parse_tree(text)?;
    let input_lines: Vec<&str> = text.lines().collect();

    let violations = schema::violations(&tree)?;
    if !violations.is_empty() {
        tracing::debug!(violations = violations.len(), "Schema validation failed");
        return Err(schema_violation(&violations));
    }

    let document = ConstraintsDocument::deserialize(&tree)
        .map_err(|e| malformed(OP, e.to_string()).with_source(e))?;
    if !document.is_supported_version() {
        return Err(unsupported_version(document.version.as_deref()));
    }

    let set = build_set(&document)?;
    check_formatting(&tree, &input_lines, label)?;

    tracing::debug!(
        constraint_count = set.len(),
        lines = input_lines.len(),
        "Parsed constraints document"
    );
    Ok(set)
}

/// Read a schema-tree document and return its canonical file content
///
/// Only parses; the document is not validated against the schema.
///
/// # Errors
///
/// `Io`, `MalformedDocument` or `EmptyDocument`.
pub fn canonicalize<R: Read>(input: R) -> Result<String> {
    let text = read_text(input)?;
    canonical_file_content(&parse_tree(&text)?)
}

/// Compare `input_lines` with the canonical rendering of `tree`
///
/// # Errors
///
/// `FormattingViolation` carrying a zero-context unified diff from the input
/// to the canonical form.
pub fn check_formatting(tree: &Value, input_lines: &[&str], label: &str) -> Result<()> {
    let canonical = canonical_lines(tree)?;
    let canonical: Vec<&str> = canonical.iter().map(String::as_str).collect();

    let script = diff_eq(input_lines, &canonical);
    if script.is_empty() {
        return Ok(());
    }

    tracing::debug!(edits = script.len(), "Input differs from canonical form");
    let patch = render_unified_diff(label, label, input_lines, &canonical, &script, 0);
    Err(formatting_violation(&patch))
}

fn read_text<R: Read>(mut input: R) -> Result<String> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| io_error(OP, e))?;
    String::from_utf8(bytes).map_err(|e| malformed(OP, e.to_string()).with_source(e))
}

fn parse_tree(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(empty_document(OP));
    }
    serde_json::from_str(text).map_err(|e| malformed(OP, e.to_string()).with_source(e))
}

fn build_set(document: &ConstraintsDocument) -> Result<ConstraintSet> {
    let mut builder = ConstraintSet::builder();
    for record in &document.dependency_constraints {
        let reason = with_advisory_list(
            &record.because.advisory_identifiers,
            &record.because.reason,
        );
        builder.add(constraint_from_fields(
            &record.group,
            &record.name,
            &record.suggested_version,
            &record.rejected_versions,
            &reason,
        )?);
    }
    Ok(builder.build(SortPolicy::Preserve)?)
}
