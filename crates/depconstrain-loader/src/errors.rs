//! Error handling for depconstrain-loader
//!
//! Wraps depconstrain-core ConstrainError with reader-specific helpers

use depconstrain_core::errors::{ConstrainError, ConstrainErrorKind};
use std::path::Path;

/// Result type alias using ConstrainError
pub type Result<T> = std::result::Result<T, ConstrainError>;

const INVALID_FILE: &str = "Invalid dependency constraints file";

/// Create a nesting violation: `region` opened outside of `parent`
pub fn nesting_violation(region: &str, parent: &str) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::NestingViolation)
        .with_op("read_xml")
        .with_message(format!(
            "{}: <{}> must be found under the <{}> tag",
            INVALID_FILE, region, parent
        ))
}

/// Create a nesting violation for a region opened inside itself
pub fn nested_region(region: &str) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::NestingViolation)
        .with_op("read_xml")
        .with_message(format!(
            "{}: <{}> must not be nested under another <{}> tag",
            INVALID_FILE, region, region
        ))
}

/// Create a duplicate region error
pub fn duplicate_region(region: &str, parent: &str) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::DuplicateRegion)
        .with_op("read_xml")
        .with_message(format!(
            "{}: <{}> must appear at most once under the <{}> tag",
            INVALID_FILE, region, parent
        ))
}

/// Create a malformed document error
pub fn malformed(op: &str, reason: impl Into<String>) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::MalformedDocument)
        .with_op(op.to_string())
        .with_message(format!("Unable to read dependency constraints: {}", reason.into()))
}

/// Create an empty document error
pub fn empty_document(op: &str) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::EmptyDocument)
        .with_op(op.to_string())
        .with_message("File is empty")
}

/// Create a schema violation error listing every violation
pub fn schema_violation(violations: &[String]) -> ConstrainError {
    let listed: Vec<String> = violations.iter().map(|v| format!("  - {}", v)).collect();
    ConstrainError::new(ConstrainErrorKind::SchemaViolation)
        .with_op("read_json")
        .with_message(format!(
            "Dependency constraints contains schema violations:\n{}",
            listed.join("\n")
        ))
}

/// Create an unsupported version error
pub fn unsupported_version(version: Option<&str>) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::UnsupportedVersion)
        .with_op("read_json")
        .with_message(format!(
            "Unsupported dependency constraints version: {}",
            version.unwrap_or("<absent>")
        ))
}

/// Create a formatting violation carrying the fixing patch
pub fn formatting_violation(patch: &[String]) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::FormattingViolation)
        .with_op("read_json")
        .with_message(format!(
            "The dependency constraints are not formatted correctly. \
             Please apply this patch to fix the formatting:\n{}",
            patch.join("\n")
        ))
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
        .with_source(err)
}

/// Wrap a reader failure with the identity of the file that caused it
pub fn load_failed(path: &Path, cause: ConstrainError) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::LoadFailed)
        .with_op("load_constraints")
        .with_path(path)
        .with_message(format!("Failed to load constraints from {}", path.display()))
        .with_source(cause)
}

/// Create an ambiguous source error for a directory holding both encodings
pub fn ambiguous_source(dir: &Path, xml: &Path, json: &Path) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::AmbiguousSource)
        .with_op("load_constraints")
        .with_path(dir)
        .with_message(format!(
            "Found both {} and {}; keep exactly one constraints file",
            xml.display(),
            json.display()
        ))
}

/// Create an error for a file whose extension names no known encoding
pub fn unknown_encoding(path: &Path) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::Config)
        .with_op("load_constraints")
        .with_path(path)
        .with_message(format!(
            "Cannot tell the encoding of {}: expected a .xml or .json file",
            path.display()
        ))
}

/// Create an internal error
pub fn internal(op: &str, message: impl Into<String>) -> ConstrainError {
    ConstrainError::new(ConstrainErrorKind::Internal)
        .with_op(op.to_string())
        .with_message(message)
}
