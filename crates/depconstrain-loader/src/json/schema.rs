//! Embedded dependency-constraints schema
//!
//! Compiled once on first use and shared for the life of the process.

use crate::errors::{internal, Result};
use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::sync::OnceLock;

/// Raw text of the schema resource
pub const SCHEMA_SOURCE: &str = include_str!("../../schema/dependency-constraints-schema.json");

static VALIDATOR: OnceLock<std::result::Result<Validator, String>> = OnceLock::new();

fn compile() -> std::result::Result<Validator, String> {
    let schema: Value = serde_json::from_str(SCHEMA_SOURCE)
        .map_err(|e| format!("schema resource is not JSON: {}", e))?;
    jsonschema::options()
        .with_draft(Draft::Draft201909)
        .build(&schema)
        .map_err(|e| format!("schema resource does not compile: {}", e))
}

/// The compiled validator
///
/// # Errors
///
/// `Internal` if the embedded resource cannot be compiled.
pub fn validator() -> Result<&'static Validator> {
    VALIDATOR
        .get_or_init(compile)
        .as_ref()
        .map_err(|reason| internal("load_schema", reason.clone()))
}

/// Every violation of `document` against the schema, in validator order
///
/// # Errors
///
/// As for [`validator`].
pub fn violations(document: &Value) -> Result<Vec<String>> {
    Ok(validator()?
        .iter_errors(document)
        .map(|error| error.to_string())
        .collect())
}
