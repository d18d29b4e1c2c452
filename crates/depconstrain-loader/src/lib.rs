//! depconstrain loader - reading constraint files from disk
//!
//! Two encodings are supported:
//! - `constraints.xml`, a tag stream read through a nesting state machine
//! - `dependency-constraints.json`, a schema-validated tree that must also be
//!   canonically formatted
//!
//! [`load_constraints`] is the entry point; [`DeferredConstraints`] runs it
//! on Tokio's blocking pool.

pub mod deferred;
pub mod errors;
pub mod json;
pub mod loader;
pub mod xml;

pub use deferred::DeferredConstraints;
pub use json::{canonicalize, read_from_json, read_from_json_str};
pub use loader::{
    load_constraints, load_constraints_from_file, locate_constraints_file, ConstraintsFile,
    Encoding,
};
pub use xml::{read_from_xml, read_from_xml_str};
