//! depconstrain core - constraint model and shared facilities
//!
//! This crate provides the pieces every constraint reader builds on:
//! - `Constraint` / `ConstraintSet` models with validating builders
//! - Sort-order enforcement with a positional diff report
//! - Myers diff engine and unified-diff rendering
//! - Structured error facility (`ConstrainError`) and logging facility
//! - Loader configuration and the "apply to configuration" boundary

pub mod apply;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;

pub use depconstrain_core_types as core_types;

// Re-export commonly used types
pub use apply::{apply_to_all, ConstraintSink, RecordingSink};
pub use config::{ConfigError, LoaderConfig};
pub use errors::{ConstrainError, ConstrainErrorKind, ModelError, Result};
pub use model::{Constraint, ConstraintBuilder, ConstraintSet, ConstraintSetBuilder, SortPolicy};
