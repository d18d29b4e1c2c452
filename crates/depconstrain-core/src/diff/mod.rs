//! Generic sequence diff engine.
//!
//! Computes the minimal edit script between two ordered sequences and
//! renders scripts over text lines as unified diffs. Used both to report
//! unsorted constraint sets and to report formatting drift as a patch.
//!
//! ## Entry point
//!
//! ```
//! use depconstrain_core::diff::{diff_eq, render_unified_diff};
//!
//! let old = vec!["a", "b", "c"];
//! let new = vec!["a", "c"];
//! let script = diff_eq(&old, &new);
//! let patch = render_unified_diff("file", "file", &old, &new, &script, 0);
//! assert_eq!(patch[3], "-b");
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical edit scripts.
//! - **Runs**: each block of adjacent changes is one deletion run followed
//!   by one insertion run.
//! - **Memory**: linear in the combined input length, whatever the edit
//!   distance.
//! - **Purity**: no I/O, no shared state.

pub mod engine;
pub mod unified;

pub use engine::{diff, diff_eq, Edit, EditKind, EditScript};
pub use unified::render_unified_diff;
