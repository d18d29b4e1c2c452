//! Structured logging for depconstrain
//!
//! - [`init`] installs the process-wide subscriber for a [`Profile`]
//! - `log_op_start!` / `log_op_end!` / `log_op_error!` stamp lifecycle events
//!   of boundary operations such as `load_constraints`
//! - [`test_capture`] records events in memory for assertions
//!
//! ```rust
//! use depconstrain_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
