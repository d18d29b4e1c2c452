//! Lifecycle event macros
//!
//! Each boundary operation logs one `start` and then exactly one `end` or
//! `end_error`, all carrying the same `op`.

/// `start` event of `$op`, with optional extra fields
///
/// # Example
///
/// ```
/// # use depconstrain_core::log_op_start;
/// log_op_start!("load_constraints");
/// log_op_start!("load_constraints", dir = "gradle");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// `end` event of `$op`; `duration_ms` is required
///
/// # Example
///
/// ```
/// # use depconstrain_core::log_op_end;
/// log_op_end!("load_constraints", duration_ms = 42);
/// log_op_end!("load_constraints", duration_ms = 42, constraint_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// `end_error` event of `$op`, stamped with `err.kind` and `err.code`
///
/// `$err` must be a [`ConstrainError`](crate::errors::ConstrainError); it is
/// borrowed, not consumed.
///
/// # Example
///
/// ```
/// # use depconstrain_core::log_op_error;
/// use depconstrain_core::errors::{ConstrainError, ConstrainErrorKind};
/// let err = ConstrainError::new(ConstrainErrorKind::EmptyDocument);
/// log_op_error!("read_json", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let failure: &$crate::errors::ConstrainError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let failure: &$crate::errors::ConstrainError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
            $($field)*
        );
    }};
}
