//! Boundary where a loaded constraint set is handed to build configurations.

use crate::errors::Result;
use crate::model::{Constraint, ConstraintSet};

/// A build configuration that accepts dependency constraints.
#[allow(clippy::result_large_err)]
pub trait ConstraintSink {
    /// Add `constraints` to this configuration, in order.
    ///
    /// # Errors
    ///
    /// Implementation-defined; `apply_to_all` stops at the first failure.
    fn add_constraints(&mut self, constraints: &[Constraint]) -> Result<()>;
}

/// In-memory sink that records every constraint it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    received: Vec<Constraint>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> &[Constraint] {
        &self.received
    }
}

impl ConstraintSink for RecordingSink {
    fn add_constraints(&mut self, constraints: &[Constraint]) -> Result<()> {
        self.received.extend_from_slice(constraints);
        Ok(())
    }
}

/// Hand the same constraint set to every sink
///
/// # Errors
///
/// The first error returned by a sink; later sinks are not visited.
#[allow(clippy::result_large_err)]
pub fn apply_to_all<'a, I, S>(set: &ConstraintSet, sinks: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a mut S>,
    S: ConstraintSink + ?Sized + 'a,
{
    let mut applied = 0;
    for sink in sinks {
        sink.add_constraints(set.constraints())?;
        applied += 1;
    }
    Ok(applied)
}
