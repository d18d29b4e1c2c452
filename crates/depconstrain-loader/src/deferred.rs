//! Deferred (asynchronous) constraint loading and merging
//!
//! Loading itself is synchronous; [`DeferredConstraints::spawn_load`] moves
//! it onto Tokio's blocking pool so callers can start several loads and
//! combine them with [`DeferredConstraints::union`].

use crate::loader::load_constraints;
use depconstrain_core::config::LoaderConfig;
use depconstrain_core::errors::{ConstrainError, ConstrainErrorKind, Result};
use depconstrain_core::model::ConstraintSet;
use futures::future::{self, BoxFuture, FutureExt, TryFutureExt};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;

/// A constraint set that will be available later
pub struct DeferredConstraints {
    inner: BoxFuture<'static, Result<ConstraintSet>>,
}

impl DeferredConstraints {
    /// Wrap any future producing a constraint set
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<ConstraintSet>> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// An already loaded set
    pub fn ready(set: ConstraintSet) -> Self {
        Self::from_future(future::ready(Ok(set)))
    }

    /// An already failed load
    pub fn failed(err: ConstrainError) -> Self {
        Self::from_future(future::ready(Err(err)))
    }

    /// Load the constraints of `dir` on the blocking pool
    ///
    /// The load is scheduled when the returned value is first polled, which
    /// must happen inside a Tokio runtime.
    pub fn spawn_load(dir: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        let dir = dir.into();
        Self::from_future(async move {
            tokio::task::spawn_blocking(move || load_constraints(&dir, &config))
                .await
                .map_err(|join_error| {
                    ConstrainError::new(ConstrainErrorKind::Internal)
                        .with_op("spawn_load")
                        .with_message("constraint loading task did not complete")
                        .with_source(join_error)
                })?
        })
    }

    /// Both sets merged, `self` first
    ///
    /// Both sides are driven concurrently. If either fails the merged value
    /// fails with that error, cause chain intact.
    pub fn union(self, other: DeferredConstraints) -> Self {
        Self::from_future(
            future::try_join(self.inner, other.inner).map_ok(|(left, right)| left.union(&right)),
        )
    }

    /// Wait for the set
    ///
    /// # Errors
    ///
    /// Whatever error the underlying load produced.
    pub async fn resolve(self) -> Result<ConstraintSet> {
        self.inner.await
    }
}

impl fmt::Debug for DeferredConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredConstraints").finish_non_exhaustive()
    }
}
