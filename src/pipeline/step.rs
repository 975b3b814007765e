/*!
 * Policy Step
 * The functional capability every pipeline step implements
 */

use crate::core::{Context, StepResult};
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Future returned by a policy step
pub type StepFuture<C> = BoxFuture<'static, anyhow::Result<StepResult<C>>>;

/// A pure async gate check over a context snapshot
///
/// A step consumes an owned snapshot of the accumulated context and answers
/// with an optional decision and an optional patch. It never sees the
/// accumulator itself, so nothing it does to its snapshot can leak into
/// later steps; enrichment travels only through the returned patch.
///
/// Steps are value-like and cheaply cloneable; a step holds no per-call
/// state.
#[derive(Clone)]
pub struct PolicyStep<C: Context> {
    name: Arc<str>,
    run: Arc<dyn Fn(C) -> StepFuture<C> + Send + Sync>,
}

impl<C: Context> PolicyStep<C> {
    /// Build a step from an async function
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<StepResult<C>>> + Send + 'static,
    {
        Self {
            name: name.into().into(),
            run: Arc::new(move |ctx| Box::pin(f(ctx))),
        }
    }

    /// Build a step from a synchronous, infallible gate check
    ///
    /// Wraps the check in the async contract for uniformity; the built-in
    /// steps are all of this shape.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&C) -> StepResult<C> + Send + Sync + 'static,
    {
        Self::new(name, move |ctx: C| {
            let result = f(&ctx);
            async move { Ok(result) }
        })
    }

    /// Step identifier used in diagnostics and failure reports
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn invoke(&self, snapshot: C) -> StepFuture<C> {
        (self.run)(snapshot)
    }
}

impl<C: Context> fmt::Debug for PolicyStep<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyStep")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
