/*!
 * Pipeline Module
 * Named pipeline wrapper over the execution engine
 */

mod engine;
mod step;

pub use step::{PolicyStep, StepFuture};

use crate::core::{Context, EvalResult, PipelineResult};
use crate::diagnostics::{NoopObserver, PipelineObserver, TracingObserver};
use std::fmt;
use std::sync::Arc;

/// Construction options
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Emit step-by-step traces through the `tracing` crate
    pub debug: bool,
}

/// A named, ordered sequence of policy steps
///
/// Immutable after construction and free of per-call state: one instance can
/// serve any number of concurrent `evaluate` calls, each with its own
/// accumulation cycle.
pub struct Pipeline<C: Context> {
    name: Arc<str>,
    steps: Arc<[PolicyStep<C>]>,
    observer: Arc<dyn PipelineObserver>,
}

impl<C: Context> Pipeline<C> {
    pub fn new(
        name: impl Into<String>,
        steps: Vec<PolicyStep<C>>,
        options: PipelineOptions,
    ) -> Self {
        let observer: Arc<dyn PipelineObserver> = if options.debug {
            Arc::new(TracingObserver)
        } else {
            Arc::new(NoopObserver)
        };

        Self {
            name: name.into().into(),
            steps: steps.into(),
            observer,
        }
    }

    /// Replace the diagnostics observer
    ///
    /// Observers are read-only; swapping one never changes a result.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Diagnostic identity of this pipeline
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Evaluate the pipeline against an initial context
    ///
    /// Steps run strictly in order; the first decision wins and later steps
    /// never run. With zero steps, or when every step abstains, the result
    /// is `Allow` with the accumulated context - an authorization pipeline
    /// that never denies is fully permissive.
    pub async fn evaluate(&self, context: C) -> EvalResult<PipelineResult<C>> {
        engine::execute(&self.name, &self.steps, context, self.observer.as_ref()).await
    }
}

impl<C: Context> Clone for Pipeline<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            steps: self.steps.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl<C: Context> fmt::Debug for Pipeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

/// Bind a name, a step list, and options into an evaluatable pipeline
pub fn create_pipeline<C: Context>(
    name: impl Into<String>,
    steps: Vec<PolicyStep<C>>,
    options: PipelineOptions,
) -> Pipeline<C> {
    Pipeline::new(name, steps, options)
}
