/*!
 * Error Types
 * Pipeline evaluation errors with thiserror and miette support
 */

use miette::Diagnostic;
use thiserror::Error;

/// Result type for pipeline evaluation
pub type EvalResult<T> = Result<T, PipelineError>;

/// Errors raised while evaluating a pipeline
#[derive(Error, Debug, Diagnostic)]
pub enum PipelineError {
    #[error("step '{step}' failed in pipeline '{pipeline}'")]
    #[diagnostic(
        code(pipeline::step_failed),
        help("The failing step aborted evaluation with no decision. The engine never substitutes allow or deny for a failure; wrap resilience (retries, timeouts) inside the step itself.")
    )]
    StepFailed {
        pipeline: String,
        step: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// Step identifier the failure originated from
    pub fn step(&self) -> &str {
        match self {
            PipelineError::StepFailed { step, .. } => step,
        }
    }

    /// Pipeline the failure occurred in
    pub fn pipeline(&self) -> &str {
        match self {
            PipelineError::StepFailed { pipeline, .. } => pipeline,
        }
    }
}
