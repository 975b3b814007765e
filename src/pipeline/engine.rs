/*!
 * Pipeline Execution Engine
 * Threads context through steps, merging patches and short-circuiting on the
 * first decision
 */

use super::step::PolicyStep;
use crate::core::{Context, Decision, EvalResult, PipelineError, PipelineResult};
use crate::diagnostics::PipelineObserver;

/// Run the steps in order against an initial context
///
/// Each step receives an owned clone of the accumulated context, so a step
/// can only influence later steps through the patch it returns. The first
/// decision terminates the walk; a pipeline whose steps all abstain resolves
/// to `Allow`. A step error aborts evaluation with no decision.
pub(crate) async fn execute<C: Context>(
    pipeline: &str,
    steps: &[PolicyStep<C>],
    initial: C,
    observer: &dyn PipelineObserver,
) -> EvalResult<PipelineResult<C>> {
    let mut accumulated = initial;

    for step in steps {
        observer.step_entered(pipeline, step.name());

        let snapshot = accumulated.clone();
        let result = step
            .invoke(snapshot)
            .await
            .map_err(|source| PipelineError::StepFailed {
                pipeline: pipeline.to_string(),
                step: step.name().to_string(),
                source,
            })?;

        // The patch lands before the decision is inspected: a
        // short-circuiting step's own enrichment is part of the final
        // context.
        if let Some(patch) = result.patch {
            observer.context_enriched(pipeline, step.name(), &patch);
            accumulated.merge(patch);
        }

        if let Some(decision) = result.decision {
            observer.decision_reached(pipeline, &decision);
            return Ok(PipelineResult {
                decision,
                context: accumulated,
            });
        }
    }

    let decision = Decision::Allow;
    observer.decision_reached(pipeline, &decision);
    Ok(PipelineResult {
        decision,
        context: accumulated,
    })
}
