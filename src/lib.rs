/*!
 * Railguard
 * Embeddable authorization decision pipeline
 *
 * Runs a named, ordered sequence of policy steps over a caller-supplied
 * context and produces exactly one outcome - allow, deny (with optional
 * reason), or redirect (to a target) - together with a possibly-enriched
 * copy of the context. The engine fetches nothing and persists nothing; it
 * is a pure reducer over a context value and a list of policy functions,
 * with optional diagnostic tracing as the only side channel.
 *
 * ## Usage
 * ```ignore
 * use railguard::{create_pipeline, require_auth, require_role, PipelineOptions};
 *
 * let pipeline = create_pipeline(
 *     "admin-area",
 *     vec![require_auth("/login"), require_role("admin")],
 *     PipelineOptions::default(),
 * );
 *
 * let result = pipeline.evaluate(ctx).await?;
 * if result.decision.is_allow() {
 *     // proceed
 * }
 * ```
 */

pub mod core;
pub mod diagnostics;
pub mod pipeline;
pub mod steps;

// Re-exports
pub use crate::core::{
    Context, Decision, EvalResult, HasRole, HasUser, PipelineError, PipelineResult, StepResult,
};
pub use crate::diagnostics::{init_tracing, NoopObserver, PipelineObserver, TracingObserver};
pub use crate::pipeline::{create_pipeline, Pipeline, PipelineOptions, PolicyStep, StepFuture};
pub use crate::steps::{allow_if, block_if, require_auth, require_role};
