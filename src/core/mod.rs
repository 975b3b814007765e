/*!
 * Core Module
 * Decision model, context traits, and error types
 */

mod context;
mod errors;
mod types;

pub use context::{Context, HasRole, HasUser};
pub use errors::{EvalResult, PipelineError};
pub use types::{Decision, PipelineResult, StepResult};
