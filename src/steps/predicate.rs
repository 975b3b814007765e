/*!
 * Predicate Gates
 * Deny-on-predicate steps over arbitrary context checks
 */

use crate::core::{Context, StepResult};
use crate::pipeline::PolicyStep;

/// Gate that denies (without a reason) when the predicate is false
pub fn allow_if<C, P>(predicate: P) -> PolicyStep<C>
where
    C: Context,
    P: Fn(&C) -> bool + Send + Sync + 'static,
{
    PolicyStep::from_fn("allow_if", move |ctx: &C| {
        if predicate(ctx) {
            StepResult::next()
        } else {
            StepResult::deny_unspecified()
        }
    })
}

/// Gate that denies (without a reason) when the predicate is true
pub fn block_if<C, P>(predicate: P) -> PolicyStep<C>
where
    C: Context,
    P: Fn(&C) -> bool + Send + Sync + 'static,
{
    PolicyStep::from_fn("block_if", move |ctx: &C| {
        if predicate(ctx) {
            StepResult::deny_unspecified()
        } else {
            StepResult::next()
        }
    })
}
