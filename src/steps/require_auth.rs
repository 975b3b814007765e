/*!
 * Require Auth
 * Redirects unauthenticated contexts
 */

use crate::core::{Context, HasUser, StepResult};
use crate::pipeline::PolicyStep;

/// Gate that redirects when no user is attached to the context
///
/// Abstains when a user is present. Never patches.
pub fn require_auth<C>(redirect_to: impl Into<String>) -> PolicyStep<C>
where
    C: Context + HasUser,
{
    let redirect_to = redirect_to.into();
    PolicyStep::from_fn("require_auth", move |ctx: &C| {
        if ctx.user().is_none() {
            StepResult::redirect(redirect_to.clone())
        } else {
            StepResult::next()
        }
    })
}
