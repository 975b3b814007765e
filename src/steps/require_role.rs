/*!
 * Require Role
 * Denies contexts whose user lacks an exact role
 */

use crate::core::{Context, HasRole, HasUser, StepResult};
use crate::pipeline::PolicyStep;

/// Gate that denies unless the user carries exactly the given role
///
/// A missing user, a user without a role, and a mismatched role all deny
/// with reason `insufficient_role`. Never patches.
pub fn require_role<C>(role: impl Into<String>) -> PolicyStep<C>
where
    C: Context + HasUser,
    C::User: HasRole,
{
    let role = role.into();
    PolicyStep::from_fn("require_role", move |ctx: &C| match ctx.user() {
        Some(user) if user.role() == Some(role.as_str()) => StepResult::next(),
        _ => StepResult::deny("insufficient_role"),
    })
}
