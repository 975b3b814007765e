/*!
 * Built-in Steps
 * Pure gate checks exercising the policy step contract
 *
 * Built-ins never emit a context patch; enrichment is the business of custom
 * steps built with `PolicyStep::new`.
 */

mod predicate;
mod require_auth;
mod require_role;

pub use predicate::{allow_if, block_if};
pub use require_auth::require_auth;
pub use require_role::require_role;
