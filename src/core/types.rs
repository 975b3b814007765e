/*!
 * Decision Model
 * Tagged outcome type and the per-step / per-evaluation result shapes
 */

use super::context::Context;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an authorization evaluation
///
/// Closed set: consumers must match exhaustively. Exactly one decision is
/// produced per evaluation, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Decision {
    /// Access is granted
    Allow,
    /// Access is refused, optionally with a machine-readable reason
    Deny {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Caller should navigate elsewhere instead of proceeding
    Redirect { to: String },
}

impl Decision {
    /// Denial with a reason
    pub fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny {
            reason: Some(reason.into()),
        }
    }

    /// Denial without a stated reason
    pub fn deny_unspecified() -> Self {
        Decision::Deny { reason: None }
    }

    /// Redirect to a target
    pub fn redirect(to: impl Into<String>) -> Self {
        Decision::Redirect { to: to.into() }
    }

    /// Check if access was granted
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// What a single policy step had to say
///
/// Both fields absent means "no opinion, continue". A patch is merged into
/// the accumulated context whether or not the same result also carries a
/// decision.
pub struct StepResult<C: Context> {
    /// Decision, if the step reached one; terminates the pipeline
    pub decision: Option<Decision>,
    /// Sparse context update; keys overwrite on merge
    pub patch: Option<C::Patch>,
}

impl<C: Context> StepResult<C> {
    /// No opinion; the pipeline moves on to the next step
    pub fn next() -> Self {
        Self {
            decision: None,
            patch: None,
        }
    }

    /// Terminate with a decision
    pub fn decide(decision: Decision) -> Self {
        Self {
            decision: Some(decision),
            patch: None,
        }
    }

    /// Terminate with `Allow`
    pub fn allow() -> Self {
        Self::decide(Decision::Allow)
    }

    /// Terminate with a reasoned denial
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::decide(Decision::deny(reason))
    }

    /// Terminate with an unreasoned denial
    pub fn deny_unspecified() -> Self {
        Self::decide(Decision::deny_unspecified())
    }

    /// Terminate with a redirect
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::decide(Decision::redirect(to))
    }

    /// Patch the accumulated context and keep going
    pub fn enrich(patch: C::Patch) -> Self {
        Self {
            decision: None,
            patch: Some(patch),
        }
    }

    /// Attach a patch
    pub fn with_patch(mut self, patch: C::Patch) -> Self {
        self.patch = Some(patch);
        self
    }

    /// Attach a decision
    pub fn with_decision(mut self, decision: Decision) -> Self {
        self.decision = Some(decision);
        self
    }
}

impl<C: Context> Default for StepResult<C> {
    fn default() -> Self {
        Self::next()
    }
}

impl<C: Context> fmt::Debug for StepResult<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepResult")
            .field("decision", &self.decision)
            .field("patch", &self.patch)
            .finish()
    }
}

/// Final result of one pipeline evaluation
///
/// The decision is never absent: a pipeline whose steps all abstain resolves
/// to `Allow`. The context is the cumulative merge of every patch applied
/// before short-circuit, including the short-circuiting step's own patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult<C> {
    pub decision: Decision,
    pub context: C,
}
