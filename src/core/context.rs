/*!
 * Evaluation Context
 * Opaque, value-like context threaded through a pipeline
 */

use serde_json::{Map, Value};
use std::fmt;

/// A context the engine can thread through a pipeline
///
/// The shape is application-defined and opaque to the engine: it never
/// inspects fields, it only clones per-step snapshots and merges patches.
/// `merge` must be shallow replace-by-key - every key present in the patch
/// overwrites the accumulated value wholesale, never a deep merge.
pub trait Context: Clone + Send + Sync + 'static {
    /// Sparse update: only the fields being replaced
    type Patch: fmt::Debug + Send + 'static;

    fn merge(&mut self, patch: Self::Patch);
}

/// Context that can surface the current user
///
/// The seam `require_auth` and `require_role` gate on.
pub trait HasUser {
    type User;

    /// The authenticated user, if any
    fn user(&self) -> Option<&Self::User>;
}

/// User value that can surface a role
pub trait HasRole {
    fn role(&self) -> Option<&str>;
}

/// JSON object context
///
/// The value-like record the merge semantics are defined over: patches are
/// JSON objects too, and `insert` per key gives shallow last-write-wins.
impl Context for Map<String, Value> {
    type Patch = Map<String, Value>;

    fn merge(&mut self, patch: Self::Patch) {
        for (key, value) in patch {
            self.insert(key, value);
        }
    }
}

/// A `user` key that is absent or `null` means unauthenticated.
impl HasUser for Map<String, Value> {
    type User = Value;

    fn user(&self) -> Option<&Value> {
        self.get("user").filter(|user| !user.is_null())
    }
}

impl HasRole for Value {
    fn role(&self) -> Option<&str> {
        self.get("role").and_then(Value::as_str)
    }
}
