//! Error types for the store and the inspector bridge

use thiserror::Error;

/// Error returned by a reducer for an action it does not recognize.
///
/// Propagates synchronously out of [`Store::dispatch`](crate::Store::dispatch)
/// to the caller; the store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{action}`")]
pub struct UnknownActionError {
    action: String,
}

impl UnknownActionError {
    /// Create an error naming the rejected action.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }

    /// The name of the rejected action.
    pub fn action(&self) -> &str {
        &self.action
    }
}

/// Error applying an externally supplied state value.
///
/// Returned by [`Store::set_state`](crate::Store::set_state) when the current
/// state cannot be re-encoded for merging, or when the merged document does
/// not decode back into the state type. The inbound command interpreter
/// catches these, logs them, and drops the command.
#[derive(Debug, Error)]
pub enum StateError {
    /// The current state failed to serialize to JSON for the merge.
    #[error("failed to encode current state: {0}")]
    Encode(#[source] serde_json::Error),

    /// The merged document failed to deserialize into the state type.
    #[error("failed to decode replacement state: {0}")]
    Decode(#[source] serde_json::Error),
}
