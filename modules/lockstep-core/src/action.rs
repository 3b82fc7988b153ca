//! The messages dispatched into the store. Domain-agnostic.

use serde::{Deserialize, Serialize};

/// An immutable message describing an intended state transition.
///
/// The store never interprets `kind` or `payload`; each reducer reads its own
/// meaning into them. The delegator clones the action once per registered
/// reducer, so payloads should stay reasonably small.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: String,
    pub payload: serde_json::Value,
}

impl Action {
    /// Create an action with a null payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}
