//! The reducer contract and the registration set.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::action::Action;

/// A stateful consumer of the broadcast action stream.
///
/// The contract the coordinator depends on:
/// - `initial` is emitted once, before any action is consumed (round 0).
/// - `reduce` consumes exactly one action and returns exactly one new state
///   value — an unrecognized kind must re-emit the unchanged current state.
///   The signature makes a zero or double emission unrepresentable, which
///   keeps the barrier count correct.
/// - State is private to the reducer. The coordinator and store only ever
///   see the returned values.
#[async_trait]
pub trait Reducer: Send + 'static {
    /// The state value published for round 0, before any dispatch.
    fn initial(&self) -> Value;

    /// Consume one action, return the new state value.
    ///
    /// An `Err` is a reducer fault: it fails the in-flight round and halts
    /// all future rounds. The snapshot freezes at its last committed value.
    async fn reduce(&mut self, action: &Action) -> Result<Value>;
}

/// The registration set: an ordered list of named reducers, fixed at store
/// construction. Registration order is merge order. The number of entries is
/// the delegator's fan-out width.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Box<dyn Reducer>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reducer under the snapshot key its values appear at.
    pub fn register(mut self, name: impl Into<String>, reducer: impl Reducer) -> Self {
        self.entries.push((name.into(), Box::new(reducer)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Box<dyn Reducer>)> {
        self.entries
    }
}
