//! Counter reducer: the smallest possible state machine.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use lockstep_core::{Action, Reducer};

pub const INCREMENT: &str = "INCREMENT";
pub const DECREMENT: &str = "DECREMENT";

/// An i64 counter. `INCREMENT`/`DECREMENT` adjust it; anything else re-emits
/// the current value unchanged.
#[derive(Debug, Default)]
pub struct CounterReducer {
    value: i64,
}

impl CounterReducer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Reducer for CounterReducer {
    fn initial(&self) -> Value {
        json!(self.value)
    }

    async fn reduce(&mut self, action: &Action) -> Result<Value> {
        match action.kind.as_str() {
            INCREMENT => self.value += 1,
            DECREMENT => self.value -= 1,
            _ => {}
        }
        Ok(json!(self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initial_value_is_zero() {
        assert_eq!(CounterReducer::new().initial(), json!(0));
    }

    #[tokio::test]
    async fn two_increments_and_a_decrement_yield_one() {
        let mut counter = CounterReducer::new();
        counter.reduce(&Action::new(INCREMENT)).await.unwrap();
        counter.reduce(&Action::new(INCREMENT)).await.unwrap();
        let state = counter.reduce(&Action::new(DECREMENT)).await.unwrap();
        assert_eq!(state, json!(1));
    }

    #[tokio::test]
    async fn unrecognized_kind_reemits_current_value() {
        let mut counter = CounterReducer::new();
        counter.reduce(&Action::new(INCREMENT)).await.unwrap();
        let state = counter.reduce(&Action::new("UNKNOWN")).await.unwrap();
        assert_eq!(state, json!(1));
    }
}
