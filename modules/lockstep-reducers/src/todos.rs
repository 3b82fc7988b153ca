//! Todo reducer: an insertion-ordered id → item map.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use lockstep_core::{Action, Reducer};

pub const ADD_TODO: &str = "ADD_TODO";
pub const REMOVE_TODO: &str = "REMOVE_TODO";

/// A single todo item. The id is generated at `ADD_TODO` time and is the
/// handle for later removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct AddTodo {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RemoveTodo {
    id: String,
}

/// Holds todos in insertion order and emits them as a JSON array.
///
/// A payload that doesn't match the action kind's schema is a reducer fault:
/// there is no partial application of a malformed action.
#[derive(Debug, Default)]
pub struct TodoReducer {
    items: Vec<Todo>,
}

impl TodoReducer {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self) -> Result<Value> {
        serde_json::to_value(&self.items).context("serializing todo list")
    }
}

#[async_trait]
impl Reducer for TodoReducer {
    fn initial(&self) -> Value {
        Value::Array(Vec::new())
    }

    async fn reduce(&mut self, action: &Action) -> Result<Value> {
        match action.kind.as_str() {
            ADD_TODO => {
                let add: AddTodo = serde_json::from_value(action.payload.clone())
                    .context("ADD_TODO payload")?;
                self.items.push(Todo {
                    id: Uuid::new_v4().to_string(),
                    text: add.text,
                    created_at: Utc::now(),
                });
            }
            REMOVE_TODO => {
                let remove: RemoveTodo = serde_json::from_value(action.payload.clone())
                    .context("REMOVE_TODO payload")?;
                self.items.retain(|todo| todo.id != remove.id);
            }
            _ => {}
        }
        self.emit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn add_two_then_remove_first_by_generated_id() {
        let mut todos = TodoReducer::new();
        todos
            .reduce(&Action::new(ADD_TODO).with_payload(json!({ "text": "a" })))
            .await
            .unwrap();
        let state = todos
            .reduce(&Action::new(ADD_TODO).with_payload(json!({ "text": "b" })))
            .await
            .unwrap();

        let list: Vec<Todo> = serde_json::from_value(state).unwrap();
        assert_eq!(list.len(), 2);

        let first_id = &list[0].id;
        let state = todos
            .reduce(&Action::new(REMOVE_TODO).with_payload(json!({ "id": first_id })))
            .await
            .unwrap();

        let list: Vec<Todo> = serde_json::from_value(state).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "b");
    }

    #[tokio::test]
    async fn removing_an_unknown_id_is_a_noop() {
        let mut todos = TodoReducer::new();
        todos
            .reduce(&Action::new(ADD_TODO).with_payload(json!({ "text": "keep" })))
            .await
            .unwrap();
        let state = todos
            .reduce(&Action::new(REMOVE_TODO).with_payload(json!({ "id": "no-such-id" })))
            .await
            .unwrap();

        let list: Vec<Todo> = serde_json::from_value(state).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn unrecognized_kind_reemits_current_list() {
        let mut todos = TodoReducer::new();
        todos
            .reduce(&Action::new(ADD_TODO).with_payload(json!({ "text": "a" })))
            .await
            .unwrap();
        let state = todos.reduce(&Action::new("UNKNOWN")).await.unwrap();

        let list: Vec<Todo> = serde_json::from_value(state).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_fault() {
        let mut todos = TodoReducer::new();
        let result = todos
            .reduce(&Action::new(ADD_TODO).with_payload(json!({ "txet": "typo" })))
            .await;
        assert!(result.is_err());
    }
}
