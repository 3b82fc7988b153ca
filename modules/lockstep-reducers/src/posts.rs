//! Remote-fetch reducer: caches posts fetched from an HTTP API.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use lockstep_core::{Action, Reducer};

pub const FETCH_POST: &str = "FETCH_POST";

/// Default post source: the public JSONPlaceholder instance.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct FetchPost {
    id: i64,
}

/// Fetches posts on demand and caches them by id, emitting the cache as a
/// JSON array in id order.
///
/// The round this reducer participates in stays open while the fetch is in
/// flight — the other reducers' values for that round wait at the barrier.
/// A failed fetch is a reducer fault and halts the store.
pub struct PostReducer {
    client: reqwest::Client,
    base_url: String,
    posts: BTreeMap<i64, Post>,
}

impl PostReducer {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the reducer at a different API host (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            posts: BTreeMap::new(),
        }
    }

    fn emit(&self) -> Result<Value> {
        serde_json::to_value(self.posts.values().collect::<Vec<_>>())
            .context("serializing post cache")
    }
}

impl Default for PostReducer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Reducer for PostReducer {
    fn initial(&self) -> Value {
        Value::Array(Vec::new())
    }

    async fn reduce(&mut self, action: &Action) -> Result<Value> {
        if action.kind == FETCH_POST {
            let fetch: FetchPost = serde_json::from_value(action.payload.clone())
                .context("FETCH_POST payload")?;
            let url = format!("{}/posts/{}", self.base_url, fetch.id);
            debug!(%url, "fetching post");

            let post: Post = self
                .client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("GET {url}"))?
                .error_for_status()
                .with_context(|| format!("GET {url}"))?
                .json()
                .await
                .with_context(|| format!("decoding post body from {url}"))?;
            self.posts.insert(post.id, post);
        }
        self.emit()
    }
}
