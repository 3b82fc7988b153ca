//! Wires the three example reducers into a store, dispatches a few actions,
//! and prints the snapshot before and after.

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lockstep_core::{Action, Registry, Store};
use lockstep_reducers::{
    CounterReducer, PostReducer, TodoReducer, ADD_TODO, FETCH_POST, INCREMENT,
};

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lockstep=info".parse()?))
        .init();

    let config = Config::from_env();

    let registry = Registry::new()
        .register("counter", CounterReducer::new())
        .register("todos", TodoReducer::new())
        .register("posts", PostReducer::with_base_url(&config.posts_base_url));
    let store = Store::new(registry).await;

    let state = serde_json::Value::Object(store.get_state());
    info!(%state, "initial snapshot");

    store.dispatch(Action::new(INCREMENT));
    store.dispatch(Action::new(INCREMENT));
    store.dispatch(Action::new(ADD_TODO).with_payload(json!({ "text": "read the snapshot" })));
    store.dispatch(Action::new(FETCH_POST).with_payload(json!({ "id": 1 })));

    if store.wait_for_round(4).await {
        let state = serde_json::Value::Object(store.get_state());
        info!(%state, "settled snapshot");
    } else {
        let state = serde_json::Value::Object(store.get_state());
        warn!(%state, "store halted before settling (remote fetch failed?); snapshot frozen");
    }

    Ok(())
}
