//! Barrier-synchronized action store.
//!
//! A central store fans each dispatched action out to a fixed set of
//! independently-paced reducers, waits for every reducer to advance exactly
//! one step, and publishes the merged result as the next snapshot.
//!
//! Consumers define their domain by implementing `Reducer` (one state value
//! per consumed action) and registering instances under the snapshot key
//! their values appear at.

mod coordinator;
mod delegator;

pub mod action;
pub mod error;
pub mod reducer;
pub mod store;

pub use action::Action;
pub use error::StoreError;
pub use reducer::{Reducer, Registry};
pub use store::{Snapshot, Store};
