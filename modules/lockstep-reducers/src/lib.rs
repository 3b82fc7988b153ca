//! Example reducers for the lockstep store.
//!
//! These are collaborators, not part of the coordination engine: the core
//! only depends on the `Reducer` contract they implement. A counter, an
//! insertion-ordered todo map, and a remote-fetch-backed post cache.

pub mod counter;
pub mod posts;
pub mod todos;

pub use counter::{CounterReducer, DECREMENT, INCREMENT};
pub use posts::{Post, PostReducer, DEFAULT_BASE_URL, FETCH_POST};
pub use todos::{Todo, TodoReducer, ADD_TODO, REMOVE_TODO};
