use thiserror::Error;

/// Faults surfaced inside the coordination engine.
///
/// None of these reach `dispatch`/`get_state` callers. A failed round
/// terminates the commit loop; the snapshot freezes at its last committed
/// value and the fault is logged there.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A reducer's step returned an error. Fails the in-flight round and
    /// halts all future rounds.
    #[error("reducer '{name}' faulted: {source}")]
    ReducerFault {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A lane's broadcast channel closed while a round was still waiting on
    /// it. Only possible if the delegator task stopped.
    #[error("action delegator stopped while a round was in flight")]
    DelegatorGone,
}
