//! The store facade: dispatch, snapshot reads, and the commit loop.

use futures::StreamExt;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::error;

use crate::action::Action;
use crate::coordinator::Coordinator;
use crate::delegator::{ActionQueue, Delegator};
use crate::reducer::Registry;

/// The externally visible merged state: reducer name → latest emitted value.
pub type Snapshot = Map<String, Value>;

/// A single-process action store.
///
/// `dispatch` is synchronous and non-blocking; a background commit loop
/// pulls coordinator rounds and merges each into the published snapshot.
/// There is no explicit shutdown — the background tasks follow the store's
/// lifetime.
pub struct Store {
    queue: ActionQueue,
    snapshot_rx: watch::Receiver<(u64, Snapshot)>,
    delegator_task: JoinHandle<()>,
    commit_task: JoinHandle<()>,
}

impl Store {
    /// Build the queue, delegator, and coordinator from the registration
    /// set and start the background tasks.
    ///
    /// Waits for the round-0 commit before returning, so `get_state` never
    /// observes an uninitialized snapshot. Round 0 needs no dispatch; it
    /// commits as soon as the coordinator collects every initial emission.
    pub async fn new(registry: Registry) -> Self {
        let queue = ActionQueue::new();
        let entries = registry.into_entries();
        let (delegator, cursors) = Delegator::subscribe(queue.clone(), entries.len());
        let coordinator = Coordinator::new(entries, cursors);

        let (snapshot_tx, snapshot_rx) = watch::channel((0, Snapshot::new()));
        let delegator_task = tokio::spawn(delegator.run());
        let commit_task = tokio::spawn(commit_loop(coordinator, snapshot_tx));

        let store = Self {
            queue,
            snapshot_rx,
            delegator_task,
            commit_task,
        };
        store.wait_for_round(0).await;
        store
    }

    /// Clone of the current merged snapshot.
    pub fn get_state(&self) -> Snapshot {
        self.snapshot_rx.borrow().1.clone()
    }

    /// Append an action and wake the delegator if it is suspended.
    ///
    /// Never blocks and never reports errors: a dispatch against a halted
    /// store is accepted but will not be processed (the snapshot has
    /// frozen).
    pub fn dispatch(&self, action: Action) {
        self.queue.push(action);
    }

    /// Number of rounds committed so far. 1 right after construction
    /// (round 0).
    pub fn rounds_committed(&self) -> u64 {
        self.snapshot_rx.borrow().0
    }

    /// Wait until the given round index has committed. Round 0 is the
    /// initial merge; round k is the k-th dispatched action.
    ///
    /// Returns `false` if the commit loop halted (reducer fault) before
    /// reaching it.
    pub async fn wait_for_round(&self, round: u64) -> bool {
        let mut rx = self.snapshot_rx.clone();
        // Bound so the borrowing guard drops before rx does.
        let settled = rx.wait_for(|(committed, _)| *committed > round).await;
        settled.is_ok()
    }

    /// Whether the commit loop has stopped. Snapshots no longer update once
    /// this is true.
    pub fn is_halted(&self) -> bool {
        self.commit_task.is_finished()
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.delegator_task.abort();
        self.commit_task.abort();
    }
}

/// Pull rounds from the coordinator and merge each into the snapshot.
/// Shallow merge: keys absent from a round persist from the prior snapshot.
async fn commit_loop(coordinator: Coordinator, snapshot_tx: watch::Sender<(u64, Snapshot)>) {
    let mut rounds = Box::pin(coordinator.rounds());
    while let Some(result) = rounds.next().await {
        match result {
            Ok(round) => {
                snapshot_tx.send_modify(|(committed, snapshot)| {
                    for (name, value) in round {
                        snapshot.insert(name, value);
                    }
                    *committed += 1;
                });
            }
            Err(err) => {
                error!(error = %err, "round failed; snapshot frozen");
                return;
            }
        }
    }
}
