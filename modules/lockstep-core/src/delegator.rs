//! Action queue + fan-out delegator.
//!
//! `dispatch` appends to a shared FIFO and nudges the delegator; the
//! delegator drains the FIFO and re-emits each action once into every lane's
//! private channel, then suspends until the next nudge. The lane list is
//! built at construction, so the fan-out width is the subscription list
//! itself — no count travels out-of-band.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tracing::trace;

use crate::action::Action;

// ---------------------------------------------------------------------------
// ActionQueue
// ---------------------------------------------------------------------------

/// Shared FIFO of pending actions. Single writer (`dispatch`), single
/// drainer (the delegator task). Unbounded.
#[derive(Clone, Default)]
pub(crate) struct ActionQueue {
    inner: Arc<QueueInner>,
}

#[derive(Default)]
struct QueueInner {
    pending: Mutex<VecDeque<Action>>,
    wake: Notify,
}

impl ActionQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an action and nudge the delegator.
    ///
    /// The nudge is idempotent: if the delegator is mid-drain, the stored
    /// permit is consumed on its next empty check and the extra wakeup is a
    /// no-op. Only a push that arrives while the delegator is suspended
    /// actually wakes it.
    pub(crate) fn push(&self, action: Action) {
        self.inner.pending.lock().unwrap().push_back(action);
        self.inner.wake.notify_one();
    }

    fn pop(&self) -> Option<Action> {
        self.inner.pending.lock().unwrap().pop_front()
    }

    async fn idle(&self) {
        self.inner.wake.notified().await;
    }
}

// ---------------------------------------------------------------------------
// Delegator
// ---------------------------------------------------------------------------

/// The fan-out broadcaster. Owns the queue's pop side and one sender per
/// registered reducer.
pub(crate) struct Delegator {
    queue: ActionQueue,
    lanes: Vec<UnboundedSender<Action>>,
}

impl Delegator {
    /// Build the delegator plus one private receiver per subscriber.
    /// Receiver order matches registration order.
    pub(crate) fn subscribe(
        queue: ActionQueue,
        subscribers: usize,
    ) -> (Self, Vec<UnboundedReceiver<Action>>) {
        let mut lanes = Vec::with_capacity(subscribers);
        let mut cursors = Vec::with_capacity(subscribers);
        for _ in 0..subscribers {
            let (tx, rx) = mpsc::unbounded_channel();
            lanes.push(tx);
            cursors.push(rx);
        }
        (Self { queue, lanes }, cursors)
    }

    /// Drain-and-suspend loop.
    ///
    /// Broadcast order equals enqueue order, and each action is sent exactly
    /// once per lane. With zero lanes the queue still drains; actions are
    /// discarded without reaching any state.
    pub(crate) async fn run(self) {
        loop {
            while let Some(action) = self.queue.pop() {
                trace!(kind = %action.kind, lanes = self.lanes.len(), "broadcasting action");
                for lane in &self.lanes {
                    if lane.send(action.clone()).is_err() {
                        // Receiver gone: the coordinator stopped (reducer
                        // fault or store dropped). Nothing left to feed.
                        return;
                    }
                }
            }
            self.queue.idle().await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
