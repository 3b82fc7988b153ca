//! The barrier-synchronized round driver.

use async_stream::stream;
use futures::future;
use futures::Stream;
use serde_json::{Map, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::action::Action;
use crate::error::StoreError;
use crate::reducer::Reducer;

/// One round's output: reducer name → emitted value, in registration order.
pub(crate) type Round = Map<String, Value>;

// ---------------------------------------------------------------------------
// Lane
// ---------------------------------------------------------------------------

/// One reducer plus its private cursor into the broadcast stream.
struct Lane {
    name: String,
    reducer: Box<dyn Reducer>,
    cursor: UnboundedReceiver<Action>,
}

impl Lane {
    /// Advance one step: await the next broadcast action, then fold it into
    /// the reducer's state. Exactly one value out per action in.
    async fn step(&mut self) -> Result<Value, StoreError> {
        let action = self.cursor.recv().await.ok_or(StoreError::DelegatorGone)?;
        self.reducer
            .reduce(&action)
            .await
            .map_err(|source| StoreError::ReducerFault {
                name: self.name.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Drives all lanes in lock-step and yields one merged mapping per round.
pub(crate) struct Coordinator {
    lanes: Vec<Lane>,
}

impl Coordinator {
    /// Pair each registration with its cursor. Both lists are in
    /// registration order; the delegator built the cursors the same way.
    pub(crate) fn new(
        entries: Vec<(String, Box<dyn Reducer>)>,
        cursors: Vec<UnboundedReceiver<Action>>,
    ) -> Self {
        let lanes = entries
            .into_iter()
            .zip(cursors)
            .map(|((name, reducer), cursor)| Lane {
                name,
                reducer,
                cursor,
            })
            .collect();
        Self { lanes }
    }

    /// The round stream.
    ///
    /// Round 0 is each reducer's initial emission; every later round
    /// corresponds to exactly one action consumed by every lane. All lane
    /// steps are fired together: the lanes share one logical action source,
    /// and concurrent pulls keep delivery tied to round number rather than
    /// poll order. The round completes only when every lane has answered.
    ///
    /// A faulted lane yields the error and ends the stream — there is no
    /// partial-round recovery.
    pub(crate) fn rounds(mut self) -> impl Stream<Item = Result<Round, StoreError>> {
        stream! {
            let initial: Round = self
                .lanes
                .iter()
                .map(|lane| (lane.name.clone(), lane.reducer.initial()))
                .collect();
            yield Ok(initial);

            // With no lanes there is nothing to wait on; further rounds
            // would spin on an empty barrier.
            if self.lanes.is_empty() {
                return;
            }

            let mut round_index: u64 = 0;
            loop {
                round_index += 1;
                let steps = self.lanes.iter_mut().map(|lane| async move {
                    let value = lane.step().await;
                    (lane.name.clone(), value)
                });
                let results = future::join_all(steps).await;

                let mut round = Round::new();
                for (name, value) in results {
                    match value {
                        Ok(value) => {
                            round.insert(name, value);
                        }
                        Err(err) => {
                            yield Err(err);
                            return;
                        }
                    }
                }
                debug!(round = round_index, "round complete");
                yield Ok(round);
            }
        }
    }
}
