// ── State cell ──
//
// The single writable home of a collection's state. Every reducer step
// runs inside `watch::Sender::send_modify`, so the new value and its
// transition record are published before the next step can begin.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::trace;

use crate::entity::Entity;
use crate::error::TransportError;
use crate::intent::IntentKind;
use crate::outcome::{Outcome, Phase};
use crate::reducer::reduce;
use crate::state::CollectionState;

/// One applied reducer step, as seen by transition subscribers.
#[derive(Debug, Clone)]
pub struct Transition<E: Entity> {
    pub phase: Phase,
    /// `None` only for a store reset.
    pub kind: Option<IntentKind>,
    pub error: Option<TransportError>,
    /// State right after this step.
    pub state: Arc<CollectionState<E>>,
}

pub(crate) struct StateCell<E: Entity> {
    state: watch::Sender<Arc<CollectionState<E>>>,
    transitions: broadcast::Sender<Transition<E>>,
}

impl<E: Entity> StateCell<E> {
    pub(crate) fn new(transition_buffer: usize) -> Self {
        let (state, _) = watch::channel(Arc::new(CollectionState::default()));
        let (transitions, _) = broadcast::channel(transition_buffer.max(1));
        Self { state, transitions }
    }

    /// Run one reducer step and publish the result. Returns the new state.
    pub(crate) fn apply(&self, outcome: Outcome<E>) -> Arc<CollectionState<E>> {
        let phase = outcome.phase();
        let kind = outcome.kind();
        let error = outcome.error().cloned();

        let mut published = None;
        // `send_modify` updates unconditionally, even with zero receivers.
        self.state.send_modify(|current| {
            let next = Arc::new(reduce(current, outcome));
            *current = Arc::clone(&next);
            // No transition subscribers is not an error.
            let _ = self.transitions.send(Transition {
                phase,
                kind,
                error,
                state: Arc::clone(&next),
            });
            published = Some(next);
        });

        trace!(entity = %E::KIND, %phase, ?kind, "state updated");
        published.unwrap_or_else(|| self.snapshot())
    }

    pub(crate) fn snapshot(&self) -> Arc<CollectionState<E>> {
        Arc::clone(&self.state.borrow())
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<CollectionState<E>>> {
        self.state.subscribe()
    }

    pub(crate) fn transitions(&self) -> broadcast::Receiver<Transition<E>> {
        self.transitions.subscribe()
    }
}
