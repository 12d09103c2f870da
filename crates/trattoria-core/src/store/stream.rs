// ── Reactive state streams ──
//
// Subscription type for consuming collection-state changes from a Store.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::entity::Entity;
use crate::state::CollectionState;

/// A subscription to one collection's state.
///
/// Latest-value semantics: a slow consumer sees the newest snapshot, not
/// every intermediate one. Use [`Store::transitions`](crate::Store::transitions)
/// to observe every step.
pub struct StateStream<E: Entity> {
    current: Arc<CollectionState<E>>,
    receiver: watch::Receiver<Arc<CollectionState<E>>>,
}

impl<E: Entity> StateStream<E> {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<CollectionState<E>>>) -> Self {
        let current = Arc::clone(&receiver.borrow_and_update());
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation (or at the last `changed()`).
    pub fn current(&self) -> &Arc<CollectionState<E>> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<CollectionState<E>> {
        Arc::clone(&self.receiver.borrow())
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<CollectionState<E>>> {
        self.receiver.changed().await.ok()?;
        let snap = Arc::clone(&self.receiver.borrow_and_update());
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Wait until the state satisfies `predicate` (checked immediately
    /// against the latest value first).
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&CollectionState<E>) -> bool,
    ) -> Option<Arc<CollectionState<E>>> {
        let snap = {
            let guard = self.receiver.wait_for(|s| predicate(s)).await.ok()?;
            Arc::clone(&guard)
        };
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> StateWatchStream<E> {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current snapshot first, then one per change.
pub struct StateWatchStream<E: Entity> {
    inner: WatchStream<Arc<CollectionState<E>>>,
}

impl<E: Entity> Stream for StateWatchStream<E> {
    type Item = Arc<CollectionState<E>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
