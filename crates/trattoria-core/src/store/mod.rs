// ── Store ──
//
// Process-wide home of one collection's state. Callers dispatch intents
// and observe state; they never write it.

pub(crate) mod cell;
mod selector;
mod stream;

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::CoreError;
use crate::intent::Intent;
use crate::outcome::Settled;
use crate::runner::{self, Accept, Call, EffectRunner};
use crate::state::CollectionState;
use crate::transport::Transport;

use cell::StateCell;

pub use cell::Transition;
pub use selector::{Selector, active_count, item_count};
pub use stream::{StateStream, StateWatchStream};

const DEFAULT_TRANSITION_BUFFER: usize = 64;

/// Tuning knobs for a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Drop list results superseded by a later-dispatched list intent
    /// instead of applying whichever settles last.
    pub discard_stale_lists: bool,
    /// Capacity of the transition broadcast; slower subscribers lag.
    pub transition_buffer: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            discard_stale_lists: false,
            transition_buffer: DEFAULT_TRANSITION_BUFFER,
        }
    }
}

/// Observable state of one entity collection plus its effect runner.
///
/// Cheaply cloneable; all clones share the same state.
#[derive(Clone)]
pub struct Store<E: Entity> {
    inner: Arc<StoreInner<E>>,
}

struct StoreInner<E: Entity> {
    cell: Arc<StateCell<E>>,
    runner: Arc<dyn Accept<E>>,
    calls: mpsc::UnboundedSender<Call>,
    cancel: CancellationToken,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl<E: Entity> Store<E> {
    /// Create the store and spawn its driver task on the current Tokio
    /// runtime.
    pub fn spawn<T: Transport<E>>(transport: Arc<T>, options: &StoreOptions) -> Result<Self, CoreError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| CoreError::Runtime {
            message: e.to_string(),
        })?;

        let cell = Arc::new(StateCell::new(options.transition_buffer));
        let runner = EffectRunner::new(transport, Arc::clone(&cell), options.discard_stale_lists);
        let (calls, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let driver = handle.spawn(runner::drive(E::KIND, rx, cancel.clone()));
        debug!(entity = %E::KIND, ?options, "store started");

        Ok(Self {
            inner: Arc::new(StoreInner {
                cell,
                runner: Arc::new(runner),
                calls,
                cancel,
                driver: Mutex::new(Some(driver)),
            }),
        })
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Fire-and-forget. Completion is observable only through state.
    pub fn dispatch(&self, intent: Intent<E>) {
        let kind = intent.kind();
        if let Err(e) = self.submit(intent, None) {
            warn!(entity = %E::KIND, %kind, error = %e, "intent dropped");
        }
    }

    /// Dispatch and wait for the intent's terminal outcome.
    ///
    /// Returns the state right after that outcome was applied, or the
    /// transport error it failed with (also recorded in `last_error`).
    pub async fn settle(&self, intent: Intent<E>) -> Result<Arc<CollectionState<E>>, CoreError> {
        self.settle_with_payload(intent).await.map(|settled| settled.state)
    }

    /// Like [`settle`](Self::settle), but also hands back what the
    /// transport returned, so callers need not search `items` for it.
    pub async fn settle_with_payload(&self, intent: Intent<E>) -> Result<Settled<E>, CoreError> {
        let (tx, rx) = oneshot::channel();
        self.submit(intent, Some(tx))?;
        match rx.await {
            Ok(result) => result.map_err(CoreError::from),
            Err(_) => Err(CoreError::StoreClosed { kind: E::KIND }),
        }
    }

    fn submit(&self, intent: Intent<E>, reply: Option<runner::Reply<E>>) -> Result<(), CoreError> {
        if self.inner.cancel.is_cancelled() {
            return Err(CoreError::StoreClosed { kind: E::KIND });
        }
        if let Some(call) = self.inner.runner.accept(intent, reply) {
            if let Err(mpsc::error::SendError(call)) = self.inner.calls.send(call) {
                self.inner.runner.abandon(call.kind);
                return Err(CoreError::StoreClosed { kind: E::KIND });
            }
        }
        Ok(())
    }

    /// Replace the state with an empty collection.
    pub fn reset(&self) {
        self.inner.runner.reset();
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn state(&self) -> Arc<CollectionState<E>> {
        self.inner.cell.snapshot()
    }

    pub fn subscribe(&self) -> StateStream<E> {
        StateStream::new(self.inner.cell.subscribe())
    }

    /// Every reducer step, in order, from now on.
    pub fn transitions(&self) -> broadcast::Receiver<Transition<E>> {
        self.inner.cell.transitions()
    }

    pub fn select<T>(
        &self,
        projection: impl Fn(&CollectionState<E>) -> T + Send + Sync + 'static,
    ) -> Selector<E, T> {
        Selector::new(self.inner.cell.subscribe(), projection)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    pub fn is_closed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// Stop accepting intents and wait for in-flight calls to settle.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let driver = self.inner.driver.lock().await.take();
        if let Some(driver) = driver {
            if let Err(e) = driver.await {
                warn!(entity = %E::KIND, error = %e, "driver task failed");
            }
        }
    }
}
