// ── Effect runner ──
//
// Turns intents into transport calls and their results into outcomes.
// `accept` runs on the dispatching thread: it applies local outcomes and
// the `Started` step right away, then hands the pending call to the
// store's driver task. The call applies its own terminal outcome when it
// settles, so calls of different kinds never wait on each other.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use trattoria_api::EntityId;

use crate::entity::{Entity, EntityKind};
use crate::error::{TransportError, TransportErrorKind};
use crate::intent::{Intent, IntentKind};
use crate::outcome::{Outcome, Settled, Success};
use crate::store::cell::StateCell;
use crate::transport::Transport;

/// Where `Store::settle` waits for its intent's terminal outcome.
pub(crate) type Reply<E> = oneshot::Sender<Result<Settled<E>, TransportError>>;

/// The transport-bound subset of [`Intent`].
enum Remote<E: Entity> {
    Load { page: u32, size: u32 },
    LoadOne { id: EntityId },
    Search { query: String },
    Filter { filter: E::Filter },
    Create { payload: E::Create },
    Update { id: EntityId, payload: E::Update },
    Delete { id: EntityId },
    ToggleStatus { id: EntityId, desired_state: bool },
}

/// Where an intent goes: out through the transport, or straight into
/// the reducer.
enum Route<E: Entity> {
    Remote(Remote<E>),
    Local(Outcome<E>),
}

impl<E: Entity> From<Intent<E>> for Route<E> {
    fn from(intent: Intent<E>) -> Self {
        let remote = match intent {
            Intent::Load { page, size } => Remote::Load { page, size },
            Intent::LoadOne { id } => Remote::LoadOne { id },
            Intent::Search { query } => Remote::Search { query },
            Intent::Filter { filter } => Remote::Filter { filter },
            Intent::Create { payload } => Remote::Create { payload },
            Intent::Update { id, payload } => Remote::Update { id, payload },
            Intent::Delete { id } => Remote::Delete { id },
            Intent::ToggleStatus { id, desired_state } => Remote::ToggleStatus { id, desired_state },
            Intent::ClearError => return Self::Local(Outcome::ErrorCleared),
            Intent::SetSelected { entity } => return Self::Local(Outcome::SelectionChanged(entity)),
            Intent::SetFilter { filter } => return Self::Local(Outcome::FilterChanged(filter)),
        };
        Self::Remote(remote)
    }
}

/// An in-flight transport call, ready to be driven to completion.
pub(crate) struct Call {
    pub(crate) kind: IntentKind,
    pub(crate) future: BoxFuture<'static, ()>,
}

/// Type-erased runner, so a `Store` is generic over the entity only.
pub(crate) trait Accept<E: Entity>: Send + Sync {
    /// Apply the synchronous part of `intent`; return the remote call,
    /// if any.
    fn accept(&self, intent: Intent<E>, reply: Option<Reply<E>>) -> Option<Call>;

    /// Settle a call that could not be handed to the driver.
    fn abandon(&self, kind: IntentKind);

    fn reset(&self);
}

/// Coordinator between intents, the transport and the state cell.
pub(crate) struct EffectRunner<E: Entity, T: Transport<E>> {
    transport: Arc<T>,
    cell: Arc<StateCell<E>>,
    /// Sequence number of the latest dispatched list-replacing intent.
    list_seq: Arc<AtomicU64>,
    discard_stale_lists: bool,
}

impl<E: Entity, T: Transport<E>> Clone for EffectRunner<E, T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cell: Arc::clone(&self.cell),
            list_seq: Arc::clone(&self.list_seq),
            discard_stale_lists: self.discard_stale_lists,
        }
    }
}

impl<E: Entity, T: Transport<E>> EffectRunner<E, T> {
    pub(crate) fn new(transport: Arc<T>, cell: Arc<StateCell<E>>, discard_stale_lists: bool) -> Self {
        Self {
            transport,
            cell,
            list_seq: Arc::new(AtomicU64::new(0)),
            discard_stale_lists,
        }
    }

    fn apply_local(&self, outcome: Outcome<E>, reply: Option<Reply<E>>) -> Option<Call> {
        let state = self.cell.apply(outcome);
        if let Some(reply) = reply {
            let _ = reply.send(Ok(Settled {
                state,
                success: None,
            }));
        }
        None
    }

    /// Perform the transport call matching a remote intent.
    async fn call(&self, call: Remote<E>) -> Result<Success<E>, TransportError> {
        let transport = &*self.transport;
        match call {
            Remote::Load { page, size } => {
                let items = transport.list(page, size).await?;
                Ok(Success::Listed {
                    kind: IntentKind::Load,
                    items,
                })
            }
            Remote::LoadOne { id } => transport.fetch(&id).await.map(Success::Fetched),
            Remote::Search { query } => {
                let items = transport.search(&query).await?;
                Ok(Success::Listed {
                    kind: IntentKind::Search,
                    items,
                })
            }
            Remote::Filter { filter } => {
                let items = transport.filter(&filter).await?;
                Ok(Success::Listed {
                    kind: IntentKind::Filter,
                    items,
                })
            }
            Remote::Create { payload } => transport.create(&payload).await.map(Success::Created),
            Remote::Update { id, payload } => {
                transport.update(&id, &payload).await.map(Success::Updated)
            }
            Remote::Delete { id } => {
                transport.delete(&id).await?;
                Ok(Success::Deleted(id))
            }
            Remote::ToggleStatus { id, desired_state } => transport
                .set_status(&id, desired_state)
                .await
                .map(Success::StatusChanged),
        }
    }

    /// Fold a settled call into state and answer its waiter.
    fn settle(
        &self,
        kind: IntentKind,
        seq: Option<u64>,
        result: Result<Success<E>, TransportError>,
        reply: Option<Reply<E>>,
    ) {
        if let Some(seq) = seq {
            let latest = self.list_seq.load(Ordering::SeqCst);
            if self.discard_stale_lists && seq != latest {
                warn!(entity = %E::KIND, %kind, seq, latest, "discarding superseded list response");
                if let Some(reply) = reply {
                    let _ = reply.send(result.map(|success| Settled {
                        state: self.cell.snapshot(),
                        success: Some(success),
                    }));
                }
                return;
            }
        }

        let (outcome, payload) = match result {
            Ok(success) => {
                debug!(entity = %E::KIND, %kind, "intent succeeded");
                let payload = reply.is_some().then(|| success.clone());
                (Outcome::Succeeded(success), payload)
            }
            Err(error) => {
                warn!(
                    entity = %E::KIND,
                    %kind,
                    status = ?error.status,
                    error = %error,
                    "intent failed"
                );
                (Outcome::Failed { kind, error }, None)
            }
        };

        let failure = outcome.error().cloned();
        let state = self.cell.apply(outcome);
        if let Some(reply) = reply {
            let settled = Settled {
                state,
                success: payload,
            };
            let _ = reply.send(failure.map_or(Ok(settled), Err));
        }
    }

    /// Accept an intent and drive its call inline.
    #[cfg(test)]
    pub(crate) async fn execute(
        &self,
        intent: Intent<E>,
    ) -> Result<Arc<crate::state::CollectionState<E>>, TransportError> {
        self.execute_settled(intent).await.map(|settled| settled.state)
    }

    #[cfg(test)]
    pub(crate) async fn execute_settled(&self, intent: Intent<E>) -> Result<Settled<E>, TransportError> {
        let (tx, rx) = oneshot::channel();
        if let Some(call) = Accept::accept(self, intent, Some(tx)) {
            call.future.await;
        }
        rx.await.unwrap_or_else(|_| {
            Ok(Settled {
                state: self.cell.snapshot(),
                success: None,
            })
        })
    }
}

impl<E: Entity, T: Transport<E>> Accept<E> for EffectRunner<E, T> {
    fn accept(&self, intent: Intent<E>, reply: Option<Reply<E>>) -> Option<Call> {
        let kind = intent.kind();
        debug!(entity = %E::KIND, %kind, "intent dispatched");

        let remote = match Route::from(intent) {
            Route::Remote(remote) => remote,
            Route::Local(outcome) => return self.apply_local(outcome, reply),
        };

        let seq = kind
            .replaces_list()
            .then(|| self.list_seq.fetch_add(1, Ordering::SeqCst) + 1);
        self.cell.apply(Outcome::Started { kind });

        let runner = self.clone();
        let future = async move {
            let result = runner.call(remote).await;
            runner.settle(kind, seq, result, reply);
        }
        .boxed();

        Some(Call { kind, future })
    }

    fn abandon(&self, kind: IntentKind) {
        let error = TransportError::new(
            TransportErrorKind::Request,
            None,
            "The console is shutting down",
        );
        self.cell.apply(Outcome::Failed { kind, error });
    }

    fn reset(&self) {
        debug!(entity = %E::KIND, "resetting store");
        self.cell.apply(Outcome::Reset);
    }
}

// ── Driver task ─────────────────────────────────────────────────────

/// Run every call handed over by the store until cancelled or until all
/// senders are gone, then let the in-flight ones settle.
pub(crate) async fn drive(
    entity: EntityKind,
    mut calls: mpsc::UnboundedReceiver<Call>,
    cancel: CancellationToken,
) {
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            Some(joined) = in_flight.join_next() => log_join(entity, joined),
            call = calls.recv() => {
                let Some(call) = call else { break };
                debug!(%entity, kind = %call.kind, in_flight = in_flight.len() + 1, "transport call started");
                in_flight.spawn(call.future);
            }
        }
    }

    // Calls dispatched before shutdown still run to completion.
    calls.close();
    while let Ok(call) = calls.try_recv() {
        in_flight.spawn(call.future);
    }
    if !in_flight.is_empty() {
        debug!(%entity, pending = in_flight.len(), "waiting for in-flight calls");
    }
    while let Some(joined) = in_flight.join_next().await {
        log_join(entity, joined);
    }

    debug!(%entity, "effect runner stopped");
}

fn log_join(entity: EntityKind, joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!(%entity, error = %e, "transport call aborted");
    }
}
