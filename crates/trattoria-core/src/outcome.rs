// ── Outcomes ──
//
// The result of one step of an intent, folded into state by `reduce`.
// Remote intents produce `Started` followed by exactly one of
// `Succeeded` / `Failed`; local intents produce a single local outcome.

use std::sync::Arc;

use trattoria_api::EntityId;

use crate::entity::Entity;
use crate::error::TransportError;
use crate::intent::IntentKind;
use crate::state::CollectionState;

#[derive(Debug, Clone)]
pub enum Outcome<E: Entity> {
    Started { kind: IntentKind },
    Succeeded(Success<E>),
    Failed { kind: IntentKind, error: TransportError },

    // ── Local ────────────────────────────────────────────────────────
    ErrorCleared,
    SelectionChanged(Option<E>),
    FilterChanged(Option<E::Filter>),
    Reset,
}

/// Successful transport payload, tagged by what the reducer must do.
#[derive(Debug, Clone)]
pub enum Success<E: Entity> {
    /// Load / Search / Filter: replace `items`.
    Listed { kind: IntentKind, items: Vec<E> },
    /// LoadOne: becomes `selected`.
    Fetched(E),
    Created(E),
    Updated(E),
    StatusChanged(E),
    /// The delete response has no body, so the id travels with the outcome.
    Deleted(EntityId),
}

impl<E: Entity> Success<E> {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::Listed { kind, .. } => *kind,
            Self::Fetched(_) => IntentKind::LoadOne,
            Self::Created(_) => IntentKind::Create,
            Self::Updated(_) => IntentKind::Update,
            Self::StatusChanged(_) => IntentKind::ToggleStatus,
            Self::Deleted(_) => IntentKind::Delete,
        }
    }
}

impl<E: Entity> Success<E> {
    /// The single entity the server returned, if this call returns one.
    pub fn into_entity(self) -> Option<E> {
        match self {
            Self::Fetched(e) | Self::Created(e) | Self::Updated(e) | Self::StatusChanged(e) => Some(e),
            Self::Listed { .. } | Self::Deleted(_) => None,
        }
    }
}

/// A settled intent: the state right after its terminal outcome, plus
/// the transport payload. `success` is `None` for local intents.
#[derive(Debug, Clone)]
pub struct Settled<E: Entity> {
    pub state: Arc<CollectionState<E>>,
    pub success: Option<Success<E>>,
}

/// Coarse phase of an outcome, as seen by transition observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Started,
    Succeeded,
    Failed,
    Local,
}

impl Phase {
    /// `Succeeded` or `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl<E: Entity> Outcome<E> {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Started { .. } => Phase::Started,
            Self::Succeeded(_) => Phase::Succeeded,
            Self::Failed { .. } => Phase::Failed,
            Self::ErrorCleared | Self::SelectionChanged(_) | Self::FilterChanged(_) | Self::Reset => {
                Phase::Local
            }
        }
    }

    /// The intent this outcome belongs to. `None` only for `Reset`.
    pub fn kind(&self) -> Option<IntentKind> {
        match self {
            Self::Started { kind } | Self::Failed { kind, .. } => Some(*kind),
            Self::Succeeded(success) => Some(success.kind()),
            Self::ErrorCleared => Some(IntentKind::ClearError),
            Self::SelectionChanged(_) => Some(IntentKind::SetSelected),
            Self::FilterChanged(_) => Some(IntentKind::SetFilter),
            Self::Reset => None,
        }
    }

    pub fn error(&self) -> Option<&TransportError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
