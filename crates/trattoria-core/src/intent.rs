// ── Intent taxonomy ──
//
// Every change to a collection starts as an `Intent`. Remote intents are
// routed through the effect runner to exactly one transport call; local
// intents go straight to the reducer.

use trattoria_api::EntityId;

use crate::entity::Entity;

/// All requests a caller may issue against one entity collection.
#[derive(Debug, Clone)]
pub enum Intent<E: Entity> {
    // ── Reads ────────────────────────────────────────────────────────
    Load {
        page: u32,
        size: u32,
    },
    LoadOne {
        id: EntityId,
    },
    Search {
        query: String,
    },
    Filter {
        filter: E::Filter,
    },

    // ── Mutations ────────────────────────────────────────────────────
    Create {
        payload: E::Create,
    },
    Update {
        id: EntityId,
        payload: E::Update,
    },
    Delete {
        id: EntityId,
    },
    ToggleStatus {
        id: EntityId,
        desired_state: bool,
    },

    // ── Local ────────────────────────────────────────────────────────
    ClearError,
    SetSelected {
        entity: Option<E>,
    },
    SetFilter {
        filter: Option<E::Filter>,
    },
}

/// Payload-free label of an [`Intent`], carried on outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum IntentKind {
    Load,
    LoadOne,
    Search,
    Filter,
    Create,
    Update,
    Delete,
    ToggleStatus,
    ClearError,
    SetSelected,
    SetFilter,
}

impl IntentKind {
    /// Handled without a transport call.
    pub fn is_local(self) -> bool {
        matches!(self, Self::ClearError | Self::SetSelected | Self::SetFilter)
    }

    /// Success replaces `items` wholesale.
    pub fn replaces_list(self) -> bool {
        matches!(self, Self::Load | Self::Search | Self::Filter)
    }
}

impl<E: Entity> Intent<E> {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::Load { .. } => IntentKind::Load,
            Self::LoadOne { .. } => IntentKind::LoadOne,
            Self::Search { .. } => IntentKind::Search,
            Self::Filter { .. } => IntentKind::Filter,
            Self::Create { .. } => IntentKind::Create,
            Self::Update { .. } => IntentKind::Update,
            Self::Delete { .. } => IntentKind::Delete,
            Self::ToggleStatus { .. } => IntentKind::ToggleStatus,
            Self::ClearError => IntentKind::ClearError,
            Self::SetSelected { .. } => IntentKind::SetSelected,
            Self::SetFilter { .. } => IntentKind::SetFilter,
        }
    }

    pub fn is_local(&self) -> bool {
        self.kind().is_local()
    }
}
