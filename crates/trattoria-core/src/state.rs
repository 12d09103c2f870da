// ── Collection state ──
//
// The in-memory mirror of one entity collection. Only the reducer
// produces new values; everyone else sees immutable `Arc` snapshots.

use trattoria_api::EntityId;

use crate::entity::Entity;

/// Items, selection and request status for one entity kind.
///
/// Invariants maintained by [`reduce`](crate::reduce):
/// - `items` holds at most one entry per id, in server/insertion order.
/// - `selected` matches the same-id entry of `items` after any mutation
///   that touches that id.
/// - `pending` is true only between a `Started` and its terminal outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<E: Entity> {
    pub items: Vec<E>,
    pub selected: Option<E>,
    pub pending: bool,
    pub last_error: Option<String>,
    /// Filter last chosen by the UI; informational only.
    pub active_filter: Option<E::Filter>,
}

impl<E: Entity> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            pending: false,
            last_error: None,
            active_filter: None,
        }
    }
}

impl<E: Entity> CollectionState<E> {
    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_where(&self, predicate: impl Fn(&E) -> bool) -> usize {
        self.items.iter().filter(|e| predicate(e)).count()
    }

    pub fn active_count(&self) -> usize {
        self.count_where(E::is_active)
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selected.as_ref().is_some_and(|s| s.id() == id)
    }
}
