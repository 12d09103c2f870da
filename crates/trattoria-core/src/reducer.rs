// ── Reducer ──
//
// Pure, total fold of one outcome into a collection state. No I/O, no
// clocks, no failure paths: every (state, outcome) pair yields a state.

use std::collections::HashSet;

use trattoria_api::EntityId;

use crate::entity::Entity;
use crate::error::TransportError;
use crate::intent::IntentKind;
use crate::outcome::{Outcome, Success};
use crate::state::CollectionState;

/// Produce the state that follows `state` once `outcome` is applied.
///
/// - `Started` raises `pending` and clears `last_error`.
/// - Any success lowers `pending`; `last_error` is left alone so an
///   unacknowledged error survives unrelated successes.
/// - `Failed` lowers `pending` and stores a non-empty message without
///   touching `items` or `selected`.
pub fn reduce<E: Entity>(state: &CollectionState<E>, outcome: Outcome<E>) -> CollectionState<E> {
    let mut next = state.clone();

    match outcome {
        Outcome::Started { .. } => {
            next.pending = true;
            next.last_error = None;
        }
        Outcome::Succeeded(success) => {
            next.pending = false;
            apply_success(&mut next, success);
        }
        Outcome::Failed { kind, error } => {
            next.pending = false;
            next.last_error = Some(failure_message(kind, &error));
        }
        Outcome::ErrorCleared => next.last_error = None,
        Outcome::SelectionChanged(entity) => next.selected = entity,
        Outcome::FilterChanged(filter) => next.active_filter = filter,
        Outcome::Reset => return CollectionState::default(),
    }

    next
}

fn apply_success<E: Entity>(state: &mut CollectionState<E>, success: Success<E>) {
    match success {
        Success::Listed { items, .. } => {
            state.items = dedup_by_id(items);
            let refreshed = state
                .selected
                .as_ref()
                .and_then(|sel| state.items.iter().find(|e| e.id() == sel.id()))
                .cloned();
            if refreshed.is_some() {
                state.selected = refreshed;
            }
        }
        Success::Fetched(entity) => {
            replace_by_id(&mut state.items, &entity);
            state.selected = Some(entity);
        }
        Success::Created(entity) => {
            if !replace_by_id(&mut state.items, &entity) {
                state.items.push(entity.clone());
            }
            refresh_selected(state, entity);
        }
        Success::Updated(entity) | Success::StatusChanged(entity) => {
            replace_by_id(&mut state.items, &entity);
            refresh_selected(state, entity);
        }
        Success::Deleted(id) => {
            state.items.retain(|e| e.id() != &id);
            if state.is_selected(&id) {
                state.selected = None;
            }
        }
    }
}

/// Replace the entry sharing `entity`'s id. Returns whether one existed.
fn replace_by_id<E: Entity>(items: &mut [E], entity: &E) -> bool {
    match items.iter_mut().find(|e| e.id() == entity.id()) {
        Some(slot) => {
            *slot = entity.clone();
            true
        }
        None => false,
    }
}

fn refresh_selected<E: Entity>(state: &mut CollectionState<E>, entity: E) {
    if state.is_selected(entity.id()) {
        state.selected = Some(entity);
    }
}

/// Keep the first occurrence of each id, preserving server order.
fn dedup_by_id<E: Entity>(items: Vec<E>) -> Vec<E> {
    let mut seen: HashSet<EntityId> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|e| seen.insert(e.id().clone()))
        .collect()
}

fn failure_message(kind: IntentKind, error: &TransportError) -> String {
    let message = error.message.trim();
    if !message.is_empty() {
        return message.to_owned();
    }
    match error.status {
        Some(status) => format!("{kind} failed (HTTP {status})"),
        None => format!("{kind} failed ({})", error.kind),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entity::MenuFilter;
    use crate::error::TransportErrorKind;
    use crate::test_support::{customer, menu_item, named_customer};
    use trattoria_api::{Customer, MenuCategory, MenuItem};

    fn started(kind: IntentKind) -> Outcome<Customer> {
        Outcome::Started { kind }
    }

    fn with_items(items: Vec<Customer>) -> CollectionState<Customer> {
        CollectionState {
            items,
            ..CollectionState::default()
        }
    }

    fn ids(state: &CollectionState<Customer>) -> Vec<&str> {
        state.items.iter().map(|c| c.id.as_str()).collect()
    }

    // ── Started / Failed / ClearError ────────────────────────────────

    #[test]
    fn started_sets_pending_and_clears_error() {
        let state = CollectionState::<Customer> {
            last_error: Some("boom".into()),
            ..CollectionState::default()
        };
        let next = reduce(&state, started(IntentKind::Search));
        assert!(next.pending);
        assert_eq!(next.last_error, None);
    }

    #[test]
    fn failed_never_touches_items_or_selection() {
        let a = customer("c1", true);
        let state = CollectionState {
            items: vec![a.clone(), customer("c2", false)],
            selected: Some(a),
            pending: true,
            ..CollectionState::default()
        };

        for kind in [
            IntentKind::Load,
            IntentKind::LoadOne,
            IntentKind::Search,
            IntentKind::Create,
            IntentKind::Update,
            IntentKind::Delete,
            IntentKind::ToggleStatus,
        ] {
            let next = reduce(
                &state,
                Outcome::Failed {
                    kind,
                    error: TransportError::http(500, "Internal error"),
                },
            );
            assert_eq!(next.items, state.items);
            assert_eq!(next.selected, state.selected);
            assert!(!next.pending);
            assert_eq!(next.last_error.as_deref(), Some("Internal error"));
        }
    }

    #[test]
    fn failed_with_blank_message_still_sets_error() {
        let next = reduce(
            &CollectionState::<Customer>::default(),
            Outcome::Failed {
                kind: IntentKind::Delete,
                error: TransportError::new(TransportErrorKind::Http, Some(502), "  "),
            },
        );
        assert_eq!(next.last_error.as_deref(), Some("delete failed (HTTP 502)"));
    }

    #[test]
    fn clear_error_round_trip_changes_nothing_else() {
        let state = with_items(vec![customer("c1", true)]);
        let failed = reduce(
            &reduce(&state, started(IntentKind::Load)),
            Outcome::Failed {
                kind: IntentKind::Load,
                error: TransportError::http(503, "Service unavailable"),
            },
        );
        let cleared = reduce(&failed, Outcome::ErrorCleared);
        assert_eq!(cleared.last_error, None);
        assert_eq!(
            cleared,
            CollectionState {
                last_error: None,
                ..failed
            }
        );
    }

    #[test]
    fn later_failure_overwrites_error_slot() {
        let first = reduce(
            &CollectionState::<Customer>::default(),
            Outcome::Failed {
                kind: IntentKind::Create,
                error: TransportError::http(409, "Email already registered"),
            },
        );
        let second = reduce(
            &first,
            Outcome::Failed {
                kind: IntentKind::Delete,
                error: TransportError::http(404, "not found"),
            },
        );
        assert_eq!(second.last_error.as_deref(), Some("not found"));
    }

    #[test]
    fn success_leaves_unacknowledged_error() {
        let state = CollectionState::<Customer> {
            last_error: Some("earlier failure".into()),
            ..CollectionState::default()
        };
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Created(customer("c1", true))),
        );
        assert_eq!(next.last_error.as_deref(), Some("earlier failure"));
    }

    // ── Lists ────────────────────────────────────────────────────────

    #[test]
    fn listed_replaces_items_wholesale() {
        let state = with_items(vec![customer("old", true)]);
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Listed {
                kind: IntentKind::Load,
                items: vec![customer("c1", true), customer("c2", true)],
            }),
        );
        assert_eq!(ids(&next), vec!["c1", "c2"]);
    }

    #[test]
    fn listed_drops_duplicate_ids() {
        let next = reduce(
            &CollectionState::default(),
            Outcome::Succeeded(Success::Listed {
                kind: IntentKind::Search,
                items: vec![
                    named_customer("c1", "first"),
                    customer("c2", true),
                    named_customer("c1", "second"),
                ],
            }),
        );
        assert_eq!(ids(&next), vec!["c1", "c2"]);
        assert_eq!(next.items[0].name, "first");
    }

    #[test]
    fn listed_dedup_keeps_first_of_each_id_in_large_pages() {
        let items: Vec<_> = (0..2_000)
            .map(|n| named_customer(&format!("c{}", n % 500), &format!("copy-{n}")))
            .collect();
        let next = reduce(
            &CollectionState::default(),
            Outcome::Succeeded(Success::Listed {
                kind: IntentKind::Load,
                items,
            }),
        );
        assert_eq!(next.items.len(), 500);
        assert_eq!(next.items[0].id.as_str(), "c0");
        assert_eq!(next.items[0].name, "copy-0");
        assert_eq!(next.items[499].name, "copy-499");
    }

    #[test]
    fn listed_refreshes_selected_with_same_id() {
        let state = CollectionState {
            selected: Some(named_customer("c1", "stale")),
            ..CollectionState::default()
        };
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Listed {
                kind: IntentKind::Load,
                items: vec![named_customer("c1", "fresh")],
            }),
        );
        assert_eq!(next.selected.unwrap().name, "fresh");
    }

    #[test]
    fn listed_keeps_selection_absent_from_page() {
        let sel = customer("c9", true);
        let state = CollectionState {
            selected: Some(sel.clone()),
            ..CollectionState::default()
        };
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Listed {
                kind: IntentKind::Load,
                items: vec![customer("c1", true)],
            }),
        );
        assert_eq!(next.selected, Some(sel));
    }

    // ── Create / Update / Toggle / Delete ────────────────────────────

    #[test]
    fn create_on_empty_state() {
        let state = reduce(
            &CollectionState::<Customer>::default(),
            started(IntentKind::Create),
        );
        let server = named_customer("c1", "Ada");
        let next = reduce(&state, Outcome::Succeeded(Success::Created(server.clone())));

        assert_eq!(
            next,
            CollectionState {
                items: vec![server],
                ..CollectionState::default()
            }
        );
    }

    #[test]
    fn create_appends_at_end() {
        let state = with_items(vec![customer("c1", true), customer("c2", true)]);
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Created(customer("c3", true))),
        );
        assert_eq!(ids(&next), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn create_with_existing_id_replaces_in_place() {
        let state = with_items(vec![named_customer("c1", "old"), customer("c2", true)]);
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Created(named_customer("c1", "new"))),
        );
        assert_eq!(ids(&next), vec!["c1", "c2"]);
        assert_eq!(next.items[0].name, "new");
    }

    #[test]
    fn toggle_status_replaces_by_identity() {
        let state = with_items(vec![customer("c1", true)]);
        let next = reduce(
            &reduce(&state, started(IntentKind::ToggleStatus)),
            Outcome::Succeeded(Success::StatusChanged(customer("c1", false))),
        );
        assert_eq!(next.items, vec![customer("c1", false)]);
        assert!(!next.pending);
    }

    #[test]
    fn update_of_unknown_id_still_refreshes_selected() {
        let state = CollectionState {
            items: vec![customer("c2", true)],
            selected: Some(named_customer("x", "before")),
            ..CollectionState::default()
        };
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Updated(named_customer("x", "after"))),
        );
        assert_eq!(next.items, state.items);
        assert_eq!(next.selected.unwrap().name, "after");
    }

    #[test]
    fn update_keeps_position() {
        let state = with_items(vec![
            customer("c1", true),
            named_customer("c2", "before"),
            customer("c3", true),
        ]);
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Updated(named_customer("c2", "after"))),
        );
        assert_eq!(ids(&next), vec!["c1", "c2", "c3"]);
        assert_eq!(next.items[1].name, "after");
    }

    #[test]
    fn delete_selected_clears_selection() {
        let a = customer("c1", true);
        let state = CollectionState {
            items: vec![a.clone(), customer("c2", true)],
            selected: Some(a),
            ..CollectionState::default()
        };
        let next = reduce(&state, Outcome::Succeeded(Success::Deleted("c1".into())));
        assert_eq!(ids(&next), vec!["c2"]);
        assert_eq!(next.selected, None);
    }

    #[test]
    fn delete_other_keeps_selection() {
        let a = customer("c1", true);
        let state = CollectionState {
            items: vec![a.clone(), customer("c2", true)],
            selected: Some(a.clone()),
            ..CollectionState::default()
        };
        let next = reduce(&state, Outcome::Succeeded(Success::Deleted("c2".into())));
        assert_eq!(next.selected, Some(a));
    }

    #[test]
    fn failed_delete_keeps_items() {
        let state = with_items(vec![customer("c1", true)]);
        let next = reduce(
            &reduce(&state, started(IntentKind::Delete)),
            Outcome::Failed {
                kind: IntentKind::Delete,
                error: TransportError::http(404, "not found"),
            },
        );
        assert_eq!(next.items, state.items);
        assert!(!next.pending);
        assert_eq!(next.last_error.as_deref(), Some("not found"));
    }

    // ── LoadOne / local intents ──────────────────────────────────────

    #[test]
    fn fetched_sets_selected_and_refreshes_entry() {
        let state = with_items(vec![named_customer("c1", "stale"), customer("c2", true)]);
        let next = reduce(
            &state,
            Outcome::Succeeded(Success::Fetched(named_customer("c1", "fresh"))),
        );
        assert_eq!(next.selected.as_ref().unwrap().name, "fresh");
        assert_eq!(next.items[0].name, "fresh");
    }

    #[test]
    fn fetched_never_inserts() {
        let next = reduce(
            &CollectionState::default(),
            Outcome::Succeeded(Success::Fetched(customer("c7", true))),
        );
        assert!(next.items.is_empty());
        assert_eq!(next.selected, Some(customer("c7", true)));
    }

    #[test]
    fn set_selected_is_verbatim() {
        let some = reduce(
            &CollectionState::default(),
            Outcome::SelectionChanged(Some(customer("zz", false))),
        );
        assert_eq!(some.selected, Some(customer("zz", false)));
        let none = reduce(&some, Outcome::SelectionChanged(None));
        assert_eq!(none.selected, None);
    }

    #[test]
    fn filter_changed_records_menu_filter() {
        let state = CollectionState::<MenuItem>::default();
        let next = reduce(
            &state,
            Outcome::FilterChanged(Some(MenuFilter::Category(MenuCategory::Dessert))),
        );
        assert_eq!(
            next.active_filter,
            Some(MenuFilter::Category(MenuCategory::Dessert))
        );
        assert!(next.items.is_empty());
    }

    #[test]
    fn reset_returns_empty_state() {
        let state = CollectionState {
            items: vec![menu_item("m1", MenuCategory::Pizza, true)],
            selected: Some(menu_item("m1", MenuCategory::Pizza, true)),
            pending: true,
            last_error: Some("x".into()),
            active_filter: Some(MenuFilter::Available),
        };
        assert_eq!(reduce(&state, Outcome::Reset), CollectionState::default());
    }

    // ── Invariants over intent sequences ─────────────────────────────

    /// Deterministic pseudo-random outcome sequence over a small id space.
    fn scripted_outcomes(seed: u64, len: usize) -> Vec<Outcome<Customer>> {
        let mut x = seed;
        let mut next = move || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        (0..len)
            .map(|_| {
                let id = format!("c{}", next() % 5);
                match next() % 8 {
                    0 => Outcome::Started {
                        kind: IntentKind::Update,
                    },
                    1 => Outcome::Succeeded(Success::Created(customer(&id, true))),
                    2 => Outcome::Succeeded(Success::Updated(named_customer(&id, "upd"))),
                    3 => Outcome::Succeeded(Success::StatusChanged(customer(&id, false))),
                    4 => Outcome::Succeeded(Success::Deleted(id.as_str().into())),
                    5 => Outcome::Succeeded(Success::Listed {
                        kind: IntentKind::Load,
                        items: vec![customer(&id, true), customer(&id, false), customer("c0", true)],
                    }),
                    6 => Outcome::SelectionChanged(Some(customer(&id, true))),
                    _ => Outcome::Failed {
                        kind: IntentKind::Delete,
                        error: TransportError::http(500, "boom"),
                    },
                }
            })
            .collect()
    }

    #[test]
    fn ids_stay_unique_and_selection_fresh_for_any_sequence() {
        for seed in 1..=64 {
            let mut state = CollectionState::<Customer>::default();
            for outcome in scripted_outcomes(seed, 200) {
                let touched = match &outcome {
                    Outcome::Succeeded(
                        Success::Created(e) | Success::Updated(e) | Success::StatusChanged(e),
                    ) => Some(e.id.clone()),
                    _ => None,
                };
                state = reduce(&state, outcome);

                let mut seen = Vec::new();
                for item in &state.items {
                    assert!(!seen.contains(&item.id), "duplicate id {}", item.id);
                    seen.push(item.id.clone());
                }

                if let (Some(sel), Some(id)) = (&state.selected, touched) {
                    if sel.id == id {
                        if let Some(item) = state.get(&id) {
                            assert_eq!(item, sel, "selected went stale for {id}");
                        }
                    }
                }
            }
        }
    }
}
