// ── Selectors ──
//
// Read-only derived views over a store's state. The projection runs on
// demand against the latest snapshot; nothing is cached.

use std::sync::Arc;

use tokio::sync::watch;

use crate::entity::Entity;
use crate::state::CollectionState;

type Projection<E, T> = Arc<dyn Fn(&CollectionState<E>) -> T + Send + Sync>;

/// A lazily recomputed projection of one collection's state.
pub struct Selector<E: Entity, T> {
    receiver: watch::Receiver<Arc<CollectionState<E>>>,
    projection: Projection<E, T>,
}

impl<E: Entity, T> Clone for Selector<E, T> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            projection: Arc::clone(&self.projection),
        }
    }
}

impl<E: Entity, T> Selector<E, T> {
    pub(crate) fn new(
        receiver: watch::Receiver<Arc<CollectionState<E>>>,
        projection: impl Fn(&CollectionState<E>) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            receiver,
            projection: Arc::new(projection),
        }
    }

    /// Project the latest state.
    pub fn get(&self) -> T {
        let snap = Arc::clone(&self.receiver.borrow());
        (self.projection)(&snap)
    }
}

impl<E: Entity, T: PartialEq> Selector<E, T> {
    /// Wait until the projected value differs from its value at call time.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        let before = {
            let snap = Arc::clone(&self.receiver.borrow_and_update());
            (self.projection)(&snap)
        };
        loop {
            self.receiver.changed().await.ok()?;
            let snap = Arc::clone(&self.receiver.borrow_and_update());
            let now = (self.projection)(&snap);
            if now != before {
                return Some(now);
            }
        }
    }
}

// ── Built-in projections ────────────────────────────────────────────

/// Number of entities in the collection.
pub fn item_count<E: Entity>(state: &CollectionState<E>) -> usize {
    state.len()
}

/// Active customers / available menu items.
pub fn active_count<E: Entity>(state: &CollectionState<E>) -> usize {
    state.active_count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::intent::IntentKind;
    use crate::outcome::{Outcome, Success};
    use crate::store::cell::StateCell;
    use crate::test_support::customer;
    use trattoria_api::Customer;

    #[test]
    fn get_reflects_latest_state() {
        let cell = StateCell::<Customer>::new(4);
        let active = Selector::new(cell.subscribe(), active_count);
        assert_eq!(active.get(), 0);

        cell.apply(Outcome::Succeeded(Success::Listed {
            kind: IntentKind::Load,
            items: vec![customer("c1", true), customer("c2", false), customer("c3", true)],
        }));
        assert_eq!(active.get(), 2);
    }

    #[tokio::test]
    async fn changed_skips_steps_that_keep_the_projection() {
        let cell = Arc::new(StateCell::<Customer>::new(4));
        let mut total = Selector::new(cell.subscribe(), item_count);

        let writer = Arc::clone(&cell);
        let task = tokio::spawn(async move {
            writer.apply(Outcome::Started {
                kind: IntentKind::Create,
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
            writer.apply(Outcome::Succeeded(Success::Created(customer("c1", true))));
        });

        assert_eq!(total.changed().await, Some(1));
        task.await.unwrap();
    }
}
