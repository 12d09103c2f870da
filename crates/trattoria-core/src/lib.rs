//! State-synchronization engine between `trattoria-api` and UI consumers.
//!
//! One generic engine, instantiated once per entity kind:
//!
//! - **[`Intent`]** -- closed set of caller requests (load, search, create,
//!   update, delete, toggle-status, plus the local clear-error / select /
//!   set-filter). Remote intents imply exactly one [`Transport`] call.
//!
//! - **[`reduce`]** -- pure `(state, outcome) -> state` fold of the
//!   started / succeeded / failed [`Outcome`] of each intent.
//!
//! - **Effect runner** -- turns intents into transport calls and feeds
//!   every outcome back through the reducer; calls run on a per-store
//!   background task.
//!
//! - **[`Store`]** -- holds one [`CollectionState`] behind a `watch`
//!   channel. [`dispatch()`](Store::dispatch) is fire-and-forget; changes
//!   are observed through [`StateStream`], [`Selector`] or the ordered
//!   [`Transition`] feed.
//!
//! - **[`Console`]** -- owns the customer and menu stores for one process
//!   and is passed explicitly to every consumer.

pub mod config;
pub mod console;
pub mod entity;
pub mod error;
pub mod intent;
pub mod outcome;
pub mod reducer;
mod runner;
pub mod state;
pub mod store;
pub mod transport;

#[cfg(test)]
mod test_support;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ConsoleConfig;
pub use console::{Console, DASHBOARD_PAGE_SIZE, DashboardStats};
pub use entity::{CustomerFilter, Entity, EntityKind, MenuFilter};
pub use error::{CoreError, TransportError, TransportErrorKind};
pub use intent::{Intent, IntentKind};
pub use outcome::{Outcome, Phase, Settled, Success};
pub use reducer::reduce;
pub use state::CollectionState;
pub use store::{
    Selector, StateStream, StateWatchStream, Store, StoreOptions, Transition, active_count,
    item_count,
};
pub use transport::{HttpTransport, Transport};

// Wire models double as the engine's entities.
pub use trattoria_api::{
    CreateCustomerRequest, CreateMenuItemRequest, Customer, EntityId, MenuCategory, MenuItem,
    Money, UpdateCustomerRequest, UpdateMenuItemRequest,
};
