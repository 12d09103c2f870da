// ── Entity abstraction ──
//
// Everything the engine needs to know about a record type: its id, the
// payloads its create/update intents carry, and the server-side filters
// its collection supports.

use std::fmt::Debug;

use trattoria_api::{
    CreateCustomerRequest, CreateMenuItemRequest, Customer, EntityId, MenuCategory, MenuItem,
    UpdateCustomerRequest, UpdateMenuItemRequest,
};

/// Which collection an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Customer,
    MenuItem,
}

impl EntityKind {
    /// REST resource segment for this kind.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Customer => "customers",
            Self::MenuItem => "menu-items",
        }
    }
}

/// A record managed by a [`Store`](crate::Store).
///
/// Equality for reducer purposes is by [`id`](Entity::id) only; the
/// `PartialEq` bound is for change detection by observers.
pub trait Entity: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Payload of a `Create` intent.
    type Create: Clone + Debug + Send + Sync + 'static;
    /// Payload of an `Update` intent.
    type Update: Clone + Debug + Send + Sync + 'static;
    /// Server-side list filter accepted by `Filter` / `SetFilter`.
    type Filter: Clone + Debug + PartialEq + Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> &EntityId;

    /// Active customer / available menu item.
    fn is_active(&self) -> bool;
}

// ── Filters ─────────────────────────────────────────────────────────

/// Customers have no server-side filter endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerFilter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFilter {
    /// `GET /menu-items/by-category`
    Category(MenuCategory),
    /// `GET /menu-items/available`
    Available,
}

// ── Implementations ─────────────────────────────────────────────────

impl Entity for Customer {
    type Create = CreateCustomerRequest;
    type Update = UpdateCustomerRequest;
    type Filter = CustomerFilter;

    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Entity for MenuItem {
    type Create = CreateMenuItemRequest;
    type Update = UpdateMenuItemRequest;
    type Filter = MenuFilter;

    const KIND: EntityKind = EntityKind::MenuItem;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.available
    }
}
