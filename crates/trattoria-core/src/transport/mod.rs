// ── Transport boundary ──
//
// One async operation per remote intent. Implementations perform no
// retries and no caching; every call resolves or rejects within the
// HTTP timeout.

mod http;

use std::future::Future;

use trattoria_api::EntityId;

use crate::entity::Entity;
use crate::error::TransportError;

pub use http::HttpTransport;

/// Network access for one entity kind.
///
/// Substitute a fake implementation to test the effect runner and store
/// without a server.
pub trait Transport<E: Entity>: Send + Sync + 'static {
    fn list(
        &self,
        page: u32,
        size: u32,
    ) -> impl Future<Output = Result<Vec<E>, TransportError>> + Send;

    fn fetch(&self, id: &EntityId) -> impl Future<Output = Result<E, TransportError>> + Send;

    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<E>, TransportError>> + Send;

    fn filter(
        &self,
        filter: &E::Filter,
    ) -> impl Future<Output = Result<Vec<E>, TransportError>> + Send;

    fn create(&self, payload: &E::Create)
    -> impl Future<Output = Result<E, TransportError>> + Send;

    fn update(
        &self,
        id: &EntityId,
        payload: &E::Update,
    ) -> impl Future<Output = Result<E, TransportError>> + Send;

    fn delete(&self, id: &EntityId) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Activate/deactivate a customer, or make a menu item (un)available.
    fn set_status(
        &self,
        id: &EntityId,
        active: bool,
    ) -> impl Future<Output = Result<E, TransportError>> + Send;
}
