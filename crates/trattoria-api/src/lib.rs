// trattoria-api: Async Rust client for the restaurant back-office REST API.
//
// Customers live under `{base}/customers`, menu items under
// `{base}/menu-items`. The base URL carries the versioned API prefix
// (e.g. `http://localhost:8080/api/v1`).

pub mod client;
mod customers;
pub mod error;
mod menu;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    CreateCustomerRequest, CreateMenuItemRequest, Customer, EntityId, MenuCategory, MenuItem,
    Money, UpdateCustomerRequest, UpdateMenuItemRequest,
};
pub use transport::TransportConfig;
