// HTTP transport over `trattoria_api::ApiClient`.

use std::sync::Arc;

use trattoria_api::{
    ApiClient, CreateCustomerRequest, CreateMenuItemRequest, Customer, EntityId, MenuItem,
    UpdateCustomerRequest, UpdateMenuItemRequest,
};

use super::Transport;
use crate::entity::{CustomerFilter, MenuFilter};
use crate::error::TransportError;

/// Shared HTTP transport; one instance serves both entity kinds.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Arc<ApiClient>,
}

impl HttpTransport {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Look up a customer by e-mail address. Not an intent: the result is
    /// handed to the caller, who may feed it back with `SetSelected`.
    pub async fn customer_by_email(&self, email: &str) -> Result<Customer, TransportError> {
        Ok(self.client.get_customer_by_email(email).await?)
    }
}

// ── Customers ───────────────────────────────────────────────────────

impl Transport<Customer> for HttpTransport {
    async fn list(&self, page: u32, size: u32) -> Result<Vec<Customer>, TransportError> {
        Ok(self.client.list_customers(page, size).await?)
    }

    async fn fetch(&self, id: &EntityId) -> Result<Customer, TransportError> {
        Ok(self.client.get_customer(id).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>, TransportError> {
        Ok(self.client.search_customers(query).await?)
    }

    async fn filter(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, TransportError> {
        match *filter {}
    }

    async fn create(&self, payload: &CreateCustomerRequest) -> Result<Customer, TransportError> {
        Ok(self.client.create_customer(payload).await?)
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdateCustomerRequest,
    ) -> Result<Customer, TransportError> {
        Ok(self.client.update_customer(id, payload).await?)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), TransportError> {
        Ok(self.client.delete_customer(id).await?)
    }

    async fn set_status(&self, id: &EntityId, active: bool) -> Result<Customer, TransportError> {
        let result = if active {
            self.client.activate_customer(id).await
        } else {
            self.client.deactivate_customer(id).await
        };
        Ok(result?)
    }
}

// ── Menu items ──────────────────────────────────────────────────────

impl Transport<MenuItem> for HttpTransport {
    async fn list(&self, page: u32, size: u32) -> Result<Vec<MenuItem>, TransportError> {
        Ok(self.client.list_menu_items(page, size).await?)
    }

    async fn fetch(&self, id: &EntityId) -> Result<MenuItem, TransportError> {
        Ok(self.client.get_menu_item(id).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<MenuItem>, TransportError> {
        Ok(self.client.search_menu_items(query).await?)
    }

    async fn filter(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, TransportError> {
        let items = match *filter {
            MenuFilter::Category(category) => self.client.menu_items_by_category(category).await,
            MenuFilter::Available => self.client.available_menu_items().await,
        };
        Ok(items?)
    }

    async fn create(&self, payload: &CreateMenuItemRequest) -> Result<MenuItem, TransportError> {
        Ok(self.client.create_menu_item(payload).await?)
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdateMenuItemRequest,
    ) -> Result<MenuItem, TransportError> {
        Ok(self.client.update_menu_item(id, payload).await?)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), TransportError> {
        Ok(self.client.delete_menu_item(id).await?)
    }

    async fn set_status(&self, id: &EntityId, active: bool) -> Result<MenuItem, TransportError> {
        Ok(self.client.set_menu_item_availability(id, active).await?)
    }
}
