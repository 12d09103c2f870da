// Menu item endpoints
//
// All routes hang off `{base}/menu-items`. Availability toggles use two
// distinct PATCH routes rather than a body flag.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    CreateMenuItemRequest, EntityId, MenuCategory, MenuItem, UpdateMenuItemRequest,
};

const RESOURCE: &str = "menu-items";

impl ApiClient {
    /// `GET /menu-items?page=&size=`
    pub async fn list_menu_items(&self, page: u32, size: u32) -> Result<Vec<MenuItem>, Error> {
        let url = self.resource_url(&[RESOURCE])?;
        self.get_with_params(
            url,
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    pub async fn get_menu_item(&self, id: &EntityId) -> Result<MenuItem, Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str()])?;
        self.get(url).await
    }

    /// `GET /menu-items/by-category?category=`
    pub async fn menu_items_by_category(
        &self,
        category: MenuCategory,
    ) -> Result<Vec<MenuItem>, Error> {
        let url = self.resource_url(&[RESOURCE, "by-category"])?;
        self.get_with_params(url, &[("category", category.to_string())])
            .await
    }

    /// `GET /menu-items/available`
    pub async fn available_menu_items(&self) -> Result<Vec<MenuItem>, Error> {
        let url = self.resource_url(&[RESOURCE, "available"])?;
        self.get(url).await
    }

    /// `GET /menu-items/search?name=`
    pub async fn search_menu_items(&self, name: &str) -> Result<Vec<MenuItem>, Error> {
        let url = self.resource_url(&[RESOURCE, "search"])?;
        self.get_with_params(url, &[("name", name.to_owned())]).await
    }

    pub async fn create_menu_item(&self, body: &CreateMenuItemRequest) -> Result<MenuItem, Error> {
        let url = self.resource_url(&[RESOURCE])?;
        debug!(name = %body.name, category = %body.category, "creating menu item");
        self.post(url, body).await
    }

    pub async fn update_menu_item(
        &self,
        id: &EntityId,
        body: &UpdateMenuItemRequest,
    ) -> Result<MenuItem, Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str()])?;
        self.put(url, body).await
    }

    pub async fn delete_menu_item(&self, id: &EntityId) -> Result<(), Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str()])?;
        self.delete(url).await
    }

    /// `PATCH /menu-items/{id}/make-available` or `/make-unavailable`
    pub async fn set_menu_item_availability(
        &self,
        id: &EntityId,
        available: bool,
    ) -> Result<MenuItem, Error> {
        let action = if available {
            "make-available"
        } else {
            "make-unavailable"
        };
        let url = self.resource_url(&[RESOURCE, id.as_str(), action])?;
        debug!(%id, available, "setting menu item availability");
        self.patch(url).await
    }
}
