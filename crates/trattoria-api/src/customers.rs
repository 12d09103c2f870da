// Customer endpoints
//
// All routes hang off `{base}/customers`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateCustomerRequest, Customer, EntityId, UpdateCustomerRequest};

const RESOURCE: &str = "customers";

impl ApiClient {
    /// `GET /customers?page=&size=`
    pub async fn list_customers(&self, page: u32, size: u32) -> Result<Vec<Customer>, Error> {
        let url = self.resource_url(&[RESOURCE])?;
        self.get_with_params(
            url,
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    /// `GET /customers/{id}`
    pub async fn get_customer(&self, id: &EntityId) -> Result<Customer, Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str()])?;
        self.get(url).await
    }

    /// `GET /customers/by-email?email=`
    pub async fn get_customer_by_email(&self, email: &str) -> Result<Customer, Error> {
        let url = self.resource_url(&[RESOURCE, "by-email"])?;
        self.get_with_params(url, &[("email", email.to_owned())])
            .await
    }

    /// `GET /customers/search?name=`
    pub async fn search_customers(&self, name: &str) -> Result<Vec<Customer>, Error> {
        let url = self.resource_url(&[RESOURCE, "search"])?;
        self.get_with_params(url, &[("name", name.to_owned())]).await
    }

    pub async fn create_customer(&self, body: &CreateCustomerRequest) -> Result<Customer, Error> {
        let url = self.resource_url(&[RESOURCE])?;
        debug!(name = %body.name, "creating customer");
        self.post(url, body).await
    }

    pub async fn update_customer(
        &self,
        id: &EntityId,
        body: &UpdateCustomerRequest,
    ) -> Result<Customer, Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str()])?;
        self.put(url, body).await
    }

    pub async fn delete_customer(&self, id: &EntityId) -> Result<(), Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str()])?;
        self.delete(url).await
    }

    /// `PATCH /customers/{id}/activate`
    pub async fn activate_customer(&self, id: &EntityId) -> Result<Customer, Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str(), "activate"])?;
        self.patch(url).await
    }

    /// `PATCH /customers/{id}/deactivate`
    pub async fn deactivate_customer(&self, id: &EntityId) -> Result<Customer, Error> {
        let url = self.resource_url(&[RESOURCE, id.as_str(), "deactivate"])?;
        self.patch(url).await
    }
}
