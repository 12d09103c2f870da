// Fixtures and an in-memory transport for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use trattoria_api::{
    CreateCustomerRequest, Customer, EntityId, MenuCategory, MenuItem, Money,
    UpdateCustomerRequest,
};

use crate::entity::CustomerFilter;
use crate::error::TransportError;
use crate::transport::Transport;

fn t0() -> DateTime<Utc> {
    "2024-01-01T10:00:00Z".parse().unwrap()
}

pub(crate) fn customer(id: &str, active: bool) -> Customer {
    Customer {
        id: EntityId::from(id),
        name: format!("Customer {id}"),
        email: format!("{id}@example.com"),
        phone: None,
        address: None,
        created_at: t0(),
        updated_at: t0(),
        active,
    }
}

pub(crate) fn named_customer(id: &str, name: &str) -> Customer {
    Customer {
        name: name.to_owned(),
        ..customer(id, true)
    }
}

pub(crate) fn menu_item(id: &str, category: MenuCategory, available: bool) -> MenuItem {
    MenuItem {
        id: EntityId::from(id),
        name: format!("Dish {id}"),
        description: None,
        price: Money {
            amount: 12.0,
            currency: "EUR".into(),
        },
        category,
        image_url: None,
        available,
        preparation_time_minutes: 15,
        created_at: t0(),
        updated_at: t0(),
    }
}

/// In-memory customer backend.
///
/// Search queries can be given an artificial latency so tests can force
/// settlement order; failures can be armed for the next call.
#[derive(Default)]
pub(crate) struct FakeTransport {
    customers: Mutex<Vec<Customer>>,
    next_failure: Mutex<Option<TransportError>>,
    latency: Mutex<HashMap<String, Duration>>,
    list_latency: Mutex<Option<Duration>>,
    next_id: AtomicUsize,
    pub(crate) calls: AtomicUsize,
}

impl FakeTransport {
    pub(crate) fn with_customers(customers: Vec<Customer>) -> Self {
        let fake = Self::default();
        *fake.customers.lock().unwrap() = customers;
        fake
    }

    pub(crate) fn fail_next(&self, error: TransportError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn delay_search(&self, query: &str, delay: Duration) {
        self.latency.lock().unwrap().insert(query.to_owned(), delay);
    }

    pub(crate) fn delay_list(&self, delay: Duration) {
        *self.list_latency.lock().unwrap() = Some(delay);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find(&self, id: &EntityId) -> Result<Customer, TransportError> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| TransportError::http(404, format!("Customer not found with id: {id}")))
    }

    fn modify(
        &self,
        id: &EntityId,
        f: impl FnOnce(&mut Customer),
    ) -> Result<Customer, TransportError> {
        let mut customers = self.customers.lock().unwrap();
        let slot = customers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| TransportError::http(404, "not found"))?;
        f(slot);
        Ok(slot.clone())
    }
}

impl Transport<Customer> for FakeTransport {
    async fn list(&self, page: u32, size: u32) -> Result<Vec<Customer>, TransportError> {
        let delay = *self.list_latency.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.begin()?;
        let customers = self.customers.lock().unwrap();
        Ok(customers
            .iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: &EntityId) -> Result<Customer, TransportError> {
        self.begin()?;
        self.find(id)
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>, TransportError> {
        let delay = self.latency.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.begin()?;
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.name.contains(query))
            .cloned()
            .collect())
    }

    async fn filter(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, TransportError> {
        match *filter {}
    }

    async fn create(&self, payload: &CreateCustomerRequest) -> Result<Customer, TransportError> {
        self.begin()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Customer {
            id: EntityId::new(format!("new-{n}")),
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            address: payload.address.clone(),
            created_at: t0(),
            updated_at: t0(),
            active: true,
        };
        self.customers.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &UpdateCustomerRequest,
    ) -> Result<Customer, TransportError> {
        self.begin()?;
        self.modify(id, |c| {
            c.name.clone_from(&payload.name);
            c.email.clone_from(&payload.email);
            c.phone.clone_from(&payload.phone);
            c.address.clone_from(&payload.address);
        })
    }

    async fn delete(&self, id: &EntityId) -> Result<(), TransportError> {
        self.begin()?;
        self.find(id)?;
        self.customers.lock().unwrap().retain(|c| &c.id != id);
        Ok(())
    }

    async fn set_status(&self, id: &EntityId, active: bool) -> Result<Customer, TransportError> {
        self.begin()?;
        self.modify(id, |c| c.active = active)
    }
}
