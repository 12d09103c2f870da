// ── Console facade ──
//
// One per process. Owns the customer and menu stores and their driver
// tasks; constructed once and passed by reference to every consumer.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use trattoria_api::{ApiClient, Customer, MenuItem};

use crate::config::ConsoleConfig;
use crate::entity::Entity;
use crate::error::CoreError;
use crate::intent::Intent;
use crate::store::{Store, active_count, item_count};
use crate::transport::{HttpTransport, Transport};

/// Page size the dashboard loads with.
pub const DASHBOARD_PAGE_SIZE: u32 = 100;

fn dashboard_load<E: Entity>() -> Intent<E> {
    Intent::Load {
        page: 0,
        size: DASHBOARD_PAGE_SIZE,
    }
}

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: usize,
    pub active_customers: usize,
    pub total_menu_items: usize,
    pub available_menu_items: usize,
}

pub struct Console {
    config: ConsoleConfig,
    http: Option<HttpTransport>,
    customers: Store<Customer>,
    menu: Store<MenuItem>,
}

impl Console {
    /// Build the HTTP transport from `config` and start both stores.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.api_url.as_str(), &config.transport())?;
        let http = HttpTransport::new(client);
        info!(api_url = %config.api_url, "console ready");

        let shared = Arc::new(http.clone());
        let mut console = Self::with_transports(config, Arc::clone(&shared), shared)?;
        console.http = Some(http);
        Ok(console)
    }

    /// Start both stores over caller-supplied transports.
    pub fn with_transports<C, M>(
        config: ConsoleConfig,
        customers: Arc<C>,
        menu: Arc<M>,
    ) -> Result<Self, CoreError>
    where
        C: Transport<Customer>,
        M: Transport<MenuItem>,
    {
        let options = config.store_options();
        Ok(Self {
            customers: Store::spawn(customers, &options)?,
            menu: Store::spawn(menu, &options)?,
            http: None,
            config,
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn customers(&self) -> &Store<Customer> {
        &self.customers
    }

    pub fn menu(&self) -> &Store<MenuItem> {
        &self.menu
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Stats over whatever the stores currently hold.
    pub fn dashboard(&self) -> DashboardStats {
        let customers = self.customers.state();
        let menu = self.menu.state();
        DashboardStats {
            total_customers: item_count(&customers),
            active_customers: active_count(&customers),
            total_menu_items: item_count(&menu),
            available_menu_items: active_count(&menu),
        }
    }

    /// Reload both collections, then compute dashboard stats.
    pub async fn refresh_dashboard(&self) -> Result<DashboardStats, CoreError> {
        debug!("refreshing dashboard");
        let (customers, menu) = tokio::join!(
            self.customers.settle(dashboard_load()),
            self.menu.settle(dashboard_load())
        );
        customers?;
        menu?;
        Ok(self.dashboard())
    }

    /// Look up a customer by e-mail and make it the selected customer.
    pub async fn select_customer_by_email(&self, email: &str) -> Result<Customer, CoreError> {
        let http = self.http.as_ref().ok_or_else(|| CoreError::Config {
            message: "customer lookup by e-mail needs the HTTP transport".into(),
        })?;
        let customer = http.customer_by_email(email).await?;
        self.customers
            .settle(Intent::SetSelected {
                entity: Some(customer.clone()),
            })
            .await?;
        debug!(id = %customer.id(), "customer selected by e-mail");
        Ok(customer)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Stop both stores, letting in-flight calls settle.
    pub async fn shutdown(&self) {
        tokio::join!(self.customers.shutdown(), self.menu.shutdown());
        debug!("console shut down");
    }
}
