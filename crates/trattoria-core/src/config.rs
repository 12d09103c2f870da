// ── Runtime console configuration ──
//
// Describes *how* to reach the back-office API and tune the stores.
// Never touches disk: the CLI builds a `ConsoleConfig` from its profile
// and hands it in.

use std::time::Duration;

use url::Url;

use crate::store::StoreOptions;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Versioned API base, e.g. `http://localhost:8080/api/v1`.
    pub api_url: Url,
    /// Upper bound for every transport call.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Overrides the default `trattoria/<version>` user agent.
    pub user_agent: Option<String>,
    /// Page size used by list intents when the caller gives none.
    pub page_size: u32,
    pub discard_stale_lists: bool,
    pub transition_buffer: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let store = StoreOptions::default();
        Self {
            api_url: default_api_url(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: None,
            page_size: DEFAULT_PAGE_SIZE,
            discard_stale_lists: store.discard_stale_lists,
            transition_buffer: store.transition_buffer,
        }
    }
}

impl ConsoleConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            discard_stale_lists: self.discard_stale_lists,
            transition_buffer: self.transition_buffer,
        }
    }

    pub(crate) fn transport(&self) -> trattoria_api::TransportConfig {
        let mut transport = trattoria_api::TransportConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout.min(self.timeout),
            ..trattoria_api::TransportConfig::default()
        };
        if let Some(agent) = &self.user_agent {
            transport.user_agent.clone_from(agent);
        }
        transport
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}
