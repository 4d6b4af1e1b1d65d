//! Shared handler state.

use std::sync::Arc;

use lewiscal_providers::{CuratedEvents, IcsClient, UrlStore};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// State shared by all request handlers. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    client: IcsClient,
    curated: Arc<CuratedEvents>,
    store: UrlStore,
}

impl AppState {
    /// Builds the state from configuration.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let client = IcsClient::new(config.fetch.clone())?;
        let curated = if config.include_curated {
            CuratedEvents::scholarship()
        } else {
            CuratedEvents::empty()
        };
        let store = UrlStore::new(config.storage_path.clone());

        Ok(Self {
            config: Arc::new(config),
            client,
            curated: Arc::new(curated),
            store,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn client(&self) -> &IcsClient {
        &self.client
    }

    pub fn curated(&self) -> &CuratedEvents {
        &self.curated
    }

    pub fn store(&self) -> &UrlStore {
        &self.store
    }
}
