//! API session shared by every entity
//!
//! A `StockbookClient` bundles the transport, the URL provider, and the
//! relation registry. Entities keep an `Arc` to the client that produced
//! them and use it for every further request.

use std::sync::Arc;
use thiserror::Error;

use crate::core::config::{Config, ConfigError};
use crate::core::relations::RelationRegistry;
use crate::core::transport::{HttpTransport, Transport, TransportError};
use crate::core::urls::UrlProvider;

/// Errors that can occur when opening a session
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// One authenticated session against the remote API
pub struct StockbookClient {
    transport: Box<dyn Transport>,
    urls: UrlProvider,
    relations: RelationRegistry,
}

impl StockbookClient {
    /// Open a session from resolved configuration
    pub fn new(config: &Config) -> Result<Arc<Self>, ClientError> {
        let (login, password) = config.credentials()?;
        let transport = HttpTransport::new(login, password)?;
        Ok(Self::with_transport(Box::new(transport), &config.base_url()))
    }

    /// Build a session over an arbitrary transport with the default
    /// relation registry. This is also the test seam.
    pub fn with_transport(transport: Box<dyn Transport>, base_url: &str) -> Arc<Self> {
        Self::with_registry(transport, base_url, RelationRegistry::new())
    }

    /// Build a session with a custom relation registry
    pub fn with_registry(
        transport: Box<dyn Transport>,
        base_url: &str,
        relations: RelationRegistry,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport,
            urls: UrlProvider::new(base_url),
            relations,
        })
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn urls(&self) -> &UrlProvider {
        &self.urls
    }

    pub fn relations(&self) -> &RelationRegistry {
        &self.relations
    }
}
