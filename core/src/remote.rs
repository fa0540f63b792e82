//! Async item store port and its HTTP adapter.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::ItemClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::Item;

/// Stateless access to the remote item store.
///
/// Implementations do not cache, retry or cancel. Every method is a single
/// round-trip whose failure is returned unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteItemClient: Send + Sync {
    /// All items, in whatever order the backend returns them.
    async fn list_items(&self) -> Result<Vec<Item>, ApiError>;

    async fn get_item(&self, id: &str) -> Result<Item, ApiError>;

    /// Persist `item` (id already assigned) and return the backend's copy.
    async fn create_item(&self, item: &Item) -> Result<Item, ApiError>;

    async fn delete_item(&self, id: &str) -> Result<(), ApiError>;
}

/// `RemoteItemClient` that pairs the sans-io `ItemClient` with a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpItemClient<T = ReqwestTransport> {
    client: ItemClient,
    transport: T,
}

impl<T: Transport> HttpItemClient<T> {
    pub fn new(client: ItemClient, transport: T) -> Self {
        Self { client, transport }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, "sending item request");
        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(%method, %path, status = response.status, "item request completed");
                Ok(response)
            }
            Err(e) => {
                warn!(%method, %path, error = %e, "item request failed");
                Err(e)
            }
        }
    }
}

impl HttpItemClient<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            ItemClient::new(&config.base_url),
            ReqwestTransport::new(config.timeout),
        )
    }
}

#[async_trait]
impl<T: Transport> RemoteItemClient for HttpItemClient<T> {
    async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        let response = self.send(self.client.build_list_items()).await?;
        self.client.parse_list_items(response)
    }

    async fn get_item(&self, id: &str) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_get_item(id)?).await?;
        self.client.parse_get_item(response)
    }

    async fn create_item(&self, item: &Item) -> Result<Item, ApiError> {
        let response = self.send(self.client.build_create_item(item)?).await?;
        self.client.parse_create_item(response)
    }

    async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_item(id)?).await?;
        self.client.parse_delete_item(response)
    }
}
