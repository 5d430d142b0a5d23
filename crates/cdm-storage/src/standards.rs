//! Read-only adapter over the published CDM standard schema documents.
//!
//! Backs the reserved `cdm` namespace. Requires no credentials.

use crate::{normalize_path, StorageAdapter, StorageError, StorageResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Public location of the logical CDM schema documents
pub const STANDARDS_ENDPOINT: &str = "https://cdm-schema.microsoft.com/logical";

/// Standards schema implementation of StorageAdapter
#[derive(Debug, Clone)]
pub struct StandardsAdapter {
    endpoint: String,
    client: Client,
}

impl StandardsAdapter {
    /// Create an adapter for the public schema distribution
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            endpoint: STANDARDS_ENDPOINT.to_string(),
            client,
        }
    }

    /// Read from a mirror instead of the public endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Base URL documents are read from
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for StandardsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageAdapter for StandardsAdapter {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        false
    }

    async fn read(&self, path: &str) -> StorageResult<String> {
        let path = normalize_path(path)?;
        let url = format!("{}{}", self.endpoint, path);
        debug!("Fetching standard schema document {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.into()))?;

        match response.status() {
            StatusCode::OK => response
                .text()
                .await
                .map_err(|e| StorageError::BackendError(e.into())),
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(path)),
            status => Err(StorageError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn write(&self, _path: &str, _data: &str) -> StorageResult<()> {
        Err(StorageError::ReadOnly("standards".to_string()))
    }

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any where Self: 'static {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_capabilities() {
        let adapter = StandardsAdapter::new();
        assert!(adapter.can_read());
        assert!(!adapter.can_write());
        assert_eq!(adapter.endpoint(), STANDARDS_ENDPOINT);
    }

    #[tokio::test]
    async fn test_write_is_rejected() {
        let adapter = StandardsAdapter::new();
        let result = adapter.write("/foundations.cdm.json", "{}").await;
        assert!(matches!(result, Err(StorageError::ReadOnly(_))));
    }

    #[tokio::test]
    async fn test_read_from_mirror() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/foundations.cdm.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"imports\":[]}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/nope.cdm.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let adapter = StandardsAdapter::new().with_endpoint(format!("{}/", mock_server.uri()));

        let data = adapter.read("foundations.cdm.json").await.unwrap();
        assert_eq!(data, "{\"imports\":[]}");

        let missing = adapter.read("/nope.cdm.json").await;
        assert!(matches!(missing, Err(StorageError::NotFound(_))));
        assert!(!adapter.exists("/nope.cdm.json").await.unwrap());
    }
}
