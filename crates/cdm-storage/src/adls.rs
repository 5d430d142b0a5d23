//! Azure Data Lake Storage Gen2 implementation of StorageAdapter
//!
//! This implementation talks to the ADLS Gen2 REST API (`dfs` endpoint) and
//! authenticates every request with the header value supplied by a
//! [`TokenProvider`].

use crate::{normalize_path, StorageAdapter, StorageError, StorageResult, TokenProvider};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// REST API version sent with every request
pub const ADLS_API_VERSION: &str = "2020-02-10";

/// ADLS Gen2 implementation of StorageAdapter
#[derive(Debug, Clone)]
pub struct AdlsAdapter {
    /// Account host, e.g. `myaccount.dfs.core.windows.net`
    host: String,

    /// `<filesystem>/<sub/path>` prefix, without surrounding slashes
    root: String,

    /// Source of the `Authorization` header
    token_provider: Option<Arc<dyn TokenProvider>>,

    /// Base URL requests are sent to
    endpoint: String,

    /// HTTP client
    client: Client,
}

impl AdlsAdapter {
    /// Create a new AdlsAdapter for `host` rooted at `root`
    pub fn new(
        host: impl Into<String>,
        root: impl Into<String>,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> StorageResult<Self> {
        let host = host.into();
        let root = root.into().trim_matches('/').to_string();

        if host.trim().is_empty() {
            return Err(StorageError::ConfigurationError(
                "ADLS host must not be empty".to_string(),
            ));
        }
        if root.is_empty() {
            return Err(StorageError::ConfigurationError(
                "ADLS root must name at least a filesystem".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            endpoint: format!("https://{}", host),
            host,
            root,
            token_provider,
            client,
        })
    }

    /// Send requests to `endpoint` instead of `https://{host}`
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Account host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Filesystem and path prefix
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Build the URL of a file below the root
    fn file_url(&self, path: &str) -> StorageResult<Url> {
        let path = normalize_path(path)?;
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            StorageError::ConfigurationError(format!("Invalid endpoint {}: {}", self.endpoint, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                StorageError::ConfigurationError(format!(
                    "Endpoint cannot carry a path: {}",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(self.root.split('/').filter(|s| !s.is_empty()))
            .extend(path.split('/').filter(|s| !s.is_empty()));

        Ok(url)
    }

    /// Attach the version, date and authorization headers
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let request = request
            .header("x-ms-version", ADLS_API_VERSION)
            .header("x-ms-date", date);

        match self.token_provider.as_ref().map(|p| p.get_token()) {
            Some(token) if !token.is_empty() => request.header(AUTHORIZATION, token),
            _ => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StorageResult<Response> {
        self.decorate(request)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.into()))
    }

    /// Turn a non-success response into a StorageError
    async fn check_status(response: Response, action: &str, path: &str) -> StorageResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(path.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        error!("Failed to {} {}: status {}, body {}", action, path, status, body);
        Err(StorageError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl StorageAdapter for AdlsAdapter {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        true
    }

    async fn read(&self, path: &str) -> StorageResult<String> {
        let url = self.file_url(path)?;
        debug!("Reading {} from {}", path, self.host);

        let response = self.send(self.client.get(url)).await?;
        let response = Self::check_status(response, "read", path).await?;

        response
            .text()
            .await
            .map_err(|e| StorageError::BackendError(e.into()))
    }

    async fn write(&self, path: &str, data: &str) -> StorageResult<()> {
        let url = self.file_url(path)?;
        let length = data.len().to_string();
        debug!("Writing {} ({} bytes) to {}", path, length, self.host);

        // Create (or truncate) the file
        let response = self
            .send(
                self.client
                    .put(url.clone())
                    .query(&[("resource", "file")])
                    .body(Vec::new()),
            )
            .await?;
        Self::check_status(response, "create", path).await?;

        // Upload the content at position 0
        let response = self
            .send(
                self.client
                    .patch(url.clone())
                    .query(&[("action", "append"), ("position", "0")])
                    .header(CONTENT_TYPE, "application/json; charset=utf-8")
                    .body(data.to_string()),
            )
            .await?;
        Self::check_status(response, "append", path).await?;

        // Commit everything appended so far
        let response = self
            .send(
                self.client
                    .patch(url)
                    .query(&[("action", "flush"), ("position", length.as_str())])
                    .body(Vec::new()),
            )
            .await?;
        Self::check_status(response, "flush", path).await?;

        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let url = self.file_url(path)?;
        let response = self.send(self.client.head(url)).await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StorageError::Http {
                status: status.as_u16(),
                body: String::new(),
            }),
        }
    }

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any where Self: 'static {
        self
    }
}
