//! Credential adapter
//!
//! Bridges an identity source that can mint scoped access tokens to the
//! pull-based [`TokenProvider`] the Data Lake adapter reads its
//! `Authorization` header from.
//!
//! The token is fetched once by [`TokenAdapter::authenticate`] and held for the
//! lifetime of the adapter. It is never refreshed automatically.

use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use cdm_storage::TokenProvider;

/// Scope requested for Azure Storage access
pub const STORAGE_SCOPE: &str = "https://storage.azure.com/.default";

/// A token minted by an identity source
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Raw token value
    pub token: String,
}

impl AccessToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken").field("token", &"[REDACTED]").finish()
    }
}

/// Errors an identity source can report
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The source cannot produce tokens in this environment
    #[error("Credential unavailable: {0}")]
    Unavailable(String),

    /// The token request was attempted and failed
    #[error("Token request failed: {0}")]
    RequestFailed(String),
}

/// An identity source able to mint a token for a scope
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Request a token for `scope`. `Ok(None)` means no token was issued.
    async fn get_token(&self, scope: &str) -> Result<Option<AccessToken>, CredentialError>;
}

/// Credential returning a fixed token (or none)
#[derive(Clone, Default)]
pub struct StaticTokenCredential {
    token: Option<String>,
}

impl StaticTokenCredential {
    /// Always issue `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Never issue a token
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scope: &str) -> Result<Option<AccessToken>, CredentialError> {
        Ok(self.token.clone().map(AccessToken::new))
    }
}

/// Caches the storage token of a [`TokenCredential`] and exposes it as a bearer header
pub struct TokenAdapter {
    credential: Arc<dyn TokenCredential>,
    token: RwLock<Option<String>>,
}

impl TokenAdapter {
    /// Adapter over `credential`, not yet authenticated
    pub fn new(credential: Arc<dyn TokenCredential>) -> Self {
        Self {
            credential,
            token: RwLock::new(None),
        }
    }

    /// Request a storage-scoped token and cache it.
    ///
    /// Returns `false` when no token was issued or the request failed; never errors.
    pub async fn authenticate(&self) -> bool {
        match self.credential.get_token(STORAGE_SCOPE).await {
            Ok(Some(access)) => {
                if let Ok(mut token) = self.token.write() {
                    *token = Some(access.token);
                    debug!(scope = STORAGE_SCOPE, "Cached storage token");
                    true
                } else {
                    warn!("Token cache lock poisoned");
                    false
                }
            }
            Ok(None) => {
                debug!(scope = STORAGE_SCOPE, "Credential issued no token");
                false
            }
            Err(e) => {
                warn!(scope = STORAGE_SCOPE, error = %e, "Token request failed");
                false
            }
        }
    }

    /// Whether a token has been cached
    pub fn is_authenticated(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    /// Cached token as `Bearer <token>`, or an empty string before authentication
    pub fn get_token(&self) -> String {
        match self.token.read() {
            Ok(token) => token
                .as_ref()
                .map(|t| format!("Bearer {}", t))
                .unwrap_or_default(),
            Err(_) => String::new(),
        }
    }
}

impl fmt::Debug for TokenAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAdapter")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl TokenProvider for TokenAdapter {
    fn get_token(&self) -> String {
        TokenAdapter::get_token(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_caches_token() {
        let mut credential = MockTokenCredential::new();
        credential
            .expect_get_token()
            .withf(|scope: &str| scope == STORAGE_SCOPE)
            .times(1)
            .returning(|_| Ok(Some(AccessToken::new("tok123"))));

        let adapter = TokenAdapter::new(Arc::new(credential));
        assert!(!adapter.is_authenticated());

        assert!(adapter.authenticate().await);
        assert!(adapter.is_authenticated());
        assert_eq!(adapter.get_token(), "Bearer tok123");
    }

    #[tokio::test]
    async fn test_no_token_returns_false() {
        let mut credential = MockTokenCredential::new();
        credential.expect_get_token().returning(|_| Ok(None));

        let adapter = TokenAdapter::new(Arc::new(credential));

        assert!(!adapter.authenticate().await);
        assert_eq!(adapter.get_token(), "");
    }

    #[tokio::test]
    async fn test_credential_error_returns_false() {
        let mut credential = MockTokenCredential::new();
        credential
            .expect_get_token()
            .returning(|_| Err(CredentialError::Unavailable("no managed identity".to_string())));

        let adapter = TokenAdapter::new(Arc::new(credential));

        assert!(!adapter.authenticate().await);
        assert!(!adapter.is_authenticated());
    }

    #[tokio::test]
    async fn test_token_provider_view() {
        let adapter = TokenAdapter::new(Arc::new(StaticTokenCredential::new("abc")));
        adapter.authenticate().await;

        let provider: &dyn TokenProvider = &adapter;
        assert_eq!(provider.get_token(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_static_credential() {
        let issued = StaticTokenCredential::new("abc").get_token(STORAGE_SCOPE).await.unwrap();
        assert_eq!(issued, Some(AccessToken::new("abc")));

        let none = StaticTokenCredential::empty().get_token(STORAGE_SCOPE).await.unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let token = AccessToken::new("secret-value");
        assert!(!format!("{:?}", token).contains("secret-value"));

        let adapter = TokenAdapter::new(Arc::new(StaticTokenCredential::new("secret-value")));
        assert!(!format!("{:?}", adapter).contains("secret-value"));
    }
}
