//! Corpus session
//!
//! [`ManifestWriter`] owns the corpus and the optional token adapter. Model
//! building and persistence live in the `builder` and `persister` modules as
//! further `impl` blocks on the same type.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use cdm_core::{Corpus, FolderItem};
use cdm_storage::{AdlsAdapter, StandardsAdapter, StorageAdapter, TokenProvider};

use crate::config::WriterConfig;
use crate::credential::{TokenAdapter, TokenCredential};
use crate::error::{WriterError, WriterResult};

/// Result of [`ManifestWriter::authenticate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No credential source was supplied; nothing to do
    NotConfigured,
    /// A token was issued and cached
    Authenticated,
    /// The credential source issued no token or failed
    Rejected,
}

impl AuthOutcome {
    /// Whether a token is now available
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated)
    }
}

impl fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOutcome::NotConfigured => write!(f, "not configured"),
            AuthOutcome::Authenticated => write!(f, "authenticated"),
            AuthOutcome::Rejected => write!(f, "rejected"),
        }
    }
}

/// Builds a CDM manifest and saves it to a mounted remote namespace
#[derive(Debug)]
pub struct ManifestWriter {
    pub(crate) config: WriterConfig,
    token_adapter: Option<Arc<TokenAdapter>>,
    pub(crate) corpus: Option<Corpus>,
}

impl ManifestWriter {
    /// Create a writer. Without a credential no token adapter is created and
    /// the remote namespace is accessed anonymously.
    pub fn new(
        config: WriterConfig,
        credential: Option<Arc<dyn TokenCredential>>,
    ) -> WriterResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            token_adapter: credential.map(|c| Arc::new(TokenAdapter::new(c))),
            corpus: None,
        })
    }

    /// Create a writer from an account name, a path and a credential, all optional
    pub fn from_parts(
        storage_account_name: Option<&str>,
        storage_path: Option<&str>,
        credential: Option<Arc<dyn TokenCredential>>,
    ) -> WriterResult<Self> {
        Self::new(
            WriterConfig::new(storage_account_name, storage_path),
            credential,
        )
    }

    /// Active configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Token adapter, when a credential was supplied
    pub fn token_adapter(&self) -> Option<&Arc<TokenAdapter>> {
        self.token_adapter.as_ref()
    }

    /// Fetch and cache a storage token. Never fails; the outcome is logged and returned.
    pub async fn authenticate(&self) -> AuthOutcome {
        let outcome = match &self.token_adapter {
            None => AuthOutcome::NotConfigured,
            Some(adapter) => {
                if adapter.authenticate().await {
                    AuthOutcome::Authenticated
                } else {
                    AuthOutcome::Rejected
                }
            }
        };

        match outcome {
            AuthOutcome::NotConfigured => debug!("No credential configured, skipping authentication"),
            AuthOutcome::Authenticated => info!(authenticated = true, "user authenticated"),
            AuthOutcome::Rejected => warn!(authenticated = false, "user authenticated"),
        }
        outcome
    }

    /// Create a fresh corpus with the schema namespace and a Data Lake remote namespace
    pub fn mount(&mut self) -> WriterResult<()> {
        let host = self.config.remote_host().ok_or_else(|| {
            WriterError::Config("storage_account_name is required to mount remote storage".to_string())
        })?;
        let root = self.config.storage_path.clone().ok_or_else(|| {
            WriterError::Config("storage_path is required to mount remote storage".to_string())
        })?;

        let token_provider = self
            .token_adapter
            .as_ref()
            .map(|a| Arc::clone(a) as Arc<dyn TokenProvider>);
        let remote = AdlsAdapter::new(host, root, token_provider)?;

        self.mount_with_adapter(Arc::new(remote));
        Ok(())
    }

    /// Create a fresh corpus with the schema namespace and `remote` as the remote namespace.
    ///
    /// Any previously built object graph is discarded.
    pub fn mount_with_adapter(&mut self, remote: Arc<dyn StorageAdapter>) {
        let mut corpus = Corpus::new();
        corpus
            .storage
            .mount(self.config.schema_namespace.clone(), Arc::new(StandardsAdapter::new()));
        corpus
            .storage
            .mount(self.config.remote_namespace.clone(), remote);

        info!(
            schema_namespace = %self.config.schema_namespace,
            remote_namespace = %self.config.remote_namespace,
            "Corpus mounted"
        );
        self.corpus = Some(corpus);
    }

    /// Whether `mount` has run
    pub fn is_mounted(&self) -> bool {
        self.corpus.is_some()
    }

    /// The mounted corpus
    pub fn corpus(&self) -> WriterResult<&Corpus> {
        self.corpus.as_ref().ok_or(WriterError::NotMounted)
    }

    /// The mounted corpus, mutably
    pub fn corpus_mut(&mut self) -> WriterResult<&mut Corpus> {
        self.corpus.as_mut().ok_or(WriterError::NotMounted)
    }

    /// Append a document, manifest or plain path to the remote root folder.
    ///
    /// Duplicate entries are not detected.
    pub fn add_to_folder(&mut self, item: impl Into<FolderItem>) -> WriterResult<()> {
        let namespace = self.config.remote_namespace.clone();
        self.corpus_mut()?
            .storage
            .fetch_root_folder_mut(&namespace)?
            .push(item);
        Ok(())
    }

    /// Append an item to a child folder of the remote root, creating the
    /// folder if absent. `folder` may be nested, as in `raw/2024`.
    ///
    /// Documents placed here are saved under the folder's path.
    pub fn add_to_child_folder(
        &mut self,
        folder: &str,
        item: impl Into<FolderItem>,
    ) -> WriterResult<()> {
        let namespace = self.config.remote_namespace.clone();
        let mut target = self
            .corpus_mut()?
            .storage
            .fetch_root_folder_mut(&namespace)?;
        for name in folder.split('/').filter(|s| !s.is_empty()) {
            target = target.child_folder_mut(name);
        }
        target.push(item);
        Ok(())
    }
}
