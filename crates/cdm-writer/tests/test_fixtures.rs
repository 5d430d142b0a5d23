//! Test fixtures for cdm-writer tests.
//! Shared tracing setup, credential doubles and a model-building helper.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use tracing_subscriber::{fmt, EnvFilter};

use cdm_writer::{
    AccessToken, CredentialError, EntityId, AttributeId, ManifestId, ManifestWriter,
    StorageAdapter, TokenCredential, WriterConfig, WriterResult,
};

/// Initialize tracing for tests
pub fn init_test_tracing() {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cdm_writer=debug".parse().unwrap())
                .add_directive("cdm_core=debug".parse().unwrap()),
        )
        .with_test_writer()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

// Mock the identity source
mock! {
    pub Credential {}

    #[async_trait]
    impl TokenCredential for Credential {
        async fn get_token(&self, scope: &str) -> Result<Option<AccessToken>, CredentialError>;
    }
}

/// Credential whose token endpoint is unreachable
pub struct UnreachableCredential;

#[async_trait]
impl TokenCredential for UnreachableCredential {
    async fn get_token(&self, _scope: &str) -> Result<Option<AccessToken>, CredentialError> {
        Err(CredentialError::RequestFailed("connection refused".to_string()))
    }
}

/// Handles of the single-entity model built by [`build_customer_model`]
pub struct CustomerModel {
    pub manifest: ManifestId,
    pub entity: EntityId,
    pub attribute: AttributeId,
}

/// Writer with `remote` mounted as the remote namespace
pub fn writer_with_remote(
    credential: Option<Arc<dyn TokenCredential>>,
    remote: Arc<dyn StorageAdapter>,
) -> ManifestWriter {
    let mut writer = ManifestWriter::new(
        WriterConfig::new(Some("mylake"), Some("gist/test")),
        credential,
    )
    .unwrap();
    writer.mount_with_adapter(remote);
    writer
}

/// Customer entity with a sensitive Name attribute
pub fn build_customer_model(writer: &mut ManifestWriter) -> WriterResult<CustomerModel> {
    let manifest = writer.new_manifest(None)?;
    let document = writer.add_entity_doc("Customer")?;
    let entity = writer.add_entity("Customer", document, manifest)?;
    let attribute = writer.new_attribute("Name")?;
    writer.add_attribute(attribute, entity)?;
    writer.add_trait("is.sensitive", entity, attribute)?;

    Ok(CustomerModel {
        manifest,
        entity,
        attribute,
    })
}
