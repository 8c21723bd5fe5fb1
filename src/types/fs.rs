//! Storage backend configurations.
//!
//! Exactly one backend is active per user. The sum type makes
//! "discriminant and payload agree" structural: the provider code is
//! derived from the populated variant instead of being stored alongside
//! a struct of optional fields.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumString, FromRepr};
use utoipa::ToSchema;

use crate::secret::Secret;

/// Remote object storage (S3 and compatible endpoints).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub access_secret: Secret,
    pub endpoint: String,
    pub storage_class: String,
    pub key_prefix: String,
    pub upload_part_size: i64,
    pub upload_concurrency: i32,
}

/// Google Cloud Storage. Credentials are either an uploaded service
/// account blob or ambient instance credentials, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GcsConfig {
    pub bucket: String,
    pub storage_class: String,
    pub key_prefix: String,
    pub credentials: Secret,
    pub automatic_credentials: bool,
}

/// Azure Blob storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AzBlobConfig {
    pub container: String,
    pub account_name: String,
    pub account_key: Secret,
    pub sas_url: String,
    pub endpoint: String,
    pub key_prefix: String,
    pub access_tier: String,
    pub use_emulator: bool,
    pub upload_part_size: i64,
    pub upload_concurrency: i32,
}

/// Encryption at rest layered over the local filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CryptConfig {
    pub passphrase: Secret,
}

/// A remote SFTP server mounted as the user's filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SftpConfig {
    pub endpoint: String,
    pub username: String,
    pub password: Secret,
    pub private_key: Secret,
    pub fingerprints: Vec<String>,
    pub prefix: String,
}

/// The storage backend for a user, exactly one variant populated.
///
/// Variant order fixes the integer discriminant used by the
/// `fs_provider` form field: `Local` is 0, `Sftp` is 5.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumDiscriminants,
)]
#[strum_discriminants(
    name(FilesystemProvider),
    derive(Display, EnumString, FromRepr, Serialize, Deserialize, ToSchema)
)]
#[serde(tag = "provider", content = "config")]
pub enum FsConfig {
    /// Files live on the local filesystem; nothing to configure.
    #[default]
    Local,
    S3(S3Config),
    GoogleCloudStorage(GcsConfig),
    AzureBlob(AzBlobConfig),
    Crypt(CryptConfig),
    Sftp(SftpConfig),
}

impl FsConfig {
    pub fn provider(&self) -> FilesystemProvider {
        self.into()
    }

    /// Substitute redacted secrets with the matching stored secret.
    ///
    /// Secrets are matched by storage-backend field identity, so only a
    /// stored configuration of the same variant contributes; after a
    /// backend change a redacted secret stays redacted for the
    /// persistence layer to deal with.
    pub fn restore_redacted_secrets(&mut self, stored: &FsConfig) {
        match (self, stored) {
            (FsConfig::S3(submitted), FsConfig::S3(prev)) => {
                submitted.access_secret.restore_from(&prev.access_secret);
            }
            (FsConfig::GoogleCloudStorage(submitted), FsConfig::GoogleCloudStorage(prev)) => {
                submitted.credentials.restore_from(&prev.credentials);
            }
            (FsConfig::AzureBlob(submitted), FsConfig::AzureBlob(prev)) => {
                submitted.account_key.restore_from(&prev.account_key);
            }
            (FsConfig::Crypt(submitted), FsConfig::Crypt(prev)) => {
                submitted.passphrase.restore_from(&prev.passphrase);
            }
            (FsConfig::Sftp(submitted), FsConfig::Sftp(prev)) => {
                submitted.password.restore_from(&prev.password);
                submitted.private_key.restore_from(&prev.private_key);
            }
            _ => {}
        }
    }

    /// Collapse every stored secret to the redacted state before the
    /// configuration is handed to the rendering layer.
    pub fn hide_secrets(&mut self) {
        match self {
            FsConfig::Local => {}
            FsConfig::S3(config) => config.access_secret.hide(),
            FsConfig::GoogleCloudStorage(config) => config.credentials.hide(),
            FsConfig::AzureBlob(config) => config.account_key.hide(),
            FsConfig::Crypt(config) => config.passphrase.hide(),
            FsConfig::Sftp(config) => {
                config.password.hide();
                config.private_key.hide();
            }
        }
    }
}
