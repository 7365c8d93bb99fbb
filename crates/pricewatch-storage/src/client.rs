//! S3-compatible client for the R2 image-backup bucket.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use pricewatch_core::AppConfig;

use crate::error::StorageError;

/// Bucket every mirrored image lands in.
pub const DEFAULT_BUCKET: &str = "inventory-backup";

/// R2 connection settings.
#[derive(Clone)]
pub struct R2Config {
    pub account_id: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

impl std::fmt::Debug for R2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R2Config")
            .field("account_id", &self.account_id)
            .field("access_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl R2Config {
    /// Builds the R2 settings from application configuration, with the fixed
    /// default bucket.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            account_id: config.r2_account_id.clone(),
            access_key: config.r2_access_key.clone(),
            secret_key: config.r2_secret_key.clone(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    /// Vendor-specific endpoint derived from the account ID.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

/// One-way mirror into the backup bucket.
///
/// Objects are overwritten on every run that still references them; nothing
/// is ever deleted, so orphaned keys accumulate by design of the upstream
/// workflow.
#[derive(Clone)]
pub struct ObjectStore {
    client: Client,
    bucket: String,
}

impl ObjectStore {
    /// Builds the S3 client once, pointed at the account's R2 endpoint.
    ///
    /// Inherits the loaded SDK defaults (HTTP client, retry config, sleep
    /// impl) and overrides region, endpoint, and credentials for R2.
    pub async fn connect(config: &R2Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        let credentials = aws_sdk_s3::config::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "pricewatch-r2",
        );

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .region(aws_sdk_s3::config::Region::new("auto"))
            .endpoint_url(config.endpoint_url())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Create from a pre-built client (for testing).
    #[must_use]
    pub fn from_client(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Writes one image under `key`, overwriting any existing object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Put`] if the upload fails.
    pub async fn put_image(&self, key: &str, body: Bytes) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("image/jpeg")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Put {
                key: key.to_owned(),
                message: e.to_string(),
            })?;

        tracing::debug!(key = %key, bucket = %self.bucket, "image mirrored");
        Ok(())
    }
}
