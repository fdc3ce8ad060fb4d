use std::path::PathBuf;
use std::sync::Arc;

use object_store::{memory::InMemory, ObjectStore as ApacheObjectStore};
use tracing::info;

use crate::{
    adapters::outbound::storage::{
        create_s3_store, ApacheObjectStoreAdapter, InMemoryBucketProvisioner, S3BucketProvisioner,
        S3Config,
    },
    domain::{errors::StorageError, value_objects::BucketName},
    ports::{
        clock::Clock,
        notifier::Notifier,
        storage::{BucketProvisioner, BucketStatus},
    },
    services::BackupServiceImpl,
};

pub const BUCKET_NAME_VAR: &str = "MYBUCKETNAME";
pub const ACCESS_KEY_VAR: &str = "MYACCESSKEY";
pub const SECRET_KEY_VAR: &str = "MYSECRETKEY";
pub const ENDPOINT_URL_VAR: &str = "MYENDPOINTURL";
pub const REGION_NAME_VAR: &str = "MYREGIONNAME";

/// Configuration for the application, built once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bucket: BucketName,
    pub storage_backend: StorageBackend,
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3 {
        endpoint: String,
        region: String,
        access_key: String,
        secret_key: String,
    },
}

impl AppConfig {
    /// Configuration for an in-memory bucket, used for testing and development
    pub fn in_memory(bucket: BucketName) -> Self {
        Self {
            bucket,
            storage_backend: StorageBackend::InMemory,
        }
    }

    /// Read the S3 configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the S3 configuration through `lookup`. Every variable is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Configuration {
                    message: format!("{} environment variable required", name),
                })
        };

        let bucket = require(BUCKET_NAME_VAR)?;
        let access_key = require(ACCESS_KEY_VAR)?;
        let secret_key = require(SECRET_KEY_VAR)?;
        let endpoint = require(ENDPOINT_URL_VAR)?;
        let region = require(REGION_NAME_VAR)?;

        let bucket = BucketName::new(bucket).map_err(|e| AppError::Configuration {
            message: format!("{} is not a valid bucket name: {}", BUCKET_NAME_VAR, e),
        })?;

        Ok(Self {
            bucket,
            storage_backend: StorageBackend::S3 {
                endpoint,
                region,
                access_key,
                secret_key,
            },
        })
    }
}

/// Application services container
pub struct AppServices {
    pub backup_service: BackupServiceImpl,
    pub bucket: BucketName,
    pub bucket_status: BucketStatus,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    clock: Option<Arc<dyn Clock>>,
    notifier: Option<Arc<dyn Notifier>>,
    download_dir: Option<PathBuf>,
}

impl AppBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            clock: None,
            notifier: None,
            download_dir: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Build the backing store, make sure the bucket exists, and wire the service
    pub async fn build(self) -> Result<AppServices, AppError> {
        let (store, provisioner) = self.create_storage()?;
        let bucket = self.config.bucket.clone();

        let bucket_status = provisioner
            .ensure_bucket(&bucket)
            .await
            .map_err(AppError::Provisioning)?;
        info!(bucket = %bucket, status = ?bucket_status, "bucket ready");

        let adapter = Arc::new(ApacheObjectStoreAdapter::new(store, bucket.clone()));
        let mut builder = BackupServiceImpl::builder().store(adapter);
        if let Some(clock) = self.clock {
            builder = builder.clock(clock);
        }
        if let Some(notifier) = self.notifier {
            builder = builder.notifier(notifier);
        }
        if let Some(dir) = self.download_dir {
            builder = builder.download_dir(dir);
        }
        let backup_service = builder.build().map_err(|message| AppError::ServiceInit {
            message: message.to_string(),
        })?;

        Ok(AppServices {
            backup_service,
            bucket,
            bucket_status,
        })
    }

    /// Create the object store and its bucket provisioner based on configuration
    fn create_storage(
        &self,
    ) -> Result<(Arc<dyn ApacheObjectStore>, Arc<dyn BucketProvisioner>), AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => {
                let store: Arc<dyn ApacheObjectStore> = Arc::new(InMemory::new());
                let provisioner: Arc<dyn BucketProvisioner> = Arc::new(InMemoryBucketProvisioner);
                Ok((store, provisioner))
            }
            StorageBackend::S3 {
                endpoint,
                region,
                access_key,
                secret_key,
            } => {
                let store = create_s3_store(&S3Config {
                    bucket: self.config.bucket.to_string(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                })
                .map_err(|e| AppError::StorageInit {
                    message: format!("{:#}", e),
                })?;

                let provisioner: Arc<dyn BucketProvisioner> =
                    Arc::new(S3BucketProvisioner::new(store.clone()));
                let store: Arc<dyn ApacheObjectStore> = store;
                Ok((store, provisioner))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error(transparent)]
    Provisioning(StorageError),

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app(bucket: BucketName) -> Result<AppServices, AppError> {
    AppBuilder::new(AppConfig::in_memory(bucket)).build().await
}

/// Create the S3-backed application from the `MY*` environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new(AppConfig::from_env()?).build().await
}
