use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use object_store::{path::Path as ObjectPath, signer::Signer};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        value_objects::BucketName,
    },
    ports::storage::{BucketProvisioner, BucketStatus},
};

const SIGNED_URL_EXPIRY: Duration = Duration::from_secs(300);

/// Errors that can occur in bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    #[error("Request signing error: {0}")]
    SigningError(#[from] object_store::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{operation} bucket returned {status_code}: {message}")]
    ServiceError {
        operation: &'static str,
        status_code: u16,
        message: String,
    },
}

/// What a HEAD on the bucket tells us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeadOutcome {
    Exists,
    Missing,
    Forbidden,
    Unexpected,
}

pub(crate) fn classify_head_status(status: u16) -> HeadOutcome {
    match status {
        200..=299 => HeadOutcome::Exists,
        404 => HeadOutcome::Missing,
        403 => HeadOutcome::Forbidden,
        _ => HeadOutcome::Unexpected,
    }
}

/// Provisions buckets on an S3-compatible service.
///
/// object_store has no bucket-level API, so the HEAD and PUT requests are
/// presigned by the store's [`Signer`] and sent with reqwest.
#[derive(Clone, Debug)]
pub struct S3BucketProvisioner {
    signer: Arc<dyn Signer>,
    http_client: Client,
}

impl S3BucketProvisioner {
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        Self {
            signer,
            http_client: Client::new(),
        }
    }

    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Sign and execute a request against the bucket root
    async fn execute_request(&self, method: Method) -> Result<reqwest::Response, BucketError> {
        let url = self
            .signer
            .signed_url(method.clone(), &ObjectPath::default(), SIGNED_URL_EXPIRY)
            .await?;

        let mut request = self.http_client.request(method.clone(), url);
        if method == Method::PUT {
            request = request.body(Vec::new());
        }

        Ok(request.send().await?)
    }

    async fn create_bucket(&self, bucket: &BucketName) -> Result<BucketStatus, StorageError> {
        let response = self
            .execute_request(Method::PUT)
            .await
            .map_err(|e| provisioning_error(bucket, e))?;

        let status = response.status();
        if status.is_success() {
            info!(bucket = %bucket, "created bucket");
            return Ok(BucketStatus::Created);
        }

        let message = response.text().await.unwrap_or_default();
        if status.as_u16() == 409 {
            if message.contains("BucketAlreadyOwnedByYou") {
                return Ok(BucketStatus::Existing);
            }
            return Err(StorageError::BucketNameTaken {
                bucket: bucket.clone(),
            });
        }

        Err(provisioning_error(
            bucket,
            BucketError::ServiceError {
                operation: "CreateBucket",
                status_code: status.as_u16(),
                message,
            },
        ))
    }
}

#[async_trait]
impl BucketProvisioner for S3BucketProvisioner {
    async fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<BucketStatus> {
        let response = self
            .execute_request(Method::HEAD)
            .await
            .map_err(|e| provisioning_error(bucket, e))?;

        let status = response.status();
        debug!(bucket = %bucket, status = %status, "checked bucket");

        match classify_head_status(status.as_u16()) {
            HeadOutcome::Exists => Ok(BucketStatus::Existing),
            HeadOutcome::Missing => self.create_bucket(bucket).await,
            HeadOutcome::Forbidden => Err(StorageError::BucketNameTaken {
                bucket: bucket.clone(),
            }),
            HeadOutcome::Unexpected => Err(provisioning_error(
                bucket,
                BucketError::ServiceError {
                    operation: "HeadBucket",
                    status_code: status.as_u16(),
                    message: status.canonical_reason().unwrap_or("unknown").to_string(),
                },
            )),
        }
    }
}

/// Provisioner for stores without buckets, such as the in-memory backend
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryBucketProvisioner;

#[async_trait]
impl BucketProvisioner for InMemoryBucketProvisioner {
    async fn ensure_bucket(&self, _bucket: &BucketName) -> StorageResult<BucketStatus> {
        Ok(BucketStatus::Existing)
    }
}

fn provisioning_error(bucket: &BucketName, err: BucketError) -> StorageError {
    StorageError::BucketProvisioning {
        bucket: bucket.clone(),
        message: err.to_string(),
    }
}
