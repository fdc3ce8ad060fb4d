use async_trait::async_trait;

use crate::domain::{errors::StorageResult, value_objects::BucketName};

/// State of the bucket after provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Existing,
    Created,
}

/// Port for making sure the target bucket exists before any operation runs
#[async_trait]
pub trait BucketProvisioner: Send + Sync + 'static {
    /// Check for the bucket and create it with default settings when absent
    async fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<BucketStatus>;
}
