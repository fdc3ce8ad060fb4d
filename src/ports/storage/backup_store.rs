use std::path::Path;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{
    errors::StorageResult,
    models::StoredObject,
    value_objects::{BucketName, ObjectKey},
};

/// Port for the object operations backups need, bound to a single bucket
#[async_trait]
pub trait BackupStore: Send + Sync + 'static {
    /// The bucket this store reads and writes
    fn bucket(&self) -> &BucketName;

    /// Every object in the bucket, following pagination lazily.
    /// An empty bucket yields an empty stream.
    fn list_all(&self) -> BoxStream<'_, StorageResult<StoredObject>>;

    /// Store a local file under its base name, replacing any existing object
    async fn upload(&self, local_path: &Path) -> StorageResult<ObjectKey>;

    /// Remove an object. Removing a missing object is not an error.
    async fn delete(&self, key: &ObjectKey) -> StorageResult<()>;

    /// Fetch an object into a local file, replacing it if present.
    /// Returns the number of bytes written.
    async fn download(&self, key: &ObjectKey, local_path: &Path) -> StorageResult<u64>;
}
