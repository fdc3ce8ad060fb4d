use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt, TryStreamExt};
use object_store::{
    buffered::BufWriter, path::Path as ObjectPath, ObjectMeta, ObjectStore as ApacheObjectStore,
};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::StoredObject,
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::BackupStore,
};

/// Adapter that implements our BackupStore trait using Apache object_store
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    bucket: BucketName,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>, bucket: BucketName) -> Self {
        Self {
            inner: store,
            bucket,
        }
    }

    /// The key as a raw store path. `ObjectPath::from` would percent-encode
    /// characters such as `~` or `%`, so keys read back from a listing
    /// would no longer name the stored object.
    fn to_object_path(key: &ObjectKey) -> StorageResult<ObjectPath> {
        ObjectPath::parse(key.as_str()).map_err(|e| object_store::Error::from(e).into())
    }

    fn to_stored_object(meta: ObjectMeta) -> StorageResult<StoredObject> {
        let key = ObjectKey::new(meta.location.as_ref().to_string())?;
        Ok(StoredObject {
            key,
            last_modified: meta.last_modified,
            size: meta.size,
        })
    }
}

#[async_trait]
impl BackupStore for ApacheObjectStoreAdapter {
    fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    fn list_all(&self) -> BoxStream<'_, StorageResult<StoredObject>> {
        self.inner
            .list(None)
            .map(|item| item.map_err(StorageError::from).and_then(Self::to_stored_object))
            .boxed()
    }

    async fn upload(&self, local_path: &Path) -> StorageResult<ObjectKey> {
        let key = ObjectKey::from_local_path(local_path)?;
        let mut file = tokio::fs::File::open(local_path)
            .await
            .map_err(|e| StorageError::local_file(local_path, e))?;

        // BufWriter switches to a multipart upload once the file outgrows its buffer
        let mut writer = BufWriter::new(Arc::clone(&self.inner), Self::to_object_path(&key)?);
        let copied = match tokio::io::copy(&mut file, &mut writer).await {
            Ok(copied) => copied,
            Err(e) => {
                writer.abort().await?;
                return Err(StorageError::InfrastructureError {
                    message: format!("Failed to upload {}", local_path.display()),
                    source: Some(e.to_string()),
                });
            }
        };
        writer
            .shutdown()
            .await
            .map_err(|e| StorageError::InfrastructureError {
                message: format!("Failed to complete upload of {}", key),
                source: Some(e.to_string()),
            })?;

        debug!(key = %key, bytes = copied, bucket = %self.bucket, "uploaded object");
        Ok(key)
    }

    async fn delete(&self, key: &ObjectKey) -> StorageResult<()> {
        self.inner.delete(&Self::to_object_path(key)?).await?;
        debug!(key = %key, bucket = %self.bucket, "deleted object");
        Ok(())
    }

    async fn download(&self, key: &ObjectKey, local_path: &Path) -> StorageResult<u64> {
        // Fetch first so a missing key never leaves an empty local file behind
        let result = self.inner.get(&Self::to_object_path(key)?).await?;
        let mut chunks = result.into_stream();

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::local_file(parent, e))?;
        }

        let mut file = tokio::fs::File::create(local_path)
            .await
            .map_err(|e| StorageError::local_file(local_path, e))?;

        let mut written = 0u64;
        while let Some(chunk) = chunks.try_next().await? {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::local_file(local_path, e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| StorageError::local_file(local_path, e))?;

        debug!(key = %key, bytes = written, path = %local_path.display(), "downloaded object");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn adapter() -> ApacheObjectStoreAdapter {
        ApacheObjectStoreAdapter::new(
            Arc::new(InMemory::new()),
            BucketName::new("test-backups".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_empty_bucket_lists_nothing() {
        let store = adapter();
        let objects: Vec<_> = store.list_all().try_collect().await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_upload_uses_base_name_and_download_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("db-01-15-2023_.sql");
        tokio::fs::write(&source, b"select 1;").await.unwrap();

        let store = adapter();
        let key = store.upload(&source).await.unwrap();
        assert_eq!(key.as_str(), "db-01-15-2023_.sql");

        let objects: Vec<_> = store.list_all().try_collect().await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, key);
        assert_eq!(objects[0].size, 9);

        let target = dir.path().join("restored.sql");
        let written = store.download(&key, &target).await.unwrap();
        assert_eq!(written, 9);
        assert_eq!(tokio::fs::read(&target).await.unwrap(), b"select 1;");
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("site.tar");
        let store = adapter();

        tokio::fs::write(&source, b"first").await.unwrap();
        store.upload(&source).await.unwrap();
        tokio::fs::write(&source, b"second").await.unwrap();
        let key = store.upload(&source).await.unwrap();

        let target = dir.path().join("out.tar");
        store.download(&key, &target).await.unwrap();
        assert_eq!(tokio::fs::read(&target).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_a_local_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = adapter()
            .upload(&dir.path().join("missing.tar"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::LocalFile { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = adapter();
        let key = ObjectKey::new("never-uploaded.tar".to_string()).unwrap();
        store.delete(&key).await.unwrap();
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_download_missing_object_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing.tar");
        let key = ObjectKey::new("missing.tar".to_string()).unwrap();

        let err = adapter().download(&key, &target).await.unwrap_err();
        assert_eq!(err, StorageError::ObjectNotFound { key });
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_reserved_characters_survive_list_and_download() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("db~site-01-15-2023_.sql");
        tokio::fs::write(&source, b"tilde").await.unwrap();

        let memory = Arc::new(InMemory::new());
        memory
            .put(
                &ObjectPath::parse("db%1-01-15-2023_.sql").unwrap(),
                b"percent".to_vec().into(),
            )
            .await
            .unwrap();
        let store = ApacheObjectStoreAdapter::new(
            memory,
            BucketName::new("test-backups".to_string()).unwrap(),
        );

        let key = store.upload(&source).await.unwrap();
        assert_eq!(key.as_str(), "db~site-01-15-2023_.sql");

        let objects: Vec<_> = store.list_all().try_collect().await.unwrap();
        let keys: Vec<_> = objects.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["db%1-01-15-2023_.sql", "db~site-01-15-2023_.sql"]);

        for (object, expected) in objects.iter().zip([&b"percent"[..], &b"tilde"[..]]) {
            let target = dir.path().join("out");
            store.download(&object.key, &target).await.unwrap();
            assert_eq!(tokio::fs::read(&target).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_download_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("db.sql");
        tokio::fs::write(&source, b"nested").await.unwrap();
        let store = adapter();
        let key = store.upload(&source).await.unwrap();

        let target = dir.path().join("nightly/2023/db.sql");
        store.download(&key, &target).await.unwrap();
        assert_eq!(tokio::fs::read(&target).await.unwrap(), b"nested");
    }
}
