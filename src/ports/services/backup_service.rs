use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{
    errors::BackupResult,
    models::{DayReport, ListReport, PruneReport, UploadReport},
    value_objects::RetentionWindow,
};

/// Service port for the user-facing backup operations.
///
/// Each call is a single pass over the bucket; the first error ends it and
/// whatever was already uploaded, deleted or downloaded stays that way.
#[async_trait]
pub trait BackupService: Send + Sync + 'static {
    /// Upload each file in order under its base name
    async fn upload(&self, files: &[PathBuf]) -> BackupResult<UploadReport>;

    /// Delete every object last modified before the retention window
    async fn prune(&self, retention: RetentionWindow) -> BackupResult<PruneReport>;

    /// Download one object by exact key into a same-named local file
    async fn download(&self, filename: &str) -> BackupResult<PathBuf>;

    /// Download every object whose name carries the given day
    async fn get_day(&self, day: &str) -> BackupResult<DayReport>;

    /// Delete one object by exact key
    async fn delete(&self, filename: &str) -> BackupResult<()>;

    /// Report every object in the bucket
    async fn list(&self) -> BackupResult<ListReport>;
}
