use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use tracing::{debug, info};

use crate::{
    domain::{
        errors::BackupResult,
        models::{BackupEvent, DayReport, ListReport, PruneReport, UploadReport},
        value_objects::{BackupDate, ObjectKey, RetentionWindow},
    },
    ports::{
        clock::{Clock, SystemClock},
        notifier::{Notifier, SilentNotifier},
        services::BackupService,
        storage::BackupStore,
    },
};

/// Implementation of BackupService on top of a single-bucket store
#[derive(Clone)]
pub struct BackupServiceImpl {
    store: Arc<dyn BackupStore>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    download_dir: PathBuf,
}

impl BackupServiceImpl {
    /// Create a service using the wall clock, no progress output and the
    /// current directory for downloads
    pub fn new(store: Arc<dyn BackupStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            notifier: Arc::new(SilentNotifier),
            download_dir: PathBuf::from("."),
        }
    }

    pub fn builder() -> BackupServiceBuilder {
        BackupServiceBuilder::new()
    }

    /// Downloads land at the key itself, relative to the download directory.
    /// Keys sharing a base name under different prefixes stay distinct.
    fn local_path_for(&self, key: &ObjectKey) -> PathBuf {
        self.download_dir.join(key.as_str())
    }

    fn emit(&self, event: BackupEvent) {
        self.notifier.notify(&event);
    }
}

#[async_trait]
impl BackupService for BackupServiceImpl {
    async fn upload(&self, files: &[PathBuf]) -> BackupResult<UploadReport> {
        let mut report = UploadReport::default();

        for file in files {
            let key = self.store.upload(file).await?;
            self.emit(BackupEvent::Uploaded {
                file: file.clone(),
                bucket: self.store.bucket().clone(),
            });
            report.uploaded.push(key);
        }

        info!(count = report.uploaded.len(), bucket = %self.store.bucket(), "upload finished");
        Ok(report)
    }

    async fn prune(&self, retention: RetentionWindow) -> BackupResult<PruneReport> {
        let now = self.clock.now();
        let cutoff = retention.cutoff(now);
        debug!(%retention, %cutoff, "pruning backups");

        // Decide on the complete listing before deleting anything
        let mut examined = 0;
        let mut expired = Vec::new();
        let mut listing = self.store.list_all();
        while let Some(object) = listing.try_next().await? {
            examined += 1;
            if retention.is_expired(object.last_modified, now) {
                expired.push(object.key);
            }
        }
        drop(listing);

        for key in &expired {
            self.emit(BackupEvent::Removing {
                key: key.clone(),
                bucket: self.store.bucket().clone(),
            });
            self.store.delete(key).await?;
        }

        info!(
            examined,
            removed = expired.len(),
            bucket = %self.store.bucket(),
            "prune finished"
        );
        Ok(PruneReport {
            retention,
            cutoff,
            examined,
            removed: expired,
        })
    }

    async fn download(&self, filename: &str) -> BackupResult<PathBuf> {
        let key = ObjectKey::new(filename.to_string())?;
        let path = self.local_path_for(&key);

        let bytes = self.store.download(&key, &path).await?;
        debug!(key = %key, bytes, "download finished");

        self.emit(BackupEvent::Downloaded {
            key,
            path: path.clone(),
        });
        Ok(path)
    }

    async fn get_day(&self, day: &str) -> BackupResult<DayReport> {
        let today = self.clock.now().date_naive();
        let date = BackupDate::parse(day, today)?;
        self.emit(BackupEvent::LookingFor { date });

        let mut bucket_has_objects = false;
        let mut matching = Vec::new();
        let mut listing = self.store.list_all();
        while let Some(object) = listing.try_next().await? {
            bucket_has_objects = true;
            if date.matches(object.key.as_str()) {
                matching.push(object.key);
            }
        }
        drop(listing);

        if !bucket_has_objects {
            self.emit(BackupEvent::BucketEmpty);
            return Ok(DayReport::BucketEmpty { date });
        }

        if matching.is_empty() {
            self.emit(BackupEvent::NoObjectsFound { date });
            return Ok(DayReport::NoMatches { date });
        }

        for key in &matching {
            self.emit(BackupEvent::Downloading {
                key: key.clone(),
                bucket: self.store.bucket().clone(),
            });
            self.store.download(key, &self.local_path_for(key)).await?;
        }

        info!(count = matching.len(), pattern = %date.key_pattern(), "day lookup finished");
        Ok(DayReport::Downloaded {
            date,
            keys: matching,
        })
    }

    async fn delete(&self, filename: &str) -> BackupResult<()> {
        let key = ObjectKey::new(filename.to_string())?;
        self.store.delete(&key).await?;
        self.emit(BackupEvent::Deleted {
            key,
            bucket: self.store.bucket().clone(),
        });
        Ok(())
    }

    async fn list(&self) -> BackupResult<ListReport> {
        let objects: Vec<_> = self.store.list_all().try_collect().await?;
        for object in &objects {
            self.emit(BackupEvent::Listed {
                object: object.clone(),
            });
        }
        Ok(ListReport { objects })
    }
}

/// Builder for BackupServiceImpl
pub struct BackupServiceBuilder {
    store: Option<Arc<dyn BackupStore>>,
    clock: Option<Arc<dyn Clock>>,
    notifier: Option<Arc<dyn Notifier>>,
    download_dir: Option<PathBuf>,
}

impl BackupServiceBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            clock: None,
            notifier: None,
            download_dir: None,
        }
    }

    pub fn store(mut self, store: Arc<dyn BackupStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn download_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.download_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<BackupServiceImpl, &'static str> {
        let store = self.store.ok_or("Store is required")?;
        let mut service = BackupServiceImpl::new(store);

        if let Some(clock) = self.clock {
            service.clock = clock;
        }
        if let Some(notifier) = self.notifier {
            service.notifier = notifier;
        }
        if let Some(dir) = self.download_dir {
            service.download_dir = dir;
        }

        Ok(service)
    }
}

impl Default for BackupServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
