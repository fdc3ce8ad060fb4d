use crate::domain::models::BackupEvent;

/// Port for reporting progress to whoever drives an operation
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, event: &BackupEvent);
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _event: &BackupEvent) {}
}
