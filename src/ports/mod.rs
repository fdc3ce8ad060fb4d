pub mod clock;
pub mod notifier;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use notifier::{Notifier, SilentNotifier};
pub use services::BackupService;
pub use storage::{BackupStore, BucketProvisioner, BucketStatus};
