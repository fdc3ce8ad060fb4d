mod backup_store;
mod bucket_provisioner;

pub use backup_store::BackupStore;
pub use bucket_provisioner::{BucketProvisioner, BucketStatus};
