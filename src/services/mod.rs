mod backup_service_impl;

pub use backup_service_impl::{BackupServiceBuilder, BackupServiceImpl};
