mod backup_date;
mod bucket_name;
mod object_key;
mod retention_window;

pub use backup_date::BackupDate;
pub use bucket_name::BucketName;
pub use object_key::ObjectKey;
pub use retention_window::RetentionWindow;
