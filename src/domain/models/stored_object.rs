use chrono::{DateTime, Utc};

use crate::domain::value_objects::{BackupDate, ObjectKey};

/// An object as reported by the bucket listing
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: ObjectKey,
    pub last_modified: DateTime<Utc>,
    pub size: u64,
}

impl StoredObject {
    /// The day stamped into the object's name, if it follows the backup naming convention
    pub fn backup_date(&self) -> Option<BackupDate> {
        BackupDate::from_key(self.key.as_str())
    }
}
