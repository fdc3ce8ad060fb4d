use std::path::PathBuf;

use crate::domain::value_objects::{BackupDate, BucketName, ObjectKey};

use super::StoredObject;

/// Progress of a backup operation, reported to the user as it happens
#[derive(Debug, Clone, PartialEq)]
pub enum BackupEvent {
    Uploaded { file: PathBuf, bucket: BucketName },
    Removing { key: ObjectKey, bucket: BucketName },
    Deleted { key: ObjectKey, bucket: BucketName },
    Downloading { key: ObjectKey, bucket: BucketName },
    Downloaded { key: ObjectKey, path: PathBuf },
    LookingFor { date: BackupDate },
    BucketEmpty,
    NoObjectsFound { date: BackupDate },
    Listed { object: StoredObject },
}

impl std::fmt::Display for BackupEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackupEvent::Uploaded { file, bucket } => {
                write!(f, "Uploaded {} to \"{}\"", file.display(), bucket)
            }
            BackupEvent::Removing { key, bucket } => {
                write!(f, "Removing \"{}\" from {}", key, bucket)
            }
            BackupEvent::Deleted { key, bucket } => {
                write!(f, "Deleted \"{}\" from {}", key, bucket)
            }
            BackupEvent::Downloading { key, bucket } => {
                write!(f, "Downloading \"{}\" from {}", key, bucket)
            }
            BackupEvent::Downloaded { key, path } => {
                write!(f, "Downloaded \"{}\" to {}", key, path.display())
            }
            BackupEvent::LookingFor { date } => {
                write!(f, "Looking for objects from {}", date)
            }
            BackupEvent::BucketEmpty => write!(f, "No objects currently in bucket"),
            BackupEvent::NoObjectsFound { date } => {
                write!(f, "No objects found from: {}", date)
            }
            BackupEvent::Listed { object } => {
                write!(
                    f,
                    "{}\t{}\t{}",
                    object.key,
                    object.last_modified.to_rfc3339(),
                    object.size
                )?;
                if let Some(date) = object.backup_date() {
                    write!(f, "\t{}", date)?;
                }
                Ok(())
            }
        }
    }
}
