use chrono::{DateTime, Utc};

use crate::domain::value_objects::{BackupDate, ObjectKey, RetentionWindow};

use super::StoredObject;

/// Outcome of an upload run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadReport {
    pub uploaded: Vec<ObjectKey>,
}

/// Outcome of a prune run
#[derive(Debug, Clone, PartialEq)]
pub struct PruneReport {
    pub retention: RetentionWindow,
    pub cutoff: DateTime<Utc>,
    /// Number of objects in the listing the decision was made on
    pub examined: usize,
    pub removed: Vec<ObjectKey>,
}

/// Outcome of a day lookup
#[derive(Debug, Clone, PartialEq)]
pub enum DayReport {
    /// The bucket holds no objects at all
    BucketEmpty { date: BackupDate },
    NoMatches { date: BackupDate },
    Downloaded { date: BackupDate, keys: Vec<ObjectKey> },
}

impl DayReport {
    pub fn date(&self) -> BackupDate {
        match self {
            DayReport::BucketEmpty { date }
            | DayReport::NoMatches { date }
            | DayReport::Downloaded { date, .. } => *date,
        }
    }

    pub fn downloaded(&self) -> &[ObjectKey] {
        match self {
            DayReport::Downloaded { keys, .. } => keys,
            _ => &[],
        }
    }
}

/// Outcome of a listing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListReport {
    pub objects: Vec<StoredObject>,
}

impl ListReport {
    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(|o| o.size).sum()
    }
}
