use super::{StorageError, ValidationError};

/// A day string that none of the accepted date formats could read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot parse the provided date: {input}")]
pub struct DateParseError {
    pub input: String,
}

/// Errors surfaced by the backup operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackupError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    InvalidDate(#[from] DateParseError),

    #[error("Invalid object key: {0}")]
    InvalidKey(#[from] ValidationError),
}

pub type BackupResult<T> = Result<T, BackupError>;
