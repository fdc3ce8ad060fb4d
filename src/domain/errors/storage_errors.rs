use std::path::PathBuf;

use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors that can occur during storage operations
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Object not found
    ObjectNotFound { key: ObjectKey },

    /// The bucket name is owned by another account
    BucketNameTaken { bucket: BucketName },

    /// Checking for or creating the bucket failed
    BucketProvisioning { bucket: BucketName, message: String },

    /// Reading or writing a local file failed
    LocalFile { path: PathBuf, message: String },

    /// Validation error
    ValidationError { message: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl StorageError {
    pub fn local_file(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        StorageError::LocalFile {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { key } => {
                write!(f, "Object not found: {}", key)
            }
            StorageError::BucketNameTaken { bucket } => {
                write!(
                    f,
                    "The bucket name \"{}\" is already being used by someone.  \
                     Please try using a different bucket name.",
                    bucket
                )
            }
            StorageError::BucketProvisioning { message, .. } => {
                write!(f, "Unexpected error: {}", message)
            }
            StorageError::LocalFile { path, message } => {
                write!(f, "Local file error for {}: {}", path.display(), message)
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::InfrastructureError { message, source } => match source {
                Some(source) => write!(f, "Infrastructure error: {}: {}", message, source),
                None => write!(f, "Infrastructure error: {}", message),
            },
        }
    }
}

impl std::error::Error for StorageError {}

impl From<super::ValidationError> for StorageError {
    fn from(err: super::ValidationError) -> Self {
        StorageError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_taken_message() {
        let err = StorageError::BucketNameTaken {
            bucket: BucketName::new("nightly-backups".to_string()).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "The bucket name \"nightly-backups\" is already being used by someone.  \
             Please try using a different bucket name."
        );
    }

    #[test]
    fn test_provisioning_message_carries_underlying_error() {
        let err = StorageError::BucketProvisioning {
            bucket: BucketName::new("nightly-backups".to_string()).unwrap(),
            message: "HEAD returned 500 Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected error: HEAD returned 500 Internal Server Error"
        );
    }
}
