use crate::domain::{errors::StorageError, value_objects::ObjectKey};

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => match ObjectKey::new(path.clone()) {
                Ok(key) => StorageError::ObjectNotFound { key },
                Err(_) => StorageError::ValidationError {
                    message: format!("Invalid object path from store: {}", path),
                },
            },
            object_store::Error::InvalidPath { source } => StorageError::ValidationError {
                message: format!("Invalid object path: {}", source),
            },
            _ => StorageError::InfrastructureError {
                message: "Object store operation failed".to_string(),
                source: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_object_not_found() {
        let err = object_store::Error::NotFound {
            path: "db-01-15-2023_.sql".to_string(),
            source: "missing".into(),
        };

        assert_eq!(
            StorageError::from(err),
            StorageError::ObjectNotFound {
                key: ObjectKey::new("db-01-15-2023_.sql".to_string()).unwrap()
            }
        );
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let err = object_store::Error::Generic {
            store: "S3",
            source: "connection reset".into(),
        };

        match StorageError::from(err) {
            StorageError::InfrastructureError { source, .. } => {
                assert!(source.unwrap().contains("connection reset"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
