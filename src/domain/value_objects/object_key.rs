use std::path::Path;

use crate::domain::errors::ValidationError;

/// A validated object key in the backup bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > 1024 {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        if let Some(c) = value.chars().find(char::is_ascii_control) {
            return Err(ValidationError::InvalidObjectKeyCharacter(c));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        if value.ends_with('/') {
            return Err(ValidationError::ObjectKeyEndsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        // Keys double as relative download paths
        if let Some(segment) = value.split('/').find(|s| *s == "." || *s == "..") {
            return Err(ValidationError::ObjectKeyRelativeSegment(segment.to_string()));
        }

        Ok(Self(value))
    }

    /// Key an uploaded file is stored under: the base name of the local path
    pub fn from_local_path(path: &Path) -> Result<Self, ValidationError> {
        let name = path
            .file_name()
            .ok_or_else(|| ValidationError::NoFileName(path.display().to_string()))?;
        let name = name
            .to_str()
            .ok_or_else(|| ValidationError::NonUtf8FileName(path.display().to_string()))?;
        Self::new(name.to_string())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
