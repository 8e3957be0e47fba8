//! Error types for roadwatch.
//!
//! This module defines all error types used throughout the roadwatch crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::draft::ValidationError;
use crate::obstacle::ObstacleId;

/// The main error type for roadwatch operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The key-value backend refused a read or write.
    #[error("storage unavailable: {message}")]
    StorageUnavailable {
        /// Description of what went wrong.
        message: String,
    },

    /// The persisted obstacle document could not be parsed.
    #[error("stored document under '{key}' is corrupt: {source}")]
    DocumentCorrupt {
        /// Storage key holding the document.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An obstacle with this id is already stored.
    #[error("an obstacle with id {0} already exists")]
    DuplicateObstacle(ObstacleId),

    // === Input Errors ===
    /// No stored obstacle has this id.
    #[error("no obstacle with id {0}")]
    ObstacleNotFound(ObstacleId),

    /// No directory entry has this id.
    #[error("no contact with id {0}")]
    ContactNotFound(String),

    /// The add form was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Platform Errors ===
    /// Platform-specific operation failed.
    #[error("platform error: {0}")]
    Platform(String),

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for roadwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new platform error.
    #[must_use]
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }

    /// Create a storage unavailable error.
    #[must_use]
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Check if this error came from user input and can be retried with
    /// corrected values.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the persistence layer.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
                | Self::StorageUnavailable { .. }
                | Self::DocumentCorrupt { .. }
                | Self::DirectoryCreate { .. }
        )
    }

    /// A follow-up line for the user, for error classes that have one.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_validation_error() {
            Some("Nothing was saved; correct the input and retry.")
        } else if self.is_storage_error() {
            Some("Check the database path shown by `roadwatch config show`.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::platform("no handler for tel: URIs");
        assert_eq!(err.to_string(), "platform error: no handler for tel: URIs");

        let err = Error::storage_unavailable("disk full");
        assert_eq!(err.to_string(), "storage unavailable: disk full");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: Error = ValidationError::MissingDescription.into();
        assert_eq!(
            err.to_string(),
            ValidationError::MissingDescription.to_string()
        );
        assert!(err.is_validation_error());
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_hint() {
        let err: Error = ValidationError::InvalidCoordinates.into();
        assert_eq!(err.hint(), Some("Nothing was saved; correct the input and retry."));

        assert!(Error::storage_unavailable("x")
            .hint()
            .is_some_and(|hint| hint.contains("config show")));
        assert_eq!(Error::platform("x").hint(), None);
    }

    #[test]
    fn test_is_storage_error() {
        assert!(Error::storage_unavailable("x").is_storage_error());
        assert!(Error::DatabaseMigration {
            message: "v2".to_string()
        }
        .is_storage_error());
        assert!(!Error::platform("x").is_storage_error());
    }

    #[test]
    fn test_document_corrupt_display() {
        let parse_err = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        let err = Error::DocumentCorrupt {
            key: "obstacles".to_string(),
            source: parse_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("obstacles"));
        assert!(msg.contains("corrupt"));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_duplicate_obstacle_display() {
        let err = Error::DuplicateObstacle(ObstacleId::from("1700000000000"));
        assert!(err.to_string().contains("1700000000000"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::ObstacleNotFound(ObstacleId::from("abc"));
        assert_eq!(err.to_string(), "no obstacle with id abc");

        let err = Error::ContactNotFound("9".to_string());
        assert_eq!(err.to_string(), "no contact with id 9");
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "latitude out of range".to_string(),
        };
        assert!(err.to_string().contains("latitude out of range"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
