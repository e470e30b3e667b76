//! Persistence error types.
//!
//! Storage failures carry enough context for a user-facing message and an
//! optional remediation hint.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored document was written by a newer schema.
    #[error("Document version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// Serialization error.
    #[error("Failed to serialize document")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize document")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
            } => {
                format!(
                    "The stored data was written by a newer version of orgdesk \
                    (document version {}, this build supports up to {}).",
                    found, max_supported
                )
            }
            Self::Serialization { .. } => "An error occurred while saving the data.".to_string(),
            Self::Deserialization { .. } => {
                "An error occurred while reading the stored data. It may be corrupted.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::UnsupportedVersion { .. } => Some("Upgrade orgdesk to open this data.".into()),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or point --store at a different location.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
