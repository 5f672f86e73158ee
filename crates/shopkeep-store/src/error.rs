//! # Persistence Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  std::io::Error / serde_json::Error                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds the file path as context           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CLI prints the message and the menu loop continues                 │
//! │                                                                     │
//! │  EXCEPTION: a corrupt persisted file on load is NOT surfaced as an  │
//! │  error at all - it is logged and recovered as an empty store.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

use shopkeep_core::CoreError;

/// Persistence layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a store file failed.
    ///
    /// ## When This Occurs
    /// - Directory not writable
    /// - Disk full
    /// - File unreadable for reasons other than "does not exist"
    ///   (a missing file is a normal first run, not an error)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing in-memory state to JSON failed.
    ///
    /// Should not happen with these DTOs; surfaced rather than swallowed.
    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A business rule rejected the operation before any file was touched.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Password hashing or hash parsing failed.
    ///
    /// argon2's error type doesn't implement std::error::Error, so the
    /// message is carried as a string.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl StoreError {
    /// Creates an Io error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through_transparently() {
        let err: StoreError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = StoreError::io(
            "users.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("users.json"));
    }
}
