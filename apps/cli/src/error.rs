//! # CLI Error Type
//!
//! The only errors that escape the menu loop and end the process.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                            │
//! │                                                                     │
//! │  Domain errors (CoreError / StoreError from an operation)           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Printed as a message, menu loop CONTINUES - never fatal            │
//! │                                                                     │
//! │  Terminal errors (this type)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Loop cannot continue: stdin closed, stores unreadable at startup   │
//! │  main prints the message and exits non-zero                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use shopkeep_store::StoreError;

/// Errors the menu loop cannot recover from.
#[derive(Debug, Error)]
pub enum CliError {
    /// Stdin reached end-of-file: nobody is on the other end of the
    /// prompt anymore, so the loop winds down.
    #[error("Input stream closed")]
    InputClosed,

    /// Reading or writing the terminal failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A store could not be loaded at startup (unreadable file, not
    /// mere corruption - corruption recovers as an empty store).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for the CLI layer.
pub type CliResult<T> = Result<T, CliError>;
