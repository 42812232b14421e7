//! Unified error types for chatpage.
//!
//! This module provides a single [`ChatpageError`] enum that covers every
//! failure the build pipeline can surface. Most irregularities in the export
//! markup are *not* errors: missing nodes and malformed values degrade the
//! affected field to absent. What remains here are the failures that stop a
//! run or a file operation.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatpage operations.
///
/// # Example
///
/// ```rust
/// use chatpage::error::Result;
/// use chatpage::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpageError>;

/// The error type for all chatpage operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpageError {
    /// An I/O error occurred without further context.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An I/O error occurred while touching a specific path.
    ///
    /// This typically happens when:
    /// - A message document cannot be read
    /// - The output directory cannot be created or cleaned
    /// - A media folder cannot be copied
    #[error("IO error at {}: {source}", path.display())]
    IoAt {
        /// The file or directory being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    ///
    /// Occurs when writing output artifacts or reading a title override file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export root does not contain a `chats` directory.
    ///
    /// This is fatal for the whole run.
    #[error("Chats directory not found: {}", path.display())]
    MissingExportRoot {
        /// The directory that was expected to exist
        path: PathBuf,
    },

    /// The build configuration is unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpageError {
    /// Creates an I/O error bound to the path that caused it.
    pub fn io_at(path: impl AsRef<Path>, source: io::Error) -> Self {
        ChatpageError::IoAt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a missing export root error.
    pub fn missing_export_root(path: impl Into<PathBuf>) -> Self {
        ChatpageError::MissingExportRoot { path: path.into() }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatpageError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an I/O error, with or without path context.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpageError::Io(_) | ChatpageError::IoAt { .. })
    }

    /// Returns `true` if the export root was missing.
    pub fn is_missing_export_root(&self) -> bool {
        matches!(self, ChatpageError::MissingExportRoot { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatpageError::InvalidConfig { .. })
    }
}

/// Extension trait attaching a path to `io::Result` values.
pub(crate) trait IoContext<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| ChatpageError::io_at(path, e))
    }
}

// ============================================================================
// Tests
// ============================================================================
