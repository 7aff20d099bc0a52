//! Error taxonomy for digest and copy operations.
//!
//! A hash mismatch after a successful copy is deliberately absent here: it is
//! reported through [`CopyResult::matched`](crate::CopyResult::matched).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`compute_digest`](crate::compute_digest) and
/// [`verified_copy`](crate::verified_copy).
#[derive(Error, Debug)]
pub enum Error {
    /// The file is missing, is not a regular file, or could not be read.
    #[error("file not found or unreadable: {}", path.display())]
    FileNotFound {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The requested algorithm name is not in the registry.
    #[error("unsupported hashing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The byte copy did not complete. No digest comparison was made.
    #[error("copy from {} to {} failed: {reason}", source_path.display(), dest_path.display())]
    CopyFailed {
        /// Source of the copy.
        source_path: PathBuf,
        /// Destination that was being written.
        dest_path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        reason: io::Error,
    },
}

impl Error {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileNotFound {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn copy_failed(
        source_path: impl Into<PathBuf>,
        dest_path: impl Into<PathBuf>,
        reason: io::Error,
    ) -> Self {
        Self::CopyFailed {
            source_path: source_path.into(),
            dest_path: dest_path.into(),
            reason,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
