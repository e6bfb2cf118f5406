//! Error types for the dealias library.
//!
//! This module provides the error hierarchy for alias classification,
//! resolution, and conversion, using `thiserror` for ergonomic error
//! handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a dealias error.
///
/// # Examples
///
/// ```
/// use dealias::{Error, Result};
/// use std::path::PathBuf;
///
/// fn example_operation() -> Result<PathBuf> {
///     Ok(PathBuf::from("/tmp/target"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the dealias library.
///
/// This enum encompasses all failure conditions that can occur while
/// classifying, resolving, or converting alias files.
#[derive(Debug, Error)]
pub enum Error {
    /// Alias resolution was attempted on a platform without Finder.
    #[error("alias resolution requires macOS")]
    PlatformUnsupported,

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The root folder given to the converter is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// An alias resolved to itself or to an ancestor of its own directory.
    ///
    /// Converting such an alias would create a symlink pointing back into
    /// the tree being rewritten.
    #[error("alias {} resolves to itself or its own ancestry ({})", alias.display(), target.display())]
    RecursionGuard {
        /// The alias whose resolution was rejected.
        alias: PathBuf,
        /// The rejected resolution target.
        target: PathBuf,
    },

    /// The alias-resolution service returned no usable path.
    #[error("unable to resolve alias: {}", path.display())]
    ResolutionEmpty {
        /// The alias that could not be resolved.
        path: PathBuf,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred, typically during the backup rename or the
    /// symlink creation step.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error is the cycle guard rejecting a resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use dealias::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::RecursionGuard {
    ///     alias: PathBuf::from("/a/loop"),
    ///     target: PathBuf::from("/a"),
    /// };
    /// assert!(err.is_recursion_guard());
    /// ```
    #[must_use]
    pub fn is_recursion_guard(&self) -> bool {
        matches!(self, Self::RecursionGuard { .. })
    }

    /// Check if the error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use dealias::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }
}
