//! Alias classification via Spotlight metadata.
//!
//! This module provides trait-based alias detection to determine whether
//! a filesystem entry is a Finder alias. The design uses a trait for
//! testability, allowing both the real `mdls` query and a mock
//! implementation for tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for deciding whether a path is a Finder alias file.
///
/// Classification is a read-only query and never fails: any error in the
/// underlying metadata lookup degrades to `false`.
///
/// # Examples
///
/// ```
/// use dealias::{AliasClassifier, MdlsClassifier};
/// use std::path::Path;
///
/// let classifier = MdlsClassifier;
/// // A path that does not exist is never an alias
/// assert!(!classifier.is_alias(Path::new("/nonexistent")));
/// ```
pub trait AliasClassifier: Send + Sync {
    /// Check whether `path` is a Finder alias file.
    fn is_alias(&self, path: &Path) -> bool;
}

/// Production classifier backed by the `mdls` Spotlight query tool.
///
/// Runs `mdls -name kMDItemKind <path>` and tests the reported kind for
/// the case-insensitive substring "alias". On platforms without `mdls`,
/// or for paths Spotlight knows nothing about, every path classifies as
/// not-an-alias.
#[derive(Debug, Clone, Copy)]
pub struct MdlsClassifier;

impl AliasClassifier for MdlsClassifier {
    fn is_alias(&self, path: &Path) -> bool {
        let output = match Command::new("mdls")
            .arg("-name")
            .arg("kMDItemKind")
            .arg(path)
            .output()
        {
            Ok(output) => output,
            Err(_) => return false,
        };

        if !output.status.success() {
            return false;
        }

        String::from_utf8_lossy(&output.stdout)
            .to_lowercase()
            .contains("alias")
    }
}

/// Mock classifier for tests, configured with an explicit set of alias
/// paths.
///
/// Symbolic links always classify as not-an-alias, matching Spotlight's
/// behavior: once an alias has been replaced by a symlink, a second run
/// must not pick it up again.
///
/// # Examples
///
/// ```
/// use dealias::{AliasClassifier, MockClassifier};
/// use std::path::{Path, PathBuf};
///
/// let mut classifier = MockClassifier::empty();
/// classifier.mark_alias(PathBuf::from("/tree/link1"));
///
/// assert!(classifier.is_alias(Path::new("/tree/link1")));
/// assert!(!classifier.is_alias(Path::new("/tree/notes.txt")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockClassifier {
    aliases: HashSet<PathBuf>,
}

impl MockClassifier {
    /// Create a mock classifier that treats every path as not-an-alias.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mark a path as an alias.
    pub fn mark_alias(&mut self, path: PathBuf) {
        self.aliases.insert(path);
    }

    /// Get the set of marked alias paths.
    #[must_use]
    pub fn aliases(&self) -> &HashSet<PathBuf> {
        &self.aliases
    }
}

impl AliasClassifier for MockClassifier {
    fn is_alias(&self, path: &Path) -> bool {
        if path.is_symlink() {
            return false;
        }
        self.aliases.contains(path)
    }
}
