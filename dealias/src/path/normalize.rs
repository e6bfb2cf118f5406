//! Path normalization functions.
//!
//! Normalization expands tilde (~) to the home directory, converts
//! relative paths to absolute ones, and resolves `.` and `..` components.
//! It is purely lexical: symlinks are not followed, so paths that do not
//! exist yet can still be normalized.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// Handles `~` and `~/path` but not `~user` syntax.
///
/// # Errors
///
/// Returns an error if the path contains invalid UTF-8, the home
/// directory cannot be determined, or the path uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use dealias::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/Documents")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("Documents"));
///
/// // Absolute paths are left unchanged
/// assert_eq!(expand_tilde(Path::new("/tmp")).unwrap(), Path::new("/tmp"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in a path without touching the
/// filesystem.
///
/// # Errors
///
/// Returns an error if the path contains more `..` components than it has
/// ancestors, which would escape the root.
fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "path contains too many '..' components".to_string(),
                    });
                }
            }
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}

/// Normalize a path to tilde-expanded, absolute form.
///
/// This is the normalization both the resolver and the tree walker apply
/// to their inputs:
/// 1. Expand tilde (~) if present
/// 2. Make relative paths absolute against the current directory
/// 3. Resolve `.` and `..` components
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory
/// cannot be determined, or the path escapes the root via `..`.
///
/// # Examples
///
/// ```
/// use dealias::path::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(normalized, Path::new("/a/c"));
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}
