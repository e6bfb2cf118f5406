//! Alias resolution via the Finder's original-item lookup.
//!
//! Resolution asks the OS file manager for the original item an alias
//! points at. The actual lookup sits behind the [`OriginalItemSource`]
//! trait so the resolver's normalization, existence check, and cycle
//! guard can be exercised without a running Finder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::path::{normalize, PathRelationship};

/// Trait for querying the original item behind an alias file.
///
/// Implementations receive an already-normalized, existing path and
/// return the target path the alias refers to. The cycle guard is applied
/// by [`AliasResolver`], not by sources.
pub trait OriginalItemSource: Send + Sync {
    /// Look up the original item of `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlatformUnsupported`] when the lookup service is
    /// unavailable on this platform, or [`Error::ResolutionEmpty`] when
    /// the service yields no usable path.
    fn original_item(&self, alias: &Path) -> Result<PathBuf>;
}

/// Production source that asks the Finder via `osascript`.
///
/// Runs the AppleScript `original item of alias` lookup and captures the
/// returned POSIX path, trimmed of whitespace.
#[derive(Debug, Clone, Copy)]
pub struct FinderScriptSource;

impl OriginalItemSource for FinderScriptSource {
    fn original_item(&self, alias: &Path) -> Result<PathBuf> {
        if !cfg!(target_os = "macos") {
            return Err(Error::PlatformUnsupported);
        }

        let script = format!(
            concat!(
                "tell application \"Finder\"\n",
                "    set aliasFile to POSIX file \"{}\" as alias\n",
                "    set originalItem to original item of aliasFile\n",
                "    POSIX path of (originalItem as text)\n",
                "end tell"
            ),
            escape_script_literal(&alias.display().to_string())
        );

        let output = Command::new("osascript").arg("-e").arg(&script).output()?;
        if !output.status.success() {
            return Err(Error::ResolutionEmpty {
                path: alias.to_path_buf(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let target = stdout.trim();
        if target.is_empty() {
            return Err(Error::ResolutionEmpty {
                path: alias.to_path_buf(),
            });
        }

        Ok(PathBuf::from(target))
    }
}

/// Mock source for tests, mapping alias paths to fixed targets.
///
/// Paths without a mapping resolve as empty, mirroring a Finder lookup
/// that produced no output.
///
/// # Examples
///
/// ```
/// use dealias::{AliasResolver, MockOriginalItemSource};
/// use std::path::PathBuf;
///
/// let mut source = MockOriginalItemSource::empty();
/// source.insert(PathBuf::from("/tree/link1"), PathBuf::from("/docs/report.pdf"));
/// let resolver = AliasResolver::with_source(source);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockOriginalItemSource {
    targets: HashMap<PathBuf, PathBuf>,
}

impl MockOriginalItemSource {
    /// Create a mock source with no mappings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Map an alias path to its resolution target.
    ///
    /// The key must be the normalized (absolute) alias path, since the
    /// resolver normalizes before consulting the source.
    pub fn insert(&mut self, alias: PathBuf, target: PathBuf) {
        self.targets.insert(alias, target);
    }
}

impl OriginalItemSource for MockOriginalItemSource {
    fn original_item(&self, alias: &Path) -> Result<PathBuf> {
        self.targets
            .get(alias)
            .cloned()
            .ok_or_else(|| Error::ResolutionEmpty {
                path: alias.to_path_buf(),
            })
    }
}

/// Resolves alias files to their original targets.
///
/// The resolver normalizes the alias path, requires it to exist, consults
/// its [`OriginalItemSource`], and rejects resolutions that would point
/// back at the alias itself or into the alias's own directory tree.
///
/// # Examples
///
/// ```no_run
/// use dealias::AliasResolver;
/// use std::path::Path;
///
/// let resolver = AliasResolver::finder();
/// match resolver.resolve(Path::new("~/Desktop/shortcut")) {
///     Ok(target) => println!("alias points at {}", target.display()),
///     Err(e) => eprintln!("resolution failed: {e}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AliasResolver<S = FinderScriptSource> {
    source: S,
}

impl AliasResolver<FinderScriptSource> {
    /// Create a resolver backed by the Finder.
    #[must_use]
    pub fn finder() -> Self {
        Self {
            source: FinderScriptSource,
        }
    }
}

impl<S: OriginalItemSource> AliasResolver<S> {
    /// Create a resolver over an arbitrary original-item source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Resolve an alias file to its original target path.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if the path cannot be normalized
    /// - [`Error::PathNotFound`] if the alias does not exist on disk
    /// - [`Error::PlatformUnsupported`] off macOS (Finder source)
    /// - [`Error::ResolutionEmpty`] if the source yields no usable path
    /// - [`Error::RecursionGuard`] if the target is the alias itself or
    ///   lies within the alias's own parent directory
    pub fn resolve(&self, alias: &Path) -> Result<PathBuf> {
        let alias = normalize(alias)?;

        if !alias.exists() {
            return Err(Error::PathNotFound { path: alias });
        }

        let target = self.source.original_item(&alias)?;
        guard_cycle(&alias, &target)?;
        Ok(target)
    }
}

/// Escape a path for interpolation into an AppleScript string literal.
///
/// File names may legally contain backslashes and double quotes, either
/// of which would otherwise terminate or corrupt the quoted literal.
fn escape_script_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reject a resolution that references the alias itself or its own
/// ancestry.
///
/// A symlink created from such a resolution would point back into the
/// tree being rewritten and could never resolve to the intended original.
fn guard_cycle(alias: &Path, target: &Path) -> Result<()> {
    let self_reference = PathRelationship::between(target, alias) == PathRelationship::Same;
    let parent_reference = alias
        .parent()
        .is_some_and(|parent| PathRelationship::is_within(target, parent));

    if self_reference || parent_reference {
        return Err(Error::RecursionGuard {
            alias: alias.to_path_buf(),
            target: target.to_path_buf(),
        });
    }
    Ok(())
}
