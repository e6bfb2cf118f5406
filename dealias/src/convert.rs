//! The directory tree walker that performs alias-to-symlink conversion.
//!
//! The walker visits a directory depth-first, classifies each entry,
//! resolves aliases, and replaces each alias file with a symlink after
//! renaming the original to a hidden backup. Failures are local to the
//! entry they occur in; only an invalid root folder aborts the run.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::classify::{AliasClassifier, MdlsClassifier};
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::path::{normalize, PathRelationship};
use crate::resolve::{AliasResolver, FinderScriptSource, OriginalItemSource};

/// Options controlling a conversion run.
///
/// # Examples
///
/// ```
/// use dealias::ConvertOptions;
///
/// let options = ConvertOptions::default();
/// assert!(options.recursive);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Descend into subdirectories. When disabled, directories are
    /// classified and converted like plain entries instead of being
    /// walked.
    pub recursive: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { recursive: true }
    }
}

/// Counters accumulated over one conversion run.
///
/// Each recursive walk returns its own tally; callers merge child tallies
/// into their own rather than sharing mutable counters.
///
/// # Examples
///
/// ```
/// use dealias::RunTally;
///
/// let mut tally = RunTally::default();
/// tally.record_success();
/// tally.record_failure();
/// assert_eq!((tally.converted, tally.failed), (1, 1));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunTally {
    /// Number of aliases successfully replaced with symlinks.
    pub converted: usize,
    /// Number of aliases that could not be converted.
    pub failed: usize,
}

impl RunTally {
    /// Fold another tally into this one.
    pub fn merge(&mut self, other: RunTally) {
        self.converted += other.converted;
        self.failed += other.failed;
    }

    /// Count one successful conversion.
    pub fn record_success(&mut self) {
        self.converted += 1;
    }

    /// Count one failed conversion.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}

/// Walks a directory tree and converts alias files to symlinks.
///
/// # Examples
///
/// ```no_run
/// use dealias::{ConvertOptions, Converter, Logger};
/// use std::path::Path;
///
/// let converter = Converter::new(ConvertOptions::default(), Logger::default());
/// let tally = converter.convert(Path::new("~/shortcuts")).unwrap();
/// ```
pub struct Converter<C = MdlsClassifier, S = FinderScriptSource> {
    classifier: C,
    resolver: AliasResolver<S>,
    options: ConvertOptions,
    logger: Logger,
}

impl Converter<MdlsClassifier, FinderScriptSource> {
    /// Create a converter backed by the system's `mdls` and Finder
    /// services.
    #[must_use]
    pub fn new(options: ConvertOptions, logger: Logger) -> Self {
        Self {
            classifier: MdlsClassifier,
            resolver: AliasResolver::finder(),
            options,
            logger,
        }
    }
}

impl<C: AliasClassifier, S: OriginalItemSource> Converter<C, S> {
    /// Create a converter over arbitrary classification and resolution
    /// services.
    pub fn with_services(classifier: C, source: S, options: ConvertOptions, logger: Logger) -> Self {
        Self {
            classifier,
            resolver: AliasResolver::with_source(source),
            options,
            logger,
        }
    }

    /// Convert all alias files under `folder` to symlinks.
    ///
    /// Returns the cumulative tally for the whole traversal. Per-entry
    /// failures are logged and counted; they never abort the walk.
    ///
    /// # Errors
    ///
    /// Returns an error only when the root folder itself is invalid:
    /// [`Error::InvalidPath`] if it cannot be normalized, or
    /// [`Error::NotADirectory`] if it does not name a directory.
    pub fn convert(&self, folder: &Path) -> Result<RunTally> {
        let root = normalize(folder)?;
        if !root.is_dir() {
            return Err(Error::NotADirectory { path: root });
        }
        Ok(self.walk(&root))
    }

    /// Visit one directory, returning the tally for it and its subtree.
    fn walk(&self, dir: &Path) -> RunTally {
        let mut tally = RunTally::default();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.logger
                    .error(&format!("cannot list {}: {e}", dir.display()));
                return tally;
            }
        };

        for entry in entries {
            let Ok(entry) = entry else { continue };
            let name = entry.file_name();

            // Hidden entries are skipped before any classification
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();

            if path.is_dir() && self.options.recursive {
                if self.classifier.is_alias(&path) && !self.should_recurse(dir, &path) {
                    continue;
                }
                tally.merge(self.walk(&path));
                continue;
            }

            tally.merge(self.process_entry(dir, &name, &path));
        }

        tally
    }

    /// Decide whether an alias directory is safe to descend into.
    ///
    /// A directory alias is never converted, but one that resolves to the
    /// directory currently being walked, or to an ancestor of it, would
    /// make the traversal revisit its own tree forever.
    fn should_recurse(&self, dir: &Path, path: &Path) -> bool {
        match self.resolver.resolve(path) {
            Ok(target) => {
                let cyclic = PathRelationship::between(&target, dir) == PathRelationship::Same
                    || dir
                        .parent()
                        .is_some_and(|parent| PathRelationship::is_within(&target, parent));
                if cyclic {
                    self.logger
                        .warn(&format!("skipping recursive reference: {}", path.display()));
                    return false;
                }
                true
            }
            Err(e) if e.is_recursion_guard() => {
                self.logger
                    .warn(&format!("skipping recursive reference: {}", path.display()));
                false
            }
            Err(e) => {
                // An alias directory that fails to resolve for any other
                // reason is still walked as an ordinary directory.
                self.logger
                    .debug(&format!("ignoring unresolvable alias directory: {e}"));
                true
            }
        }
    }

    /// Classify and, if warranted, convert a single non-directory entry.
    fn process_entry(&self, dir: &Path, name: &std::ffi::OsStr, path: &Path) -> RunTally {
        let mut tally = RunTally::default();

        if !self.classifier.is_alias(path) {
            return tally;
        }

        match self.resolver.resolve(path) {
            Ok(target) => match relink(dir, name, path, &target) {
                Ok(()) => {
                    self.logger.status(&format!(
                        "converted: {} -> {}",
                        path.display(),
                        target.display()
                    ));
                    tally.record_success();
                }
                Err(e) => {
                    self.logger
                        .error(&format!("failed to convert {}: {e}", path.display()));
                    tally.record_failure();
                }
            },
            Err(e) => {
                self.logger.error(&e.to_string());
                tally.record_failure();
            }
        }

        tally
    }
}

/// Rename the alias to its hidden backup name and create the replacement
/// symlink.
///
/// The two steps are not atomic. If the process dies between them, the
/// backup remains and the original name is simply absent.
fn relink(dir: &Path, name: &std::ffi::OsStr, alias: &Path, target: &Path) -> Result<()> {
    let mut backup_name = OsString::from(".");
    backup_name.push(name);
    backup_name.push(".backup");
    let backup = dir.join(backup_name);

    fs::rename(alias, &backup)?;
    make_symlink(target, alias)?;
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_symlink(_target: &Path, _link: &Path) -> Result<()> {
    Err(Error::PlatformUnsupported)
}
