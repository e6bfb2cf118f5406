//! Path ancestry comparison.
//!
//! The cycle guard needs to know whether a resolved alias target sits at
//! or above the directory being rewritten. Comparing raw path strings for
//! that (as a prefix test) both over-triggers on sibling directories
//! sharing a name prefix and under-triggers on unnormalized paths, so the
//! comparison here is component-wise.

use std::path::Path;

/// Relationship between two paths in the filesystem hierarchy.
///
/// # Examples
///
/// ```
/// use dealias::PathRelationship;
/// use std::path::Path;
///
/// assert_eq!(
///     PathRelationship::between(Path::new("/home/user"), Path::new("/home/user/docs")),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,
    /// The first path is a descendant of the second.
    Descendant,
    /// The paths are the same location.
    Same,
    /// Neither path contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Comparison is component-wise, so `/a/b` is unrelated to `/a/bc`
    /// even though one is a string prefix of the other.
    ///
    /// # Examples
    ///
    /// ```
    /// use dealias::PathRelationship;
    /// use std::path::Path;
    ///
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/b"), Path::new("/a")),
    ///     PathRelationship::Descendant
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a"), Path::new("/a")),
    ///     PathRelationship::Same
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/b"), Path::new("/a/bc")),
    ///     PathRelationship::Unrelated
    /// );
    /// ```
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        // components() drops trailing separators, so /a/ and /a compare equal
        let mut c1 = path1.components();
        let mut c2 = path2.components();

        loop {
            match (c1.next(), c2.next()) {
                (None, None) => return Self::Same,
                (None, Some(_)) => return Self::Ancestor,
                (Some(_), None) => return Self::Descendant,
                (Some(a), Some(b)) if a == b => {}
                _ => return Self::Unrelated,
            }
        }
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use dealias::PathRelationship;
    /// use std::path::Path;
    ///
    /// let dir = Path::new("/home/user");
    /// assert!(PathRelationship::is_within(Path::new("/home/user/file"), dir));
    /// assert!(PathRelationship::is_within(dir, dir));
    /// assert!(!PathRelationship::is_within(Path::new("/home/other"), dir));
    /// ```
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(
            Self::between(path, directory),
            Self::Descendant | Self::Same
        )
    }
}
