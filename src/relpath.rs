//! Relative paths inside a template tree.
//!
//! A [`RelPath`] obeys the following rules:
//!
//!  * Valid UTF-8
//!  * Path-separated with /
//!  * Does not begin or end with /
//!  * Does not contain . or .. segments
//!  * Does not contain multiple / characters right next to each other
//!  * Is never empty
//!
//! Ordering goes segment by segment, the same way `Path` compares, so a
//! directory always sorts before everything inside it.
//!
//! ```
//! use blender_init::relpath::RelPath;
//!
//! let p = RelPath::new("/addon_hello_world//__init__.py")?;
//! assert_eq!(p.as_str(), "addon_hello_world/__init__.py");
//! # Ok::<(), blender_init::relpath::PathError>(())
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum PathError {
    #[error("path has no segments")]
    Empty,

    #[error("path is not valid UTF-8: {0:?}")]
    NotUnicode(PathBuf),

    #[error("path escapes its root: {0:?}")]
    NotRelative(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelPath(String);

impl RelPath {
    /// Parse a `/`-separated path. Stray slashes are tolerated, but `.` and
    /// `..` segments are refused rather than resolved.
    pub fn new(src: impl AsRef<str>) -> Result<Self, PathError> {
        let src = src.as_ref();
        if src.split('/').any(|seg| seg == "." || seg == "..") {
            return Err(PathError::NotRelative(src.into()));
        }
        let canon = Self::canonize(src);
        if canon.is_empty() {
            Err(PathError::Empty)
        } else {
            Ok(Self(canon.into_owned()))
        }
    }

    /// Convert an OS path that is already relative to some root.
    pub fn from_path(rel: &Path) -> Result<Self, PathError> {
        let mut segments: Vec<&str> = vec![];
        for component in rel.components() {
            match component {
                Component::Normal(os) => segments.push(
                    os.to_str()
                        .ok_or_else(|| PathError::NotUnicode(rel.into()))?,
                ),
                Component::CurDir => (),
                _ => return Err(PathError::NotRelative(rel.into())),
            }
        }
        Self::new(segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('/')
    }

    /// Rebuild the path one segment at a time.
    ///
    /// The closure must not produce empty segments or segments containing /.
    pub fn map_segments<'a, F>(&'a self, f: F) -> Self
    where
        F: FnMut(&'a str) -> Cow<'a, str>,
    {
        let mapped: Vec<Cow<str>> = self.segments().map(f).collect();
        debug_assert!(mapped.iter().all(|s| !s.is_empty() && !s.contains('/')));
        Self(mapped.join("/"))
    }

    /// Where this path lives under a real directory.
    pub fn under(&self, base: impl AsRef<Path>) -> PathBuf {
        self.segments()
            .fold(base.as_ref().to_path_buf(), |acc, seg| acc.join(seg))
    }

    pub fn is_well_formed(src: &str) -> bool {
        !src.is_empty()
            && src
                .split('/')
                .all(|seg| seg != "" && seg != "." && seg != "..")
    }

    pub fn canonize(src: &str) -> Cow<'_, str> {
        if Self::is_well_formed(src) {
            Cow::Borrowed(src)
        } else {
            Cow::Owned(
                src.split('/')
                    .filter(|s| *s != "" && *s != "." && *s != "..")
                    .collect::<Vec<&str>>()
                    .join("/"),
            )
        }
    }
}

impl Ord for RelPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments().cmp(other.segments())
    }
}

impl PartialOrd for RelPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for RelPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for RelPath {
    type Error = PathError;
    fn try_from(src: &str) -> Result<Self, PathError> {
        Self::new(src)
    }
}

impl TryFrom<&Path> for RelPath {
    type Error = PathError;
    fn try_from(src: &Path) -> Result<Self, PathError> {
        Self::from_path(src)
    }
}
