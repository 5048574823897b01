//! Sorted directory trees.
//!
//! A [`Tree`] is a list of `(RelPath, Contents<C>)` entries with no
//! duplicate paths, kept in [`RelPath`] order. File content is generic: a
//! freshly scanned tree carries the on-disk location of every file, which
//! lets the processor decide for itself when to actually read bytes.
//!
//! The order is the point. Directory iteration order is whatever the OS felt
//! like that day, so nothing downstream ever walks `read_dir` directly.
//!
//! ```
//! use blender_init::relpath::RelPath;
//! use blender_init::tree::{Contents, Tree};
//!
//! let tree = Tree::from_entries([
//!     (RelPath::new("pkg/mod.py")?, Contents::File("print('hi!')")),
//!     (RelPath::new("pkg")?, Contents::Dir),
//! ]);
//! assert_eq!(tree.entries()[0].0.as_str(), "pkg");
//! # Ok::<(), blender_init::relpath::PathError>(())
//! ```

use crate::relpath::RelPath;
use std::collections::BTreeMap;
use std::io::{Error, Result};
use std::path::{Path, PathBuf};

/// An enum we use to differentiate dirs vs files.
#[derive(Debug, PartialEq, Clone)]
pub enum Contents<C> {
    Dir,
    File(C),
}

impl<C> Contents<C> {
    pub fn is_dir(&self) -> bool {
        match self {
            Self::Dir => true,
            Self::File(_) => false,
        }
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Tree<C>(Vec<(RelPath, Contents<C>)>);

impl<C> Tree<C> {
    /// Sort and de-duplicate entries. When a path shows up twice, the later
    /// entry wins.
    pub fn from_entries(entries: impl IntoIterator<Item = (RelPath, Contents<C>)>) -> Self {
        let uniq: BTreeMap<RelPath, Contents<C>> = entries.into_iter().collect();
        Self(uniq.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[(RelPath, Contents<C>)] {
        &self.0
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelPath> {
        self.0.iter().map(|(p, _)| p)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &RelPath> {
        self.0.iter().filter(|(_, c)| c.is_dir()).map(|(p, _)| p)
    }

    pub fn files(&self) -> impl Iterator<Item = (&RelPath, &C)> {
        self.0.iter().filter_map(|(p, c)| match c {
            Contents::File(content) => Some((p, content)),
            Contents::Dir => None,
        })
    }
}

impl Tree<PathBuf> {
    /// Read the filesystem to create a tree for a given directory.
    ///
    /// Symlinks that resolve to regular files inside `base` are treated as
    /// files. Any other symlink is left out: linked directories could loop,
    /// and targets outside `base` are not part of the tree.
    pub fn scan(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        let root = base.canonicalize()?;
        let mut output: Vec<(RelPath, Contents<PathBuf>)> = vec![];
        _scan(base, &root, base, &mut output)?;
        Ok(Self::from_entries(output))
    }
}

fn _scan(
    base: &Path,
    root: &Path,
    cur: &Path,
    output: &mut Vec<(RelPath, Contents<PathBuf>)>,
) -> Result<()> {
    for entry in std::fs::read_dir(cur)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            output.push((_relativize_path(base, &path)?, Contents::Dir));
            _scan(base, root, &path, output)?;
        } else if file_type.is_file() || (file_type.is_symlink() && _links_within(root, &path)) {
            output.push((_relativize_path(base, &path)?, Contents::File(path)));
        }
    }
    Ok(())
}

/// A symlink whose final target is a regular file under `root`.
fn _links_within(root: &Path, link: &Path) -> bool {
    link.is_file()
        && link
            .canonicalize()
            .map(|target| target.starts_with(root))
            .unwrap_or(false)
}

fn _relativize_path(base: &Path, p: &Path) -> Result<RelPath> {
    let rel = p.strip_prefix(base).map_err(Error::other)?;
    RelPath::from_path(rel).map_err(Error::other)
}

/// Copy permission bits from `src` onto `dst`.
///
/// Permissions are never load-bearing here, so callers drop the result.
pub fn copy_mode(src: &Path, dst: &Path) -> Result<()> {
    let perms = std::fs::metadata(src)?.permissions();
    std::fs::set_permissions(dst, perms)
}
