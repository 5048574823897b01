//! Find staged paths that already exist in the destination.

use crate::relpath::RelPath;
use crate::tree::Tree;
use std::collections::BTreeSet;
use std::path::Path;

/// Every staged path that is already present at the destination, sorted.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Conflicts(BTreeSet<RelPath>);

impl Conflicts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, path: &RelPath) -> bool {
        self.0.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelPath> {
        self.0.iter()
    }
}

impl FromIterator<RelPath> for Conflicts {
    fn from_iter<I: IntoIterator<Item = RelPath>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Probe `dest` for every path in `tree`. Read-only, and never stops early.
///
/// Anything `symlink_metadata` can see counts, dangling links included,
/// since writing there would clobber it all the same. The one exception is
/// a staged directory landing on an existing directory: that merges.
pub fn check<C>(tree: &Tree<C>, dest: &Path) -> Conflicts {
    tree.entries()
        .iter()
        .filter(|(path, contents)| match std::fs::symlink_metadata(path.under(dest)) {
            Ok(meta) => contents.is_file() || !meta.is_dir(),
            Err(_) => false,
        })
        .map(|(path, _)| path.clone())
        .collect()
}
