//! Turn an extracted template into a rewritten staging tree.
//!
//! Nothing here touches the destination. The whole template is rewritten
//! into a private scratch directory first, so every later decision (abort on
//! conflict, overwrite, ...) is made against the finished result.
//!
//! Per entry, in [`RelPath`] order:
//!
//!  1. Skip it if its original path is excluded.
//!  2. Rewrite the path segment by segment.
//!  3. Directories are created, nothing more.
//!  4. Files are read once and sniffed from their leading bytes. Text gets
//!     the token rewriter, binary (or anything that fails to decode in full)
//!     is copied byte for byte.
//!  5. Permission bits follow along when they can.

use crate::classify::{classify, sample, Kind};
use crate::error::{Error, Result};
use crate::relpath::RelPath;
use crate::replace::Replacements;
use crate::settings::Settings;
use crate::tree::{copy_mode, Contents, Tree};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fully rewritten template, waiting to be committed.
///
/// The scratch directory goes away when this is dropped.
pub struct Staging {
    dir: TempDir,
    tree: Tree<PathBuf>,
}

impl Staging {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Staged entries. File contents point into [`Staging::root`].
    pub fn tree(&self) -> &Tree<PathBuf> {
        &self.tree
    }
}

/// Tallies from one processing pass.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Processed {
    pub dirs: usize,
    pub text: usize,
    pub binary: usize,
    pub excluded: usize,
}

pub struct Processor<'a> {
    settings: &'a Settings,
    replacements: &'a Replacements,
}

impl<'a> Processor<'a> {
    pub fn new(settings: &'a Settings, replacements: &'a Replacements) -> Self {
        Self {
            settings: settings,
            replacements: replacements,
        }
    }

    /// Validate the extraction layout and stage its single top-level
    /// directory.
    pub fn run(&self, extract_root: &Path) -> Result<(Staging, Processed)> {
        let src_root = single_top_level(extract_root)?;
        let dir = tempfile::Builder::new()
            .prefix(&self.settings.scratch_prefix)
            .tempdir()?;
        let processed = self.process(&src_root, dir.path())?;

        let tree = Tree::scan(dir.path())?;
        if tree.is_empty() {
            return Err(Error::Empty);
        }
        Ok((Staging { dir, tree }, processed))
    }

    /// Rewrite everything under `src_root` into `dst_root`.
    pub fn process(&self, src_root: &Path, dst_root: &Path) -> Result<Processed> {
        let mut processed = Processed::default();
        for (rel, contents) in Tree::scan(src_root)?.entries() {
            if self.settings.is_excluded(rel) {
                processed.excluded += 1;
                continue;
            }
            let dst = self.destination(rel, dst_root);
            match contents {
                Contents::Dir => {
                    create_dir_all(&dst)?;
                    processed.dirs += 1;
                }
                Contents::File(src) => {
                    if let Some(parent) = dst.parent() {
                        create_dir_all(parent)?;
                    }
                    let (bytes, kind) = self.transform(std::fs::read(src)?);
                    std::fs::write(&dst, bytes)?;
                    let _ = copy_mode(src, &dst);
                    match kind {
                        Kind::Text => processed.text += 1,
                        Kind::Binary => processed.binary += 1,
                    }
                }
            }
        }
        Ok(processed)
    }

    fn destination(&self, rel: &RelPath, dst_root: &Path) -> PathBuf {
        self.replacements.rewrite_path(rel).under(dst_root)
    }

    /// Rewrite file content if it is text, returning how it was treated.
    pub fn transform(&self, raw: Vec<u8>) -> (Vec<u8>, Kind) {
        if classify(sample(&raw, self.settings.sample_size)) == Kind::Binary {
            return (raw, Kind::Binary);
        }
        // The sample decoding cleanly does not guarantee the rest will.
        match String::from_utf8(raw) {
            Ok(text) => (
                self.replacements.rewrite_text(&text).into_bytes(),
                Kind::Text,
            ),
            Err(e) => (e.into_bytes(), Kind::Binary),
        }
    }
}

/// The one directory an archive is expected to unpack into.
///
/// Loose files next to it are ignored. Zero or several directories mean
/// the archive is not shaped like a template.
pub fn single_top_level(root: &Path) -> Result<PathBuf> {
    let mut dirs: Vec<PathBuf> = vec![];
    for entry in std::fs::read_dir(root).map_err(Error::Extract)? {
        let entry = entry.map_err(Error::Extract)?;
        if entry.file_type().map_err(Error::Extract)?.is_dir() {
            dirs.push(entry.path());
        }
    }
    match dirs.len() {
        1 => Ok(dirs.remove(0)),
        found => Err(Error::Layout { found: found }),
    }
}
