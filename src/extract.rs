//! Unpack template archives into a scratch directory.
//!
//! Whatever lands in the directory is expected to be a single top-level
//! directory, the way GitHub archives are laid out (`<repo>-<branch>/...`).
//! That contract is checked by the processor, not here.

use crate::error::{Error, Result};
use crate::fetch::Origin;
use flate2::read::GzDecoder;
use std::io::Cursor;
use std::path::Path;
use tar::Archive;

/// Something that can lay a template out on disk.
pub trait Template {
    fn unpack_into(&self, dir: &Path) -> Result<()>;

    /// Short description for progress output.
    fn describe(&self) -> String;
}

/// A gzip-compressed tar archive, local or remote.
#[derive(Debug, PartialEq, Clone)]
pub struct Tarball(pub Origin);

impl Template for Tarball {
    fn unpack_into(&self, dir: &Path) -> Result<()> {
        let bytes = self.0.fetch()?;
        unpack(&bytes, dir)
    }

    fn describe(&self) -> String {
        self.0.to_string()
    }
}

/// Unpack `.tar.gz` bytes into `dir`.
pub fn unpack(bytes: &[u8], dir: &Path) -> Result<()> {
    let mut archive = Archive::new(GzDecoder::new(Cursor::new(bytes)));
    archive.set_preserve_permissions(true);
    archive.unpack(dir).map_err(Error::Extract)
}
