//! Give a freshly initialized project a README unless it already has one.

use crate::relpath::RelPath;
use std::io::Result;
use std::path::Path;

pub fn contents(name: &str) -> String {
    format!("# {}\n\nDescription of {}.", name, name)
}

/// Write the README under `dest` if it is missing, or unconditionally when
/// `overwrite` is set. Returns whether anything was written.
pub fn ensure(dest: &Path, readme: &RelPath, name: &str, overwrite: bool) -> Result<bool> {
    let path = readme.under(dest);
    if !overwrite && std::fs::symlink_metadata(&path).is_ok() {
        return Ok(false);
    }
    std::fs::write(&path, contents(name))?;
    Ok(true)
}
