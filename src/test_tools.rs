//! Fixture builders shared by the unit tests.

use crate::error::Result;
use crate::extract::Template;
use crate::relpath::RelPath;
use crate::tree::{Contents, Tree};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::Path;

pub fn rp(s: &str) -> RelPath {
    RelPath::new(s).expect("test path should be valid")
}

/// Write text files under `root`, creating parents as needed.
pub fn populate(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
    for (path, contents) in files {
        let dest = rp(path).under(root);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, contents)?;
    }
    Ok(())
}

/// Human-readable dump of a directory, in tree order.
///
/// Text files list their lines indented underneath; anything else just
/// reports its length.
pub fn listing(root: &Path) -> std::io::Result<String> {
    let mut out = String::new();
    for (path, contents) in Tree::scan(root)?.entries() {
        match contents {
            Contents::Dir => out.push_str(&format!("DIR {}\n", path)),
            Contents::File(real) => {
                out.push_str(&format!("FILE {}\n", path));
                match String::from_utf8(std::fs::read(real)?) {
                    Ok(text) => {
                        for line in text.lines() {
                            out.push_str(&format!("  {}\n", line));
                        }
                    }
                    Err(e) => out.push_str(&format!("  <{} bytes>\n", e.as_bytes().len())),
                }
            }
        }
    }
    Ok(out)
}

/// Build a `.tar.gz` holding the given files.
pub fn tarball(files: &[(&str, &[u8])]) -> std::io::Result<Vec<u8>> {
    let mut builder = tar::Builder::new(GzEncoder::new(vec![], Compression::default()));
    for (path, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *contents)?;
    }
    builder.into_inner()?.finish()
}

/// A template that writes a fixed set of files, no archive involved.
pub struct FixtureTemplate(pub Vec<(&'static str, &'static str)>);

impl Template for FixtureTemplate {
    fn unpack_into(&self, dir: &Path) -> Result<()> {
        populate(dir, &self.0)?;
        Ok(())
    }

    fn describe(&self) -> String {
        "fixture".into()
    }
}
