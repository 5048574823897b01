//! Copy a staging tree into the live destination.
//!
//! The conflict gate is all-or-nothing: if anything would be overwritten
//! without permission, not a single byte is written. Past the gate there is
//! no rollback. A filesystem error stops the commit where it is.

use crate::conflict::{check, Conflicts};
use crate::error::{Error, Result};
use crate::tree::{copy_mode, Tree};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// What a successful commit did.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Committed {
    pub dirs: usize,
    pub files: usize,
    pub replaced: usize,
}

/// Commit `tree` (whose file contents are real staged paths) into `dest`.
pub fn commit(tree: &Tree<PathBuf>, dest: &Path, overwrite: bool) -> Result<Committed> {
    let conflicts: Conflicts = check(tree, dest);
    if !conflicts.is_empty() && !overwrite {
        return Err(Error::Conflict(conflicts));
    }

    let mut committed = Committed::default();
    for rel in tree.dirs() {
        let target = rel.under(dest);
        let occupied = fs::symlink_metadata(&target).map(|m| !m.is_dir());
        if overwrite && occupied.unwrap_or(false) {
            remove(&target)?;
            committed.replaced += 1;
        }
        fs::create_dir_all(&target).map_err(Error::commit(&target))?;
        committed.dirs += 1;
    }

    for (rel, staged) in tree.files() {
        let target = rel.under(dest);
        if overwrite && exists(&target) {
            remove(&target)?;
            committed.replaced += 1;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(Error::commit(parent))?;
        }
        copy_file(staged, &target)?;
        committed.files += 1;
    }
    Ok(committed)
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove whatever sits at `path`. Real directories go recursively; files
/// and symlinks (even ones pointing at directories) are unlinked.
fn remove(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(Error::commit(path))?;
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(Error::commit(path))
    } else {
        fs::remove_file(path).map_err(Error::commit(path))
    }
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let mut reader = File::open(src).map_err(Error::commit(src))?;
    let mut writer = File::create(dst).map_err(Error::commit(dst))?;
    std::io::copy(&mut reader, &mut writer).map_err(Error::commit(dst))?;
    let _ = copy_mode(src, dst);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::process::{Processor, Staging};
    use crate::replace::Replacements;
    use crate::settings::Settings;
    use crate::test_tools::*;
    use indoc::indoc;

    fn scenario_a_staging() -> Result<Staging> {
        let extract = tempfile::tempdir()?;
        populate(
            extract.path(),
            &[("tpl-main/addon_hello_world/__init__.py", r#"NAME = "addon_hello_world""#)],
        )?;
        let settings = Settings::default();
        let r = Replacements::new("addon_hello_world", "my_cool_tool")?;
        let (staging, _) = Processor::new(&settings, &r).run(extract.path())?;
        Ok(staging)
    }

    #[test]
    fn into_empty_destination() -> Result<()> {
        let staging = scenario_a_staging()?;
        let dest = tempfile::tempdir()?;
        let committed = commit(staging.tree(), dest.path(), false)?;
        assert_eq!(
            committed,
            Committed {
                dirs: 1,
                files: 1,
                replaced: 0
            }
        );
        assert_eq!(
            listing(dest.path())?,
            indoc! {r#"
                DIR my_cool_tool
                FILE my_cool_tool/__init__.py
                  NAME = "my_cool_tool"
            "#}
        );
        Ok(())
    }

    #[test]
    fn scenario_b_conflict_aborts() -> Result<()> {
        let staging = scenario_a_staging()?;
        let dest = tempfile::tempdir()?;
        populate(
            dest.path(),
            &[("my_cool_tool/__init__.py", "ORIGINAL = True\n")],
        )?;

        match commit(staging.tree(), dest.path(), false) {
            Err(Error::Conflict(conflicts)) => assert_eq!(
                conflicts.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                vec!["my_cool_tool/__init__.py"]
            ),
            other => panic!("expected a conflict, got {:?}", other),
        }
        assert_eq!(
            std::fs::read_to_string(dest.path().join("my_cool_tool/__init__.py"))?,
            "ORIGINAL = True\n"
        );
        Ok(())
    }

    #[test]
    fn nothing_written_on_abort() -> Result<()> {
        let extract = tempfile::tempdir()?;
        populate(
            extract.path(),
            &[("t/a/one.txt", "1"), ("t/b/two.txt", "2"), ("t/z.txt", "3")],
        )?;
        let settings = Settings::default();
        let r = Replacements::new("addon_hello_world", "x")?;
        let (staging, _) = Processor::new(&settings, &r).run(extract.path())?;

        let dest = tempfile::tempdir()?;
        populate(dest.path(), &[("z.txt", "mine")])?;
        assert!(matches!(
            commit(staging.tree(), dest.path(), false),
            Err(Error::Conflict(_))
        ));
        assert_eq!(
            listing(dest.path())?,
            indoc! {"
                FILE z.txt
                  mine
            "}
        );
        Ok(())
    }

    #[test]
    fn scenario_c_overwrite() -> Result<()> {
        let staging = scenario_a_staging()?;
        let dest = tempfile::tempdir()?;
        populate(
            dest.path(),
            &[
                ("my_cool_tool/__init__.py", "ORIGINAL = True\n"),
                ("my_cool_tool/keep.py", "untouched\n"),
            ],
        )?;

        let committed = commit(staging.tree(), dest.path(), true)?;
        assert_eq!(committed.replaced, 1);
        assert_eq!(
            std::fs::read_to_string(dest.path().join("my_cool_tool/__init__.py"))?,
            r#"NAME = "my_cool_tool""#
        );
        // Directories are merged into, not replaced.
        assert_eq!(
            std::fs::read_to_string(dest.path().join("my_cool_tool/keep.py"))?,
            "untouched\n"
        );
        Ok(())
    }

    #[test]
    fn overwrite_replaces_mismatched_kinds() -> Result<()> {
        let staging = scenario_a_staging()?;
        let dest = tempfile::tempdir()?;
        // A file where the package directory should go.
        populate(dest.path(), &[("my_cool_tool", "in the way")])?;
        commit(staging.tree(), dest.path(), true)?;
        assert!(dest.path().join("my_cool_tool").is_dir());

        // A directory where a file should go.
        let dest = tempfile::tempdir()?;
        populate(dest.path(), &[("my_cool_tool/__init__.py/stale.txt", "x")])?;
        let committed = commit(staging.tree(), dest.path(), true)?;
        assert_eq!(committed.replaced, 1);
        assert!(dest.path().join("my_cool_tool/__init__.py").is_file());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_unlinks_symlinked_dir() -> Result<()> {
        let staging = scenario_a_staging()?;
        let dest = tempfile::tempdir()?;
        let elsewhere = tempfile::tempdir()?;
        std::os::unix::fs::symlink(elsewhere.path(), dest.path().join("my_cool_tool"))?;

        let committed = commit(staging.tree(), dest.path(), true)?;
        assert_eq!(committed.replaced, 1);
        let meta = std::fs::symlink_metadata(dest.path().join("my_cool_tool"))?;
        assert!(meta.is_dir());
        assert!(dest.path().join("my_cool_tool/__init__.py").is_file());
        assert_eq!(listing(elsewhere.path())?, "");
        Ok(())
    }

    #[test]
    fn write_failure_is_fatal() -> Result<()> {
        let staging = scenario_a_staging()?;
        let dest = tempfile::tempdir()?;
        // Without overwrite, nothing is removed, but a missing parent under a
        // regular file still cannot be created.
        let blocked = dest.path().join("blocked");
        std::fs::write(&blocked, "file, not a dir")?;
        assert!(matches!(
            commit(staging.tree(), &blocked, false),
            Err(Error::Commit { .. })
        ));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn modes_survive_commit() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let extract = tempfile::tempdir()?;
        populate(extract.path(), &[("t/run.sh", "#!/bin/sh\n")])?;
        std::fs::set_permissions(
            extract.path().join("t/run.sh"),
            std::fs::Permissions::from_mode(0o750),
        )?;
        let settings = Settings::default();
        let r = Replacements::new("addon_hello_world", "x")?;
        let (staging, _) = Processor::new(&settings, &r).run(extract.path())?;

        let dest = tempfile::tempdir()?;
        commit(staging.tree(), dest.path(), false)?;
        let mode = std::fs::metadata(dest.path().join("run.sh"))?.permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
        Ok(())
    }
}
