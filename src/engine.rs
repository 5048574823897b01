//! One invocation, start to finish: unpack the template into scratch space,
//! stage the rewritten tree, gate on conflicts, commit, and settle the README.

use crate::commit::{self, Committed};
use crate::conflict::{check, Conflicts};
use crate::error::{Error, Result};
use crate::extract::Template;
use crate::logger::Logger;
use crate::process::{Processed, Processor, Staging};
use crate::readme;
use crate::replace::Replacements;
use crate::settings::Settings;
use std::io::Write;
use std::path::Path;

/// What the user asked for.
#[derive(Debug, PartialEq, Clone)]
pub struct Request {
    pub name: String,
    pub maintainer: Option<String>,
    pub overwrite: bool,
}

impl Request {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            maintainer: None,
            overwrite: false,
        }
    }

    pub fn maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.maintainer = Some(maintainer.into());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// What a successful run did.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Summary {
    pub processed: Processed,
    pub committed: Committed,
    pub readme_written: bool,
}

pub struct Engine {
    settings: Settings,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self { settings: settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn replacements(&self, name: &str, maintainer: Option<&str>) -> Result<Replacements> {
        Ok(Replacements::new(self.settings.token.as_str(), name)?
            .with_secondary(self.settings.maintainer_token.as_str(), maintainer))
    }

    pub fn stage(&self, extract_root: &Path, replacements: &Replacements) -> Result<(Staging, Processed)> {
        Processor::new(&self.settings, replacements).run(extract_root)
    }

    pub fn conflicts(&self, staging: &Staging, dest: &Path) -> Conflicts {
        check(staging.tree(), dest)
    }

    pub fn commit(&self, staging: &Staging, dest: &Path, overwrite: bool) -> Result<Committed> {
        commit::commit(staging.tree(), dest, overwrite)
    }

    pub fn run(
        &self,
        template: &dyn Template,
        req: &Request,
        dest: &Path,
        log: &mut Logger,
    ) -> Result<Summary> {
        // Before any I/O, so a bad name never costs a download.
        let replacements = self.replacements(&req.name, req.maintainer.as_deref())?;

        let scratch = tempfile::Builder::new()
            .prefix(&self.settings.scratch_prefix)
            .tempdir()?;
        let unpacked = scratch.path().join("unpacked");
        std::fs::create_dir(&unpacked)?;

        write!(log.progress(), "--- Download ---\n{}\n", template.describe())?;
        template.unpack_into(&unpacked)?;

        write!(log.progress(), "--- Process ---\n")?;
        let (staging, processed) = self.stage(&unpacked, &replacements)?;
        write!(
            log.progress(),
            "{} text, {} binary, {} dirs, {} excluded\n",
            processed.text,
            processed.binary,
            processed.dirs,
            processed.excluded
        )?;

        write!(log.progress(), "--- Commit ---\n")?;
        let committed = match self.commit(&staging, dest, req.overwrite) {
            Err(Error::Conflict(conflicts)) => {
                report(&conflicts, dest, log)?;
                return Err(Error::Conflict(conflicts));
            }
            other => other?,
        };
        if committed.replaced > 0 {
            write!(log.progress(), "Overwrote {} path(s)\n", committed.replaced)?;
        }

        let readme_written = readme::ensure(dest, &self.settings.readme, &req.name, req.overwrite)?;
        if readme_written {
            write!(log.progress(), "Generated {}\n", self.settings.readme)?;
        }

        write!(log.progress(), "Done.\n")?;
        Ok(Summary {
            processed: processed,
            committed: committed,
            readme_written: readme_written,
        })
    }
}

fn report(conflicts: &Conflicts, dest: &Path, log: &mut Logger) -> std::io::Result<()> {
    write!(
        log.error(),
        "The following paths already exist in {} and would be overwritten:\n",
        dest.display()
    )?;
    for path in conflicts.iter() {
        write!(log.error(), "  {}\n", path)?;
    }
    write!(
        log.error(),
        "Aborting. Use --force to overwrite, or remove the conflicting files.\n"
    )
}
