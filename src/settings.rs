//! Fixed knobs of the engine.
//!
//! These are constants in everyday use, but they travel as a value so tests
//! (and anyone pointing the tool at a different template) can swap tokens or
//! exclusions without touching the engine.
//!
//! ```
//! use blender_init::settings::Settings;
//!
//! let settings = Settings::default()
//!     .token("my_template")
//!     .exclude(["README.md", "CHANGELOG.md"])?;
//! assert_eq!(settings.token, "my_template");
//! assert_eq!(settings.exclusions.len(), 2);
//! # Ok::<(), blender_init::relpath::PathError>(())
//! ```

use crate::classify::SAMPLE_SIZE;
use crate::relpath::{PathError, RelPath};
use std::collections::BTreeSet;

pub const TEMPLATE_REPO: &str = "unclepomedev/blender-addon-dev-template";
pub const TEMPLATE_URL: &str = "https://codeload.github.com/unclepomedev/blender-addon-dev-template/tar.gz/refs/heads/main";
pub const PLACEHOLDER_TOKEN: &str = "addon_hello_world";
pub const MAINTAINER_PLACEHOLDER: &str = "MAINTAINER_STRING";
pub const README: &str = "README.md";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Replaced in paths and contents.
    pub token: String,

    /// Replaced in contents only, and only when a maintainer is given.
    pub maintainer_token: String,

    /// Template paths that are never carried over, matched exactly.
    pub exclusions: BTreeSet<RelPath>,

    /// How many leading bytes the classifier sees.
    pub sample_size: usize,

    /// Document generated in the destination after a commit.
    pub readme: RelPath,

    /// Prefix for the per-run scratch directory.
    pub scratch_prefix: String,

    pub template_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        let readme = RelPath::new(README).expect("README constant is a valid path");
        Self {
            token: PLACEHOLDER_TOKEN.into(),
            maintainer_token: MAINTAINER_PLACEHOLDER.into(),
            exclusions: BTreeSet::from([readme.clone()]),
            sample_size: SAMPLE_SIZE,
            readme: readme,
            scratch_prefix: "bl_addon_tpl_".into(),
            template_url: TEMPLATE_URL.into(),
        }
    }
}

impl Settings {
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn maintainer_token(mut self, token: impl Into<String>) -> Self {
        self.maintainer_token = token.into();
        self
    }

    /// Replace the exclusion set.
    pub fn exclude<S>(mut self, paths: impl IntoIterator<Item = S>) -> Result<Self, PathError>
    where
        S: AsRef<str>,
    {
        self.exclusions = paths
            .into_iter()
            .map(|p| RelPath::new(p))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    pub fn is_excluded(&self, path: &RelPath) -> bool {
        self.exclusions.contains(path)
    }
}
