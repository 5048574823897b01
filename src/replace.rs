//! Literal placeholder substitution for file contents and paths.
//!
//! ```
//! use blender_init::replace::Replacements;
//!
//! let r = Replacements::new("addon_hello_world", "my_cool_tool")?
//!     .with_secondary("MAINTAINER_STRING", Some("Ada"));
//! assert_eq!(
//!     r.rewrite_text("addon_hello_world by MAINTAINER_STRING"),
//!     "my_cool_tool by Ada"
//! );
//! # Ok::<(), blender_init::error::Error>(())
//! ```

use crate::error::Error;
use crate::relpath::RelPath;
use std::borrow::Cow;

#[derive(Debug, PartialEq, Clone)]
struct Pair {
    token: String,
    replacement: String,
}

impl Pair {
    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.contains(&self.token) {
            Cow::Owned(text.replace(&self.token, &self.replacement))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// What gets replaced, and with what.
///
/// The primary pair applies to contents and path segments alike. The
/// secondary pair only ever touches contents.
#[derive(Debug, PartialEq, Clone)]
pub struct Replacements {
    primary: Pair,
    secondary: Option<Pair>,
}

impl Replacements {
    /// Build from the primary pair, validating the replacement as a path
    /// segment since it will end up in file and directory names.
    pub fn new(token: impl Into<String>, replacement: impl Into<String>) -> Result<Self, Error> {
        let (token, replacement) = (token.into(), replacement.into());
        validate_name(&replacement)?;
        if token.is_empty() {
            return Err(Error::InvalidName {
                name: token,
                reason: "placeholder token is empty",
            });
        }
        Ok(Self {
            primary: Pair { token, replacement },
            secondary: None,
        })
    }

    /// Configure the content-only pair. `None` and empty replacements leave
    /// it unconfigured.
    pub fn with_secondary(mut self, token: impl Into<String>, replacement: Option<&str>) -> Self {
        let token = token.into();
        self.secondary = match replacement {
            Some(r) if !r.is_empty() && !token.is_empty() => Some(Pair {
                token,
                replacement: r.to_owned(),
            }),
            _ => None,
        };
        self
    }

    pub fn token(&self) -> &str {
        &self.primary.token
    }

    pub fn replacement(&self) -> &str {
        &self.primary.replacement
    }

    pub fn rewrite_text(&self, text: &str) -> String {
        let replaced = self.primary.apply(text);
        match &self.secondary {
            Some(pair) => pair.apply(&replaced).into_owned(),
            None => replaced.into_owned(),
        }
    }

    pub fn rewrite_segment<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        self.primary.apply(segment)
    }

    pub fn rewrite_path(&self, path: &RelPath) -> RelPath {
        path.map_segments(|seg| self.rewrite_segment(seg))
    }
}

/// A replacement name has to survive being used as a single path segment.
pub fn validate_name(name: &str) -> Result<(), Error> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\', '\0']) {
        "name contains a path separator or NUL"
    } else if name == "." || name == ".." {
        "name is a relative directory"
    } else {
        return Ok(());
    };
    Err(Error::InvalidName {
        name: name.to_owned(),
        reason: reason,
    })
}
