//! Everything that can stop a run, and the exit status each one maps to.

use crate::conflict::Conflicts;
use std::path::PathBuf;
use std::process::ExitCode;
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("failed to fetch template from {origin}: {source}")]
    Fetch {
        origin: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to extract template: {0}")]
    Extract(#[source] std::io::Error),

    #[error("unexpected template layout: expected a single top-level directory, found {found}")]
    Layout { found: usize },

    #[error("no files processed")]
    Empty,

    #[error("{} path(s) already exist and would be overwritten", .0.len())]
    Conflict(Conflicts),

    #[error("failed to write {path:?}: {source}")]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process-level outcome of a run.
#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumIter)]
pub enum Status {
    Success,
    Failure,
    Usage,
    Fetch,
    Layout,
    Conflict,
    Empty,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Usage => 2,
            Self::Fetch => 3,
            Self::Layout => 4,
            Self::Conflict => 5,
            Self::Empty => 6,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidName { .. } => Status::Usage,
            Self::Fetch { .. } => Status::Fetch,
            Self::Extract(_) | Self::Layout { .. } => Status::Layout,
            Self::Empty => Status::Empty,
            Self::Conflict(_) => Status::Conflict,
            Self::Commit { .. } | Self::Io(_) => Status::Failure,
        }
    }

    /// Wrap a filesystem failure during commit with the path involved.
    pub fn commit(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Commit { path, source }
    }
}
