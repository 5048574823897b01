//! Where template archives come from.

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, PartialEq, Clone)]
pub enum Origin {
    Url(String),
    File(PathBuf),
}

impl Origin {
    /// Anything that looks like an http(s) URL is downloaded, everything
    /// else is read from disk.
    pub fn parse(src: impl AsRef<str>) -> Self {
        let src = src.as_ref();
        if src.starts_with("http://") || src.starts_with("https://") {
            Self::Url(src.into())
        } else {
            Self::File(src.into())
        }
    }

    /// Fetch the raw archive bytes. No retries.
    pub fn fetch(&self) -> Result<Vec<u8>> {
        let fetched: std::result::Result<Vec<u8>, BoxError> = match self {
            Self::Url(url) => download(url),
            Self::File(path) => std::fs::read(path).map_err(BoxError::from),
        };
        fetched.map_err(|source| Error::Fetch {
            origin: self.to_string(),
            source: source,
        })
    }
}

fn download(url: &str) -> std::result::Result<Vec<u8>, BoxError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
