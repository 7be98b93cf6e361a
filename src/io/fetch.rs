//! Loading source text from disk, memory, or (with `download`) HTTP.

use std::{fmt, path::PathBuf};

use thiserror::Error;
use tracing::debug;

/// Where a dataset comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
    /// Already in memory.
    Inline(String),
}

impl Source {
    /// Interpret a CLI argument: `http(s)://` prefixes are URLs, anything else a path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
            Source::Inline(text) => write!(f, "<inline, {} bytes>", text.len()),
        }
    }
}

/// Failure to obtain a dataset's bytes.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[cfg(feature = "download")]
    #[error("failed to download {url}: {error}")]
    Http {
        url: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("cannot fetch {0}: built without the `download` feature")]
    Unsupported(String),
}

/// Fetch the full text of `source`.
pub async fn fetch_text(source: &Source) -> Result<String, LoadError> {
    debug!("[io::fetch] loading {source}");
    match source {
        Source::Inline(text) => Ok(text.clone()),
        Source::Path(path) => tokio::fs::read_to_string(path).await
            .map_err(|error| LoadError::Io { source_name: path.display().to_string(), error }),
        #[cfg(feature = "download")]
        Source::Url(url) => {
            let http = |error| LoadError::Http { url: url.clone(), error };
            reqwest::get(url).await
                .and_then(|response| response.error_for_status())
                .map_err(http)?
                .text().await
                .map_err(http)
        }
        #[cfg(not(feature = "download"))]
        Source::Url(url) => Err(LoadError::Unsupported(url.clone())),
    }
}
