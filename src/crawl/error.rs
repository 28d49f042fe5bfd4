//! Error types for directory traversal.

use thiserror::Error;

use crate::download::DownloadError;

/// Errors that abandon a directory subtree.
///
/// None of these abort the crawl; they are logged and collected in the
/// [`CrawlReport`](super::CrawlReport).
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The listing page could not be retrieved (network failure, error
    /// status, or an undecodable body).
    #[error("failed to fetch directory {url}: {source}")]
    Fetch {
        /// The directory URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: DownloadError,
    },

    /// The crawl root is not an http or https URL.
    #[error("unsupported root URL {url}: only http and https are crawled")]
    InvalidRoot {
        /// The rejected URL.
        url: String,
    },
}

impl CrawlError {
    /// Creates a fetch error for a directory.
    pub fn fetch(url: impl Into<String>, source: DownloadError) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid-root error.
    pub fn invalid_root(url: impl Into<String>) -> Self {
        Self::InvalidRoot { url: url.into() }
    }

    /// Returns the URL this error concerns.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::InvalidRoot { url } => url,
        }
    }
}
