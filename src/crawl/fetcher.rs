//! The HTTP capability the crawler and scheduler depend on.

use std::path::Path;

use async_trait::async_trait;
use url::Url;

use crate::download::DownloadError;

/// Fetches listing pages and downloads files.
///
/// [`HttpClient`](crate::download::HttpClient) is the production
/// implementation. The trait exists so traversal can be driven by any
/// transport, including in-memory fakes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the body of the page at `url`.
    ///
    /// A non-success status must be reported as an error.
    async fn fetch_page(&self, url: &Url) -> Result<String, DownloadError>;

    /// Makes a single download attempt of `url` into `destination`,
    /// returning the number of bytes written.
    async fn download(&self, url: &Url, destination: &Path) -> Result<u64, DownloadError>;
}
