//! HTTP client wrapper for listing pages and streaming file downloads.
//!
//! This module provides the `HttpClient` struct which fetches directory
//! listing bodies and streams image bodies to disk with proper timeout
//! configuration and error handling.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, WRITE_BUFFER_BYTES};
use super::error::DownloadError;
use crate::crawl::Fetcher;
use crate::user_agent;

/// HTTP client for listing fetches and streaming downloads.
///
/// This client is designed to be created once and reused for the whole
/// crawl, taking advantage of connection pooling. Cloning is cheap.
///
/// # Example
///
/// ```no_run
/// use harvester_core::download::HttpClient;
/// use std::path::Path;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let url = Url::parse("https://example.com/photos/cat.jpg")?;
/// let bytes = client.download_to_path(&url, Path::new("./downloads/cat.jpg")).await?;
/// println!("Downloaded {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes of silence between reads (no total deadline)
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend or system
    /// configuration cannot be initialized.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// `read_timeout_secs` bounds the silence between two reads; a body
    /// that keeps trickling in is never aborted.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the client cannot be built.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Fetches a listing page and returns its decoded body.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the request fails, the server returns a
    /// non-success status, or the body cannot be decoded as text.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &Url) -> Result<String, DownloadError> {
        let response = self.send_get(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::from_request(url.as_str(), e))?;
        debug!(bytes = body.len(), "fetched listing page");
        Ok(body)
    }

    /// Downloads `url` to `destination`, overwriting any existing file.
    ///
    /// The status is checked before the file is created, so an error status
    /// never leaves a file behind. The body is streamed in chunks; a failure
    /// mid-stream removes the partially written file.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Writing to disk fails
    #[must_use = "download result contains the number of bytes written"]
    #[instrument(skip(self), fields(url = %url, path = %destination.display()))]
    pub async fn download_to_path(
        &self,
        url: &Url,
        destination: &Path,
    ) -> Result<u64, DownloadError> {
        debug!("starting download");

        let response = self.send_get(url).await?;

        let mut file = File::create(destination)
            .await
            .map_err(|e| DownloadError::io(destination, e))?;

        let stream_result = stream_to_file(&mut file, response, url.as_str(), destination).await;

        if stream_result.is_err() {
            debug!(path = %destination.display(), "cleaning up partial file after error");
            drop(file);
            let _ = tokio::fs::remove_file(destination).await;
        }

        stream_result
    }

    async fn send_get(&self, url: &Url) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::from_request(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url.as_str(), status.as_u16()));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch_page(&self, url: &Url) -> Result<String, DownloadError> {
        self.fetch_text(url).await
    }

    async fn download(&self, url: &Url, destination: &Path) -> Result<u64, DownloadError> {
        self.download_to_path(url, destination).await
    }
}

/// Streams response body to file, returning bytes written.
///
/// Extracted so the caller can clean up on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_request(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}
