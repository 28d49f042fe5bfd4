//! In-memory [`Fetcher`] for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::crawl::Fetcher;
use crate::download::DownloadError;

/// Serves canned pages and files; records every request.
///
/// Unknown pages and files answer 404 unless a default file body is set.
/// Downloads are recorded but nothing is written to disk.
#[derive(Debug, Default)]
pub(crate) struct MockFetcher {
    pages: HashMap<String, Result<String, u16>>,
    files: HashMap<String, Result<Vec<u8>, u16>>,
    default_file: Option<Vec<u8>>,
    download_latency: Duration,
    page_fetches: Mutex<Vec<Url>>,
    downloads: Mutex<Vec<(Url, PathBuf)>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub(crate) fn with_page_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn with_file(mut self, url: &str, body: &[u8]) -> Self {
        self.files.insert(url.to_string(), Ok(body.to_vec()));
        self
    }

    pub(crate) fn with_file_status(mut self, url: &str, status: u16) -> Self {
        self.files.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn with_default_file(mut self, body: &[u8]) -> Self {
        self.default_file = Some(body.to_vec());
        self
    }

    pub(crate) fn with_download_latency(mut self, latency: Duration) -> Self {
        self.download_latency = latency;
        self
    }

    pub(crate) fn page_fetches(&self) -> Vec<Url> {
        self.page_fetches.lock().unwrap().clone()
    }

    pub(crate) fn downloads(&self) -> Vec<(Url, PathBuf)> {
        self.downloads.lock().unwrap().clone()
    }

    pub(crate) fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, DownloadError> {
        self.page_fetches.lock().unwrap().push(url.clone());
        match self.pages.get(url.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(DownloadError::http_status(url.as_str(), *status)),
            None => Err(DownloadError::http_status(url.as_str(), 404)),
        }
    }

    async fn download(&self, url: &Url, destination: &Path) -> Result<u64, DownloadError> {
        self.downloads
            .lock()
            .unwrap()
            .push((url.clone(), destination.to_path_buf()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(self.download_latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.files.get(url.as_str()) {
            Some(Ok(body)) => Ok(body.len() as u64),
            Some(Err(status)) => Err(DownloadError::http_status(url.as_str(), *status)),
            None => match &self.default_file {
                Some(body) => Ok(body.len() as u64),
                None => Err(DownloadError::http_status(url.as_str(), 404)),
            },
        }
    }
}
