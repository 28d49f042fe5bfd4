//! Crawl outcome: counters plus the structured failures behind them.

use crate::download::{BatchReport, FailedDownload};

use super::CrawlError;

/// A directory or file that could not be processed.
#[derive(Debug)]
pub enum CrawlFailure {
    /// A directory subtree was abandoned.
    Directory(CrawlError),
    /// A single file download failed.
    File(FailedDownload),
}

impl CrawlFailure {
    /// Returns the URL that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Directory(error) => error.url(),
            Self::File(failed) => failed.task.source().as_str(),
        }
    }
}

/// Statistics and failures from one [`Crawler::crawl`](super::Crawler::crawl) call.
///
/// A crawl never fails as a whole: every error is caught at directory or file
/// scope and recorded here, so the caller can decide what exit status a
/// partial failure deserves.
#[derive(Debug, Default)]
pub struct CrawlReport {
    directories_visited: usize,
    files_attempted: usize,
    files_succeeded: usize,
    failures: Vec<CrawlFailure>,
}

impl CrawlReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct directories entered (including failed ones).
    #[must_use]
    pub fn directories_visited(&self) -> usize {
        self.directories_visited
    }

    /// Returns the number of directories whose listing could not be processed.
    #[must_use]
    pub fn directories_failed(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| matches!(f, CrawlFailure::Directory(_)))
            .count()
    }

    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.files_attempted
    }

    #[must_use]
    pub fn files_succeeded(&self) -> usize {
        self.files_succeeded
    }

    #[must_use]
    pub fn files_failed(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| matches!(f, CrawlFailure::File(_)))
            .count()
    }

    #[must_use]
    pub fn failures(&self) -> &[CrawlFailure] {
        &self.failures
    }

    /// Returns true if any directory or file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub(crate) fn record_directory(&mut self) {
        self.directories_visited += 1;
    }

    pub(crate) fn record_directory_failure(&mut self, error: CrawlError) {
        self.failures.push(CrawlFailure::Directory(error));
    }

    pub(crate) fn absorb_batch(&mut self, batch: BatchReport) {
        self.files_attempted += batch.attempted();
        self.files_succeeded += batch.succeeded();
        self.failures
            .extend(batch.into_failures().into_iter().map(CrawlFailure::File));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DownloadError;

    #[test]
    fn test_report_default_is_empty() {
        let report = CrawlReport::new();
        assert_eq!(report.directories_visited(), 0);
        assert_eq!(report.files_attempted(), 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_report_counts_directory_failures() {
        let mut report = CrawlReport::new();
        report.record_directory();
        report.record_directory_failure(CrawlError::fetch(
            "https://example.com/",
            DownloadError::http_status("https://example.com/", 404),
        ));

        assert_eq!(report.directories_visited(), 1);
        assert_eq!(report.directories_failed(), 1);
        assert_eq!(report.files_failed(), 0);
        assert!(report.has_failures());
        assert_eq!(report.failures()[0].url(), "https://example.com/");
    }
}
