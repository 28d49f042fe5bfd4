//! Bounded worker pool that drains one directory's download batch.
//!
//! The scheduler spawns `min(max_workers, tasks)` Tokio tasks that share a
//! single claim index over an immutable task slice. Each worker claims one
//! task at a time with an atomic `fetch_add`, so no task is ever attempted
//! twice, performs a single download attempt, then pauses for the politeness
//! delay before claiming again.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use harvester_core::download::{DownloadScheduler, DownloadTask, HttpClient};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpClient::new()?);
//! let scheduler = DownloadScheduler::new(client, 5, Duration::from_millis(100));
//! let task = DownloadTask::new(
//!     Url::parse("https://example.com/photos/cat.jpg")?,
//!     "downloads/cat.jpg",
//! );
//! let report = scheduler.run(vec![task]).await;
//! println!("succeeded: {}, failed: {}", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use url::Url;

use super::DownloadError;
use crate::crawl::Fetcher;

/// One file to fetch: an absolute source URL and its local destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    source: Url,
    destination: PathBuf,
}

impl DownloadTask {
    #[must_use]
    pub fn new(source: Url, destination: impl Into<PathBuf>) -> Self {
        Self {
            source,
            destination: destination.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &Url {
        &self.source
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// A download attempt that did not succeed.
#[derive(Debug)]
pub struct FailedDownload {
    /// The task that failed.
    pub task: DownloadTask,
    /// Why it failed.
    pub error: DownloadError,
}

/// Outcome of one scheduler batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    attempted: usize,
    succeeded: usize,
    failures: Vec<FailedDownload>,
}

impl BatchReport {
    /// Returns the number of tasks a worker attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Returns the number of successful downloads.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn failures(&self) -> &[FailedDownload] {
        &self.failures
    }

    /// Consumes the report, yielding its failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<FailedDownload> {
        self.failures
    }

    fn merge(&mut self, other: BatchReport) {
        self.attempted += other.attempted;
        self.succeeded += other.succeeded;
        self.failures.extend(other.failures);
    }
}

/// Fixed-size worker pool for a batch of [`DownloadTask`]s.
///
/// The worker count is a snapshot per call to [`run`](Self::run); tasks
/// discovered later are scheduled by a later call, never merged into an
/// in-flight pool.
#[derive(Clone)]
pub struct DownloadScheduler {
    fetcher: Arc<dyn Fetcher>,
    max_workers: usize,
    politeness_delay: Duration,
}

impl std::fmt::Debug for DownloadScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadScheduler")
            .field("max_workers", &self.max_workers)
            .field("politeness_delay", &self.politeness_delay)
            .finish_non_exhaustive()
    }
}

impl DownloadScheduler {
    /// Creates a scheduler. A `max_workers` of zero is treated as one.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, max_workers: usize, politeness_delay: Duration) -> Self {
        Self {
            fetcher,
            max_workers: max_workers.max(1),
            politeness_delay,
        }
    }

    #[must_use]
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Attempts every task exactly once and waits for all workers to exit.
    ///
    /// Individual download failures never abort the batch; they are logged
    /// and returned in the report. A panicking worker is logged and the
    /// remaining workers still drain the batch.
    #[instrument(skip(self, tasks), fields(tasks = tasks.len()))]
    pub async fn run(&self, tasks: Vec<DownloadTask>) -> BatchReport {
        if tasks.is_empty() {
            return BatchReport::default();
        }

        let worker_count = self.max_workers.min(tasks.len());
        info!(
            files = tasks.len(),
            workers = worker_count,
            "downloading files"
        );

        let tasks: Arc<[DownloadTask]> = tasks.into();
        let next = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let tasks = Arc::clone(&tasks);
            let next = Arc::clone(&next);
            let fetcher = Arc::clone(&self.fetcher);
            let delay = self.politeness_delay;

            handles.push(tokio::spawn(async move {
                run_worker(worker_id, &tasks, &next, fetcher.as_ref(), delay).await
            }));
        }

        let mut report = BatchReport::default();
        for handle in handles {
            match handle.await {
                Ok(worker_report) => report.merge(worker_report),
                Err(e) => warn!(error = %e, "download worker panicked"),
            }
        }

        debug!(
            attempted = report.attempted(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }
}

async fn run_worker(
    worker_id: usize,
    tasks: &[DownloadTask],
    next: &AtomicUsize,
    fetcher: &dyn Fetcher,
    delay: Duration,
) -> BatchReport {
    let mut report = BatchReport::default();

    loop {
        let index = next.fetch_add(1, Ordering::SeqCst);
        let Some(task) = tasks.get(index) else {
            break;
        };

        debug!(worker_id, url = %task.source, "claimed task");
        report.attempted += 1;

        match fetcher.download(&task.source, &task.destination).await {
            Ok(bytes) => {
                info!(
                    url = %task.source,
                    path = %task.destination.display(),
                    bytes,
                    "downloaded"
                );
                report.succeeded += 1;
            }
            Err(error) => {
                warn!(url = %task.source, error = %error, "download failed");
                report.failures.push(FailedDownload {
                    task: task.clone(),
                    error,
                });
            }
        }

        tokio::time::sleep(delay).await;
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MockFetcher;

    fn tasks(count: usize) -> Vec<DownloadTask> {
        (0..count)
            .map(|i| {
                DownloadTask::new(
                    Url::parse(&format!("https://example.com/img{i}.jpg")).unwrap(),
                    format!("/nonexistent/img{i}.jpg"),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_run_empty_batch_returns_immediately() {
        let fetcher = Arc::new(MockFetcher::new());
        let scheduler = DownloadScheduler::new(fetcher.clone(), 5, Duration::ZERO);

        let report = scheduler.run(Vec::new()).await;

        assert_eq!(report.attempted(), 0);
        assert!(fetcher.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_run_attempts_every_task_exactly_once() {
        let fetcher = Arc::new(MockFetcher::new().with_default_file(b"jpg"));
        let scheduler = DownloadScheduler::new(fetcher.clone(), 3, Duration::ZERO);

        let report = scheduler.run(tasks(20)).await;

        assert_eq!(report.attempted(), 20);
        assert_eq!(report.succeeded(), 20);
        let mut seen: Vec<String> = fetcher
            .downloads()
            .iter()
            .map(|(url, _)| url.to_string())
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 20, "every task attempted exactly once");
    }

    #[tokio::test]
    async fn test_run_fills_but_never_exceeds_worker_limit() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_default_file(b"jpg")
                .with_download_latency(Duration::from_millis(20)),
        );
        let scheduler = DownloadScheduler::new(fetcher.clone(), 3, Duration::ZERO);

        scheduler.run(tasks(12)).await;

        assert_eq!(
            fetcher.peak_concurrency(),
            3,
            "all workers should be downloading at once"
        );
        assert_eq!(fetcher.downloads().len(), 12);
    }

    #[tokio::test]
    async fn test_run_uses_at_most_task_count_workers() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_default_file(b"jpg")
                .with_download_latency(Duration::from_millis(20)),
        );
        let scheduler = DownloadScheduler::new(fetcher.clone(), 50, Duration::ZERO);

        let report = scheduler.run(tasks(2)).await;

        assert_eq!(report.attempted(), 2);
        assert_eq!(fetcher.peak_concurrency(), 2, "both tasks run in parallel");
    }

    #[tokio::test]
    async fn test_run_records_failures_without_retry() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_default_file(b"jpg")
                .with_file_status("https://example.com/img1.jpg", 503),
        );
        let scheduler = DownloadScheduler::new(fetcher.clone(), 2, Duration::ZERO);

        let report = scheduler.run(tasks(2)).await;

        assert_eq!(report.attempted(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures()[0].error.status(), Some(503));
        assert_eq!(fetcher.downloads().len(), 2, "no retries");
    }

    #[tokio::test]
    async fn test_run_applies_politeness_delay_between_attempts() {
        let fetcher = Arc::new(MockFetcher::new().with_default_file(b"jpg"));
        let scheduler = DownloadScheduler::new(fetcher, 1, Duration::from_millis(30));

        let started = tokio::time::Instant::now();
        scheduler.run(tasks(3)).await;

        assert!(started.elapsed() >= Duration::from_millis(90));
    }

    #[test]
    fn test_zero_workers_clamped_to_one() {
        let scheduler = DownloadScheduler::new(Arc::new(MockFetcher::new()), 0, Duration::ZERO);
        assert_eq!(scheduler.max_workers(), 1);
    }
}
