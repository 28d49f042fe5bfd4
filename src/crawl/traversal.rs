//! Depth-first traversal of directory listings.
//!
//! The crawler walks one directory at a time on the calling task. Every
//! directory becomes a frame on an explicit stack holding its classified
//! links and the download tasks found so far. A subdirectory link pushes a
//! new frame immediately, before the parent's next link is looked at; when a
//! frame runs out of links its tasks go to the [`DownloadScheduler`] and the
//! crawler waits for that batch before resuming the parent. Only downloads
//! run concurrently, so the visited set needs no lock.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;

use super::listing::{LinkKind, classify, parse_listing};
use super::{CrawlError, CrawlReport, DirectoryUrl, Fetcher, VisitedSet};
use crate::config::CrawlConfig;
use crate::download::{DestinationPlanner, DownloadScheduler, DownloadTask};

/// One directory being scanned.
struct Frame {
    dir: DirectoryUrl,
    links: std::vec::IntoIter<LinkKind>,
    tasks: Vec<DownloadTask>,
}

/// Recursive directory-listing crawler.
///
/// A `Crawler` owns the visited set for its lifetime. Calling
/// [`crawl`](Self::crawl) twice on the same crawler skips directories the
/// first call already entered.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    scheduler: DownloadScheduler,
    planner: DestinationPlanner,
    visited: VisitedSet,
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("scheduler", &self.scheduler)
            .field("planner", &self.planner)
            .field("visited", &self.visited.len())
            .finish_non_exhaustive()
    }
}

impl Crawler {
    /// Creates a crawler that fetches through `fetcher` and downloads into
    /// the configured output directory.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: CrawlConfig) -> Self {
        let scheduler = DownloadScheduler::new(
            Arc::clone(&fetcher),
            config.max_workers(),
            config.politeness_delay(),
        );
        let planner = DestinationPlanner::new(config.output_dir(), config.collision_policy());

        Self {
            fetcher,
            scheduler,
            planner,
            visited: VisitedSet::new(),
        }
    }

    /// Returns the directories entered so far.
    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Crawls every directory reachable from `root` and downloads the
    /// JPEG files found in them.
    ///
    /// Never fails: fetch errors abandon only the affected subtree and
    /// download errors affect only their file. Both are returned in the
    /// report.
    #[instrument(skip(self), fields(root = %root))]
    pub async fn crawl(&mut self, root: &Url) -> CrawlReport {
        let mut report = CrawlReport::new();

        if !matches!(root.scheme(), "http" | "https") {
            warn!(url = %root, "refusing to crawl non-HTTP root");
            report.record_directory_failure(CrawlError::invalid_root(root.as_str()));
            return report;
        }

        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self.enter(root, &mut report).await {
            stack.push(frame);
        }

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            match frame.links.next() {
                Some(LinkKind::Subdirectory(url)) => {
                    if let Some(child) = self.enter(&url, &mut report).await {
                        stack.push(child);
                    }
                }
                Some(LinkKind::Target(url)) => match self.planner.plan(&url).await {
                    Some(destination) => frame.tasks.push(DownloadTask::new(url, destination)),
                    None => debug!(url = %url, "no usable filename, skipping"),
                },
                Some(LinkKind::Ignored) => {}
                None => {
                    if let Some(done) = stack.pop() {
                        self.finish(done, &mut report).await;
                    }
                }
            }
        }

        info!(
            directories = report.directories_visited(),
            succeeded = report.files_succeeded(),
            failed = report.files_failed(),
            "crawl finished"
        );
        report
    }

    /// Marks a directory visited, fetches and classifies its listing.
    ///
    /// Returns `None` if the directory was already visited or could not be
    /// fetched.
    async fn enter(&mut self, url: &Url, report: &mut CrawlReport) -> Option<Frame> {
        let dir = DirectoryUrl::normalize(url);
        if !self.visited.insert_new(&dir) {
            debug!(url = %dir, "already visited, skipping");
            return None;
        }

        report.record_directory();
        info!(url = %dir, "processing directory");

        let body = match self.fetcher.fetch_page(dir.as_url()).await {
            Ok(body) => body,
            Err(source) => {
                warn!(url = %dir, error = %source, "error processing directory");
                report.record_directory_failure(CrawlError::fetch(dir.as_str(), source));
                return None;
            }
        };

        let links: Vec<LinkKind> = parse_listing(&body, dir.as_url())
            .iter()
            .map(classify)
            .collect();
        debug!(url = %dir, links = links.len(), "parsed listing");

        Some(Frame {
            dir,
            links: links.into_iter(),
            tasks: Vec::new(),
        })
    }

    /// Downloads a fully scanned directory's files and waits for the batch.
    async fn finish(&mut self, frame: Frame, report: &mut CrawlReport) {
        if frame.tasks.is_empty() {
            return;
        }

        debug!(url = %frame.dir, files = frame.tasks.len(), "scheduling directory downloads");
        let batch = self.scheduler.run(frame.tasks).await;
        report.absorb_batch(batch);
    }
}
