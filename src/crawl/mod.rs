//! Recursive traversal of HTML directory listings.
//!
//! # Architecture
//!
//! - [`Fetcher`] - Async trait for the HTTP capability (page bodies, file downloads)
//! - [`listing`] - Anchor extraction and link classification
//! - [`VisitedSet`] / [`DirectoryUrl`] - Trailing-slash normalization and cycle guard
//! - [`Crawler`] - Depth-first traversal feeding per-directory download batches
//! - [`CrawlReport`] - Counts and structured failures for one crawl
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use harvester_core::{CrawlConfig, Crawler, HttpClient};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CrawlConfig::new("downloads", 5)?;
//! let mut crawler = Crawler::new(Arc::new(HttpClient::new()?), config);
//! let report = crawler.crawl(&Url::parse("https://example.com/photos/")?).await;
//! println!("{} files downloaded", report.files_succeeded());
//! # Ok(())
//! # }
//! ```

mod error;
mod fetcher;
pub mod listing;
mod report;
mod traversal;
mod visited;

pub use error::CrawlError;
pub use fetcher::Fetcher;
pub use listing::{LinkKind, ListingLink, classify, parse_listing};
pub use report::{CrawlFailure, CrawlReport};
pub use traversal::Crawler;
pub use visited::{DirectoryUrl, VisitedSet};
