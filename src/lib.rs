//! Listing Harvester Core Library
//!
//! This library provides the core functionality for the listing harvester,
//! which walks trees of HTML directory-listing pages and downloads the JPEG
//! images it finds into a local output directory.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`crawl`] - Directory traversal, listing parsing, cycle avoidance
//! - [`download`] - HTTP client, bounded worker pool, filename planning
//! - [`config`] - Validated crawl configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod crawl;
pub mod download;
mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{
    CollisionPolicy, ConfigError, CrawlConfig, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_DIR,
    DEFAULT_POLITENESS_DELAY_MS,
};
pub use crawl::{CrawlError, CrawlFailure, CrawlReport, Crawler, Fetcher, VisitedSet};
pub use download::{BatchReport, DownloadError, DownloadScheduler, DownloadTask, HttpClient};
