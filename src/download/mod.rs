//! HTTP download engine for streaming files to disk.
//!
//! This module provides functionality for downloading files from HTTP/HTTPS URLs
//! with streaming support to handle large files efficiently.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Bounded per-directory worker pool with a politeness delay
//! - Flat output naming by URL basename, with a configurable collision policy
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use harvester_core::download::HttpClient;
//! use std::path::Path;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let url = Url::parse("https://example.com/gallery/photo.jpg")?;
//! client.download_to_path(&url, Path::new("./downloads/photo.jpg")).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
pub mod filename;
mod scheduler;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::DownloadError;
pub use filename::{DestinationPlanner, basename_from_url};
pub use scheduler::{BatchReport, DownloadScheduler, DownloadTask, FailedDownload};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
