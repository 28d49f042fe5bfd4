//! Crawl configuration shared by the traversal engine and download scheduler.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Minimum allowed worker count.
pub const MIN_WORKERS: usize = 1;

/// Maximum allowed worker count.
pub const MAX_WORKERS: usize = 100;

/// Default number of concurrent download workers per directory batch.
pub const DEFAULT_MAX_WORKERS: usize = 5;

/// Default pause each worker takes between download attempts.
pub const DEFAULT_POLITENESS_DELAY_MS: u64 = 100;

/// Default local output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// Error type for invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid worker count provided.
    #[error("invalid worker count {value}: must be between {MIN_WORKERS} and {MAX_WORKERS}")]
    InvalidWorkers {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// What to do when two discovered files map to the same local basename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Every task targets `output_dir/basename`; the last writer wins.
    #[default]
    Overwrite,
    /// Later files get a numeric suffix (`photo_2.jpg`, `photo_3.jpg`, ...).
    Rename,
}

/// Validated settings for one crawl invocation.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    output_dir: PathBuf,
    max_workers: usize,
    politeness_delay: Duration,
    collision_policy: CollisionPolicy,
}

impl CrawlConfig {
    /// Creates a configuration with the default delay and collision policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWorkers`] if `max_workers` is outside
    /// the valid range (1-100).
    pub fn new(output_dir: impl Into<PathBuf>, max_workers: usize) -> Result<Self, ConfigError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&max_workers) {
            return Err(ConfigError::InvalidWorkers { value: max_workers });
        }

        Ok(Self {
            output_dir: output_dir.into(),
            max_workers,
            politeness_delay: Duration::from_millis(DEFAULT_POLITENESS_DELAY_MS),
            collision_policy: CollisionPolicy::default(),
        })
    }

    /// Sets the pause each worker takes after every download attempt.
    #[must_use]
    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    /// Sets the basename collision policy.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    #[must_use]
    pub fn politeness_delay(&self) -> Duration {
        self.politeness_delay
    }

    #[must_use]
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }
}
