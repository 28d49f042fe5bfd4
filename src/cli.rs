//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use harvester_core::{
    CollisionPolicy, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_DIR, DEFAULT_POLITENESS_DELAY_MS,
};

/// Recursively download JPG/JPEG files from web directory listings.
///
/// Starting at URL, every linked subdirectory is crawled depth-first and
/// each directory's images are downloaded by a small pool of workers.
/// Files are saved flat under the output directory by filename.
#[derive(Parser, Debug)]
#[command(name = "listing-harvester")]
#[command(author, version, about)]
pub struct Args {
    /// URL of the directory listing page
    pub url: Url,

    /// Output directory for downloaded files (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of concurrent download workers per directory (1-100)
    #[arg(short, long, default_value_t = DEFAULT_MAX_WORKERS as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub workers: u8,

    /// Pause each worker takes between downloads in milliseconds (max 60000)
    #[arg(short, long, default_value_t = DEFAULT_POLITENESS_DELAY_MS, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: u64,

    /// What to do when two files share a filename
    #[arg(long, value_enum, default_value_t = CollisionArg::Overwrite)]
    pub on_collision: CollisionArg,

    /// Exit with status 1 if any directory or file failed
    #[arg(long)]
    pub fail_on_error: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// CLI spelling of [`CollisionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    /// Last file written wins
    Overwrite,
    /// Add a numeric suffix (photo_2.jpg)
    Rename,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => Self::Overwrite,
            CollisionArg::Rename => Self::Rename,
        }
    }
}
