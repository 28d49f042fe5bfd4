//! Basename extraction, sanitization, and destination planning for downloads.
//!
//! Downloaded files are written flat under the output directory using only
//! the final path segment of their source URL. [`DestinationPlanner`] applies
//! the configured [`CollisionPolicy`] when two sources share a basename.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::config::CollisionPolicy;

/// Highest numeric suffix tried before falling back to a timestamped name.
const MAX_RENAME_SUFFIX: usize = 1000;

/// Returns the sanitized, percent-decoded final path segment of `url`.
///
/// Returns `None` when the URL has no non-empty last segment (e.g. a
/// directory URL ending with `/`).
#[must_use]
pub fn basename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
        debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
        std::borrow::Cow::Borrowed(last)
    });

    Some(sanitize_filename(&decoded))
}

/// Sanitizes a filename by replacing path separators and reserved characters.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Assigns local destination paths to discovered files.
///
/// One planner lives for a whole crawl so that [`CollisionPolicy::Rename`]
/// sees every path reserved by earlier directories, not only files that have
/// already landed on disk.
#[derive(Debug)]
pub struct DestinationPlanner {
    output_dir: PathBuf,
    policy: CollisionPolicy,
    reserved: HashSet<PathBuf>,
}

impl DestinationPlanner {
    /// Creates a planner writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, policy: CollisionPolicy) -> Self {
        Self {
            output_dir: output_dir.into(),
            policy,
            reserved: HashSet::new(),
        }
    }

    /// Returns the destination path for `url`, or `None` if it has no basename.
    ///
    /// Under [`CollisionPolicy::Rename`] the chosen path is reserved for the
    /// rest of the crawl; overwrite planning keeps no state.
    pub async fn plan(&mut self, url: &Url) -> Option<PathBuf> {
        let filename = basename_from_url(url)?;
        let candidate = self.output_dir.join(&filename);

        match self.policy {
            CollisionPolicy::Overwrite => Some(candidate),
            CollisionPolicy::Rename => {
                let path = if self.is_taken(&candidate).await {
                    let renamed = self.next_free_path(&filename).await;
                    debug!(
                        url = %url,
                        path = %renamed.display(),
                        "basename collision, renaming destination"
                    );
                    renamed
                } else {
                    candidate
                };
                self.reserved.insert(path.clone());
                Some(path)
            }
        }
    }

    /// A path whose existence cannot be checked counts as taken.
    async fn is_taken(&self, path: &Path) -> bool {
        self.reserved.contains(path) || !matches!(tokio::fs::try_exists(path).await, Ok(false))
    }

    /// Example: `photo.jpg`, then `photo_2.jpg`, `photo_3.jpg`, ...
    async fn next_free_path(&self, filename: &str) -> PathBuf {
        let (stem, ext) = match filename.rfind('.') {
            Some(pos) if pos > 0 => (&filename[..pos], &filename[pos..]),
            _ => (filename, ""),
        };

        for i in 2..MAX_RENAME_SUFFIX {
            let path = self.output_dir.join(format!("{stem}_{i}{ext}"));
            if !self.is_taken(&path).await {
                return path;
            }
        }

        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        self.output_dir.join(format!("{stem}_{timestamp}{ext}"))
    }
}
