//! Directory URL normalization and the visited-directory guard.

use std::collections::HashSet;
use std::fmt;

use url::Url;

/// An absolute URL known to denote a directory listing.
///
/// The path always ends with exactly one added `/`: `https://h/a` and
/// `https://h/a/` normalize to the same value. Nothing else is altered, so
/// query strings and letter case are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryUrl(Url);

impl DirectoryUrl {
    /// Normalizes `url` by appending a trailing `/` to its path if absent.
    #[must_use]
    pub fn normalize(url: &Url) -> Self {
        let mut normalized = url.clone();
        if !normalized.path().ends_with('/') {
            let path = format!("{}/", normalized.path());
            normalized.set_path(&path);
        }
        Self(normalized)
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DirectoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of directories already entered during one crawl.
///
/// Owned by a single [`Crawler`](super::Crawler); it only grows.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<DirectoryUrl>,
}

#[allow(clippy::len_without_is_empty)]
impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `dir` as visited. Returns `false` if it was already present.
    ///
    /// Check and insert are one operation so a directory can never be
    /// entered twice, even when it links back to itself.
    pub fn insert_new(&mut self, dir: &DirectoryUrl) -> bool {
        self.seen.insert(dir.clone())
    }

    #[must_use]
    pub fn contains(&self, dir: &DirectoryUrl) -> bool {
        self.seen.contains(dir)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }
}
