//! Anchor extraction and link classification for directory listing pages.
//!
//! Listing pages generated by static file servers (Apache `mod_autoindex`,
//! nginx `autoindex`, `python -m http.server`, ...) expose their entries as
//! plain `<a href>` elements. Subdirectories end with `/`; sort toggles are
//! query-only links such as `?C=N;O=D`.

use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

/// File extensions (lowercase) that mark a link for download.
pub const TARGET_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Hrefs that point back at the current or parent directory.
const SELF_OR_PARENT_HREFS: [&str; 3] = ["", "./", "../"];

/// One anchor found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLink {
    /// The raw `href` attribute, trimmed of surrounding whitespace.
    pub href: String,
    /// `href` resolved against the page URL, if it resolves.
    pub url: Option<Url>,
    /// Whether the href ends with `/`, the listing convention for directories.
    pub is_directory: bool,
}

/// What the crawler should do with a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Descend into this directory.
    Subdirectory(Url),
    /// Download this file.
    Target(Url),
    /// Skip the link.
    Ignored,
}

/// Extracts every `<a href>` on the page, in document order.
///
/// HTML parsing is lenient: malformed markup yields whatever anchors the
/// parser recovers, never an error.
#[must_use]
pub fn parse_listing(body: &str, base: &Url) -> Vec<ListingLink> {
    let document = Html::parse_document(body);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name().eq_ignore_ascii_case("a"))
        .filter_map(|element| element.value().attr("href"))
        .map(|raw| {
            let href = raw.trim().to_string();
            let url = base.join(&href).ok();
            let is_directory = href.ends_with('/');
            ListingLink {
                href,
                url,
                is_directory,
            }
        })
        .collect()
}

/// Classifies a link as a subdirectory, a target file, or ignorable.
///
/// Ignored: empty, `./`, `../`, query-only (`?...`), unresolvable, or
/// non-HTTP links, plus any file that is not a JPEG.
#[must_use]
pub fn classify(link: &ListingLink) -> LinkKind {
    if SELF_OR_PARENT_HREFS.contains(&link.href.as_str()) || link.href.starts_with('?') {
        debug!(href = %link.href, "ignoring self, parent, or sort link");
        return LinkKind::Ignored;
    }

    let Some(url) = link.url.as_ref() else {
        debug!(href = %link.href, "ignoring unresolvable link");
        return LinkKind::Ignored;
    };

    if !matches!(url.scheme(), "http" | "https") {
        debug!(href = %link.href, "ignoring non-HTTP link");
        return LinkKind::Ignored;
    }

    if link.is_directory {
        return LinkKind::Subdirectory(url.clone());
    }

    if is_target_path(url.path()) {
        return LinkKind::Target(url.clone());
    }

    debug!(href = %link.href, "ignoring non-target file");
    LinkKind::Ignored
}

/// Returns true if the URL path ends with a target extension, ignoring case.
#[must_use]
pub fn is_target_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    TARGET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
