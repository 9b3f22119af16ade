//! Content-blind matching for candidates that could not be reached.
//!
//! Only the URL, hostname and title the browser reports are checked. A match
//! scores zero and carries no snippets, so it ranks after every page that
//! answered with a positive score.

use url::Url;

use crate::matcher::text::fold_str;
use crate::types::{SearchResult, TabCandidate, WindowId};

/// Case-insensitive substring check of `tab`'s URL, hostname and title.
///
/// Case folding is the same as the page matcher's.
pub fn fallback_match(
    tab: &TabCandidate,
    query: &str,
    current_window: Option<WindowId>,
) -> Option<SearchResult> {
    let needle = fold_str(query);
    if needle.is_empty() {
        return None;
    }

    let href = Url::parse(&tab.url)
        .map(|u| fold_str(u.as_str()))
        .unwrap_or_else(|_| fold_str(&tab.url));
    let url_match = href.contains(&needle);
    let host_match = fold_str(&tab.hostname()).contains(&needle);
    let title_match = fold_str(&tab.title).contains(&needle);

    (url_match || host_match || title_match)
        .then(|| SearchResult::for_tab(tab, query, Vec::new(), 0.0, current_window))
}
