//! Visible-text extraction from raw HTML.
//!
//! Builds a [`DocumentSnapshot`] from a page's markup the way a browser
//! renders its body text: non-rendered elements (scripts, styles, templates,
//! hidden elements) are skipped and block-level elements are separated by
//! line breaks so that snippets snap to paragraph edges.

use ego_tree::iter::Edge;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::types::DocumentSnapshot;

/// Default maximum characters of visible text kept per page.
pub const DEFAULT_MAX_CHARS: usize = 200_000;

/// Elements whose content is never rendered.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "iframe", "object", "canvas", "head",
];

/// Elements rendered on their own line.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
];

/// Elements separated from their siblings by a tab.
const CELL_TAGS: &[&str] = &["td", "th"];

impl DocumentSnapshot {
    /// Build a snapshot from a page URL and its HTML.
    ///
    /// Pages without a body produce an empty `visible_text`.
    pub fn from_html(url: &str, html: &str) -> Self {
        extract_snapshot_with_limit(url, html, DEFAULT_MAX_CHARS)
    }
}

/// Build a snapshot, keeping at most `max_chars` characters of body text.
pub fn extract_snapshot_with_limit(url: &str, html: &str, max_chars: usize) -> DocumentSnapshot {
    let document = Html::parse_document(html);
    let title = extract_title(&document);
    let text = extract_visible_text(&document);
    DocumentSnapshot::new(url, title, truncate_chars(&text, max_chars))
}

/// Extract the page title from the `<title>` element.
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rendered text of the `<body>` element.
fn extract_visible_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };
    let mut out = String::new();
    if let Some(body) = document.select(&selector).next() {
        walk(body, &mut out);
    }
    out.trim().to_owned()
}

/// Append the rendered text under `root` to `out`.
///
/// Iterates open/close edges instead of recursing, so nesting depth is
/// bounded only by the parsed tree.
fn walk(root: ElementRef<'_>, out: &mut String) {
    // Root of a non-rendered subtree currently being skipped.
    let mut skipping: Option<NodeId> = None;

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => {
                if skipping.is_some() || node.id() == root.id() {
                    continue;
                }
                if let Some(text) = node.value().as_text() {
                    out.push_str(text);
                } else if let Some(el) = node.value().as_element() {
                    if SKIPPED_TAGS.contains(&el.name()) || el.attr("hidden").is_some() {
                        skipping = Some(node.id());
                    } else if BLOCK_TAGS.contains(&el.name()) {
                        out.push('\n');
                    }
                }
            }
            Edge::Close(node) => {
                if let Some(id) = skipping {
                    if id == node.id() {
                        skipping = None;
                    }
                    continue;
                }
                if node.id() == root.id() {
                    continue;
                }
                if let Some(el) = node.value().as_element() {
                    if BLOCK_TAGS.contains(&el.name()) {
                        out.push('\n');
                    } else if CELL_TAGS.contains(&el.name()) {
                        out.push('\t');
                    }
                }
            }
        }
    }
}

/// Keep at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_owned(),
        None => text.to_owned(),
    }
}
