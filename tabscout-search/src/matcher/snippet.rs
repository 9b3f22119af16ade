//! Snippet extraction around a query occurrence.
//!
//! The window is `max_chars_before` characters before the occurrence and
//! `max_chars_after` after it, clamped to the text. A clamped edge snaps to
//! the nearest line break inside the window when there is one; otherwise it
//! snaps inward to a word boundary and is marked with an ellipsis. Snapping
//! only ever shrinks the window, so a snippet never exceeds
//! `max_chars_before + max_chars_after + occurrence length` characters plus
//! two ellipsis markers.

use crate::config::SnippetConfig;

use super::text::collapse_whitespace;

/// Ellipsis marker added to an edge that was cut mid-line.
pub const ELLIPSIS: char = '…';

/// Cut a snippet around `text[start..end]` (character indices).
pub fn get_snippet(text: &[char], start: usize, end: usize, config: &SnippetConfig) -> String {
    let len = text.len();
    let end = end.min(len);
    let start = start.min(end);

    let mut from = start.saturating_sub(config.max_chars_before);
    let mut to = end.saturating_add(config.max_chars_after).min(len);
    let mut ellipsis_before = false;
    let mut ellipsis_after = false;

    if from > 0 {
        let window = &text[from..start];
        match window.iter().rposition(|&c| c == '\n') {
            Some(i) => from += i + 1,
            None => {
                if text[from - 1] != ' ' {
                    if let Some(i) = window.iter().position(|&c| c == ' ') {
                        from += i + 1;
                    }
                }
                ellipsis_before = true;
            }
        }
    }

    if to < len {
        let window = &text[end..to];
        match window.iter().position(|&c| c == '\n') {
            Some(i) => to = end + i,
            None => {
                if text[to] != ' ' {
                    if let Some(i) = window.iter().rposition(|&c| c == ' ') {
                        to = end + i;
                    }
                }
                ellipsis_after = true;
            }
        }
    }

    let body: String = text[from..to].iter().collect();
    let mut snippet = String::with_capacity(body.len() + 6);
    if ellipsis_before {
        snippet.push(ELLIPSIS);
    }
    snippet.push_str(body.trim());
    if ellipsis_after {
        snippet.push(ELLIPSIS);
    }
    collapse_whitespace(&snippet)
}
