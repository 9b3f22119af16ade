//! Text normalisation and case-folded substring search.
//!
//! Matching runs on a case-folded copy of the page text while snippets are
//! cut from the original. Folding maps every character to exactly one
//! character so that indices in the folded copy are valid in the original.

/// Collapse line-break runs (`\r`, `\n`, `\f`) to one `\n` and blank runs
/// (space, tab) to one space.
pub fn normalize_text(raw: &str) -> String {
    #[derive(PartialEq)]
    enum Run {
        None,
        Break,
        Blank,
    }

    let mut out = String::with_capacity(raw.len());
    let mut run = Run::None;
    for ch in raw.chars() {
        match ch {
            '\r' | '\n' | '\u{000C}' => {
                if run != Run::Break {
                    out.push('\n');
                    run = Run::Break;
                }
            }
            ' ' | '\t' => {
                if run != Run::Blank {
                    out.push(' ');
                    run = Run::Blank;
                }
            }
            _ => {
                out.push(ch);
                run = Run::None;
            }
        }
    }
    out
}

/// Lowercase a single character, keeping a 1:1 character mapping.
///
/// Characters whose lowercase form expands to several characters keep only
/// the first one.
pub fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Case-fold a string into a character vector.
pub fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Case-fold a string.
pub fn fold_str(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Index of the first occurrence of `needle` in `haystack` at or after `from`.
///
/// An empty needle never matches.
pub fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

/// Replace every whitespace run with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}
