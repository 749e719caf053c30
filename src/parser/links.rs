//! Parsing for inline links `[text](url)`.
//!
//! Bracket and parenthesis balancing skips escaped characters, so `\]` and
//! `\)` never close a span. Link text may contain balanced `[...]` and the
//! URL may contain balanced `(...)`.

/// Byte ranges of a recognized link, relative to the scanned slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkBounds {
    /// Offset of the closing `]`. Link text is `1..text_end`.
    pub text_end: usize,
    /// Offset of the closing `)`. URL is `text_end + 2..url_end`.
    pub url_end: usize,
}

impl LinkBounds {
    pub fn text_range(&self) -> std::ops::Range<usize> {
        1..self.text_end
    }

    pub fn url_range(&self) -> std::ops::Range<usize> {
        self.text_end + 2..self.url_end
    }

    /// Offset just past the closing `)`.
    pub fn end(&self) -> usize {
        self.url_end + 1
    }
}

/// Find the offset of the delimiter closing an `open` at offset 0, allowing
/// balanced nesting and skipping escaped characters.
fn find_closing(bytes: &[u8], open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut escape_next = false;

    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if escape_next {
            escape_next = false;
            continue;
        }

        if b == b'\\' {
            escape_next = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }

    None
}

/// Try to parse an inline link starting at the current position.
///
/// Returns `None` when there is no matching `]`, the `]` is not immediately
/// followed by `(`, or there is no matching `)`.
pub fn try_parse_link(text: &str) -> Option<LinkBounds> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let text_end = find_closing(bytes, b'[', b']')?;

    // `(` must follow immediately
    let paren_start = text_end + 1;
    if bytes.get(paren_start) != Some(&b'(') {
        return None;
    }

    let url_end = paren_start + find_closing(&bytes[paren_start..], b'(', b')')?;

    Some(LinkBounds { text_end, url_end })
}

/// Normalize a link destination.
///
/// - Whitespace is trimmed
/// - URLs with a scheme (a `:` before any `/`, `?` or `#`) are unchanged
/// - Anchors (`#x`) and relative paths (`/x`) are unchanged
/// - Anything else is treated as a bare domain and gets `https://`
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || has_scheme(url) || url.starts_with('#') || url.starts_with('/') {
        return url.to_string();
    }
    format!("https://{url}")
}

fn has_scheme(url: &str) -> bool {
    for b in url.bytes() {
        match b {
            b':' => return true,
            b'/' | b'?' | b'#' => return false,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> Option<(&str, &str, usize)> {
        try_parse_link(text)
            .map(|b| (&text[b.text_range()], &text[b.url_range()], b.end()))
    }

    #[test]
    fn test_simple_link() {
        assert_eq!(
            parts("[go](example.com) rest"),
            Some(("go", "example.com", 17))
        );
    }

    #[test]
    fn test_empty_text_and_url() {
        assert_eq!(parts("[]()"), Some(("", "", 4)));
    }

    #[test]
    fn test_nested_brackets_in_text() {
        assert_eq!(parts("[a [b] c](u)"), Some(("a [b] c", "u", 12)));
    }

    #[test]
    fn test_nested_parens_in_url() {
        assert_eq!(
            parts("[wiki](https://en.wikipedia.org/wiki/Rust_(language))"),
            Some(("wiki", "https://en.wikipedia.org/wiki/Rust_(language)", 53))
        );
    }

    #[test]
    fn test_escaped_brackets_do_not_count() {
        assert_eq!(parts(r"[a\]b](u)"), Some((r"a\]b", "u", 9)));
        assert_eq!(parts(r"[a](u\)v)"), Some(("a", r"u\)v", 9)));
    }

    #[test]
    fn test_unclosed_bracket() {
        assert_eq!(try_parse_link("[never closed"), None);
    }

    #[test]
    fn test_bracket_not_followed_by_paren() {
        assert_eq!(try_parse_link("[text] (url)"), None);
        assert_eq!(try_parse_link("[text]"), None);
    }

    #[test]
    fn test_unclosed_paren() {
        assert_eq!(try_parse_link("[text](url"), None);
    }

    #[test]
    fn test_normalize_keeps_scheme() {
        assert_eq!(normalize_url("https://x.com"), "https://x.com");
        assert_eq!(normalize_url("mailto:me@x.com"), "mailto:me@x.com");
    }

    #[test]
    fn test_normalize_bare_domain() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(
            normalize_url("  example.com/a:b "),
            "https://example.com/a:b"
        );
    }

    #[test]
    fn test_normalize_anchor_and_relative() {
        assert_eq!(normalize_url("#section"), "#section");
        assert_eq!(normalize_url("/docs/page"), "/docs/page");
    }
}
