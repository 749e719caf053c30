//! Backslash escapes.
//!
//! A backslash followed by one of the markup characters produces that
//! character literally. A backslash followed by anything else is an ordinary
//! character.

/// Characters that can be escaped with a backslash.
pub const ESCAPABLE: &[u8] = b"*_~`+=^\\[](){}";

pub fn is_escapable(byte: u8) -> bool {
    ESCAPABLE.contains(&byte)
}

/// Try to parse a backslash escape at the start of `text`.
/// Returns (total_len, escaped_char_slice) or None if not an escape.
pub fn try_parse_escape(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'\\') {
        return None;
    }

    // Backslash at end of input or before a non-escapable character
    let next = *bytes.get(1)?;
    if !is_escapable(next) {
        return None;
    }

    Some((2, &text[1..2]))
}

/// Remove escape backslashes, leaving the escaped characters in place.
///
/// Backslashes that do not start a valid escape are kept.
pub fn strip_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < text.len() {
        if let Some((len, ch)) = try_parse_escape(&text[pos..]) {
            out.push_str(ch);
            pos += len;
            continue;
        }
        // Advance by a whole char to stay on a boundary
        let ch = text[pos..].chars().next().unwrap_or_default();
        out.push(ch);
        pos += ch.len_utf8().max(1);
    }
    out
}
