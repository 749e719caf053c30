//! Tokenization stage - split markup into text, marker and structural tokens
//!
//! A single left-to-right pass over the input bytes. All syntax characters
//! are ASCII, so every token boundary is a char boundary and multi-byte
//! characters simply extend the pending text run.
//!
//! Recognition order at each position:
//! 1. Backslash escapes
//! 2. Marker runs (`***`/`**`/`*`, `___`/`__`/`_`, `~~`/`~`, `` ` ``, `^`, `++`, `==`)
//! 3. Links `[text](url)`, emitted as five tokens
//! 4. Placeholders `{key}` / `{{key}}`
//! 5. Anything else extends the current text run

use super::escapes;
use super::links;
use super::placeholders;
use super::token::{MarkerKind, Token, TokenKind};

/// Bytes that can start something other than plain text.
pub const TRIGGER_BYTES: &[u8] = b"*_~`+=^\\[{";

/// True when `text` contains no byte that could start markup.
pub fn is_plain(text: &str) -> bool {
    !text.bytes().any(|b| TRIGGER_BYTES.contains(&b))
}

/// Tokenize markup into a flat list of tokens in document order.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    log::trace!(
        "Tokenizing: {:?} ({} bytes)",
        &text[..floor_char_boundary(text, 40)],
        text.len()
    );

    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut text_start = 0;

    // Flush the pending text run ending at `end`
    fn flush_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str, start: usize, end: usize) {
        if end > start {
            tokens.push(Token::new(TokenKind::Text, &text[start..end], start));
        }
    }

    while pos < bytes.len() {
        let b = bytes[pos];

        if b == b'\\' {
            if let Some((len, ch)) = escapes::try_parse_escape(&text[pos..]) {
                flush_text(&mut tokens, text, text_start, pos);
                tokens.push(Token::with_value(
                    TokenKind::Text,
                    &text[pos..pos + len],
                    ch,
                    pos,
                ));
                pos += len;
                text_start = pos;
                continue;
            }
            pos += 1;
            continue;
        }

        if let Some((kind, len)) = scan_marker(&bytes[pos..]) {
            flush_text(&mut tokens, text, text_start, pos);
            tokens.push(Token::new(
                TokenKind::Marker(kind),
                &text[pos..pos + len],
                pos,
            ));
            pos += len;
            text_start = pos;
            continue;
        }

        if b == b'['
            && let Some(bounds) = links::try_parse_link(&text[pos..])
        {
            flush_text(&mut tokens, text, text_start, pos);
            let text_range = bounds.text_range();
            let url_range = bounds.url_range();
            tokens.push(Token::new(TokenKind::LinkStart, &text[pos..pos + 1], pos));
            tokens.push(Token::new(
                TokenKind::Text,
                &text[pos + text_range.start..pos + text_range.end],
                pos + text_range.start,
            ));
            tokens.push(Token::new(
                TokenKind::LinkSeparator,
                &text[pos + text_range.end..pos + url_range.start],
                pos + text_range.end,
            ));
            tokens.push(Token::new(
                TokenKind::Text,
                &text[pos + url_range.start..pos + url_range.end],
                pos + url_range.start,
            ));
            tokens.push(Token::new(
                TokenKind::LinkEnd,
                &text[pos + url_range.end..pos + bounds.end()],
                pos + url_range.end,
            ));
            pos += bounds.end();
            text_start = pos;
            continue;
        }

        if b == b'{'
            && let Some((len, key)) = placeholders::try_parse_placeholder(&text[pos..])
        {
            flush_text(&mut tokens, text, text_start, pos);
            tokens.push(Token::with_value(
                TokenKind::Placeholder,
                &text[pos..pos + len],
                key,
                pos,
            ));
            pos += len;
            text_start = pos;
            continue;
        }

        // Plain byte, or a `[`/`{`/`+`/`=` that starts nothing
        pos += 1;
    }

    flush_text(&mut tokens, text, text_start, text.len());

    log::trace!("Produced {} tokens", tokens.len());
    tokens
}

/// Recognize a marker at the start of `bytes`, longest match first.
/// Returns the marker kind and its length in bytes.
fn scan_marker(bytes: &[u8]) -> Option<(MarkerKind, usize)> {
    let first = *bytes.first()?;
    let run = bytes.iter().take_while(|b| **b == first).count();

    match first {
        b'*' | b'_' => Some(match run {
            1 => (MarkerKind::Italic, 1),
            2 => (MarkerKind::Bold, 2),
            _ => (MarkerKind::BoldItalic, 3),
        }),
        b'~' if run >= 2 => Some((MarkerKind::Strikethrough, 2)),
        b'~' => Some((MarkerKind::Subscript, 1)),
        b'`' => Some((MarkerKind::Code, 1)),
        b'^' => Some((MarkerKind::Superscript, 1)),
        b'+' if run >= 2 => Some((MarkerKind::Underline, 2)),
        b'=' if run >= 2 => Some((MarkerKind::Highlight, 2)),
        _ => None,
    }
}

fn floor_char_boundary(text: &str, max: usize) -> usize {
    let mut end = text.len().min(max);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}
