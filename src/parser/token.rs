//! Token model shared by every pipeline stage.
//!
//! The tokenizer produces a flat list of [`Token`]s. Later stages never mutate
//! tokens; they only look them up by index:
//! 1. **Pairing**: marker tokens of the same kind are paired opener/closer
//! 2. **Nesting**: pairs that cross or nest too deeply are dropped
//! 3. **Generation**: tokens are walked once to produce styled runs

use serde::{Deserialize, Serialize};

/// A formatting marker kind.
///
/// The set is closed, so per-kind state lives in fixed arrays indexed by
/// [`MarkerKind::index`] rather than in maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// `**text**` or `__text__`
    Bold,
    /// `*text*` or `_text_`
    Italic,
    /// `***text***` or `___text___`
    BoldItalic,
    /// `~~text~~`
    Strikethrough,
    /// `++text++`
    Underline,
    /// `==text==`
    Highlight,
    /// `` `text` ``
    Code,
    /// `^text^`
    Superscript,
    /// `~text~`
    Subscript,
}

impl MarkerKind {
    pub const COUNT: usize = 9;

    pub const ALL: [MarkerKind; Self::COUNT] = [
        MarkerKind::Bold,
        MarkerKind::Italic,
        MarkerKind::BoldItalic,
        MarkerKind::Strikethrough,
        MarkerKind::Underline,
        MarkerKind::Highlight,
        MarkerKind::Code,
        MarkerKind::Superscript,
        MarkerKind::Subscript,
    ];

    /// Position of this kind in [`MarkerKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            MarkerKind::Bold => 0,
            MarkerKind::Italic => 1,
            MarkerKind::BoldItalic => 2,
            MarkerKind::Strikethrough => 3,
            MarkerKind::Underline => 4,
            MarkerKind::Highlight => 5,
            MarkerKind::Code => 6,
            MarkerKind::Superscript => 7,
            MarkerKind::Subscript => 8,
        }
    }

    /// Super- and subscript need geometric treatment on top of plain styling.
    pub fn is_script(self) -> bool {
        matches!(self, MarkerKind::Superscript | MarkerKind::Subscript)
    }

    pub fn name(self) -> &'static str {
        match self {
            MarkerKind::Bold => "bold",
            MarkerKind::Italic => "italic",
            MarkerKind::BoldItalic => "bold_italic",
            MarkerKind::Strikethrough => "strikethrough",
            MarkerKind::Underline => "underline",
            MarkerKind::Highlight => "highlight",
            MarkerKind::Code => "code",
            MarkerKind::Superscript => "superscript",
            MarkerKind::Subscript => "subscript",
        }
    }
}

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain text, including escaped characters.
    Text,
    /// A formatting marker such as `**` or `~`.
    Marker(MarkerKind),
    /// `[` opening a fully recognized link.
    LinkStart,
    /// `](` between link text and URL.
    LinkSeparator,
    /// `)` closing a link URL.
    LinkEnd,
    /// `{key}` or `{{key}}`.
    Placeholder,
}

impl TokenKind {
    /// Only marker tokens take part in pairing and nesting validation.
    pub fn is_formatting(self) -> bool {
        matches!(self, TokenKind::Marker(_))
    }

    pub fn marker(self) -> Option<MarkerKind> {
        match self {
            TokenKind::Marker(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Text => "TEXT",
            TokenKind::Marker(MarkerKind::Bold) => "BOLD",
            TokenKind::Marker(MarkerKind::Italic) => "ITALIC",
            TokenKind::Marker(MarkerKind::BoldItalic) => "BOLD_ITALIC",
            TokenKind::Marker(MarkerKind::Strikethrough) => "STRIKETHROUGH",
            TokenKind::Marker(MarkerKind::Underline) => "UNDERLINE",
            TokenKind::Marker(MarkerKind::Highlight) => "HIGHLIGHT",
            TokenKind::Marker(MarkerKind::Code) => "CODE",
            TokenKind::Marker(MarkerKind::Superscript) => "SUPERSCRIPT",
            TokenKind::Marker(MarkerKind::Subscript) => "SUBSCRIPT",
            TokenKind::LinkStart => "LINK_START",
            TokenKind::LinkSeparator => "LINK_SEPARATOR",
            TokenKind::LinkEnd => "LINK_END",
            TokenKind::Placeholder => "PLACEHOLDER",
        }
    }
}

/// A lexed token borrowing from the tokenized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Exact source slice consumed by this token.
    pub raw: &'a str,
    /// Logical content: the unescaped character for escapes, the key for
    /// placeholders, `raw` for everything else.
    pub value: &'a str,
    /// Byte offset of `raw` in the tokenized string.
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, raw: &'a str, position: usize) -> Self {
        Self {
            kind,
            raw,
            value: raw,
            position,
        }
    }

    pub fn with_value(kind: TokenKind, raw: &'a str, value: &'a str, position: usize) -> Self {
        Self {
            kind,
            raw,
            value,
            position,
        }
    }

    /// Offset just past the last source byte.
    pub fn end(&self) -> usize {
        self.position + self.raw.len()
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_indices_match_all_order() {
        for (i, kind) in MarkerKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "{kind:?}");
        }
    }

    #[test]
    fn only_markers_are_formatting() {
        assert!(TokenKind::Marker(MarkerKind::Code).is_formatting());
        assert!(!TokenKind::Text.is_formatting());
        assert!(!TokenKind::LinkStart.is_formatting());
        assert!(!TokenKind::Placeholder.is_formatting());
    }

    #[test]
    fn script_kinds() {
        let scripts: Vec<_> = MarkerKind::ALL
            .iter()
            .filter(|kind| kind.is_script())
            .collect();
        assert_eq!(
            scripts,
            vec![&MarkerKind::Superscript, &MarkerKind::Subscript]
        );
    }

    #[test]
    fn escaped_token_keeps_raw_and_value_apart() {
        let token = Token::with_value(TokenKind::Text, r"\*", "*", 4);
        assert_eq!(token.end(), 6);
        assert_eq!(token.raw, r"\*");
        assert_eq!(token.value, "*");
    }
}
