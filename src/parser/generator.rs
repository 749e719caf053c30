//! Span generation - walk validated tokens and emit styled runs
//!
//! The only mutable state is a format stack of open pairs and a pending text
//! buffer. Each token index is visited once, except that a recognized link
//! consumes its five-token window in one step. Pending text is flushed
//! whenever the active style is about to change or an embedded object is
//! emitted.

use super::diagnostics::Diagnostic;
use super::escapes::strip_escapes;
use super::links::normalize_url;
use super::nesting::validate_pairs;
use super::pairing::{PairMap, identify_pairs};
use super::placeholders::Placeholders;
use super::token::{MarkerKind, Token, TokenKind};
use super::tokenizer::{is_plain, tokenize};
use crate::runs::{EmbeddedRun, LinkContent, LinkSpan, Run};
use crate::style::{StyleResolver, TextStyle};

/// Links are only recognized outside link text, so recursion is one level deep.
pub const MAX_LINK_DEPTH: usize = 1;

/// An open format: the pair's token indices and its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatEntry {
    open: usize,
    close: usize,
    kind: MarkerKind,
}

/// Per-walk mutable state.
struct Walk<'b, P> {
    base: &'b TextStyle,
    stack: Vec<FormatEntry>,
    buffer: String,
    runs: Vec<Run<P>>,
}

impl<'b, P> Walk<'b, P> {
    fn new(base: &'b TextStyle) -> Self {
        Self {
            base,
            stack: Vec::new(),
            buffer: String::new(),
            runs: Vec::new(),
        }
    }
}

pub(crate) struct SpanGenerator<'g, R: ?Sized, P> {
    pub resolver: &'g R,
    pub placeholders: &'g Placeholders<P>,
    pub max_depth: usize,
}

impl<'g, R, P> SpanGenerator<'g, R, P>
where
    R: StyleResolver + ?Sized,
    P: Clone,
{
    /// Run the whole pipeline over `text`.
    ///
    /// `link_depth` is 0 for top-level input and 1 inside link text.
    /// Diagnostics are only collected at the top level, where their token
    /// indices refer to the caller's input.
    pub fn generate(
        &self,
        text: &str,
        base: &TextStyle,
        link_depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Run<P>> {
        debug_assert!(
            link_depth <= MAX_LINK_DEPTH,
            "link text nested {link_depth} levels deep"
        );

        if text.is_empty() {
            return Vec::new();
        }
        if is_plain(text) {
            log::trace!("Fast path: no markup in {} bytes", text.len());
            return vec![Run::text(text, base.clone())];
        }
        self.generate_full(text, base, link_depth, diagnostics)
    }

    /// Tokenize, pair, validate and walk `text` with no fast path.
    fn generate_full(
        &self,
        text: &str,
        base: &TextStyle,
        link_depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Run<P>> {
        let tokens = tokenize(text);
        let candidates = identify_pairs(&tokens);
        let (pairs, mut found) = validate_pairs(&tokens, &candidates, self.max_depth);

        let mut walk = Walk::new(base);
        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];
            match token.kind {
                TokenKind::Text => walk.buffer.push_str(token.value),
                TokenKind::Placeholder => self.emit_placeholder(&mut walk, token),
                TokenKind::LinkStart => {
                    if link_depth < MAX_LINK_DEPTH
                        && let Some(consumed) =
                            self.try_emit_link(&mut walk, &tokens, index, link_depth)
                    {
                        index += consumed;
                        continue;
                    }
                    walk.buffer.push_str(token.raw);
                }
                TokenKind::Marker(kind) => {
                    self.handle_marker(&mut walk, &pairs, index, kind, token, &mut found)
                }
                TokenKind::LinkSeparator | TokenKind::LinkEnd => walk.buffer.push_str(token.raw),
            }
            index += 1;
        }
        self.flush(&mut walk);

        log::trace!(
            "Generated {} runs from {} tokens (link depth {})",
            walk.runs.len(),
            tokens.len(),
            link_depth
        );

        if link_depth == 0 {
            diagnostics.append(&mut found);
        }
        walk.runs
    }

    fn handle_marker(
        &self,
        walk: &mut Walk<'_, P>,
        pairs: &PairMap,
        index: usize,
        kind: MarkerKind,
        token: &Token<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(partner) = pairs.get(index) else {
            walk.buffer.push_str(token.raw);
            return;
        };

        self.flush(walk);
        if partner > index {
            walk.stack.push(FormatEntry {
                open: index,
                close: partner,
                kind,
            });
            return;
        }

        match walk.stack.iter().rposition(|entry| entry.open == partner) {
            Some(at) => {
                let entry = walk.stack.remove(at);
                debug_assert_eq!(entry.close, index);
            }
            None => {
                log::warn!("Closing marker at token {index} has no open format, skipping");
                diagnostics.push(Diagnostic::OrphanCloser { index });
            }
        }
    }

    fn emit_placeholder(&self, walk: &mut Walk<'_, P>, token: &Token<'_>) {
        let Some(value) = self.placeholders.get(token.value) else {
            // Unknown keys stay in the running text
            walk.buffer.push_str(token.raw);
            return;
        };
        self.flush(walk);
        let style = self.active_style(walk);
        walk.runs.push(Run::Embedded(EmbeddedRun::placeholder(
            token.value,
            value.clone(),
            style,
        )));
    }

    /// Emit a link if the five-token window at `index` is well formed.
    /// Returns the number of tokens consumed.
    fn try_emit_link(
        &self,
        walk: &mut Walk<'_, P>,
        tokens: &[Token<'_>],
        index: usize,
        link_depth: usize,
    ) -> Option<usize> {
        let [_, text, separator, url, end] = tokens.get(index..index + 5)? else {
            return None;
        };
        if !text.is_text()
            || separator.kind != TokenKind::LinkSeparator
            || !url.is_text()
            || end.kind != TokenKind::LinkEnd
        {
            return None;
        }

        self.flush(walk);

        let active = self.active_style(walk);
        let style = self.resolver.resolve_link_style(&active);
        let hover_style = self.resolver.resolve_link_hover_style(&active);

        let raw_text = text.raw;
        let content = if tokenize(raw_text).iter().all(Token::is_text) {
            LinkContent::Text(strip_escapes(raw_text))
        } else {
            let mut ignored = Vec::new();
            LinkContent::Runs(self.generate(raw_text, &style, link_depth + 1, &mut ignored))
        };

        let url = normalize_url(&strip_escapes(url.raw));
        log::debug!("Link {:?} -> {}", raw_text, url);

        walk.runs.push(Run::Embedded(EmbeddedRun::link(LinkSpan {
            url,
            raw_text: raw_text.to_string(),
            style,
            hover_style,
            cursor: self.resolver.resolve_link_cursor(),
            on_tap: self.resolver.resolve_on_link_tap(),
            on_hover: self.resolver.resolve_on_link_hover(),
            content,
        })));
        Some(5)
    }

    /// Fold the format stack onto the base style.
    ///
    /// Script entries are applied first so their scaled size is in place
    /// before other formats layer colour and weight on top.
    fn active_style(&self, walk: &Walk<'_, P>) -> TextStyle {
        let scripts = walk.stack.iter().filter(|entry| entry.kind.is_script());
        let others = walk.stack.iter().filter(|entry| !entry.kind.is_script());
        scripts
            .chain(others)
            .fold(walk.base.clone(), |style, entry| {
                self.resolver.resolve_marker_style(entry.kind, &style)
            })
    }

    fn flush(&self, walk: &mut Walk<'_, P>) {
        if walk.buffer.is_empty() {
            return;
        }
        let style = self.active_style(walk);
        let text = std::mem::take(&mut walk.buffer);

        let innermost_script = walk
            .stack
            .iter()
            .rev()
            .find(|entry| entry.kind.is_script());
        let run = match innermost_script {
            Some(entry) => {
                let is_superscript = entry.kind == MarkerKind::Superscript;
                let span = self
                    .resolver
                    .create_script_span(&text, &style, is_superscript);
                Run::Embedded(EmbeddedRun::script(span))
            }
            None => Run::text(text, style),
        };
        walk.runs.push(run);
    }
}
