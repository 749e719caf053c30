//! Inline markup parser.
//!
//! Four stages, each a plain function over the previous stage's output:
//! [`tokenize`] → [`identify_pairs`] → [`validate_pairs`] → span generation.
//! [`MarkupParser`] runs them together against a [`StyleResolver`].

use serde::Serialize;

use crate::runs::Run;
use crate::style::{StyleResolver, TextStyle};

pub mod diagnostics;
pub mod escapes;
mod generator;
pub mod links;
pub mod nesting;
pub mod pairing;
pub mod placeholders;
pub mod token;
pub mod tokenizer;

pub use diagnostics::Diagnostic;
pub use escapes::strip_escapes;
pub use generator::MAX_LINK_DEPTH;
pub use links::normalize_url;
pub use nesting::{MAX_NESTING_DEPTH, validate_pairs};
pub use pairing::{PairMap, identify_pairs};
pub use placeholders::Placeholders;
pub use token::{MarkerKind, Token, TokenKind};
pub use tokenizer::tokenize;

use generator::SpanGenerator;

/// Runs plus whatever the parser degraded along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput<P = ()> {
    pub runs: Vec<Run<P>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses inline markup into styled runs.
///
/// # Examples
///
/// ```rust
/// use runmark::parser::MarkupParser;
/// use runmark::style::{DefaultStyleResolver, TextStyle};
///
/// let resolver = DefaultStyleResolver::default();
/// let runs = MarkupParser::new(&resolver).parse("Hello **bold** world", &TextStyle::new());
/// assert_eq!(runs.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkupParser<'r, R: ?Sized> {
    resolver: &'r R,
    max_nesting_depth: usize,
}

impl<'r, R: StyleResolver + ?Sized> MarkupParser<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }

    pub fn resolver(&self) -> &'r R {
        self.resolver
    }

    pub fn parse(&self, text: &str, base: &TextStyle) -> Vec<Run> {
        self.parse_with_diagnostics(text, base, &Placeholders::new()).runs
    }

    /// Parse, substituting `{key}` tokens found in `placeholders`.
    pub fn parse_with_placeholders<P: Clone>(
        &self,
        text: &str,
        base: &TextStyle,
        placeholders: &Placeholders<P>,
    ) -> Vec<Run<P>> {
        self.parse_with_diagnostics(text, base, placeholders).runs
    }

    pub fn parse_with_diagnostics<P: Clone>(
        &self,
        text: &str,
        base: &TextStyle,
        placeholders: &Placeholders<P>,
    ) -> ParseOutput<P> {
        let generator = SpanGenerator {
            resolver: self.resolver,
            placeholders,
            max_depth: self.max_nesting_depth,
        };
        let mut diagnostics = Vec::new();
        let runs = generator.generate(text, base, 0, &mut diagnostics);
        if !diagnostics.is_empty() {
            log::debug!("Parse produced {} diagnostics", diagnostics.len());
        }
        ParseOutput { runs, diagnostics }
    }
}
