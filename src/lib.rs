//! Inline markup to styled text runs.
//!
//! ```text
//! "Hello **bold** [docs](example.com)"
//!     → Text("Hello ") Text("bold", bold) Link(https://example.com, "docs")
//! ```
//!
//! Markup never fails to parse: anything that cannot be paired, nests too
//! deeply or crosses another span is rendered as the literal characters.

pub mod cache;
pub mod config;
pub mod parser;
pub mod runs;
pub mod style;

pub use cache::{CachedParser, ParseCache};
pub use config::Config;
pub use config::ConfigBuilder;
pub use parser::{MarkupParser, ParseOutput, Placeholders};
pub use runs::Run;
pub use style::{DefaultStyleResolver, StyleResolver, TextStyle};

#[cfg(test)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses markup into runs using `resolver` for styles.
///
/// # Examples
///
/// ```rust
/// use runmark::{DefaultStyleResolver, Placeholders, TextStyle};
///
/// let resolver = DefaultStyleResolver::default();
/// let placeholders: Placeholders<&str> = [("icon", "⭐")].into_iter().collect();
/// let runs = runmark::parse("Rated {icon} **5**", &resolver, &TextStyle::new(), &placeholders);
/// assert_eq!(runs.len(), 3);
/// ```
///
/// # Arguments
///
/// * `text` - The markup to parse
/// * `resolver` - Turns marker kinds into concrete styles
/// * `base` - Style of unformatted text
/// * `placeholders` - Objects substituted for `{key}` tokens
pub fn parse<R, P>(
    text: &str,
    resolver: &R,
    base: &TextStyle,
    placeholders: &Placeholders<P>,
) -> Vec<Run<P>>
where
    R: StyleResolver + ?Sized,
    P: Clone,
{
    MarkupParser::new(resolver).parse_with_placeholders(text, base, placeholders)
}

/// Parses markup with the default resolver, base style and no placeholders.
pub fn parse_with_defaults(text: &str) -> Vec<Run> {
    let resolver = DefaultStyleResolver::default();
    parse(text, &resolver, &TextStyle::new(), &Placeholders::new())
}
