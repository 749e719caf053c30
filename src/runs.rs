//! Parser output: styled text runs and embedded inline objects.
//!
//! Runs come out in document order and are never reordered. Text runs carry
//! a resolved [`TextStyle`]; everything that a renderer must lay out as a
//! unit (placeholders, links, super/subscript spans) is an [`EmbeddedRun`].

use serde::Serialize;

use crate::style::{HoverHandler, LinkCursor, LinkHandler, TextStyle};

/// One contiguous unit of output.
///
/// `P` is the host's placeholder object type; parses without placeholders
/// use the default `()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Run<P = ()> {
    Text(TextRun),
    Embedded(EmbeddedRun<P>),
}

impl<P> Run<P> {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Run::Text(TextRun {
            text: text.into(),
            style,
        })
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Run::Text(run) => Some(run),
            Run::Embedded(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<&LinkSpan<P>> {
        match self {
            Run::Embedded(EmbeddedRun {
                object: InlineObject::Link(link),
                ..
            }) => Some(link),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

/// How an embedded object sits on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderAlignment {
    Baseline,
    AboveBaseline,
    BelowBaseline,
    Top,
    Bottom,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Alphabetic,
    Ideographic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedRun<P = ()> {
    pub object: InlineObject<P>,
    pub alignment: PlaceholderAlignment,
    pub baseline: TextBaseline,
}

impl<P> EmbeddedRun<P> {
    pub fn placeholder(key: impl Into<String>, value: P, style: TextStyle) -> Self {
        Self {
            object: InlineObject::Placeholder {
                key: key.into(),
                value,
                style,
            },
            alignment: PlaceholderAlignment::Middle,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn link(link: LinkSpan<P>) -> Self {
        Self {
            object: InlineObject::Link(link),
            alignment: PlaceholderAlignment::Baseline,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn script(span: ScriptSpan) -> Self {
        Self {
            object: InlineObject::Script(span),
            alignment: PlaceholderAlignment::Baseline,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineObject<P = ()> {
    /// A host-supplied object; `style` is the formatting active around it.
    Placeholder { key: String, value: P, style: TextStyle },
    Link(LinkSpan<P>),
    Script(ScriptSpan),
}

/// An interactive link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSpan<P = ()> {
    /// Normalized destination.
    pub url: String,
    /// Link text exactly as written, markers and escapes included.
    pub raw_text: String,
    pub style: TextStyle,
    pub hover_style: TextStyle,
    pub cursor: LinkCursor,
    #[serde(skip)]
    pub on_tap: Option<LinkHandler>,
    #[serde(skip)]
    pub on_hover: Option<HoverHandler>,
    pub content: LinkContent<P>,
}

impl<P> LinkSpan<P> {
    /// Invoke the tap handler, if any, with this link's URL.
    pub fn tap(&self) {
        if let Some(handler) = &self.on_tap {
            handler.call(&self.url);
        }
    }

    pub fn hover(&self, entered: bool) {
        if let Some(handler) = &self.on_hover {
            handler.call(&self.url, entered);
        }
    }
}

/// Link display content: literal text, or runs when the text had markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkContent<P = ()> {
    Text(String),
    Runs(Vec<Run<P>>),
}

/// A super- or subscript span with its geometry already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptSpan {
    pub text: String,
    pub style: TextStyle,
    pub is_superscript: bool,
    /// Offset from the surrounding baseline; negative raises.
    pub baseline_offset: f32,
}

/// Flatten runs to their display text, dropping placeholder objects.
pub fn runs_to_plain_text<P>(runs: &[Run<P>]) -> String {
    let mut out = String::new();
    push_plain_text(&mut out, runs);
    out
}

fn push_plain_text<P>(out: &mut String, runs: &[Run<P>]) {
    for run in runs {
        match run {
            Run::Text(text) => out.push_str(&text.text),
            Run::Embedded(embedded) => match &embedded.object {
                InlineObject::Placeholder { .. } => {}
                InlineObject::Link(link) => match &link.content {
                    LinkContent::Text(text) => out.push_str(text),
                    LinkContent::Runs(runs) => push_plain_text(out, runs),
                },
                InlineObject::Script(span) => out.push_str(&span.text),
            },
        }
    }
}
