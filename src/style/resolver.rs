//! Style resolution - turn marker kinds into concrete styles
//!
//! The parser only talks to [`StyleResolver`]. [`DefaultStyleResolver`] is
//! the reference implementation; its precedence is an explicit cascade, from
//! weakest to strongest:
//! 1. Relative defaults (bold weight, italic slant, decorations, script size)
//! 2. Theme defaults (code, highlight and link colours)
//! 3. User configuration (`[styles.<kind>]`, `[link]`, `[link_hover]`)
//! 4. Per-call overrides ([`DefaultStyleResolver::with_overrides`])

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{Color, Decoration, TextStyle};
use crate::config::Config;
use crate::parser::MarkerKind;
use crate::runs::ScriptSpan;

/// Capability the parser consumes from its host.
pub trait StyleResolver {
    /// Style for text inside a `kind` span, built on top of `base`.
    fn resolve_marker_style(&self, kind: MarkerKind, base: &TextStyle) -> TextStyle;

    fn resolve_link_style(&self, base: &TextStyle) -> TextStyle;

    fn resolve_link_hover_style(&self, base: &TextStyle) -> TextStyle;

    fn resolve_link_cursor(&self) -> LinkCursor {
        LinkCursor::Pointer
    }

    fn resolve_on_link_tap(&self) -> Option<LinkHandler> {
        None
    }

    fn resolve_on_link_hover(&self) -> Option<HoverHandler> {
        None
    }

    /// Build the inline object for super/subscript text. `style` already has
    /// the script size and baseline shift applied.
    fn create_script_span(
        &self,
        text: &str,
        style: &TextStyle,
        is_superscript: bool,
    ) -> ScriptSpan {
        ScriptSpan {
            text: text.to_string(),
            style: style.clone(),
            is_superscript,
            baseline_offset: style.baseline_shift.unwrap_or(0.0),
        }
    }
}

impl<R: StyleResolver + ?Sized> StyleResolver for &R {
    fn resolve_marker_style(&self, kind: MarkerKind, base: &TextStyle) -> TextStyle {
        (**self).resolve_marker_style(kind, base)
    }

    fn resolve_link_style(&self, base: &TextStyle) -> TextStyle {
        (**self).resolve_link_style(base)
    }

    fn resolve_link_hover_style(&self, base: &TextStyle) -> TextStyle {
        (**self).resolve_link_hover_style(base)
    }

    fn resolve_link_cursor(&self) -> LinkCursor {
        (**self).resolve_link_cursor()
    }

    fn resolve_on_link_tap(&self) -> Option<LinkHandler> {
        (**self).resolve_on_link_tap()
    }

    fn resolve_on_link_hover(&self) -> Option<HoverHandler> {
        (**self).resolve_on_link_hover()
    }

    fn create_script_span(
        &self,
        text: &str,
        style: &TextStyle,
        is_superscript: bool,
    ) -> ScriptSpan {
        (**self).create_script_span(text, style, is_superscript)
    }
}

/// Overlay optional layers from weakest to strongest.
///
/// A layer that sets a decoration replaces the decoration below it, so a
/// stronger layer can turn an underline or line-through off.
pub fn cascade(layers: &[Option<&TextStyle>]) -> TextStyle {
    layers
        .iter()
        .flatten()
        .fold(TextStyle::default(), |acc, layer| acc.overlay(layer))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Mouse cursor shown over links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkCursor {
    #[default]
    Pointer,
    Text,
    Basic,
}

/// Tap callback; receives the link URL.
#[derive(Clone)]
pub struct LinkHandler(Arc<dyn Fn(&str) + Send + Sync>);

impl LinkHandler {
    pub fn new(handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    pub fn call(&self, url: &str) {
        (self.0)(url);
    }
}

impl fmt::Debug for LinkHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LinkHandler(..)")
    }
}

impl PartialEq for LinkHandler {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

/// Hover callback; receives the link URL and whether the pointer entered.
#[derive(Clone)]
pub struct HoverHandler(Arc<dyn Fn(&str, bool) + Send + Sync>);

impl HoverHandler {
    pub fn new(handler: impl Fn(&str, bool) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    pub fn call(&self, url: &str, entered: bool) {
        (self.0)(url, entered);
    }
}

impl fmt::Debug for HoverHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HoverHandler(..)")
    }
}

impl PartialEq for HoverHandler {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

/// Config-driven resolver with theme-aware defaults.
#[derive(Debug, Clone)]
pub struct DefaultStyleResolver {
    theme: Theme,
    base_font_size: f32,
    script_scale: f32,
    superscript_shift: f32,
    subscript_shift: f32,
    cursor: LinkCursor,
    user_styles: BTreeMap<MarkerKind, TextStyle>,
    user_link: Option<TextStyle>,
    user_link_hover: Option<TextStyle>,
    overrides: BTreeMap<MarkerKind, TextStyle>,
    on_tap: Option<LinkHandler>,
    on_hover: Option<HoverHandler>,
}

impl Default for DefaultStyleResolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DefaultStyleResolver {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme,
            base_font_size: config.base_font_size,
            script_scale: config.script_scale,
            superscript_shift: config.superscript_shift,
            subscript_shift: config.subscript_shift,
            cursor: config.link_cursor,
            user_styles: config.styles.clone(),
            user_link: config.link.clone(),
            user_link_hover: config.link_hover.clone(),
            overrides: BTreeMap::new(),
            on_tap: None,
            on_hover: None,
        }
    }

    /// Per-call styles that take precedence over everything else.
    pub fn with_overrides(mut self, overrides: BTreeMap<MarkerKind, TextStyle>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_override(mut self, kind: MarkerKind, style: TextStyle) -> Self {
        self.overrides.insert(kind, style);
        self
    }

    pub fn on_link_tap(mut self, handler: LinkHandler) -> Self {
        self.on_tap = Some(handler);
        self
    }

    pub fn on_link_hover(mut self, handler: HoverHandler) -> Self {
        self.on_hover = Some(handler);
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Defaults that only depend on the marker and the inherited style.
    pub fn relative_default(&self, kind: MarkerKind, base: &TextStyle) -> TextStyle {
        let size = base.font_size.unwrap_or(self.base_font_size);
        match kind {
            MarkerKind::Bold => TextStyle::new().bold(),
            MarkerKind::Italic => TextStyle::new().italic(),
            MarkerKind::BoldItalic => TextStyle::new().bold().italic(),
            MarkerKind::Strikethrough => TextStyle::new().decoration(Decoration::LINE_THROUGH),
            MarkerKind::Underline => TextStyle::new().decoration(Decoration::UNDERLINE),
            MarkerKind::Highlight => TextStyle::new(),
            MarkerKind::Code => TextStyle::new().font_family("monospace"),
            MarkerKind::Superscript => TextStyle::new()
                .font_size(size * self.script_scale)
                .baseline_shift(-size * self.superscript_shift),
            MarkerKind::Subscript => TextStyle::new()
                .font_size(size * self.script_scale)
                .baseline_shift(size * self.subscript_shift),
        }
    }

    /// Theme-dependent defaults; only code and highlight have any.
    pub fn theme_default(&self, kind: MarkerKind) -> Option<TextStyle> {
        match (kind, self.theme) {
            (MarkerKind::Code, Theme::Light) => Some(
                TextStyle::new()
                    .background(Color::rgb(0xf0, 0xf0, 0xf0))
                    .color(Color::rgb(0xc7, 0x25, 0x4e)),
            ),
            (MarkerKind::Code, Theme::Dark) => Some(
                TextStyle::new()
                    .background(Color::rgb(0x2d, 0x2d, 0x2d))
                    .color(Color::rgb(0xf0, 0x8d, 0x49)),
            ),
            (MarkerKind::Highlight, Theme::Light) => {
                Some(TextStyle::new().background(Color::rgb(0xff, 0xf3, 0xa0)))
            }
            (MarkerKind::Highlight, Theme::Dark) => {
                Some(TextStyle::new().background(Color::rgb(0x80, 0x66, 0x00)))
            }
            _ => None,
        }
    }

    fn theme_link(&self) -> TextStyle {
        let color = match self.theme {
            Theme::Light => Color::rgb(0x0b, 0x57, 0xd0),
            Theme::Dark => Color::rgb(0x8a, 0xb4, 0xf8),
        };
        TextStyle::new()
            .color(color)
            .decoration(Decoration::UNDERLINE)
    }

    fn theme_link_hover(&self) -> TextStyle {
        let color = match self.theme {
            Theme::Light => Color::rgb(0x08, 0x42, 0xa0),
            Theme::Dark => Color::rgb(0xae, 0xcb, 0xfa),
        };
        TextStyle::new()
            .color(color)
            .decoration(Decoration::UNDERLINE)
    }
}

impl StyleResolver for DefaultStyleResolver {
    fn resolve_marker_style(&self, kind: MarkerKind, base: &TextStyle) -> TextStyle {
        let relative = self.relative_default(kind, base);
        let theme = self.theme_default(kind);
        let layer = cascade(&[
            Some(&relative),
            theme.as_ref(),
            self.user_styles.get(&kind),
            self.overrides.get(&kind),
        ]);
        base.merge(&layer)
    }

    fn resolve_link_style(&self, base: &TextStyle) -> TextStyle {
        let theme = self.theme_link();
        base.merge(&cascade(&[Some(&theme), self.user_link.as_ref()]))
    }

    fn resolve_link_hover_style(&self, base: &TextStyle) -> TextStyle {
        // Hover builds on the normal link style
        let normal = self.resolve_link_style(base);
        let theme = self.theme_link_hover();
        normal.overlay(&cascade(&[Some(&theme), self.user_link_hover.as_ref()]))
    }

    fn resolve_link_cursor(&self) -> LinkCursor {
        self.cursor
    }

    fn resolve_on_link_tap(&self) -> Option<LinkHandler> {
        self.on_tap.clone()
    }

    fn resolve_on_link_hover(&self) -> Option<HoverHandler> {
        self.on_hover.clone()
    }
}
