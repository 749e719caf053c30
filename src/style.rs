//! Concrete text styles and the resolution interface.
//!
//! A [`TextStyle`] is a set of optional properties. Nested formats compose
//! by [`TextStyle::merge`]: properties set on the inner style win, unset ones
//! fall through to the outer style. Decorations are the exception: their
//! kinds are unioned, so `++~~x~~++` is both underlined and struck through,
//! while the decoration colour and thickness follow the innermost style that
//! sets them.
//!
//! Precedence layers for a single format compose by [`TextStyle::overlay`]
//! instead, where a set decoration replaces the one below it. That is how
//! `decoration = { underline = false }` in user configuration removes the
//! theme's link underline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

mod resolver;

pub use resolver::{
    DefaultStyleResolver, HoverHandler, LinkCursor, LinkHandler, StyleResolver, Theme, cascade,
};

/// An sRGB colour with alpha, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid colour '{value}'"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Line decorations. Nested formats union the set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Decoration {
    pub underline: bool,
    pub line_through: bool,
}

impl Decoration {
    pub const NONE: Self = Self {
        underline: false,
        line_through: false,
    };
    pub const UNDERLINE: Self = Self {
        underline: true,
        line_through: false,
    };
    pub const LINE_THROUGH: Self = Self {
        underline: false,
        line_through: true,
    };

    pub fn union(self, other: Self) -> Self {
        Self {
            underline: self.underline || other.underline,
            line_through: self.line_through || other.line_through,
        }
    }

    pub fn is_none(&self) -> bool {
        !self.underline && !self.line_through
    }
}

/// A fully resolved, renderer-agnostic text style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration_thickness: Option<f32>,
    /// Vertical offset from the baseline; negative values raise the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_shift: Option<f32>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest `inner` inside `self`. Decoration kinds accumulate.
    pub fn merge(&self, inner: &TextStyle) -> TextStyle {
        let decoration = match (self.decoration, inner.decoration) {
            (Some(outer), Some(nested)) => Some(outer.union(nested)),
            (outer, nested) => nested.or(outer),
        };
        TextStyle {
            decoration,
            ..self.overlay(inner)
        }
    }

    /// Lay `over` on top of `self`: every property `over` sets replaces the
    /// one below, decoration included.
    pub fn overlay(&self, over: &TextStyle) -> TextStyle {
        TextStyle {
            color: over.color.or(self.color),
            background: over.background.or(self.background),
            font_family: over.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: over.font_size.or(self.font_size),
            font_weight: over.font_weight.or(self.font_weight),
            font_style: over.font_style.or(self.font_style),
            decoration: over.decoration.or(self.decoration),
            decoration_color: over.decoration_color.or(self.decoration_color),
            decoration_thickness: over.decoration_thickness.or(self.decoration_thickness),
            baseline_shift: over.baseline_shift.or(self.baseline_shift),
        }
    }

    /// The decorations to draw; unset means none.
    pub fn decorations(&self) -> Decoration {
        self.decoration.unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        *self == TextStyle::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = Some(FontWeight::Bold);
        self
    }

    pub fn italic(mut self) -> Self {
        self.font_style = Some(FontStyle::Italic);
        self
    }

    pub fn decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = Some(self.decorations().union(decoration));
        self
    }

    pub fn decoration_color(mut self, color: Color) -> Self {
        self.decoration_color = Some(color);
        self
    }

    pub fn decoration_thickness(mut self, thickness: f32) -> Self {
        self.decoration_thickness = Some(thickness);
        self
    }

    pub fn baseline_shift(mut self, shift: f32) -> Self {
        self.baseline_shift = Some(shift);
        self
    }
}

// f32 fields are hashed by bit pattern, so the hash agrees with PartialEq for
// every value a style can sensibly hold (no NaN sizes).
impl Hash for TextStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        self.background.hash(state);
        self.font_family.hash(state);
        self.font_size.map(f32::to_bits).hash(state);
        self.font_weight.hash(state);
        self.font_style.hash(state);
        self.decoration.hash(state);
        self.decoration_color.hash(state);
        self.decoration_thickness.map(f32::to_bits).hash(state);
        self.baseline_shift.map(f32::to_bits).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(0xff, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xff);

    #[test]
    fn test_color_hex_round_trip() {
        assert_eq!(Color::from_hex("#ff0000"), Some(RED));
        assert_eq!(
            Color::from_hex("#0000ff80"),
            Some(Color::rgba(0, 0, 0xff, 0x80))
        );
        assert_eq!(RED.to_string(), "#ff0000");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert_eq!(Color::from_hex("ff0000"), None);
        assert_eq!(Color::from_hex("#ff00"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn test_merge_overlay_wins_where_set() {
        let base = TextStyle::new().color(RED).font_size(14.0);
        let over = TextStyle::new().color(BLUE).bold();
        let merged = base.merge(&over);
        assert_eq!(merged.color, Some(BLUE));
        assert_eq!(merged.font_size, Some(14.0));
        assert_eq!(merged.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn test_merge_unions_decorations() {
        let underline = TextStyle::new()
            .decoration(Decoration::UNDERLINE)
            .decoration_color(RED)
            .decoration_thickness(1.0);
        let strike = TextStyle::new()
            .decoration(Decoration::LINE_THROUGH)
            .decoration_color(BLUE);
        let merged = underline.merge(&strike);
        assert!(merged.decorations().underline);
        assert!(merged.decorations().line_through);
        // Innermost colour wins, thickness falls through
        assert_eq!(merged.decoration_color, Some(BLUE));
        assert_eq!(merged.decoration_thickness, Some(1.0));
    }

    #[test]
    fn test_overlay_replaces_decorations() {
        let theme = TextStyle::new().color(RED).decoration(Decoration::UNDERLINE);
        let user = TextStyle::new().decoration(Decoration::NONE);
        let layered = theme.overlay(&user);
        assert_eq!(layered.decorations(), Decoration::NONE);
        assert_eq!(layered.color, Some(RED));

        // Nesting the same styles keeps the outer underline
        assert!(theme.merge(&user).decorations().underline);
        // An unset decoration falls through either way
        assert_eq!(theme.overlay(&TextStyle::new()), theme);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let style = TextStyle::new().italic().background(RED);
        assert_eq!(style.merge(&TextStyle::new()), style);
        assert_eq!(TextStyle::new().merge(&style), style);
    }

    #[test]
    fn test_style_deserializes_from_toml() {
        let style: TextStyle = toml::from_str(
            r##"
            color = "#ff0000"
            font_weight = "bold"
            decoration = { underline = true }
            "##,
        )
        .unwrap();
        assert_eq!(
            style,
            TextStyle::new()
                .color(RED)
                .bold()
                .decoration(Decoration::UNDERLINE)
        );

        let cleared: TextStyle = toml::from_str("decoration = {}").unwrap();
        assert_eq!(cleared.decoration, Some(Decoration::NONE));
    }
}
