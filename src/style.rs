//! Colors and the immutable style configuration shared by every render.

use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::color_rule::ColorRuleTable;
use crate::error::RenderResult;

// ============================================================================
// Color
// ============================================================================

/// An opaque 8-bit sRGB color.
///
/// Serializes as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Darkens the color by reducing its HSL lightness by `amount` (0.0-1.0).
    pub fn darken(self, amount: f32) -> Self {
        let rgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let mut hsl: Hsl = rgb.into_color();
        hsl.lightness = (hsl.lightness - amount).max(0.0);
        let darkened: Srgb = hsl.into_color();
        Self::rgb(
            (darkened.red * 255.0).round() as u8,
            (darkened.green * 255.0).round() as u8,
            (darkened.blue * 255.0).round() as u8,
        )
    }

    pub fn to_skia(self) -> resvg::tiny_skia::Color {
        resvg::tiny_skia::Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl FromStr for Color {
    type Err = palette::rgb::FromHexError;

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb: Srgb<u8> = s.trim().parse()?;
        Ok(Self::rgb(rgb.red, rgb.green, rgb.blue))
    }
}

impl TryFrom<String> for Color {
    type Error = palette::rgb::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Read-only style configuration passed into every render call.
///
/// Panels, titles and status lines take all of their metrics and colors from
/// here, so two asset sets differ only in the theme and the scene list.
///
/// # JSON Format
///
/// ```json
/// {
///   "glass": "#141e32",
///   "borderGlow": "#00f0ff",
///   "cornerLength": 20.0,
///   "lineHeight": 40.0,
///   "fontFamily": "DejaVu Sans Mono",
///   "status": [{ "marker": "[OK]", "color": "#00ff64" }]
/// }
/// ```
///
/// Missing fields take the values of [`Theme::futuristic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// Panel body fill.
    pub glass: Color,
    /// Border color for panels with `glow` set.
    pub border_glow: Color,
    /// Border color for ordinary panels.
    pub border_dim: Color,
    /// Header band fill behind panel titles.
    pub header_fill: Color,
    pub title_color: Color,
    /// Color for content lines that match no status marker.
    pub text_color: Color,

    pub corner_length: f32,
    pub border_width: f32,
    pub header_height: f32,
    /// Title offset from the panel's top-left corner.
    pub title_inset: (f32, f32),
    pub content_margin: f32,
    /// Offset of the first content line from the panel top.
    pub first_line_offset: f32,
    pub line_height: f32,

    pub title_size: f32,
    pub body_size: f32,
    pub font_family: String,

    /// Marker precedence table for content lines.
    pub status: ColorRuleTable,
}

impl Default for Theme {
    fn default() -> Self {
        Self::futuristic()
    }
}

impl Theme {
    /// Deep-void palette with cyan HUD borders.
    pub fn futuristic() -> Self {
        Self {
            glass: Color::rgb(20, 30, 50),
            border_glow: Color::rgb(0, 240, 255),
            border_dim: Color::rgb(0, 80, 90),
            header_fill: Color::rgb(0, 80, 90),
            title_color: Color::rgb(240, 250, 255),
            text_color: Color::rgb(240, 250, 255),
            corner_length: 20.0,
            border_width: 2.0,
            header_height: 40.0,
            title_inset: (20.0, 8.0),
            content_margin: 20.0,
            first_line_offset: 60.0,
            line_height: 40.0,
            title_size: 24.0,
            body_size: 30.0,
            font_family: crate::text::FALLBACK_FAMILY.to_string(),
            status: ColorRuleTable::status(),
        }
    }

    /// Grey debug palette used by the developer asset set.
    pub fn dev() -> Self {
        Self {
            glass: Color::rgb(20, 20, 25),
            border_glow: Color::rgb(0, 200, 255),
            border_dim: Color::rgb(100, 100, 100),
            header_fill: Color::rgb(40, 40, 50),
            title_color: Color::WHITE,
            text_color: Color::rgb(200, 200, 200),
            ..Self::futuristic()
        }
    }

    /// Serializes the theme to a JSON string.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the theme to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a theme from a JSON string.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_hex() {
        assert_eq!("#00f0ff".parse::<Color>().unwrap(), Color::rgb(0, 240, 255));
        assert_eq!("ff0055".parse::<Color>().unwrap(), Color::rgb(255, 0, 85));
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn color_serializes_as_hex() {
        let json = serde_json::to_string(&Color::rgb(5, 5, 16)).unwrap();
        assert_eq!(json, "\"#050510\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(5, 5, 16));
    }

    #[test]
    fn darken_reduces_lightness() {
        let cyan = Color::rgb(0, 240, 255);
        let dark = cyan.darken(0.3);
        assert!(dark.g < cyan.g);
        assert!(dark.b < cyan.b);
        assert_eq!(Color::BLACK.darken(0.5), Color::BLACK);
    }

    #[test]
    fn theme_json_fills_missing_fields() {
        let theme = Theme::from_json(r##"{ "lineHeight": 50.0, "glass": "#000000" }"##).unwrap();
        assert_eq!(theme.line_height, 50.0);
        assert_eq!(theme.glass, Color::BLACK);
        assert_eq!(theme.corner_length, Theme::futuristic().corner_length);
        assert_eq!(theme.status, ColorRuleTable::status());
    }

    #[test]
    fn theme_json_format() {
        let json = Theme::dev().to_json_pretty().unwrap();
        assert!(json.contains("\"borderGlow\""));
        assert!(json.contains("\"firstLineOffset\""));
        let restored = Theme::from_json(&json).unwrap();
        assert_eq!(restored, Theme::dev());
    }
}
