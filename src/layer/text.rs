//! Free-standing text layers.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, RenderContext};
use crate::error::RenderResult;
use crate::geometry::{Point, Rect};
use crate::style::Color;
use crate::text::{DEFAULT_FONT_SIZE, TextSize, center_within};

/// A font request. A missing family means the theme's font family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default = "default_size")]
    pub size: f32,
}

fn default_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sized(DEFAULT_FONT_SIZE)
    }
}

impl FontSpec {
    /// The theme font at `size`.
    pub fn sized(size: f32) -> Self {
        Self { family: None, size }
    }
}

/// Where a text's ink box goes.
///
/// Every variant positions the top-left corner of the measured ink box, so
/// centered text is centered on its visible glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Anchor {
    /// Ink box top-left at a fixed point.
    TopLeft { x: f32, y: f32 },
    /// Centered in `region` (the canvas if absent), then shifted.
    Center {
        #[serde(default)]
        region: Option<Rect>,
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    /// Centered horizontally in `region` with its top at `y`.
    CenterX {
        y: f32,
        #[serde(default)]
        region: Option<Rect>,
    },
}

impl Anchor {
    pub fn at(x: f32, y: f32) -> Self {
        Self::TopLeft { x, y }
    }

    /// Centered on the canvas, shifted by `(dx, dy)`.
    pub fn centered(dx: f32, dy: f32) -> Self {
        Self::Center {
            region: None,
            dx,
            dy,
        }
    }

    /// Centered on the canvas horizontally, top at `y`.
    pub fn center_x(y: f32) -> Self {
        Self::CenterX { y, region: None }
    }

    /// Computes the ink box top-left for text of `size` on a canvas of `bounds`.
    pub fn resolve(&self, bounds: Rect, size: TextSize) -> Point {
        match *self {
            Self::TopLeft { x, y } => Point::new(x, y),
            Self::Center { region, dx, dy } => {
                center_within(region.unwrap_or(bounds), size).offset(dx, dy)
            }
            Self::CenterX { y, region } => {
                Point::new(center_within(region.unwrap_or(bounds), size).x, y)
            }
        }
    }
}

/// A copy of the text drawn underneath, offset by `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub dx: f32,
    pub dy: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub text: String,
    #[serde(default)]
    pub font: FontSpec,
    pub color: Color,
    pub anchor: Anchor,
    #[serde(default)]
    pub shadow: Option<Shadow>,
}

impl TextSpec {
    pub fn new(text: impl Into<String>, size: f32, color: Color, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            font: FontSpec::sized(size),
            color,
            anchor,
            shadow: None,
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font.family = Some(family.into());
        self
    }

    pub fn with_shadow(mut self, dx: f32, dy: f32, color: Color) -> Self {
        self.shadow = Some(Shadow { dx, dy, color });
        self
    }
}

impl LayerEffect for TextSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        let theme = ctx.theme;
        let family = self.font.family.as_deref().unwrap_or(&theme.font_family);
        let bounds = ctx.bounds();
        let anchor = self.anchor;

        if let Some(shadow) = self.shadow {
            let drawn = ctx.draw_text(&self.text, family, self.font.size, shadow.color, |size| {
                anchor.resolve(bounds, size).offset(shadow.dx, shadow.dy)
            });
            // The main text would fail the same way
            if drawn.is_none() {
                return Ok(());
            }
        }

        ctx.draw_text(&self.text, family, self.font.size, self.color, |size| {
            anchor.resolve(bounds, size)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::style::Theme;
    use crate::text::FontBook;

    fn ink_columns(canvas: &Canvas, background: [u8; 4]) -> Option<(u32, u32)> {
        let lit: Vec<u32> = (0..canvas.width())
            .filter(|&x| (0..canvas.height()).any(|y| canvas.pixel(x, y) != Some(background)))
            .collect();
        Some((*lit.first()?, *lit.last()?))
    }

    #[test]
    fn center_x_matches_measured_width() {
        let fonts = FontBook::new();
        let theme = Theme::futuristic();
        let spec = TextSpec::new("QA VERIFY & TRACK", 70.0, Color::WHITE, Anchor::center_x(210.0));

        let font = fonts.resolve_font(&theme.font_family, 70.0);
        let measured = fonts.measure(&spec.text, &font).unwrap();

        let canvas = Canvas::new(1024, 500, Color::BLACK).unwrap();
        let mut ctx = RenderContext::new(canvas, &fonts, &theme);
        spec.draw(&mut ctx).unwrap();
        let canvas = ctx.into_canvas();

        let (left, right) = ink_columns(&canvas, [0, 0, 0, 255]).unwrap();
        let expected = (1024 - measured.width) / 2;
        assert!(left.abs_diff(expected) <= 1, "left {left}, expected {expected}");
        assert!((right + 1 - left).abs_diff(measured.width) <= 2);
    }

    #[test]
    fn shadow_is_drawn_beneath() {
        let fonts = FontBook::new();
        let theme = Theme::futuristic();
        let shadow = Color::rgb(0, 100, 110);
        let spec = TextSpec::new("I", 60.0, Color::WHITE, Anchor::at(10.0, 10.0))
            .with_shadow(30.0, 0.0, shadow);

        let canvas = Canvas::new(100, 100, Color::BLACK).unwrap();
        let mut ctx = RenderContext::new(canvas, &fonts, &theme);
        spec.draw(&mut ctx).unwrap();
        let canvas = ctx.into_canvas();

        let has = |color: Color| {
            (0..100).any(|y| {
                (0..100).any(|x| canvas.pixel(x, y) == Some([color.r, color.g, color.b, 255]))
            })
        };
        assert!(has(Color::WHITE));
        assert!(has(shadow));
    }

    #[test]
    fn unknown_family_still_renders() {
        let fonts = FontBook::new();
        let theme = Theme::futuristic();
        let spec = TextSpec::new("DEV", 40.0, Color::WHITE, Anchor::centered(0.0, 0.0))
            .with_family("Definitely Not Installed");

        let canvas = Canvas::new(200, 100, Color::BLACK).unwrap();
        let mut ctx = RenderContext::new(canvas, &fonts, &theme);
        spec.draw(&mut ctx).unwrap();
        assert_eq!(ctx.skipped_text(), 0);
        assert!(ink_columns(&ctx.into_canvas(), [0, 0, 0, 255]).is_some());
    }

    #[test]
    fn anchor_json_is_tagged() {
        let anchor: Anchor = serde_json::from_str(r#"{ "mode": "center", "dy": -20 }"#).unwrap();
        assert_eq!(anchor, Anchor::centered(0.0, -20.0));
        let size = TextSize { width: 100, height: 40 };
        assert_eq!(
            anchor.resolve(Rect::from_size(512, 512), size),
            Point::new(206.0, 216.0)
        );
    }
}
