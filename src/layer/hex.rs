//! The hexagon shield emblem.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, RenderContext};
use crate::error::RenderResult;
use crate::geometry::{HexSpec, Point};
use crate::style::Color;

/// A large outlined hexagon with an optional glow halo and inner fill.
///
/// Drawn back to front: glow bands from the outside in, the main outline,
/// then the inner fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexShieldSpec {
    /// Defaults to the canvas center.
    #[serde(default)]
    pub center: Option<Point>,
    pub radius: f32,
    #[serde(default)]
    pub rotation: f32,
    pub outline: Color,
    #[serde(default = "default_outline_width")]
    pub outline_width: f32,
    #[serde(default)]
    pub glow: Option<GlowSpec>,
    #[serde(default)]
    pub inner_fill: Option<InnerFill>,
}

/// Concentric one-pixel outlines just outside the shield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowSpec {
    pub bands: u32,
    /// Defaults to the shield outline darkened by 30% lightness.
    #[serde(default)]
    pub color: Option<Color>,
}

/// A filled hexagon `inset` pixels inside the shield outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnerFill {
    pub inset: f32,
    pub color: Color,
}

fn default_outline_width() -> f32 {
    8.0
}

impl HexShieldSpec {
    pub fn new(radius: f32, outline: Color) -> Self {
        Self {
            center: None,
            radius,
            rotation: 0.0,
            outline,
            outline_width: default_outline_width(),
            glow: None,
            inner_fill: None,
        }
    }

    pub fn at(mut self, center: Point) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_outline_width(mut self, width: f32) -> Self {
        self.outline_width = width;
        self
    }

    pub fn with_glow(mut self, bands: u32, color: Color) -> Self {
        self.glow = Some(GlowSpec {
            bands,
            color: Some(color),
        });
        self
    }

    pub fn with_inner_fill(mut self, inset: f32, color: Color) -> Self {
        self.inner_fill = Some(InnerFill { inset, color });
        self
    }
}

impl LayerEffect for HexShieldSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        let center = self.center.unwrap_or_else(|| ctx.bounds().center());

        // Validate the main outline before any glow band is painted
        let shield = HexSpec::new(center, self.radius, self.rotation)
            .with_outline(self.outline, self.outline_width);
        let shield_points = shield.vertices()?;

        if let Some(glow) = &self.glow {
            let color = glow.color.unwrap_or_else(|| self.outline.darken(0.3));
            for i in (1..=glow.bands).rev() {
                let band = HexSpec::new(center, self.radius + i as f32, self.rotation);
                ctx.canvas.polygon(&band.vertices()?, None, Some(color), 1.0);
            }
        }

        ctx.canvas
            .polygon(&shield_points, shield.fill, shield.outline, shield.outline_width);

        if let Some(inner) = &self.inner_fill {
            let fill = HexSpec::new(center, self.radius - inner.inset, self.rotation)
                .with_fill(inner.color);
            ctx.canvas.polygon(&fill.vertices()?, fill.fill, None, 0.0);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::error::RenderError;
    use crate::style::Theme;
    use crate::text::FontBook;

    fn render(spec: &HexShieldSpec) -> RenderResult<Canvas> {
        let fonts = FontBook::new();
        let theme = Theme::futuristic();
        let mut ctx = RenderContext::new(Canvas::new(512, 512, Color::BLACK)?, &fonts, &theme);
        spec.draw(&mut ctx)?;
        Ok(ctx.into_canvas())
    }

    #[test]
    fn shield_layers_paint_in_order() {
        let cyan = Color::rgb(0, 240, 255);
        let inner = Color::rgb(10, 20, 40);
        let spec = HexShieldSpec::new(180.0, cyan)
            .with_rotation(30.0)
            .with_glow(10, Color::rgb(0, 100, 110))
            .with_inner_fill(10.0, inner);
        let canvas = render(&spec).unwrap();

        // Center is covered by the inner fill
        assert_eq!(canvas.pixel(256, 256), Some([10, 20, 40, 255]));
        // Rotation 30 leaves a vertical edge 180*cos(30) right of center
        let right = 256 + (180.0f32 * 30f32.to_radians().cos()) as u32;
        assert_eq!(canvas.pixel(right, 256), Some([0, 240, 255, 255]));
        // Corners stay background
        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn non_positive_radius_is_fatal() {
        let spec = HexShieldSpec::new(0.0, Color::WHITE);
        assert!(matches!(render(&spec), Err(RenderError::InvalidGeometry(_))));
    }

    #[test]
    fn inner_fill_larger_than_shield_is_fatal() {
        let spec = HexShieldSpec::new(20.0, Color::WHITE).with_inner_fill(25.0, Color::BLACK);
        assert!(render(&spec).is_err());
    }
}
