//! Background grids: rectangular lines, hexagon tilings and scanlines.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, RenderContext, crisp, default_width};
use crate::error::{RenderError, RenderResult};
use crate::geometry::{MIN_PITCH, Point, Rect, hex_grid_offsets, hex_vertices, rect_grid_lines};
use crate::style::Color;

/// A rectangular grid of lines spanning the whole canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    /// Distance between adjacent lines.
    pub step: f32,
    pub color: Color,
    #[serde(default = "default_width")]
    pub width: f32,
    /// Shifts the grid origin; wrapped into one step.
    #[serde(default)]
    pub offset: Point,
}

impl GridSpec {
    pub fn new(step: f32, color: Color) -> Self {
        Self {
            step,
            color,
            width: 1.0,
            offset: Point::default(),
        }
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }
}

impl LayerEffect for GridSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        check_pitch("grid step", self.step)?;

        let bounds = ctx.bounds();
        let origin = Rect::new(
            self.offset.x.rem_euclid(self.step),
            self.offset.y.rem_euclid(self.step),
            bounds.width,
            bounds.height,
        );
        let (vertical, horizontal) = rect_grid_lines(origin, self.step);

        for seg in vertical.iter().filter(|s| s.start.x < bounds.right()) {
            let x = crisp(seg.start.x, self.width);
            ctx.canvas.line(
                Point::new(x, bounds.y),
                Point::new(x, bounds.bottom()),
                self.color,
                self.width,
            );
        }
        for seg in horizontal.iter().filter(|s| s.start.y < bounds.bottom()) {
            let y = crisp(seg.start.y, self.width);
            ctx.canvas.line(
                Point::new(bounds.x, y),
                Point::new(bounds.right(), y),
                self.color,
                self.width,
            );
        }
        Ok(())
    }
}

/// Hexagon outlines tiling the whole canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexGridSpec {
    /// Radius used to space the tiling.
    pub cell_radius: f32,
    /// Drawn hexagons are shrunk by this much to leave a gap between tiles.
    #[serde(default)]
    pub inset: f32,
    #[serde(default)]
    pub rotation: f32,
    pub color: Color,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl HexGridSpec {
    pub fn new(cell_radius: f32, color: Color) -> Self {
        Self {
            cell_radius,
            inset: 0.0,
            rotation: 0.0,
            color,
            width: 1.0,
        }
    }

    pub fn with_inset(mut self, inset: f32) -> Self {
        self.inset = inset;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

impl LayerEffect for HexGridSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        check_pitch("hex grid cell radius", self.cell_radius)?;

        let radius = self.cell_radius - self.inset;
        let mut count = 0usize;
        for center in hex_grid_offsets(ctx.bounds(), self.cell_radius) {
            let points = hex_vertices(center, radius, self.rotation)?;
            ctx.canvas
                .polygon(&points, None, Some(self.color), self.width);
            count += 1;
        }
        log::trace!(target: "scene", "hex grid drew {count} cells");
        Ok(())
    }
}

/// Evenly spaced horizontal lines, the CRT scanline overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanlineSpec {
    pub spacing: f32,
    pub color: Color,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl ScanlineSpec {
    pub fn new(spacing: f32, color: Color) -> Self {
        Self {
            spacing,
            color,
            width: 1.0,
        }
    }
}

impl LayerEffect for ScanlineSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        check_pitch("scanline spacing", self.spacing)?;

        let bounds = ctx.bounds();
        let (_, horizontal) = rect_grid_lines(bounds, self.spacing);
        for seg in horizontal {
            let y = crisp(seg.start.y, self.width);
            ctx.canvas.line(
                Point::new(seg.start.x, y),
                Point::new(seg.end.x, y),
                self.color,
                self.width,
            );
        }
        Ok(())
    }
}

fn check_pitch(what: &str, value: f32) -> RenderResult<()> {
    if value.is_finite() && value >= MIN_PITCH {
        Ok(())
    } else {
        Err(RenderError::InvalidGeometry(format!(
            "{what} must be at least {MIN_PITCH}px, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::layer::Layer;
    use crate::style::Theme;
    use crate::text::FontBook;

    fn render(layer: &dyn LayerEffect, w: u32, h: u32) -> RenderResult<Canvas> {
        let fonts = FontBook::new();
        let theme = Theme::dev();
        let mut ctx = RenderContext::new(Canvas::new(w, h, Color::BLACK)?, &fonts, &theme);
        layer.draw(&mut ctx)?;
        Ok(ctx.into_canvas())
    }

    #[test]
    fn grid_lines_land_on_step_multiples() {
        let red = Color::rgb(255, 0, 0);
        let canvas = render(&GridSpec::new(64.0, red), 200, 200).unwrap();
        assert_eq!(canvas.pixel(64, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 128), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 33), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(32, 32), Some([0, 0, 0, 255]));
    }

    #[test]
    fn grid_offset_wraps_into_one_step() {
        let red = Color::rgb(255, 0, 0);
        let spec = GridSpec::new(50.0, red).with_offset(Point::new(-40.0, 110.0));
        let canvas = render(&spec, 120, 120).unwrap();
        assert_eq!(canvas.pixel(10, 5), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(5, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = render(&GridSpec::new(0.0, Color::WHITE), 10, 10);
        assert!(matches!(err, Err(RenderError::InvalidGeometry(_))));
    }

    #[test]
    fn hex_grid_covers_canvas() {
        let spec = HexGridSpec::new(40.0, Color::WHITE).with_rotation(30.0);
        let canvas = render(&spec, 512, 512).unwrap();
        let lit = (0..512)
            .step_by(8)
            .flat_map(|y| (0..512).step_by(8).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).is_some_and(|p| p[0] > 0))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn sub_pixel_pitches_are_rejected() {
        for layer in [
            Layer::from(HexGridSpec::new(0.001, Color::WHITE)),
            Layer::from(GridSpec::new(0.5, Color::WHITE)),
            Layer::from(ScanlineSpec::new(1e-9, Color::WHITE)),
        ] {
            assert!(matches!(
                render(&layer, 1024, 500),
                Err(RenderError::InvalidGeometry(_))
            ));
        }
        assert!(render(&HexGridSpec::new(MIN_PITCH, Color::WHITE), 20, 20).is_ok());
    }

    #[test]
    fn hex_grid_inset_past_radius_is_rejected() {
        let spec = HexGridSpec::new(10.0, Color::WHITE).with_inset(12.0);
        assert!(matches!(
            render(&spec, 64, 64),
            Err(RenderError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn scanlines_every_spacing() {
        let spec = ScanlineSpec::new(4.0, Color::WHITE);
        let canvas = render(&spec, 16, 16).unwrap();
        assert_eq!(canvas.pixel(3, 0), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(3, 8), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(3, 2), Some([0, 0, 0, 255]));
    }
}
