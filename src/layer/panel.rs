//! Cut-corner HUD panels.
//!
//! A panel is a glass-filled rectangle with an octagonal border, an optional
//! title band across its top, and a list of content lines colored by the
//! theme's status table. All metrics come from the [`Theme`](crate::Theme).

use serde::{Deserialize, Serialize};

use super::{LayerEffect, RenderContext};
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Point, Rect, clamp_corner, cut_corner_polygon};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSpec {
    pub rect: Rect,
    #[serde(default)]
    pub title: Option<String>,
    /// Content lines, top to bottom.
    #[serde(default)]
    pub lines: Vec<String>,
    /// Overrides the theme's corner length.
    #[serde(default)]
    pub corner: Option<f32>,
    /// Use the bright border color instead of the dim one.
    #[serde(default)]
    pub glow: bool,
}

impl PanelSpec {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            title: None,
            lines: Vec::new(),
            corner: None,
            glow: false,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_corner(mut self, corner: f32) -> Self {
        self.corner = Some(corner);
        self
    }

    pub fn glowing(mut self) -> Self {
        self.glow = true;
        self
    }

    /// Top-left of the `index`th content line's box. Lines share one
    /// ascent, so consecutive baselines are `line_height` apart.
    pub fn line_origin(&self, index: usize, theme: &crate::Theme) -> Point {
        Point::new(
            self.rect.x + theme.content_margin,
            self.rect.y + theme.first_line_offset + index as f32 * theme.line_height,
        )
    }
}

impl LayerEffect for PanelSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        let rect = self.rect;
        if !rect.is_valid() {
            return Err(RenderError::InvalidGeometry(format!(
                "panel size must be positive, got {}x{}",
                rect.width, rect.height
            )));
        }

        let theme = ctx.theme;
        let corner = clamp_corner(&rect, self.corner.unwrap_or(theme.corner_length));
        let border = if self.glow {
            theme.border_glow
        } else {
            theme.border_dim
        };

        ctx.canvas.rectangle(rect, Some(theme.glass), None, 0.0);
        ctx.canvas.polygon(
            &cut_corner_polygon(&rect, corner),
            None,
            Some(border),
            theme.border_width,
        );

        if let Some(title) = &self.title {
            let band = corner.min(theme.header_height);
            let (x, y, r) = (rect.x, rect.y, rect.right());
            let header = [
                Point::new(x, y + band),
                Point::new(x + band, y),
                Point::new(r - band, y),
                Point::new(r, y + band),
                Point::new(r, y + theme.header_height),
                Point::new(x, y + theme.header_height),
            ];
            ctx.canvas.polygon(&header, Some(theme.header_fill), None, 0.0);

            let origin = Point::new(x + theme.title_inset.0, y + theme.title_inset.1);
            ctx.draw_text_line(
                &title.to_uppercase(),
                &theme.font_family,
                theme.title_size,
                theme.title_color,
                origin,
            );
        }

        for (i, line) in self.lines.iter().enumerate() {
            let origin = self.line_origin(i, theme);
            let color = theme.status.classify(line, theme.text_color);
            ctx.draw_text_line(line, &theme.font_family, theme.body_size, color, origin);
        }

        log::trace!(
            target: "scene",
            "panel {:?} with {} lines",
            self.title.as_deref().unwrap_or(""),
            self.lines.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::style::{Color, Theme};
    use crate::text::FontBook;

    fn render(spec: &PanelSpec, theme: &Theme) -> RenderResult<Canvas> {
        let fonts = FontBook::new();
        let mut ctx = RenderContext::new(Canvas::new(400, 300, Color::BLACK)?, &fonts, theme);
        spec.draw(&mut ctx)?;
        Ok(ctx.into_canvas())
    }

    fn rgba(c: Color) -> Option<[u8; 4]> {
        Some([c.r, c.g, c.b, 255])
    }

    #[test]
    fn body_header_and_border() {
        let theme = Theme::futuristic();
        let spec = PanelSpec::new(Rect::new(50.0, 50.0, 300.0, 200.0)).titled("Project List");
        let canvas = render(&spec, &theme).unwrap();

        // Glass body below the header, away from text
        assert_eq!(canvas.pixel(340, 200), rgba(theme.glass));
        // Header band fills the top strip on the right, past the title
        assert_eq!(canvas.pixel(330, 80), rgba(theme.header_fill));
        // Left edge carries the dim border
        assert_eq!(canvas.pixel(50, 150), rgba(theme.border_dim));
        // Outside the panel stays background
        assert_eq!(canvas.pixel(40, 40), Some([0, 0, 0, 255]));
    }

    #[test]
    fn glow_selects_bright_border() {
        let theme = Theme::futuristic();
        let spec = PanelSpec::new(Rect::new(50.0, 50.0, 300.0, 200.0)).glowing();
        let canvas = render(&spec, &theme).unwrap();
        assert_eq!(canvas.pixel(50, 150), rgba(theme.border_glow));
    }

    #[test]
    fn oversized_corner_is_clamped() {
        let theme = Theme::futuristic();
        let spec = PanelSpec::new(Rect::new(100.0, 100.0, 40.0, 40.0)).with_corner(500.0);
        let canvas = render(&spec, &theme).unwrap();
        // A 20px corner on a 40px square leaves a diamond
        assert_eq!(canvas.pixel(110, 130), rgba(theme.border_dim));
    }

    #[test]
    fn empty_panel_is_rejected() {
        let theme = Theme::futuristic();
        let spec = PanelSpec::new(Rect::new(0.0, 0.0, 0.0, 10.0));
        assert!(matches!(
            render(&spec, &theme),
            Err(RenderError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn content_lines_use_status_colors() {
        let theme = Theme::futuristic();
        let spec = PanelSpec::new(Rect::new(0.0, 0.0, 400.0, 300.0))
            .with_lines(["[ERR] build", "[OK] deploy"]);
        let canvas = render(&spec, &theme).unwrap();

        let err = theme.status.classify("[ERR]", theme.text_color);
        let ok = theme.status.classify("[OK]", theme.text_color);
        let row_has = |y0: u32, color: Color| {
            (y0..y0 + 30).any(|y| (0..400).any(|x| canvas.pixel(x, y) == rgba(color)))
        };
        assert!(row_has(60, err));
        assert!(row_has(100, ok));
        assert!(!row_has(60, ok));
    }

    fn lowest_ink_row(canvas: &Canvas, color: Color) -> Option<u32> {
        (0..300)
            .rev()
            .find(|&y| (0..400).any(|x| canvas.pixel(x, y) == rgba(color)))
    }

    #[test]
    fn lines_share_a_baseline_regardless_of_glyphs() {
        let theme = Theme::futuristic();
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let caps = render(&PanelSpec::new(rect).with_lines(["HHHH"]), &theme).unwrap();
        let lower = render(&PanelSpec::new(rect).with_lines(["nnnn"]), &theme).unwrap();

        let caps_bottom = lowest_ink_row(&caps, theme.text_color).unwrap();
        let lower_bottom = lowest_ink_row(&lower, theme.text_color).unwrap();
        assert!(
            caps_bottom.abs_diff(lower_bottom) <= 1,
            "HHHH ends at {caps_bottom}, nnnn at {lower_bottom}"
        );
    }

    #[test]
    fn baselines_step_by_line_height() {
        let theme = Theme::futuristic();
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let first = render(&PanelSpec::new(rect).with_lines(["HHHH"]), &theme).unwrap();
        let second = render(&PanelSpec::new(rect).with_lines(["", "nnnn"]), &theme).unwrap();

        let first = lowest_ink_row(&first, theme.text_color).unwrap();
        let second = lowest_ink_row(&second, theme.text_color).unwrap();
        assert!((second - first).abs_diff(theme.line_height as u32) <= 1);
    }

    #[test]
    fn line_origins_follow_theme_metrics() {
        let theme = Theme::futuristic();
        let spec = PanelSpec::new(Rect::new(50.0, 150.0, 980.0, 300.0));
        assert_eq!(spec.line_origin(0, &theme), Point::new(70.0, 210.0));
        assert_eq!(spec.line_origin(3, &theme), Point::new(70.0, 330.0));
    }
}
