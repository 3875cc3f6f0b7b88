//! Raster drawing surface.
//!
//! [`Canvas`] wraps a `tiny_skia` pixmap and exposes the handful of
//! primitives the scene layers need. Every call paints over whatever is
//! already there (painter's algorithm); nothing is ever read back except by
//! the pixel accessors used for encoding and tests.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use resvg::tiny_skia::{self, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::{RenderError, RenderResult};
use crate::geometry::{Point, Rect};
use crate::style::Color;
use crate::text::TextRun;

/// Color layout of the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Opaque 8-bit RGB.
    Rgb,
    /// 8-bit RGB with straight alpha.
    Rgba,
}

/// An owned raster surface.
pub struct Canvas {
    pixmap: Pixmap,
    format: PixelFormat,
}

impl Canvas {
    /// Creates an opaque RGB canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        let mut pixmap = allocate(width, height)?;
        pixmap.fill(background.to_skia());
        Ok(Self {
            pixmap,
            format: PixelFormat::Rgb,
        })
    }

    /// Creates a fully transparent RGBA canvas.
    pub fn new_transparent(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            format: PixelFormat::Rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the canvas bounds as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    // ---- Primitives ----

    /// Draws a straight line of the given stroke width.
    pub fn line(&mut self, start: Point, end: Point, color: Color, width: f32) {
        self.polyline(&[start, end], color, width);
    }

    /// Draws connected line segments through `points`.
    pub fn polyline(&mut self, points: &[Point], color: Color, width: f32) {
        if let Some(path) = build_path(points, false) {
            self.stroke(&path, color, width);
        }
    }

    /// Draws a closed polygon, filled and/or outlined.
    ///
    /// The fill is painted first so the outline stays fully visible.
    pub fn polygon(
        &mut self,
        points: &[Point],
        fill: Option<Color>,
        outline: Option<Color>,
        width: f32,
    ) {
        let Some(path) = build_path(points, true) else {
            return;
        };
        if let Some(color) = fill {
            self.fill(&path, color);
        }
        if let Some(color) = outline {
            self.stroke(&path, color, width);
        }
    }

    /// Draws an axis-aligned rectangle, filled and/or outlined.
    pub fn rectangle(&mut self, rect: Rect, fill: Option<Color>, outline: Option<Color>, width: f32) {
        let Some(r) = to_skia_rect(rect) else {
            return;
        };
        let path = PathBuilder::from_rect(r);
        if let Some(color) = fill {
            self.fill(&path, color);
        }
        if let Some(color) = outline {
            self.stroke(&path, color, width);
        }
    }

    /// Draws the ellipse inscribed in `bounds`, filled and/or outlined.
    pub fn ellipse(&mut self, bounds: Rect, fill: Option<Color>, outline: Option<Color>, width: f32) {
        let Some(path) = to_skia_rect(bounds).and_then(PathBuilder::from_oval) else {
            return;
        };
        if let Some(color) = fill {
            self.fill(&path, color);
        }
        if let Some(color) = outline {
            self.stroke(&path, color, width);
        }
    }

    /// Draws laid-out text with the top-left of its ink box at `anchor`.
    ///
    /// The anchor is truncated to whole pixels so the glyph coverage lands
    /// exactly where it was measured.
    pub fn text(&mut self, anchor: Point, run: &TextRun) {
        let ink = run.ink;
        self.render_run(
            anchor.x.trunc() - ink.left as f32,
            anchor.y.trunc() - ink.top as f32,
            run,
        );
    }

    /// Draws laid-out text with its pen origin on the baseline at `origin`.
    pub fn text_on_baseline(&mut self, origin: Point, run: &TextRun) {
        self.render_run(origin.x.trunc(), origin.y.trunc(), run);
    }

    fn render_run(&mut self, tx: f32, ty: f32, run: &TextRun) {
        let Some(tree) = run.tree.as_ref() else {
            return;
        };
        resvg::render(
            tree,
            Transform::from_translate(tx, ty),
            &mut self.pixmap.as_mut(),
        );
    }

    // ---- Pixel access & encoding ----

    /// Returns the straight-alpha RGBA value at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copies the canvas into an RGBA image with straight alpha.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width(), self.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    /// Copies the canvas into an RGB image, dropping alpha.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width(), self.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgb([c.red(), c.green(), c.blue()]);
        }
        img
    }

    /// Encodes the canvas as PNG in its pixel format.
    pub fn encode(&self) -> RenderResult<Vec<u8>> {
        let image = match self.format {
            PixelFormat::Rgb => DynamicImage::ImageRgb8(self.to_rgb_image()),
            PixelFormat::Rgba => DynamicImage::ImageRgba8(self.to_rgba_image()),
        };
        encode_png(&image)
    }

    fn fill(&mut self, path: &tiny_skia::Path, color: Color) {
        let paint = paint(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke(&mut self, path: &tiny_skia::Path, color: Color, width: f32) {
        let paint = paint(color);
        let stroke = Stroke {
            width: width.max(0.0),
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Encodes any image as PNG into memory.
pub fn encode_png(image: &DynamicImage) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn allocate(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

fn build_path(points: &[Point], close: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontBook;

    const BG: Color = Color::rgb(5, 5, 16);
    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn new_canvas_is_filled() {
        let canvas = Canvas::new(8, 4, BG).unwrap();
        assert_eq!(canvas.width(), 8);
        assert_eq!(canvas.height(), 4);
        assert_eq!(canvas.pixel(7, 3), Some([5, 5, 16, 255]));
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Canvas::new(0, 10, BG),
            Err(RenderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Canvas::new_transparent(10, 0).is_err());
    }

    #[test]
    fn later_primitives_paint_over_earlier() {
        let mut canvas = Canvas::new(100, 100, BG).unwrap();
        canvas.rectangle(Rect::new(10.0, 10.0, 80.0, 80.0), Some(RED), None, 0.0);
        canvas.rectangle(Rect::new(40.0, 40.0, 20.0, 20.0), Some(BLUE), None, 0.0);
        assert_eq!(canvas.pixel(50, 50), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(5, 5), Some([5, 5, 16, 255]));
    }

    #[test]
    fn polygon_fill_and_outline() {
        let mut canvas = Canvas::new(100, 100, BG).unwrap();
        let square = [
            Point::new(20.0, 20.0),
            Point::new(80.0, 20.0),
            Point::new(80.0, 80.0),
            Point::new(20.0, 80.0),
        ];
        canvas.polygon(&square, Some(RED), Some(BLUE), 4.0);
        assert_eq!(canvas.pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(50, 20), Some([0, 0, 255, 255]));
    }

    #[test]
    fn line_and_ellipse_draw() {
        let mut canvas = Canvas::new(60, 60, BG).unwrap();
        canvas.line(Point::new(0.0, 10.5), Point::new(60.0, 10.5), RED, 3.0);
        assert_eq!(canvas.pixel(30, 10), Some([255, 0, 0, 255]));

        canvas.ellipse(Rect::new(20.0, 20.0, 20.0, 20.0), Some(BLUE), None, 0.0);
        assert_eq!(canvas.pixel(30, 30), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(21, 21), Some([5, 5, 16, 255]));
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let mut canvas = Canvas::new(10, 10, BG).unwrap();
        canvas.polyline(&[Point::new(1.0, 1.0)], RED, 2.0);
        canvas.polygon(&[], Some(RED), None, 1.0);
        canvas.ellipse(Rect::new(0.0, 0.0, 0.0, 5.0), Some(RED), None, 1.0);
        assert!(canvas.to_rgb_image().pixels().all(|p| p.0 == [5, 5, 16]));
    }

    #[test]
    fn text_lands_at_anchor() {
        let fonts = FontBook::new();
        let font = fonts.resolve_font("Anything", 32.0);
        let run = fonts.layout("HUD", &font, Color::WHITE).unwrap();
        let size = run.size();

        let mut canvas = Canvas::new(200, 100, BG).unwrap();
        canvas.text(Point::new(40.0, 30.0), &run);

        let img = canvas.to_rgb_image();
        let inked: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [5, 5, 16])
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        let min_x = inked.iter().map(|p| p.0).min().unwrap();
        let min_y = inked.iter().map(|p| p.1).min().unwrap();
        let max_x = inked.iter().map(|p| p.0).max().unwrap();
        assert!(min_x.abs_diff(40) <= 1);
        assert!(min_y.abs_diff(30) <= 1);
        assert!((max_x + 1 - min_x).abs_diff(size.width) <= 2);
    }

    #[test]
    fn encode_is_png_in_canvas_format() {
        let canvas = Canvas::new(16, 16, BG).unwrap();
        let bytes = canvas.encode().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);

        let transparent = Canvas::new_transparent(4, 4).unwrap();
        let decoded = image::load_from_memory(&transparent.encode().unwrap()).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0[3], 0);
    }
}
