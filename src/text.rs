//! Font resolution, text measurement and centering.
//!
//! Text is laid out by building a one-element SVG document and handing it to
//! usvg, which shapes the glyphs against the [`FontBook`] database. The tight
//! ink box of the result is found by rasterizing it once and scanning the
//! coverage, so centering is based on the visible glyphs rather than on the
//! font's nominal ascent and descent.

use std::path::Path;
use std::sync::Arc;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::error::{RenderError, RenderResult};
use crate::geometry::{Point, Rect};
use crate::style::Color;

/// Family name of the embedded fallback face.
pub const FALLBACK_FAMILY: &str = "DejaVu Sans Mono";

/// Size used when a request carries a non-positive or non-finite size.
pub const DEFAULT_FONT_SIZE: f32 = 30.0;

/// Largest scratch surface, in pixels, a single text run may rasterize to.
pub const MAX_TEXT_PIXELS: u64 = 1 << 25;

const FALLBACK_FONT: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");

const FALLBACK_ASCENT: f32 = 0.8;

// Antialiased coverage can spill a pixel past the outline bounds.
const INK_PADDING: u32 = 2;

// ============================================================================
// FontBook
// ============================================================================

/// A font database that always contains the embedded fallback face.
///
/// Cloning is cheap; the database is shared behind an [`Arc`] and never
/// mutated after [`FontBookBuilder::build`].
#[derive(Clone)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Creates a font book holding only the embedded fallback face.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a font book with the operating system's fonts loaded as well.
    pub fn with_system_fonts() -> Self {
        Self::builder().system_fonts().build()
    }

    pub fn builder() -> FontBookBuilder {
        let mut db = fontdb::Database::new();
        db.load_font_data(FALLBACK_FONT.to_vec());
        FontBookBuilder { db }
    }

    /// Returns true if a face with the given family name is available.
    pub fn has_family(&self, family: &str) -> bool {
        self.find_family(family).is_some()
    }

    fn find_family(&self, family: &str) -> Option<String> {
        self.db.faces().find_map(|face| {
            face.families
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(family))
                .map(|(name, _)| name.clone())
        })
    }

    /// Resolves a font request to a loaded face.
    ///
    /// Falls back to [`FALLBACK_FAMILY`] at the same size when the family is
    /// not available. This never fails.
    pub fn resolve_font(&self, family: &str, size: f32) -> FontHandle {
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            DEFAULT_FONT_SIZE
        };

        match self.find_family(family) {
            Some(name) => FontHandle {
                family: name,
                size,
                is_fallback: false,
            },
            None => {
                log::debug!(target: "text", "font family {family:?} unavailable, using {FALLBACK_FAMILY}");
                FontHandle {
                    family: FALLBACK_FAMILY.to_string(),
                    size,
                    is_fallback: true,
                }
            }
        }
    }

    /// Measures the tight ink box of `text` rendered with `font`.
    pub fn measure(&self, text: &str, font: &FontHandle) -> RenderResult<TextSize> {
        Ok(self.layout(text, font, Color::WHITE)?.size())
    }

    /// Distance from the top of a line box to its baseline, in pixels.
    ///
    /// Read from the face's ascender. Faces without usable metrics use
    /// 80% of the font size.
    pub fn ascent(&self, font: &FontHandle) -> f32 {
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(&font.family)],
            ..fontdb::Query::default()
        };
        let ratio = self
            .db
            .query(&query)
            .and_then(|id| {
                self.db.with_face_data(id, |data, index| {
                    let face = ttf_parser::Face::parse(data, index).ok()?;
                    Some(f32::from(face.ascender()) / f32::from(face.units_per_em()))
                })
            })
            .flatten()
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(FALLBACK_ASCENT);
        (font.size * ratio).round()
    }

    /// Lays out `text` for drawing with [`Canvas::text`](crate::Canvas::text).
    ///
    /// Whitespace-only text produces an empty run. Text that cannot be
    /// parsed or rasterized, or whose ink would exceed [`MAX_TEXT_PIXELS`],
    /// is reported as [`RenderError::Text`].
    pub fn layout(&self, text: &str, font: &FontHandle, color: Color) -> RenderResult<TextRun> {
        if text.trim().is_empty() {
            return Ok(TextRun::empty());
        }

        // The pen starts at the document origin, so ink coordinates are
        // relative to the baseline.
        let svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1">"#,
                r#"<text x="0" y="0" font-family="'{family}'" font-size="{size}" "#,
                r#"fill="{fill}" xml:space="preserve">{text}</text></svg>"#
            ),
            family = escape_xml(&font.family),
            size = font.size,
            fill = color.to_hex(),
            text = escape_xml(text),
        );

        let mut opt = Options::default();
        opt.fontdb = self.db.clone();
        opt.font_family = FALLBACK_FAMILY.to_string();

        let tree = Tree::from_str(&svg, &opt)
            .map_err(|e| RenderError::Text(format!("failed to lay out {text:?}: {e}")))?;
        if !tree.root().has_children() {
            return Ok(TextRun::empty());
        }

        let Some(bounds) = tree.root().abs_stroke_bounding_box().round_out() else {
            return Ok(TextRun::empty());
        };
        let width = bounds.width().saturating_add(2 * INK_PADDING);
        let height = bounds.height().saturating_add(2 * INK_PADDING);
        if u64::from(width) * u64::from(height) > MAX_TEXT_PIXELS {
            return Err(RenderError::Text(format!(
                "text {text:?} at {}px needs a {width}x{height} surface",
                font.size
            )));
        }

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Text(format!("text surface {width}x{height} is not allocatable"))
        })?;
        let dx = INK_PADDING as i32 - bounds.left();
        let dy = INK_PADDING as i32 - bounds.top();
        resvg::render(
            &tree,
            Transform::from_translate(dx as f32, dy as f32),
            &mut pixmap.as_mut(),
        );

        let Some(mut ink) = ink_box(&pixmap) else {
            return Ok(TextRun::empty());
        };
        ink.left -= dx;
        ink.top -= dy;

        Ok(TextRun {
            tree: Some(tree),
            ink,
        })
    }
}

/// Incrementally configures a [`FontBook`].
pub struct FontBookBuilder {
    db: fontdb::Database,
}

impl FontBookBuilder {
    /// Loads the operating system's fonts.
    pub fn system_fonts(mut self) -> Self {
        self.db.load_system_fonts();
        self
    }

    /// Loads an external font file.
    ///
    /// A missing or unreadable file is logged and otherwise ignored; text
    /// requesting its family falls back to the embedded face.
    pub fn font_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let before = self.db.len();
        match self.db.load_font_file(path) {
            Ok(()) if self.db.len() > before => {
                log::debug!(target: "text", "loaded font file {}", path.display());
            }
            Ok(()) => {
                log::warn!(target: "text", "no usable faces in font file {}", path.display());
            }
            Err(err) => {
                log::warn!(target: "text", "failed to load font file {}: {err}", path.display());
            }
        }
        self
    }

    pub fn build(mut self) -> FontBook {
        self.db.set_sans_serif_family(FALLBACK_FAMILY);
        self.db.set_serif_family(FALLBACK_FAMILY);
        self.db.set_monospace_family(FALLBACK_FAMILY);
        FontBook {
            db: Arc::new(self.db),
        }
    }
}

/// A resolved font request.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    /// The family actually used for rendering.
    pub family: String,
    pub size: f32,
    /// True if the requested family was unavailable.
    pub is_fallback: bool,
}

// ============================================================================
// Measured text
// ============================================================================

/// Width and height of a tight ink box in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

impl TextSize {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The ink box of a text run, relative to the pen origin on the baseline.
///
/// `top` is negative for glyphs rising above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Text ready to be drawn: the shaped glyph tree plus its measured ink box.
pub struct TextRun {
    pub(crate) tree: Option<Tree>,
    pub(crate) ink: InkBox,
}

impl TextRun {
    fn empty() -> Self {
        Self {
            tree: None,
            ink: InkBox::default(),
        }
    }

    pub fn size(&self) -> TextSize {
        TextSize {
            width: self.ink.width,
            height: self.ink.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_none() || self.size().is_empty()
    }

    pub fn ink(&self) -> InkBox {
        self.ink
    }
}

/// Returns the anchor that centers a box of `size` within `region`.
///
/// Coordinates are truncated toward zero.
pub fn center_within(region: Rect, size: TextSize) -> Point {
    Point::new(
        (region.x + (region.width - size.width as f32) / 2.0).trunc(),
        (region.y + (region.height - size.height as f32) / 2.0).trunc(),
    )
}

/// Finds the bounding box of all pixels with non-zero coverage.
fn ink_box(pixmap: &Pixmap) -> Option<InkBox> {
    let width = pixmap.width() as usize;
    let mut bounds: Option<(usize, usize, usize, usize)> = None;

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let (x, y) = (i % width, i / width);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }

    bounds.map(|(l, t, r, b)| InkBox {
        left: l as i32,
        top: t as i32,
        width: (r - l + 1) as u32,
        height: (b - t + 1) as u32,
    })
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
