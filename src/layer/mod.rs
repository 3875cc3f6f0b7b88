//! Layer instructions for scene composition.
//!
//! A scene is an ordered list of [`Layer`]s. Each layer spec implements
//! [`LayerEffect`], which draws it onto the [`RenderContext`] canvas using
//! the shared fonts and theme. Layers never look at each other; ordering in
//! the scene alone decides what ends up on top.
//!
//! # Architecture
//!
//! - [`grid`]: rectangular grids, hexagon tilings and scanlines
//! - [`hex`]: the hexagon shield emblem
//! - [`panel`]: cut-corner HUD panels with status-colored content lines
//! - [`text`]: free-standing text with anchoring and drop shadows
//! - [`shapes`]: lines, rectangles, ellipses and corner brackets

pub mod grid;
pub mod hex;
pub mod panel;
pub mod shapes;
pub mod text;

pub use grid::{GridSpec, HexGridSpec, ScanlineSpec};
pub use hex::{GlowSpec, HexShieldSpec, InnerFill};
pub use panel::PanelSpec;
pub use shapes::{BracketSpec, EllipseSpec, LineSpec, RectSpec};
pub use text::{Anchor, FontSpec, Shadow, TextSpec};

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::RenderResult;
use crate::geometry::{Point, Rect};
use crate::style::{Color, Theme};
use crate::text::{FontBook, TextSize};

// ============================================================================
// Render Context
// ============================================================================

/// State threaded through the layers of one render.
///
/// Owns the canvas being drawn; borrows the read-only fonts and theme.
pub struct RenderContext<'a> {
    /// The surface every layer draws onto.
    pub canvas: Canvas,

    pub fonts: &'a FontBook,
    pub theme: &'a Theme,

    skipped_text: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(canvas: Canvas, fonts: &'a FontBook, theme: &'a Theme) -> Self {
        Self {
            canvas,
            fonts,
            theme,
            skipped_text: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.canvas.bounds()
    }

    /// Number of text elements skipped because they failed to render.
    pub fn skipped_text(&self) -> usize {
        self.skipped_text
    }

    /// Draws one text element, placing it from its measured size.
    ///
    /// A layout failure skips this element only: it is logged and counted,
    /// and composition continues with the next primitive. Returns the ink
    /// size that was drawn, if any.
    pub fn draw_text(
        &mut self,
        text: &str,
        family: &str,
        size: f32,
        color: Color,
        place: impl FnOnce(TextSize) -> Point,
    ) -> Option<TextSize> {
        let font = self.fonts.resolve_font(family, size);
        match self.fonts.layout(text, &font, color) {
            Ok(run) => {
                let measured = run.size();
                let anchor = place(measured);
                self.canvas.text(anchor, &run);
                Some(measured)
            }
            Err(err) => {
                log::warn!(target: "scene", "skipping text {text:?}: {err}");
                self.skipped_text += 1;
                None
            }
        }
    }

    /// Draws one line of text set on a fixed baseline.
    ///
    /// `top_left` is the top of the line box; the baseline sits one font
    /// ascent below it, whatever glyphs the line contains. Failures are
    /// handled as in [`draw_text`](Self::draw_text).
    pub fn draw_text_line(
        &mut self,
        text: &str,
        family: &str,
        size: f32,
        color: Color,
        top_left: Point,
    ) -> Option<TextSize> {
        let font = self.fonts.resolve_font(family, size);
        match self.fonts.layout(text, &font, color) {
            Ok(run) => {
                let baseline = top_left.y.trunc() + self.fonts.ascent(&font);
                self.canvas
                    .text_on_baseline(Point::new(top_left.x, baseline), &run);
                Some(run.size())
            }
            Err(err) => {
                log::warn!(target: "scene", "skipping text {text:?}: {err}");
                self.skipped_text += 1;
                None
            }
        }
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer specs that know how to draw themselves.
///
/// Implementations return an error only for violated geometric contracts
/// (such as a non-positive radius); everything content-related degrades
/// instead of failing.
pub trait LayerEffect {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()>;
}

// ============================================================================
// Layer
// ============================================================================

/// One drawing instruction in a scene.
///
/// Serializes with a `kind` tag:
///
/// ```json
/// { "kind": "grid", "step": 64.0, "color": "#004050" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Grid(GridSpec),
    HexGrid(HexGridSpec),
    HexShield(HexShieldSpec),
    Panel(PanelSpec),
    Text(TextSpec),
    Brackets(BracketSpec),
    Line(LineSpec),
    Rect(RectSpec),
    Ellipse(EllipseSpec),
    Scanlines(ScanlineSpec),
}

impl Layer {
    /// Short name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Grid(_) => "grid",
            Self::HexGrid(_) => "hex_grid",
            Self::HexShield(_) => "hex_shield",
            Self::Panel(_) => "panel",
            Self::Text(_) => "text",
            Self::Brackets(_) => "brackets",
            Self::Line(_) => "line",
            Self::Rect(_) => "rect",
            Self::Ellipse(_) => "ellipse",
            Self::Scanlines(_) => "scanlines",
        }
    }
}

impl LayerEffect for Layer {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        match self {
            Self::Grid(spec) => spec.draw(ctx),
            Self::HexGrid(spec) => spec.draw(ctx),
            Self::HexShield(spec) => spec.draw(ctx),
            Self::Panel(spec) => spec.draw(ctx),
            Self::Text(spec) => spec.draw(ctx),
            Self::Brackets(spec) => spec.draw(ctx),
            Self::Line(spec) => spec.draw(ctx),
            Self::Rect(spec) => spec.draw(ctx),
            Self::Ellipse(spec) => spec.draw(ctx),
            Self::Scanlines(spec) => spec.draw(ctx),
        }
    }
}

macro_rules! impl_from_spec {
    ($($variant:ident => $spec:ty),* $(,)?) => {
        $(
            impl From<$spec> for Layer {
                fn from(spec: $spec) -> Self {
                    Self::$variant(spec)
                }
            }
        )*
    };
}

impl_from_spec! {
    Grid => GridSpec,
    HexGrid => HexGridSpec,
    HexShield => HexShieldSpec,
    Panel => PanelSpec,
    Text => TextSpec,
    Brackets => BracketSpec,
    Line => LineSpec,
    Rect => RectSpec,
    Ellipse => EllipseSpec,
    Scanlines => ScanlineSpec,
}

fn default_width() -> f32 {
    1.0
}

/// Shifts a coordinate onto the pixel center when a stroke of `width` would
/// otherwise straddle two pixel rows.
fn crisp(v: f32, width: f32) -> f32 {
    if (width.round() as i64).rem_euclid(2) == 1 {
        v.floor() + 0.5
    } else {
        v
    }
}
