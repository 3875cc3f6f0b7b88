//! hudkit-renderer: procedural store graphics and launcher icon export
//!
//! This crate composes app-store artwork (icons, feature graphics, device
//! screenshots) from declarative scene descriptions, and derives the set of
//! density-bucketed launcher icons from a single master image.
//!
//! # Example
//!
//! ```
//! use hudkit_renderer::{
//!     Anchor, Color, FontBook, PanelSpec, Rect, SceneComposer, SceneSpec, TextSpec, Theme,
//! };
//!
//! let composer = SceneComposer::new(Theme::futuristic(), FontBook::new());
//!
//! let scene = SceneSpec::new("status", 640, 360, Color::rgb(5, 5, 10))
//!     .layer(
//!         PanelSpec::new(Rect::new(20.0, 20.0, 600.0, 320.0))
//!             .titled("Build Status")
//!             .with_lines([">> core [OK]", ">> api [WARN]"]),
//!     )
//!     .layer(TextSpec::new("ONLINE", 30.0, Color::rgb(0, 255, 100), Anchor::at(480.0, 300.0)));
//!
//! let canvas = composer.render(&scene).unwrap();
//! assert_eq!(canvas.width(), 640);
//! ```
//!
//! # Built-in asset sets
//!
//! [`AssetSet`] reproduces the stock futuristic and developer artwork:
//!
//! ```no_run
//! use hudkit_renderer::{AssetSet, FontBook, SceneComposer};
//!
//! let set = AssetSet::Futuristic;
//! let composer = SceneComposer::new(set.theme(), FontBook::with_system_fonts());
//! composer.render_all(&set.scenes(), "play_console_assets").unwrap();
//! ```
//!
//! # Launcher icons
//!
//! ```no_run
//! use hudkit_renderer::DensityExporter;
//!
//! let report = DensityExporter::new()
//!     .export("branding/icon_512.png", "app/src/main/res")
//!     .unwrap();
//! assert_eq!(report.file_count(), 10);
//! ```

mod canvas;
mod color_rule;
mod error;
mod export;
mod geometry;
mod layer;
mod presets;
mod scene;
mod style;
mod text;

pub use canvas::{Canvas, PixelFormat, encode_png};
pub use color_rule::{ColorRule, ColorRuleTable, classify};
pub use error::{RenderError, RenderResult};
pub use export::{
    DensityExporter, DensityTarget, DensityVariant, ExportReport, LAUNCHER_DENSITIES, MasterIcon,
    ROUND_FILE, SQUARE_FILE, apply_mask, circle_mask,
};
pub use geometry::{
    Corner, HexSpec, MIN_PITCH, Point, Rect, Segment, clamp_corner, corner_bracket,
    cut_corner_polygon, hex_grid_offsets, hex_vertices, normalize_degrees, rect_grid_lines,
};
pub use layer::{
    Anchor, BracketSpec, EllipseSpec, FontSpec, GlowSpec, GridSpec, HexGridSpec, HexShieldSpec,
    InnerFill, Layer, LayerEffect, LineSpec, PanelSpec, RectSpec, RenderContext, ScanlineSpec,
    Shadow, TextSpec,
};
pub use presets::AssetSet;
pub use scene::{SceneComposer, SceneSpec};
pub use style::{Color, Theme};
pub use text::{
    DEFAULT_FONT_SIZE, FALLBACK_FAMILY, FontBook, FontBookBuilder, FontHandle, InkBox,
    MAX_TEXT_PIXELS, TextRun, TextSize, center_within,
};
