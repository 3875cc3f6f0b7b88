//! Scene descriptions and the composer that rasterizes them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};
use crate::layer::{Layer, LayerEffect, RenderContext};
use crate::style::{Color, Theme};
use crate::text::FontBook;

// ============================================================================
// SceneSpec
// ============================================================================

/// A declarative description of one output image.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "dev_style_icon",
///   "width": 512,
///   "height": 512,
///   "background": "#202020",
///   "layers": [
///     { "kind": "grid", "step": 64.0, "color": "#404040" },
///     { "kind": "text", "text": "DEV", "font": { "size": 120.0 },
///       "color": "#ffffff", "anchor": { "mode": "center", "dy": -20.0 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSpec {
    /// Output file stem.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Drawn first to last.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl SceneSpec {
    pub fn new(name: impl Into<String>, width: u32, height: u32, background: Color) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background,
            layers: Vec::new(),
        }
    }

    /// Appends a layer on top of the existing ones.
    pub fn layer(mut self, layer: impl Into<Layer>) -> Self {
        self.layers.push(layer.into());
        self
    }

    pub fn push(&mut self, layer: impl Into<Layer>) {
        self.layers.push(layer.into());
    }

    /// The PNG file name this scene is written to.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }

    /// Checks that the name is a single path component.
    pub fn validate_name(&self) -> RenderResult<()> {
        let reason = if self.name.trim().is_empty() {
            "name is empty"
        } else if self.name.contains(['/', '\\', '\0']) {
            "name contains a path separator"
        } else if self.name == "." || self.name == ".." {
            "name is a relative directory"
        } else {
            return Ok(());
        };
        Err(RenderError::InvalidSceneName {
            name: self.name.clone(),
            reason,
        })
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses either a single scene object or an array of scenes.
    pub fn list_from_json(json: &str) -> RenderResult<Vec<Self>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<SceneSpec>),
            One(Box<SceneSpec>),
        }

        Ok(match serde_json::from_str(json)? {
            OneOrMany::Many(scenes) => scenes,
            OneOrMany::One(scene) => vec![*scene],
        })
    }
}

// ============================================================================
// SceneComposer
// ============================================================================

/// Renders [`SceneSpec`]s with a fixed theme and font book.
///
/// The composer holds no mutable state, so one instance can render any
/// number of scenes, including in parallel.
///
/// # Example
///
/// ```
/// use hudkit_renderer::{Color, FontBook, GridSpec, SceneComposer, SceneSpec, Theme};
///
/// let composer = SceneComposer::new(Theme::dev(), FontBook::new());
/// let scene = SceneSpec::new("grid", 128, 128, Color::rgb(32, 32, 32))
///     .layer(GridSpec::new(32.0, Color::rgb(64, 64, 64)));
///
/// let png = composer.render_png(&scene).unwrap();
/// assert!(png.starts_with(b"\x89PNG"));
/// ```
pub struct SceneComposer {
    theme: Theme,
    fonts: FontBook,
}

impl SceneComposer {
    pub fn new(theme: Theme, fonts: FontBook) -> Self {
        Self { theme, fonts }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Rasterizes a scene.
    ///
    /// Fails only on an invalid canvas size or a violated geometric
    /// contract. Text that cannot be drawn is skipped with a warning.
    pub fn render(&self, scene: &SceneSpec) -> RenderResult<Canvas> {
        let canvas = Canvas::new(scene.width, scene.height, scene.background)?;
        let mut ctx = RenderContext::new(canvas, &self.fonts, &self.theme);

        for (i, layer) in scene.layers.iter().enumerate() {
            log::debug!(target: "scene", "{}: layer {i} ({})", scene.name, layer.kind());
            layer.draw(&mut ctx)?;
        }

        let skipped = ctx.skipped_text();
        if skipped > 0 {
            log::warn!(target: "scene", "{}: {skipped} text element(s) skipped", scene.name);
        }
        Ok(ctx.into_canvas())
    }

    /// Renders a scene and encodes it as PNG.
    pub fn render_png(&self, scene: &SceneSpec) -> RenderResult<Vec<u8>> {
        self.render(scene)?.encode()
    }

    /// Renders a scene and writes it to `dir/<name>.png`.
    pub fn render_to(&self, scene: &SceneSpec, dir: impl AsRef<Path>) -> RenderResult<PathBuf> {
        scene.validate_name()?;
        let bytes = self.render_png(scene)?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))?;
        let path = dir.join(scene.file_name());
        write_file(&path, &bytes)?;
        log::info!(target: "scene", "saved {}", path.display());
        Ok(path)
    }

    /// Renders every scene in parallel and writes them into `dir`.
    ///
    /// All scenes are rendered and encoded before anything is written, so a
    /// failure in any scene leaves `dir` untouched. Scene names must be
    /// unique within the batch.
    pub fn render_all(&self, scenes: &[SceneSpec], dir: impl AsRef<Path>) -> RenderResult<Vec<PathBuf>> {
        let mut seen = HashSet::with_capacity(scenes.len());
        for scene in scenes {
            scene.validate_name()?;
            if !seen.insert(scene.name.as_str()) {
                return Err(RenderError::InvalidSceneName {
                    name: scene.name.clone(),
                    reason: "name is used by another scene",
                });
            }
        }

        let encoded = scenes
            .par_iter()
            .map(|scene| -> RenderResult<_> { Ok((scene.file_name(), self.render_png(scene)?)) })
            .collect::<RenderResult<Vec<_>>>()?;

        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))?;

        let mut written = Vec::with_capacity(encoded.len());
        for (name, bytes) in encoded {
            let path = dir.join(name);
            write_file(&path, &bytes)?;
            log::info!(target: "scene", "saved {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    log::debug!(target: "io", "writing {} bytes to {}", bytes.len(), path.display());
    fs::write(path, bytes).map_err(|e| RenderError::io(path, e))
}
