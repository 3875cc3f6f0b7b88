//! Error types for scene rendering and icon export.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`RenderError`].
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while composing scenes or exporting icons.
///
/// Only some of these abort a run. Text failures are caught by the scene
/// composer and the offending text element is skipped; everything else is
/// fatal for the render or export it occurred in.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Canvas dimensions must both be positive.
    #[error("invalid canvas dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Geometry input outside its contract (e.g. a non-positive hex radius).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Text could not be laid out or rasterized.
    #[error("text rendering error: {0}")]
    Text(String),

    /// Image encoding or processing failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem failure while writing outputs.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The master icon could not be loaded. Nothing is written when this occurs.
    #[error("failed to load master icon {}: {source}", path.display())]
    MasterIcon {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A density target is larger than the master and upscaling was not allowed.
    #[error("refusing to upscale {native}px master to {size}px for {target}")]
    UpscaleRefused {
        target: String,
        size: u32,
        native: u32,
    },

    /// A scene name that cannot be used as an output file name, or that
    /// collides with another scene in the same batch.
    #[error("invalid scene name {name:?}: {reason}")]
    InvalidSceneName { name: String, reason: &'static str },

    /// A scene or theme document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
