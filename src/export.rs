//! Launcher icon export across Android screen densities.
//!
//! One master image is resized to every entry of the density table and
//! written as a square `ic_launcher.png` plus a circle-masked
//! `ic_launcher_round.png` into one folder per density.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::canvas::encode_png;
use crate::error::{RenderError, RenderResult};
use crate::scene::write_file;

/// File name of the square launcher icon.
pub const SQUARE_FILE: &str = "ic_launcher.png";
/// File name of the circle-masked launcher icon.
pub const ROUND_FILE: &str = "ic_launcher_round.png";

// ============================================================================
// Density table
// ============================================================================

/// One output folder and its square pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityTarget {
    pub name: Cow<'static, str>,
    pub size: u32,
}

impl DensityTarget {
    pub const fn new(name: &'static str, size: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            size,
        }
    }
}

/// The standard launcher icon buckets, smallest first.
pub const LAUNCHER_DENSITIES: [DensityTarget; 5] = [
    DensityTarget::new("mipmap-mdpi", 48),
    DensityTarget::new("mipmap-hdpi", 72),
    DensityTarget::new("mipmap-xhdpi", 96),
    DensityTarget::new("mipmap-xxhdpi", 144),
    DensityTarget::new("mipmap-xxxhdpi", 192),
];

// ============================================================================
// MasterIcon
// ============================================================================

/// The source image every density variant is derived from.
#[derive(Debug, Clone)]
pub struct MasterIcon {
    path: Option<PathBuf>,
    image: DynamicImage,
}

impl MasterIcon {
    /// Loads the master image from disk.
    ///
    /// Fails with [`RenderError::MasterIcon`] if the file is missing or not a
    /// decodable image.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| RenderError::MasterIcon {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            target: "export",
            "loaded master {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            image,
        })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { path: None, image }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// The largest square size reachable without upscaling.
    pub fn native_size(&self) -> u32 {
        self.image.width().min(self.image.height())
    }

    fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }
}

// ============================================================================
// Masking
// ============================================================================

/// Builds the inscribed-circle mask for a square of `size` pixels.
///
/// A pixel is opaque when its center lies strictly inside the circle of
/// radius `size / 2` centered on the square.
pub fn circle_mask(size: u32) -> GrayImage {
    let r = size as f64 / 2.0;
    GrayImage::from_fn(size, size, |x, y| {
        let dx = x as f64 + 0.5 - r;
        let dy = y as f64 + 0.5 - r;
        Luma([if dx * dx + dy * dy < r * r { 255 } else { 0 }])
    })
}

/// Replaces the alpha channel of `image` with `mask`.
///
/// Pixels outside the mask's extent keep their alpha.
pub fn apply_mask(image: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if let Some(m) = mask.get_pixel_checked(x, y) {
            pixel.0[3] = m.0[0];
        }
    }
    out
}

// ============================================================================
// DensityExporter
// ============================================================================

/// The pair of icons produced for one density.
#[derive(Debug, Clone)]
pub struct DensityVariant {
    pub target: DensityTarget,
    /// Resized master, in the master's color type.
    pub square: DynamicImage,
    /// Resized master with the circle mask as alpha.
    pub round: RgbaImage,
}

/// Summary of a completed export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub out_dir: PathBuf,
    /// Every file written, in density order.
    pub files: Vec<PathBuf>,
}

impl ExportReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Derives launcher icons for a set of density targets.
///
/// # Example
///
/// ```
/// use hudkit_renderer::{DensityExporter, MasterIcon};
/// use image::{DynamicImage, RgbaImage};
///
/// let master = MasterIcon::from_image(DynamicImage::ImageRgba8(RgbaImage::new(512, 512)));
/// let variants = DensityExporter::new().render(&master).unwrap();
/// assert_eq!(variants.len(), 5);
/// assert_eq!(variants[4].round.width(), 192);
/// ```
#[derive(Debug, Clone)]
pub struct DensityExporter {
    targets: Vec<DensityTarget>,
    allow_upscale: bool,
    filter: FilterType,
}

impl Default for DensityExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DensityExporter {
    /// Creates an exporter for [`LAUNCHER_DENSITIES`] using Lanczos3.
    pub fn new() -> Self {
        Self {
            targets: LAUNCHER_DENSITIES.to_vec(),
            allow_upscale: false,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_targets(mut self, targets: Vec<DensityTarget>) -> Self {
        self.targets = targets;
        self
    }

    /// Permits targets larger than the master. Off by default.
    pub fn allow_upscale(mut self, allow: bool) -> Self {
        self.allow_upscale = allow;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn targets(&self) -> &[DensityTarget] {
        &self.targets
    }

    /// Resizes the master to a `size` x `size` square.
    pub fn resize(&self, master: &MasterIcon, size: u32) -> RenderResult<DynamicImage> {
        if size == 0 {
            return Err(RenderError::InvalidDimensions {
                width: size,
                height: size,
            });
        }
        Ok(master.image.resize_exact(size, size, self.filter))
    }

    fn check_sizes(&self, master: &MasterIcon) -> RenderResult<()> {
        let native = master.native_size();
        if let Some(target) = self.targets.iter().find(|t| t.size == 0) {
            return Err(RenderError::InvalidDimensions {
                width: target.size,
                height: target.size,
            });
        }
        if self.allow_upscale {
            return Ok(());
        }
        match self.targets.iter().find(|t| t.size > native) {
            Some(target) => Err(RenderError::UpscaleRefused {
                target: target.name.to_string(),
                size: target.size,
                native,
            }),
            None => Ok(()),
        }
    }

    /// Produces every variant in memory, in target order.
    pub fn render(&self, master: &MasterIcon) -> RenderResult<Vec<DensityVariant>> {
        self.check_sizes(master)?;

        self.targets
            .par_iter()
            .map(|target| -> RenderResult<DensityVariant> {
                let square = self.resize(master, target.size)?;
                let round = apply_mask(&square.to_rgba8(), &circle_mask(target.size));
                log::debug!(target: "export", "resized {} to {}px", target.name, target.size);
                Ok(DensityVariant {
                    target: target.clone(),
                    square,
                    round,
                })
            })
            .collect()
    }

    /// Loads the master at `master_path` and writes all variants below
    /// `out_dir`.
    ///
    /// Nothing is written unless the master loads and every variant renders
    /// and encodes.
    pub fn export(
        &self,
        master_path: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
    ) -> RenderResult<ExportReport> {
        let master = MasterIcon::load(master_path)?;
        self.export_master(&master, out_dir)
    }

    /// Writes all variants of an already loaded master below `out_dir`.
    pub fn export_master(
        &self,
        master: &MasterIcon,
        out_dir: impl AsRef<Path>,
    ) -> RenderResult<ExportReport> {
        let keep_alpha = master.has_alpha();
        let encoded = self
            .render(master)?
            .into_par_iter()
            .map(|variant| -> RenderResult<_> {
                let square = if keep_alpha {
                    DynamicImage::ImageRgba8(variant.square.to_rgba8())
                } else {
                    DynamicImage::ImageRgb8(variant.square.to_rgb8())
                };
                let square = encode_png(&square)?;
                let round = encode_png(&DynamicImage::ImageRgba8(variant.round))?;
                Ok((variant.target, square, round))
            })
            .collect::<RenderResult<Vec<_>>>()?;

        let out_dir = out_dir.as_ref();
        let mut report = ExportReport {
            out_dir: out_dir.to_path_buf(),
            files: Vec::with_capacity(encoded.len() * 2),
        };

        for (target, square, round) in encoded {
            let dir = out_dir.join(target.name.as_ref());
            fs::create_dir_all(&dir).map_err(|e| RenderError::io(&dir, e))?;
            for (name, bytes) in [(SQUARE_FILE, square), (ROUND_FILE, round)] {
                let path = dir.join(name);
                write_file(&path, &bytes)?;
                report.files.push(path);
            }
            log::info!(target: "export", "generated icons for {} ({1}x{1})", target.name, target.size);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    fn master(size: u32) -> MasterIcon {
        MasterIcon::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            size,
            size,
            Rgba([0, 240, 255, 255]),
        )))
    }

    #[test]
    fn density_table_is_ordered() {
        let sizes: Vec<_> = LAUNCHER_DENSITIES.iter().map(|t| t.size).collect();
        assert_eq!(sizes, [48, 72, 96, 144, 192]);
        assert_eq!(LAUNCHER_DENSITIES[0].name, "mipmap-mdpi");
    }

    #[test]
    fn circle_mask_center_and_corners() {
        for size in [1, 2, 48, 49, 192] {
            let mask = circle_mask(size);
            assert_eq!(mask.get_pixel(size / 2, size / 2).0[0], 255, "size {size}");
            if size > 2 {
                assert_eq!(mask.get_pixel(0, 0).0[0], 0);
                assert_eq!(mask.get_pixel(size - 1, 0).0[0], 0);
                assert_eq!(mask.get_pixel(0, size - 1).0[0], 0);
                assert_eq!(mask.get_pixel(size - 1, size - 1).0[0], 0);
            }
        }
    }

    #[test]
    fn circle_mask_is_symmetric() {
        let mask = circle_mask(48);
        for y in 0..48 {
            for x in 0..48 {
                let v = mask.get_pixel(x, y).0[0];
                assert_eq!(v, mask.get_pixel(47 - x, y).0[0]);
                assert_eq!(v, mask.get_pixel(x, 47 - y).0[0]);
                assert_eq!(v, mask.get_pixel(y, x).0[0]);
            }
        }
        // Edge midpoints: (0.5, 24.5) is 23.5 from center, inside radius 24
        assert_eq!(mask.get_pixel(0, 24).0[0], 255);
    }

    #[test]
    fn apply_mask_replaces_alpha() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128]));
        let mask = circle_mask(4);
        let out = apply_mask(&img, &mask);
        assert_eq!(out.get_pixel(1, 1), &Rgba([10, 20, 30, 255]));
        assert_eq!(out.get_pixel(0, 0), &Rgba([10, 20, 30, 0]));
    }

    #[test]
    fn render_produces_every_target_in_order() {
        let variants = DensityExporter::new().render(&master(512)).unwrap();
        let sizes: Vec<_> = variants.iter().map(|v| v.square.width()).collect();
        assert_eq!(sizes, [48, 72, 96, 144, 192]);
        for v in &variants {
            assert_eq!(v.square.height(), v.target.size);
            assert_eq!(v.round.dimensions(), (v.target.size, v.target.size));
        }
    }

    #[test]
    fn upscale_is_refused_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("res");
        let err = DensityExporter::new().export_master(&master(100), &out);
        match err {
            Err(RenderError::UpscaleRefused { target, size, native }) => {
                assert_eq!(target, "mipmap-xxhdpi");
                assert_eq!(size, 144);
                assert_eq!(native, 100);
            }
            other => panic!("expected UpscaleRefused, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn upscale_override() {
        let variants = DensityExporter::new()
            .allow_upscale(true)
            .render(&master(32))
            .unwrap();
        assert_eq!(variants.last().unwrap().square.width(), 192);
    }

    #[test]
    fn missing_master_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("res");
        let err = DensityExporter::new().export(dir.path().join("nope.png"), &out);
        assert!(matches!(err, Err(RenderError::MasterIcon { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn rgb_master_keeps_rgb_square() {
        let dir = tempfile::tempdir().unwrap();
        let rgb = MasterIcon::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            96,
            96,
            Rgb([32, 32, 32]),
        )));
        let exporter = DensityExporter::new().with_targets(vec![DensityTarget::new("mipmap-xhdpi", 96)]);
        let report = exporter.export_master(&rgb, dir.path()).unwrap();
        assert_eq!(report.file_count(), 2);

        let square = image::open(dir.path().join("mipmap-xhdpi").join(SQUARE_FILE)).unwrap();
        let round = image::open(dir.path().join("mipmap-xhdpi").join(ROUND_FILE)).unwrap();
        assert!(!square.color().has_alpha());
        assert!(round.color().has_alpha());
        assert_eq!(round.to_rgba8().get_pixel(48, 48).0, [32, 32, 32, 255]);
        assert_eq!(round.to_rgba8().get_pixel(0, 0).0[3], 0);
    }
}
