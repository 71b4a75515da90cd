//! Frame driver: loads frames, runs the scanners or the matte engine, and
//! persists images and report records.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::matte::{self, Matte, SeedPoint};
use crate::report::{HoleReport, ReportLog};
use crate::scan::{self, HoleDetection};

/// Result of processing a single frame.
#[derive(Debug)]
pub struct FrameResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Whether the frame was skipped (no hole found, or nothing to matte).
    pub skipped: bool,
    /// Hole located by analysis.
    pub detection: Option<HoleDetection>,
    /// Outcome of a flood matte.
    pub matte: Option<Matte>,
    /// Human-readable status message.
    pub message: String,
}

impl FrameResult {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            skipped: false,
            detection: None,
            matte: None,
            message: String::new(),
        }
    }

    fn failed(path: &Path, message: String) -> Self {
        Self {
            message,
            ..Self::new(path)
        }
    }
}

/// Drives hole analysis and matting over a configured frames directory.
pub struct FrameEngine {
    config: EngineConfig,
    log: Option<ReportLog>,
}

impl FrameEngine {
    /// Create an engine from an explicit configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let log = config.log_path.clone().map(ReportLog::new);
        Self { config, log }
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Locate the hole in one frame file.
    ///
    /// Does not touch the report log; see [`FrameEngine::analyze_directory`]
    /// and [`FrameEngine::record`].
    #[must_use]
    #[allow(clippy::unused_self)] // method on `self` for API consistency
    pub fn analyze_file(&self, path: &Path) -> FrameResult {
        let mut result = FrameResult::new(path);

        let image = match load_rgba(path) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!("failed to load {}: {e}", path.display());
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };

        result.success = true;
        match scan::locate_hole(&image) {
            Some(detection) => {
                let g = &detection.geometry;
                result.message = format!(
                    "Hole at {},{} to {},{} (radius {}{})",
                    g.min_x,
                    g.min_y,
                    g.max_x,
                    g.max_y,
                    g.radius,
                    if detection.is_fallback() {
                        ", fake transparency"
                    } else {
                        ""
                    }
                );
                result.detection = Some(detection);
            }
            None => {
                result.skipped = true;
                result.message = "No hole found".to_string();
            }
        }
        result
    }

    /// Append the report record for an analysed frame, if logging is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the report log cannot be written.
    pub fn record(&self, result: &FrameResult) -> Result<()> {
        let (Some(log), Some(detection)) = (&self.log, result.detection) else {
            return Ok(());
        };
        let report = HoleReport {
            file_name: file_name(&result.path),
            detection,
        };
        log.append(&report)
    }

    /// Analyse every supported image in `dir`.
    ///
    /// Frames are analysed in parallel when the `cli` feature is enabled (via
    /// rayon). Report records are appended afterwards, one at a time, in file
    /// name order.
    #[must_use]
    pub fn analyze_directory(&self, dir: &Path) -> Vec<FrameResult> {
        let paths = match list_frames(dir) {
            Ok(paths) => paths,
            Err(e) => {
                return vec![FrameResult::failed(
                    dir,
                    format!("Failed to read directory: {e}"),
                )];
            }
        };

        #[cfg(feature = "cli")]
        let mut results: Vec<FrameResult> = {
            use rayon::prelude::*;
            paths.par_iter().map(|p| self.analyze_file(p)).collect()
        };

        #[cfg(not(feature = "cli"))]
        let mut results: Vec<FrameResult> = paths.iter().map(|p| self.analyze_file(p)).collect();

        for result in &mut results {
            if let Err(e) = self.record(result) {
                result.success = false;
                result.message = format!("Failed to write report: {e}");
            }
        }
        results
    }

    /// Analyse the configured frames directory.
    #[must_use]
    pub fn analyze_all(&self) -> Vec<FrameResult> {
        self.analyze_directory(&self.config.frames_dir)
    }

    /// Flood matte one frame from `seed` and save it to `output`.
    ///
    /// A seed that is not on checkerboard fill skips the frame and writes
    /// nothing.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn matte_file(&self, input: &Path, output: &Path, seed: SeedPoint) -> FrameResult {
        let mut result = FrameResult::new(input);

        let mut image = match load_rgba(input) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!("failed to load {}: {e}", input.display());
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };

        let matte = match matte::flood_matte(&mut image, seed) {
            Ok(m) => m,
            Err(e) => {
                result.message = e.to_string();
                return result;
            }
        };
        result.matte = Some(matte);

        let Some(bounds) = matte.bounds else {
            let [r, g, b, a] = matte.seed_color.0;
            result.skipped = true;
            result.success = true;
            result.message = format!(
                "Seed ({}, {}) is RGBA({r},{g},{b},{a}), not checkerboard fill; nothing matted",
                seed.x, seed.y
            );
            return result;
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match save_image(&image, output) {
            Ok(()) => {
                result.success = true;
                result.message = format!(
                    "Matted {} pixels, hole bounds {},{} to {},{}",
                    matte.pixels, bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
                );
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }

    /// Matte every frame in the configured seed table, in table order.
    ///
    /// Runs sequentially since several entries may name the same frame.
    #[must_use]
    pub fn matte_all(&self) -> Vec<FrameResult> {
        self.config
            .seeds
            .iter()
            .map(|entry| {
                let input = self.config.frames_dir.join(&entry.frame);
                if !input.is_file() {
                    return FrameResult::failed(&input, format!("Not found: {}", input.display()));
                }
                let output = self.config.output_path_for(&entry.frame);
                self.matte_file(&input, &output, entry.seed)
            })
            .collect()
    }
}

/// Read the RGBA value at `(x, y)` of an image file.
///
/// # Errors
///
/// Returns [`Error::Image`] if the file cannot be decoded, or
/// [`Error::SeedOutOfBounds`] if the coordinate is outside the image.
pub fn probe_pixel(path: &Path, x: i64, y: i64) -> Result<Rgba<u8>> {
    let image = load_rgba(path)?;
    let (px, py) = SeedPoint::new(x, y).resolve(image.width(), image.height())?;
    Ok(*image.get_pixel(px, py))
}

/// Load any supported image and normalise it to 8-bit RGBA.
fn load_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Supported frames directly inside `dir`, sorted by file name.
fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_supported_image(p))
        .collect();
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}

/// Check if a file has an extension for a format that can carry alpha.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "webp" | "bmp"),
        None => false,
    }
}

/// Save an RGBA image, keeping its alpha channel.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for formats without alpha support
/// (including JPEG), or an error if writing fails.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp => {
            DynamicImage::ImageRgba8(img.clone()).save_with_format(path, format)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

/// Generate a default output path from an input path.
///
/// Example: `"frame.png"` becomes `"frame_matted.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input.extension().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_matted.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_appends_matted_suffix() {
        let p = default_output_path(Path::new("/tmp/frame.png"));
        assert_eq!(p, PathBuf::from("/tmp/frame_matted.png"));

        let p = default_output_path(Path::new("frame7.webp"));
        assert_eq!(p.file_name().unwrap().to_str().unwrap(), "frame7_matted.webp");
    }

    #[test]
    fn is_supported_image_accepts_alpha_formats() {
        assert!(is_supported_image(Path::new("frame.png")));
        assert!(is_supported_image(Path::new("frame.PNG")));
        assert!(is_supported_image(Path::new("frame.webp")));
        assert!(is_supported_image(Path::new("frame.bmp")));
    }

    #[test]
    fn is_supported_image_rejects_other_formats() {
        assert!(!is_supported_image(Path::new("frame.jpg")));
        assert!(!is_supported_image(Path::new("frame.txt")));
        assert!(!is_supported_image(Path::new("frame")));
    }

    #[test]
    fn save_image_refuses_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_image(&RgbaImage::new(2, 2), &dir.path().join("out.jpg")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn save_image_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 0]));
        save_image(&img, &path).unwrap();
        assert_eq!(load_rgba(&path).unwrap(), img);
    }

    #[test]
    fn list_frames_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_frames(dir.path())
            .unwrap()
            .iter()
            .map(PathBuf::as_path)
            .map(file_name)
            .collect();
        assert_eq!(names, ["a.png", "b.png"]);
    }

    #[test]
    fn analyze_file_reports_unreadable_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let engine = FrameEngine::new(EngineConfig::new(dir.path()));
        let result = engine.analyze_file(&path);
        assert!(!result.success);
        assert!(result.message.starts_with("Failed to load"));
    }
}
