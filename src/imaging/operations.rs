//! High-level watermark and edit operations.
//!
//! Two layers live here:
//!
//! - **Pure compositing** on in-memory images: [`apply_text_watermark`] and
//!   [`apply_image_watermark`], both blending source-over through
//!   [`Pixel::blend`](image::Pixel::blend).
//! - **File operations** that load through an [`ImageBackend`], transform, and
//!   save: [`add_text_watermark`], [`add_image_watermark`], [`edit_image_file`].
//!
//! File operations never check for file existence themselves; callers run
//! [`ensure_exists`] first when they want a [`WatermarkError::Validation`]
//! instead of a load failure.

use super::backend::{ImageBackend, ImagingError};
use super::calculations::{centered_line_origins, centered_offset, wrap_words};
use super::edits::apply_edits;
use super::params::{EditOptions, Opacity, Quality, WatermarkSpec};
use super::text::BitmapFont;
use image::{DynamicImage, RgbaImage, imageops};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error(transparent)]
    Imaging(#[from] ImagingError),
    #[error("File not found: {}", .0.display())]
    Validation(PathBuf),
}

/// Fixed settings shared by both watermark kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatermarkSettings {
    pub font: BitmapFont,
    pub opacity: Opacity,
    pub quality: Quality,
}

/// Check that every path exists, failing on the first that does not.
pub fn ensure_exists(paths: &[&Path]) -> Result<(), WatermarkError> {
    match paths.iter().find(|p| !p.exists()) {
        Some(missing) => Err(WatermarkError::Validation(missing.to_path_buf())),
        None => Ok(()),
    }
}

/// Render `text` centered over `base`, wrapped to the image width.
///
/// Empty or whitespace-only text returns an unchanged copy.
pub fn apply_text_watermark(base: &RgbaImage, text: &str, font: &BitmapFont) -> RgbaImage {
    let mut canvas = base.clone();
    let lines = wrap_words(text, font.char_width(), base.width());
    if lines.is_empty() {
        return canvas;
    }

    let widths: Vec<u32> = lines.iter().map(|l| font.line_width(l)).collect();
    let origins = centered_line_origins(base.dimensions(), &widths, font.line_height());
    for (line, origin) in lines.iter().zip(origins) {
        font.draw_line(&mut canvas, line, origin);
    }
    canvas
}

/// Copy of `mark` with every alpha value scaled by `opacity`.
fn faded(mark: &RgbaImage, opacity: Opacity) -> RgbaImage {
    let mut faded = mark.clone();
    for pixel in faded.pixels_mut() {
        pixel[3] = (pixel[3] as f32 * opacity.value()) as u8;
    }
    faded
}

/// Composite `mark` centered over `base` at `opacity`, clipped to `base`.
pub fn apply_image_watermark(base: &RgbaImage, mark: &RgbaImage, opacity: Opacity) -> RgbaImage {
    let mut canvas = base.clone();
    let (x, y) = centered_offset(base.dimensions(), mark.dimensions());
    imageops::overlay(&mut canvas, &faded(mark, opacity), x, y);
    canvas
}

/// Load `input`, stamp `text` over it, and save to `output`.
pub fn add_text_watermark(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    text: &str,
    settings: &WatermarkSettings,
) -> Result<(), WatermarkError> {
    let base = backend.load(input)?.to_rgba8();
    let marked = apply_text_watermark(&base, text, &settings.font);
    backend.save(&DynamicImage::ImageRgba8(marked), output, settings.quality)?;
    info!(input = %input.display(), output = %output.display(), "text watermark added");
    Ok(())
}

/// Load `input` and `watermark`, composite, and save to `output`.
pub fn add_image_watermark(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    watermark: &Path,
    settings: &WatermarkSettings,
) -> Result<(), WatermarkError> {
    let base = backend.load(input)?.to_rgba8();
    let mark = backend.load(watermark)?.to_rgba8();
    debug!(
        base = ?base.dimensions(),
        mark = ?mark.dimensions(),
        offset = ?centered_offset(base.dimensions(), mark.dimensions()),
        "placing image watermark"
    );
    let marked = apply_image_watermark(&base, &mark, settings.opacity);
    backend.save(&DynamicImage::ImageRgba8(marked), output, settings.quality)?;
    info!(input = %input.display(), output = %output.display(), "image watermark added");
    Ok(())
}

/// Dispatch on the watermark kind.
pub fn add_watermark(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    spec: &WatermarkSpec,
    settings: &WatermarkSettings,
) -> Result<(), WatermarkError> {
    match spec {
        WatermarkSpec::Text(text) => add_text_watermark(backend, input, output, text, settings),
        WatermarkSpec::Image(mark) => add_image_watermark(backend, input, output, mark, settings),
    }
}

/// Apply `edits` to the image at `path` and overwrite it.
///
/// A set with no transforms leaves the file untouched (no re-encode). On any
/// failure the original file is left as it was.
pub fn edit_image_file(
    backend: &impl ImageBackend,
    path: &Path,
    edits: &EditOptions,
    quality: Quality,
) -> Result<(), WatermarkError> {
    if edits.is_noop() {
        debug!(path = %path.display(), "no edits selected");
        return Ok(());
    }
    let mut image = backend.load(path)?.to_rgba8();
    apply_edits(&mut image, edits);
    backend.save(&DynamicImage::ImageRgba8(image), path, quality)?;
    info!(path = %path.display(), edits = ?edits, "image edited");
    Ok(())
}
