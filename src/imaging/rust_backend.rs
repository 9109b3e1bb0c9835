//! Pure Rust image backend built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `ImageReader` with content sniffing |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` (alpha dropped) |
//! | Encode → AVIF | `AvifEncoder` (rav1e, speed 6) |
//! | Encode → PNG, TIFF, WebP, GIF, BMP | `DynamicImage::write_to` |
//!
//! Encoding happens into memory first. The bytes then go to a temp file in
//! the target's directory, which is renamed over the target only after the
//! write completed. A failed save leaves an existing file as it was.

use super::backend::{ImageBackend, ImagingError};
use super::params::Quality;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Output formats with an encoder compiled in.
const WRITABLE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Avif,
    ImageFormat::Gif,
    ImageFormat::Bmp,
];

/// AVIF encoder speed (1 = slowest/best, 10 = fastest).
const AVIF_SPEED: u8 = 6;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the format-to-encoder mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the output format from the path's extension.
fn output_format(path: &Path) -> Result<ImageFormat, ImagingError> {
    let format = ImageFormat::from_path(path).map_err(|e| ImagingError::write(path, e))?;
    if WRITABLE_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(ImagingError::write(
            path,
            format!("unsupported output format: {format:?}"),
        ))
    }
}

/// Encode `img` into an in-memory buffer.
fn encode(
    img: &DynamicImage,
    format: ImageFormat,
    quality: Quality,
) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            JpegEncoder::new_with_quality(&mut buffer, quality.value()).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )?;
        }
        ImageFormat::Avif => {
            let rgba = img.to_rgba8();
            AvifEncoder::new_with_speed_quality(&mut buffer, AVIF_SPEED, quality.value())
                .write_image(
                    rgba.as_raw(),
                    rgba.width(),
                    rgba.height(),
                    ExtendedColorType::Rgba8,
                )?;
        }
        other => img.write_to(&mut Cursor::new(&mut buffer), other)?,
    }
    Ok(buffer)
}

/// Replace `path` with the contents `fill` writes.
///
/// `fill` writes into a temp file beside `path`; the temp file is persisted
/// over `path` only once `fill` returned and the data reached disk. On error
/// the temp file is removed and `path` is untouched.
fn replace_file(path: &Path, fill: impl FnOnce(&mut File) -> io::Result<()>) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    fill(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<DynamicImage, ImagingError> {
        let img = ImageReader::open(path)
            .map_err(|e| ImagingError::load(path, e))?
            .with_guessed_format()
            .map_err(|e| ImagingError::load(path, e))?
            .decode()
            .map_err(|e| ImagingError::load(path, e))?;
        debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "decoded image"
        );
        Ok(img)
    }

    fn save(
        &self,
        image: &DynamicImage,
        path: &Path,
        quality: Quality,
    ) -> Result<(), ImagingError> {
        let format = output_format(path)?;
        let bytes = encode(image, format, quality).map_err(|e| ImagingError::write(path, e))?;
        replace_file(path, |file| file.write_all(&bytes))
            .map_err(|e| ImagingError::write(path, e))?;
        debug!(
            path = %path.display(),
            format = ?format,
            quality = quality.value(),
            bytes = bytes.len(),
            "encoded image"
        );
        Ok(())
    }
}
