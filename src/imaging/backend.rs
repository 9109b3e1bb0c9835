//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: load and save. Watermarking and editing logic only ever talks to
//! this trait, so tests can swap in the in-memory [`tests::MockBackend`].
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust codecs.

use super::params::Quality;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    /// Missing, unreadable, or undecodable input.
    #[error("Failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },
    /// Encode failure, unsupported output format, or I/O error on write.
    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl ImagingError {
    pub(crate) fn load(path: &Path, reason: impl ToString) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, reason: impl ToString) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Decode the image at `path`.
    fn load(&self, path: &Path) -> Result<DynamicImage, ImagingError>;

    /// Encode `image` to `path`, format chosen by the extension.
    ///
    /// Creates or overwrites the file. A failed encode must leave an existing
    /// file at `path` untouched.
    fn save(&self, image: &DynamicImage, path: &Path, quality: Quality)
    -> Result<(), ImagingError>;
}
