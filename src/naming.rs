//! Output filename derivation.
//!
//! A watermarked copy lives next to its source, named by inserting a suffix
//! between the base name and the extension:
//!
//! - `photo.jpg` → `photo-with-watermark.jpg`
//! - `archive.tar.gz` → `archive-with-watermark.tar.gz`
//! - `noext` → `noext-with-watermark`
//!
//! ## First-Dot Rule
//!
//! The name is split on the **first** `.`. Everything after it is treated as
//! the extension and carried over unchanged, so multi-segment extensions keep
//! all their segments. A name without a dot gets the suffix appended and no
//! trailing dot. A leading dot (`.hidden`) is still the first dot, which makes
//! the base name empty: `.hidden` → `-with-watermark.hidden`.

/// Suffix inserted before the extension of every watermarked output.
pub const WATERMARK_SUFFIX: &str = "-with-watermark";

/// Result of splitting a filename on its first dot.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitName<'a> {
    /// Everything before the first `.` (may be empty).
    pub base: &'a str,
    /// Everything after the first `.`, or `None` if there is no dot.
    pub extension: Option<&'a str>,
}

/// Split a filename on its first `.`.
pub fn split_first_dot(filename: &str) -> SplitName<'_> {
    match filename.split_once('.') {
        Some((base, extension)) => SplitName {
            base,
            extension: Some(extension),
        },
        None => SplitName {
            base: filename,
            extension: None,
        },
    }
}

/// Derive the output filename using [`WATERMARK_SUFFIX`].
pub fn derive_output_filename(filename: &str) -> String {
    derive_output_filename_with(filename, WATERMARK_SUFFIX)
}

/// Derive the output filename with a custom suffix.
pub fn derive_output_filename_with(filename: &str, suffix: &str) -> String {
    let split = split_first_dot(filename);
    match split.extension {
        Some(ext) => format!("{}{suffix}.{ext}", split.base),
        None => format!("{}{suffix}", split.base),
    }
}
