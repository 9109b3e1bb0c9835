//! Parameter types for image operations.
//!
//! These types describe *what* to do to an image, not *how*. They are built
//! from user answers and config values, then handed to the
//! [`operations`](super::operations) layer.
//!
//! ## Types
//!
//! - [`Quality`] — Encode quality (1–100, default 100). Clamped on construction.
//! - [`Opacity`] — Watermark opacity (0.0–1.0, default 0.5). Clamped on construction.
//! - [`WatermarkSpec`] — Text or image watermark, as chosen by the user.
//! - [`EditOption`] / [`EditOptions`] — Selected pixel edits, always applied in canonical order.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    /// Maximum quality; watermarking should not visibly degrade the photo.
    fn default() -> Self {
        Self(100)
    }
}

/// Opacity multiplier applied to a watermark's own alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity(f32);

impl Opacity {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(0.5)
    }
}

/// What to stamp onto the image.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkSpec {
    /// Render this text centered over the image.
    Text(String),
    /// Composite the image at this path centered over the base.
    Image(PathBuf),
}

/// A single selectable pixel edit.
///
/// The declaration order is the canonical application order: `Ord` is derived,
/// so iterating an [`EditOptions`] set always yields brighten → contrast →
/// grayscale → invert, whatever order the user picked them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditOption {
    Brighten,
    Contrast,
    Grayscale,
    Invert,
    /// Explicit "do nothing" choice; contributes no transform.
    Nothing,
}

impl EditOption {
    /// Every option, in the order they are offered to the user.
    pub const ALL: [EditOption; 5] = [
        EditOption::Brighten,
        EditOption::Contrast,
        EditOption::Grayscale,
        EditOption::Invert,
        EditOption::Nothing,
    ];

    /// Label shown in the edit checklist.
    pub fn label(self) -> &'static str {
        match self {
            EditOption::Brighten => "make image brighter",
            EditOption::Contrast => "increase contrast",
            EditOption::Grayscale => "make image b&w",
            EditOption::Invert => "invert image",
            EditOption::Nothing => "do nothing",
        }
    }
}

/// A set of selected edits. Duplicates collapse; order is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions(BTreeSet<EditOption>);

impl EditOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transforms to run, in canonical order, with `Nothing` filtered out.
    pub fn transforms(&self) -> impl Iterator<Item = EditOption> + '_ {
        self.0.iter().copied().filter(|o| *o != EditOption::Nothing)
    }

    /// True when applying this set cannot change any pixel.
    pub fn is_noop(&self) -> bool {
        self.transforms().next().is_none()
    }
}

impl FromIterator<EditOption> for EditOptions {
    fn from_iter<I: IntoIterator<Item = EditOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_maximum() {
        assert_eq!(Quality::default().value(), 100);
    }

    #[test]
    fn opacity_clamps_and_defaults() {
        assert_eq!(Opacity::default().value(), 0.5);
        assert_eq!(Opacity::new(1.5).value(), 1.0);
        assert_eq!(Opacity::new(-0.5).value(), 0.0);
        assert_eq!(Opacity::new(f32::NAN).value(), 0.5);
    }

    #[test]
    fn transforms_follow_canonical_order() {
        let edits: EditOptions = [
            EditOption::Invert,
            EditOption::Grayscale,
            EditOption::Brighten,
            EditOption::Contrast,
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = edits.transforms().collect();
        assert_eq!(
            order,
            vec![
                EditOption::Brighten,
                EditOption::Contrast,
                EditOption::Grayscale,
                EditOption::Invert,
            ]
        );
    }

    #[test]
    fn nothing_is_filtered_out() {
        let edits: EditOptions = [EditOption::Nothing, EditOption::Invert].into_iter().collect();
        assert_eq!(edits.transforms().collect::<Vec<_>>(), vec![EditOption::Invert]);
    }

    #[test]
    fn noop_sets() {
        assert!(EditOptions::new().is_noop());
        assert!(
            [EditOption::Nothing]
                .into_iter()
                .collect::<EditOptions>()
                .is_noop()
        );
        assert!(
            ![EditOption::Grayscale]
                .into_iter()
                .collect::<EditOptions>()
                .is_noop()
        );
    }

    #[test]
    fn labels_are_distinct() {
        let labels: BTreeSet<_> = EditOption::ALL.map(EditOption::label).into_iter().collect();
        assert_eq!(labels.len(), EditOption::ALL.len());
    }
}
