//! Pixel-level edits: brighten, contrast, grayscale, invert.
//!
//! Every transform works in place on 8-bit RGBA and leaves alpha untouched.
//! [`apply_edits`] runs the selected subset in canonical order
//! (brighten → contrast → grayscale → invert); see
//! [`EditOption`](super::params::EditOption).

use super::params::{EditOption, EditOptions};
use image::{RgbaImage, imageops};

/// Brightness delta used by the "make image brighter" edit.
pub const BRIGHTEN_DELTA: f32 = 0.2;

/// Contrast delta used by the "increase contrast" edit.
pub const CONTRAST_DELTA: f32 = 0.2;

/// Run `f` over the three color channels of every pixel.
fn map_color_channels(image: &mut RgbaImage, f: impl Fn(u8) -> u8) {
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = f(*channel);
        }
    }
}

/// Shift brightness by `delta` in `[-1, 1]`.
///
/// Positive deltas move each channel toward white by that fraction of the
/// remaining headroom; negative deltas scale toward black.
pub fn brighten(image: &mut RgbaImage, delta: f32) {
    let delta = delta.clamp(-1.0, 1.0);
    map_color_channels(image, |v| {
        let v = v as f32;
        let out = if delta < 0.0 {
            v * (1.0 + delta)
        } else {
            v + (255.0 - v) * delta
        };
        out.clamp(0.0, 255.0) as u8
    });
}

/// Adjust contrast by `delta` in `[-1, 1]` around the midpoint 127.
pub fn contrast(image: &mut RgbaImage, delta: f32) {
    // delta = 1 would divide by zero
    let delta = delta.clamp(-1.0, 0.99);
    let factor = (1.0 + delta) / (1.0 - delta);
    map_color_channels(image, |v| {
        (factor * (v as f32 - 127.0) + 127.0)
            .floor()
            .clamp(0.0, 255.0) as u8
    });
}

/// Desaturate to Rec. 709 luma; gray pixels are fixed points.
pub fn grayscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let luma = ((2126 * r as u32 + 7152 * g as u32 + 722 * b as u32) / 10_000) as u8;
        pixel.0[..3].fill(luma);
    }
}

/// Apply every selected edit in canonical order.
pub fn apply_edits(image: &mut RgbaImage, edits: &EditOptions) {
    for edit in edits.transforms() {
        match edit {
            EditOption::Brighten => brighten(image, BRIGHTEN_DELTA),
            EditOption::Contrast => contrast(image, CONTRAST_DELTA),
            EditOption::Grayscale => grayscale(image),
            EditOption::Invert => imageops::invert(image),
            EditOption::Nothing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, imageops::invert};

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, (x * y) as u8])
        })
    }

    fn pixel(r: u8, g: u8, b: u8, a: u8) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, Rgba([r, g, b, a]))
    }

    fn edits(options: &[EditOption]) -> EditOptions {
        options.iter().copied().collect()
    }

    #[test]
    fn brighten_moves_toward_white() {
        let mut img = pixel(0, 100, 255, 77);
        brighten(&mut img, 0.2);
        // 0 + 255*0.2 = 51, 100 + 155*0.2 = 131
        assert_eq!(img.get_pixel(0, 0).0, [51, 131, 255, 77]);
    }

    #[test]
    fn negative_brighten_darkens() {
        let mut img = pixel(100, 200, 0, 255);
        brighten(&mut img, -0.5);
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 0, 255]);
    }

    #[test]
    fn contrast_spreads_from_midpoint() {
        let mut img = pixel(127, 27, 227, 10);
        contrast(&mut img, 0.2);
        // factor 1.5: 1.5 * -100 + 127 = -23 → 0, 1.5 * 100 + 127 = 277 → 255
        assert_eq!(img.get_pixel(0, 0).0, [127, 0, 255, 10]);
    }

    #[test]
    fn contrast_mid_values() {
        let mut img = pixel(137, 117, 150, 255);
        contrast(&mut img, 0.2);
        // 127 + 15 = 142, 127 - 15 = 112, floor(127 + 34.5) = 161
        assert_eq!(img.get_pixel(0, 0).0, [142, 112, 161, 255]);
    }

    #[test]
    fn grayscale_equalizes_channels_and_keeps_alpha() {
        let mut img = gradient();
        let before = img.clone();
        grayscale(&mut img);
        for (after, before) in img.pixels().zip(before.pixels()) {
            assert_eq!(after[0], after[1]);
            assert_eq!(after[1], after[2]);
            assert_eq!(after[3], before[3]);
        }
    }

    #[test]
    fn grayscale_fixes_gray_pixels() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let mut img = pixel(v, v, v, 255);
            grayscale(&mut img);
            assert_eq!(img.get_pixel(0, 0).0, [v, v, v, 255]);
        }
    }

    #[test]
    fn grayscale_pure_colors() {
        let mut img = pixel(255, 0, 0, 255);
        grayscale(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [54, 54, 54, 255]);
    }

    #[test]
    fn invert_flips_colors_not_alpha() {
        let mut img = pixel(0, 100, 255, 42);
        invert(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [255, 155, 0, 42]);
    }

    #[test]
    fn invert_twice_is_identity() {
        let original = gradient();
        let mut img = original.clone();
        invert(&mut img);
        assert_ne!(img, original);
        invert(&mut img);
        assert_eq!(img, original);
    }

    #[test]
    fn nothing_is_a_noop() {
        let original = gradient();
        let mut img = original.clone();
        apply_edits(&mut img, &edits(&[EditOption::Nothing]));
        assert_eq!(img, original);

        apply_edits(&mut img, &EditOptions::new());
        assert_eq!(img, original);
    }

    #[test]
    fn grayscale_then_invert_regardless_of_selection_order() {
        let original = gradient();

        let mut expected = original.clone();
        grayscale(&mut expected);
        invert(&mut expected);

        let mut picked_invert_first = original.clone();
        apply_edits(
            &mut picked_invert_first,
            &edits(&[EditOption::Invert, EditOption::Grayscale]),
        );
        assert_eq!(picked_invert_first, expected);
    }

    #[test]
    fn all_edits_in_canonical_order() {
        let original = gradient();

        let mut expected = original.clone();
        brighten(&mut expected, BRIGHTEN_DELTA);
        contrast(&mut expected, CONTRAST_DELTA);
        grayscale(&mut expected);
        invert(&mut expected);

        let mut img = original.clone();
        apply_edits(
            &mut img,
            &edits(&[
                EditOption::Invert,
                EditOption::Nothing,
                EditOption::Contrast,
                EditOption::Grayscale,
                EditOption::Brighten,
            ]),
        );
        assert_eq!(img, expected);
    }
}
