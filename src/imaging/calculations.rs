//! Pure placement math for watermarks.
//!
//! All functions here are pure and testable without any I/O or images.

/// Offset that centers an overlay of size `overlay` over a base of size `base`.
///
/// Computed as `base/2 - overlay/2` in floating point and truncated toward
/// zero. The result is negative when the overlay is larger than the base.
///
/// # Examples
/// ```
/// # use watermark_manager::imaging::centered_offset;
/// assert_eq!(centered_offset((100, 100), (20, 20)), (40, 40));
/// // 50 - 10.5 = 39.5 → 39
/// assert_eq!(centered_offset((100, 100), (21, 21)), (39, 39));
/// // 5 - 10.5 = -5.5 → -5
/// assert_eq!(centered_offset((10, 10), (21, 21)), (-5, -5));
/// ```
pub fn centered_offset(base: (u32, u32), overlay: (u32, u32)) -> (i64, i64) {
    let axis = |b: u32, o: u32| (b as f64 / 2.0 - o as f64 / 2.0).trunc() as i64;
    (axis(base.0, overlay.0), axis(base.1, overlay.1))
}

/// Greedy word wrap: break `text` into lines no wider than `max_width`.
///
/// `char_width` is the advance of one character. Words are separated by single
/// spaces; a word wider than `max_width` gets a line of its own and overflows.
/// Returns no lines for empty or whitespace-only text.
pub fn wrap_words(text: &str, char_width: u32, max_width: u32) -> Vec<String> {
    let max_chars = (max_width / char_width.max(1)).max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Top-left origin of each line when a block of `line_widths` (each
/// `line_height` tall) is centered in a `box_size` area.
///
/// Lines are centered individually on the horizontal axis; the block as a
/// whole is centered vertically. Origins may be negative for oversized text.
pub fn centered_line_origins(
    box_size: (u32, u32),
    line_widths: &[u32],
    line_height: u32,
) -> Vec<(i64, i64)> {
    let block_height = line_height * line_widths.len() as u32;
    let (_, top) = centered_offset(box_size, (0, block_height));
    line_widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let (left, _) = centered_offset(box_size, (w, 0));
            (left, top + i as i64 * line_height as i64)
        })
        .collect()
}
