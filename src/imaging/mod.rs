//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` crate codecs via [`RustBackend`] |
//! | **Text watermark** | `font8x8` glyphs, scaled and blended source-over |
//! | **Image watermark** | centered source-over composite at 50% opacity |
//! | **Edits** | brighten, contrast, grayscale, invert on RGBA8 |
//!
//! The module is split into:
//! - **Calculations**: Pure placement and wrapping math (unit testable)
//! - **Parameters**: Data structures describing what to do
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Text / Edits**: Pixel-level building blocks
//! - **Operations**: High-level functions combining the above with a backend

pub mod backend;
mod calculations;
pub mod edits;
pub mod operations;
mod params;
pub mod rust_backend;
mod text;

pub use backend::{ImageBackend, ImagingError};
pub use calculations::centered_offset;
pub use operations::{
    WatermarkError, WatermarkSettings, add_image_watermark, add_text_watermark, add_watermark,
    apply_image_watermark, apply_text_watermark, edit_image_file, ensure_exists,
};
pub use params::{EditOption, EditOptions, Opacity, Quality, WatermarkSpec};
pub use rust_backend::RustBackend;
pub use text::BitmapFont;
