//! # Watermark Manager
//!
//! An interactive command-line tool that stamps a text or image watermark
//! onto a picture, optionally touching it up first (brighter, more contrast,
//! black & white, inverted).
//!
//! # Architecture
//!
//! ```text
//! session  ──prompts──▶  AppConfig + answers
//!    │
//!    ├─ edit?      imaging::edit_image_file   img/test.jpg  →  img/test.jpg
//!    └─ watermark  imaging::add_watermark     img/test.jpg  →  img/test-with-watermark.jpg
//! ```
//!
//! Editing always runs before watermarking when both are requested, and it
//! overwrites the input in place. The watermark is written to a new file named
//! by [`naming::derive_output_filename`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Prompt flow; maps every step failure to one fixed message |
//! | [`imaging`] | Backend trait, codecs, compositing, pixel edits |
//! | [`naming`] | `name.ext` → `name-with-watermark.ext` |
//! | [`config`] | Optional `watermark.toml`, merged over stock defaults |
//! | [`output`] | Console wording and pure line formatters |
//!
//! # Design Decisions
//!
//! ## Errors Stay Typed Until the Console
//!
//! Every operation returns a `Result` with a real error kind (load, write,
//! missing file). Only the session collapses them into
//! "Something went wrong... Try again!", logging the detail through `tracing`
//! on stderr. A bad step never aborts the run.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding use the `image` crate; text is drawn from the
//! `font8x8` bitmaps. There are no system libraries and no font files to
//! ship: the binary is self-contained.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
