//! # ansi_blocks
//!
//! Renders raster images as colored text for 16-color terminals.
//!
//! Every pixel is matched against a fixed palette of achievable terminal
//! appearances (foreground color x background color x shading glyph x
//! intensity) and emitted as an SGR escape sequence plus one block glyph.
//! Consecutive pixels that map to the same appearance share a single escape
//! sequence, so the output stream stays compact for images with color runs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ansi_blocks::{render_to_string, Palette, RgbaFrame};
//!
//! // RGBA image data (4 bytes per pixel)
//! let rgba = vec![255u8, 0, 0, 255, 0, 255, 0, 255]; // red and green pixels
//! let palette = Palette::build();
//! let frame = RgbaFrame::new(rgba, 2, 1)?;
//! print!("{}", render_to_string(&frame, &palette)?);
//! ```

use thiserror::Error;

pub mod palette;
pub mod render;

pub use palette::{Palette, PaletteEntry, Rgb};
pub use render::{render, render_to_string, PixelSource, RgbaFrame, RESET};

/// Errors that can occur while building a frame or rendering it.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Invalid image dimensions (width or height is zero)
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// An empty palette was passed to the renderer (caller contract violation)
    #[error("palette is empty")]
    EmptyPalette,

    /// The output sink refused a write
    #[error("formatter error")]
    Format(#[from] core::fmt::Error),
}

/// Result type for rendering operations.
pub type Result<T> = core::result::Result<T, BlockError>;
