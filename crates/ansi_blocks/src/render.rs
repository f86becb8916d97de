//! Row-by-row renderer with escape-sequence deduplication.
//!
//! Pixels are consumed top to bottom, left to right, and written straight to
//! the sink. The only state is the last emitted cell code: a pixel that maps
//! to the same code as its predecessor emits just the glyph, since the
//! terminal is already in the right color state. Without that, every cell
//! would carry a full SGR prefix and the output would bloat by an order of
//! magnitude on images with color runs.

use core::fmt::Write;

use crate::palette::Palette;
use crate::{BlockError, Result};

/// Full SGR attribute reset.
pub const RESET: &str = "\x1b[0m";

/// Alpha values below this render as transparent cells.
const ALPHA_OPAQUE_MIN: u8 = 128;

/// A decoded image the renderer can walk. Row data is raw 8-bit RGBA,
/// 4 bytes per pixel in R, G, B, A order; `row(y)` must return exactly
/// `width() * 4` bytes for every `y < height()`.
///
/// Decoding a file into this shape (bit depth, palette and grayscale
/// expansion included) is the image library's job, not the renderer's.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn row(&self, y: usize) -> &[u8];
}

/// An owned RGBA pixel buffer implementing [`PixelSource`].
#[derive(Clone, Debug)]
pub struct RgbaFrame {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl RgbaFrame {
    /// Wraps a raw RGBA buffer, validating that dimensions are non-zero and
    /// the buffer holds exactly `width * height * 4` bytes.
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BlockError::InvalidDimensions { width, height });
        }
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(BlockError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

impl PixelSource for RgbaFrame {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width * 4..(y + 1) * self.width * 4]
    }
}

/// One cell's encoding, split so the dedup check and the glyph-only emission
/// need no string re-parsing.
#[derive(Clone, Copy, PartialEq, Eq)]
struct CellCode<'a> {
    prefix: &'a str,
    glyph: &'a str,
}

/// What a transparent pixel renders as: attributes off, one blank cell.
const TRANSPARENT: CellCode<'static> = CellCode {
    prefix: RESET,
    glyph: " ",
};

/// Renders the whole image to `out`, top row to bottom, left to right.
///
/// The active code persists across row boundaries: when a row starts with a
/// code already set, its prefix is re-emitted first, so terminals that drop
/// attributes on newline stay in the right state while the first pixel can
/// still dedup against it. Every row ends with [`RESET`] and a newline
/// regardless.
pub fn render<S, W>(source: &S, palette: &Palette, out: &mut W) -> Result<()>
where
    S: PixelSource + ?Sized,
    W: Write,
{
    let mut active: Option<CellCode<'_>> = None;

    for y in 0..source.height() {
        if let Some(code) = active {
            out.write_str(code.prefix)?;
        }
        for px in source.row(y).chunks_exact(4) {
            let code = if px[3] < ALPHA_OPAQUE_MIN {
                TRANSPARENT
            } else {
                let entry = palette
                    .nearest(px[0], px[1], px[2])
                    .ok_or(BlockError::EmptyPalette)?;
                CellCode {
                    prefix: entry.prefix(),
                    glyph: entry.glyph(),
                }
            };
            if active == Some(code) {
                out.write_str(code.glyph)?;
            } else {
                out.write_str(code.prefix)?;
                out.write_str(code.glyph)?;
                active = Some(code);
            }
        }
        out.write_str(RESET)?;
        out.write_char('\n')?;
    }

    Ok(())
}

/// Renders the whole image into a fresh `String`.
#[must_use = "this returns the rendered text"]
pub fn render_to_string<S>(source: &S, palette: &Palette) -> Result<String>
where
    S: PixelSource + ?Sized,
{
    // One full prefix per cell is the worst case; color runs need far less.
    let mut out = String::with_capacity(source.width() * source.height() * 16);
    render(source, palette, &mut out)?;
    Ok(out)
}
