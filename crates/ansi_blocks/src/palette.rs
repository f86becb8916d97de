//! Terminal color palette: every appearance a 16-color terminal cell can take.
//!
//! A cell appearance is a foreground color drawn over a background color
//! through one of five shading glyphs. The palette enumerates all of them,
//! precomputes the blended RGB each combination looks like, and records the
//! SGR prefix that produces it. Lookup is exact nearest-neighbor by squared
//! Euclidean distance.

use std::collections::HashMap;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Packs the color into a single 24-bit key: `r + 256*g + 65536*b`.
    #[inline]
    pub fn packed(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    #[inline]
    fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }
}

/// The 8 standard ANSI colors (SGR 30-37 / 40-47), indexed black, red,
/// green, yellow, blue, magenta, cyan, white.
pub const COLOR_TABLE: [Rgb; 8] = [
    Rgb { r: 0, g: 0, b: 0 },
    Rgb { r: 128, g: 0, b: 0 },
    Rgb { r: 0, g: 128, b: 0 },
    Rgb { r: 128, g: 128, b: 0 },
    Rgb { r: 0, g: 0, b: 128 },
    Rgb { r: 128, g: 0, b: 128 },
    Rgb { r: 0, g: 128, b: 128 },
    Rgb { r: 192, g: 192, b: 192 },
];

/// The 8 bright ANSI colors, same index order. Foreground only; terminals
/// in this model have no bright backgrounds.
pub const BRIGHT_COLOR_TABLE: [Rgb; 8] = [
    Rgb { r: 128, g: 128, b: 128 },
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 0, g: 255, b: 0 },
    Rgb { r: 255, g: 255, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb { r: 255, g: 0, b: 255 },
    Rgb { r: 0, g: 255, b: 255 },
    Rgb { r: 255, g: 255, b: 255 },
];

/// Shading glyphs ordered from foreground-dominant to background-dominant:
/// full block, dark shade, medium shade, light shade, blank.
pub const SHADE_GLYPHS: [&str; 5] = ["\u{2588}", "\u{2593}", "\u{2592}", "\u{2591}", " "];

/// How much of the foreground color shows through each shading glyph.
const SHADE_OPACITY: [f64; 5] = [1.00, 0.75, 0.50, 0.25, 0.00];

/// One achievable cell appearance: the blended color it looks like, the SGR
/// prefix that selects it, and the visible glyph.
///
/// Prefix and glyph are kept as separate fields so the renderer can emit the
/// bare glyph when the terminal is already in the right state, without
/// re-parsing a combined string. Concatenated, they reproduce the full cell
/// encoding.
#[derive(Clone, Debug)]
pub struct PaletteEntry {
    rgb: Rgb,
    prefix: String,
    glyph: &'static str,
}

impl PaletteEntry {
    /// The blended RGB appearance of this entry.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Packed 24-bit lookup key for this entry's appearance.
    #[inline]
    pub fn key(&self) -> u32 {
        self.rgb.packed()
    }

    /// The SGR control prefix, e.g. `ESC[22;31;40m`.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The visible shading glyph following the prefix.
    #[inline]
    pub fn glyph(&self) -> &'static str {
        self.glyph
    }
}

/// The full set of achievable appearances, built once and read-only after.
#[derive(Clone, Debug)]
pub struct Palette {
    pub(crate) entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Builds the palette by enumerating intensity x background x foreground
    /// x shading level.
    ///
    /// Appearances are keyed by blended RGB; when two combinations blend to
    /// the identical color the later insertion overwrites the earlier one.
    /// That is accepted lossy collision, not an error: lookup only needs
    /// *some* sequence producing the target appearance. The bright pass runs
    /// first, so on collision a normal-intensity combination wins.
    pub fn build() -> Self {
        let mut entries: Vec<PaletteEntry> = Vec::with_capacity(640);
        let mut by_key: HashMap<u32, usize> = HashMap::with_capacity(640);

        for bright in [true, false] {
            let intensity = if bright { 1 } else { 22 };
            for bg in 0..8usize {
                for fg in 0..8usize {
                    for shade in 0..SHADE_GLYPHS.len() {
                        let rgb = blend(bright, fg, bg, shade);
                        let entry = PaletteEntry {
                            rgb,
                            prefix: format!("\x1b[{};{};{}m", intensity, 30 + fg, 40 + bg),
                            glyph: SHADE_GLYPHS[shade],
                        };
                        match by_key.get(&rgb.packed()) {
                            Some(&slot) => entries[slot] = entry,
                            None => {
                                by_key.insert(rgb.packed(), entries.len());
                                entries.push(entry);
                            }
                        }
                    }
                }
            }
        }

        Self { entries }
    }

    /// Number of distinct appearances in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Finds the entry closest to the query color by squared Euclidean
    /// distance. Linear scan; the palette is small (at most 640 entries).
    ///
    /// Ties go to the entry encountered first in insertion order, which is
    /// deterministic for a fixed build but carries no meaning. Returns
    /// `None` only when the palette is empty, which is a caller contract
    /// violation for palettes produced by [`Palette::build`].
    pub fn nearest(&self, r: u8, g: u8, b: u8) -> Option<&PaletteEntry> {
        let query = Rgb { r, g, b };
        self.entries
            .iter()
            .min_by_key(|entry| entry.rgb.distance_squared(query))
    }
}

/// Blended appearance of a foreground drawn over a background through a
/// shading glyph: per-channel linear interpolation, truncated to 8 bits.
/// The background always comes from the standard table.
fn blend(bright: bool, fg: usize, bg: usize, shade: usize) -> Rgb {
    let opacity = SHADE_OPACITY[shade];
    let fg_rgb = if bright {
        BRIGHT_COLOR_TABLE[fg]
    } else {
        COLOR_TABLE[fg]
    };
    let bg_rgb = COLOR_TABLE[bg];
    Rgb {
        r: (opacity * fg_rgb.r as f64 + (1.0 - opacity) * bg_rgb.r as f64) as u8,
        g: (opacity * fg_rgb.g as f64 + (1.0 - opacity) * bg_rgb.g as f64) as u8,
        b: (opacity * fg_rgb.b as f64 + (1.0 - opacity) * bg_rgb.b as f64) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_key_layout() {
        let rgb = Rgb { r: 1, g: 2, b: 3 };
        assert_eq!(rgb.packed(), 1 + 256 * 2 + 65536 * 3);
    }

    #[test]
    fn test_blend_endpoints() {
        // Full block shows only the foreground, blank only the background.
        let full = blend(true, 1, 4, 0);
        assert_eq!(full, Rgb { r: 255, g: 0, b: 0 });
        let blank = blend(true, 1, 4, 4);
        assert_eq!(blank, Rgb { r: 0, g: 0, b: 128 });
    }

    #[test]
    fn test_blend_truncates() {
        // 75% of white(192) over black: 144.0 exactly, truncated not rounded.
        let mixed = blend(false, 7, 0, 1);
        assert_eq!(mixed, Rgb { r: 144, g: 144, b: 144 });
        // 25% of bright red over standard green.
        let quarter = blend(true, 1, 2, 3);
        assert_eq!(quarter, Rgb { r: 63, g: 96, b: 0 });
    }

    #[test]
    fn test_build_is_deterministic_and_bounded() {
        let a = Palette::build();
        let b = Palette::build();
        assert!(!a.is_empty());
        assert!(a.len() <= 640);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.entries().zip(b.entries()) {
            assert_eq!(x.key(), y.key());
            assert_eq!(x.prefix(), y.prefix());
            assert_eq!(x.glyph(), y.glyph());
        }
    }

    #[test]
    fn test_every_combination_is_reachable() {
        // All 640 blends must resolve to an entry with that exact color,
        // whichever combination ended up owning the key.
        let palette = Palette::build();
        let keys: std::collections::HashSet<u32> =
            palette.entries().map(|e| e.key()).collect();
        assert_eq!(keys.len(), palette.len(), "keys must be unique");
        for bright in [true, false] {
            for bg in 0..8 {
                for fg in 0..8 {
                    for shade in 0..5 {
                        assert!(keys.contains(&blend(bright, fg, bg, shade).packed()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_collision_last_writer_wins() {
        // Pure black collides many times; the final writer is the normal
        // pass at bg=white, fg=black, full block.
        let palette = Palette::build();
        let black = palette
            .entries()
            .find(|e| e.key() == 0)
            .expect("palette must contain black");
        assert_eq!(black.prefix(), "\x1b[22;30;47m");
        assert_eq!(black.glyph(), "\u{2588}");
    }

    #[test]
    fn test_nearest_black_and_white() {
        let palette = Palette::build();
        let near_black = palette.nearest(10, 10, 10).unwrap();
        assert_eq!(near_black.rgb(), Rgb { r: 0, g: 0, b: 0 });
        let near_white = palette.nearest(250, 250, 250).unwrap();
        assert_eq!(near_white.rgb(), Rgb { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn test_nearest_exact_hit() {
        let palette = Palette::build();
        let hit = palette.nearest(128, 0, 0).unwrap();
        assert_eq!(hit.rgb(), Rgb { r: 128, g: 0, b: 0 });
    }

    #[test]
    fn test_empty_palette_returns_none() {
        let palette = Palette { entries: Vec::new() };
        assert!(palette.nearest(0, 0, 0).is_none());
    }
}
