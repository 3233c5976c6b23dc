use ll_core::alphabet::{BAND_COUNT, Symbol};
use ll_core::frame::EncodedFrame;

/// Largeur d'affichage de chaque glyphe, en colonnes terminal.
///
/// Two columns per symbol keeps the picture roughly square with the usual
/// 1:2 terminal cell ratio.
pub const GLYPH_WIDTH: usize = 2;

/// Table symbole → chaîne affichée. Toutes les entrées font `GLYPH_WIDTH` colonnes.
///
/// # Example
/// ```
/// use ll_core::alphabet::Symbol;
/// use ll_render::glyph::GlyphMap;
/// let glyphs = GlyphMap::standard();
/// assert_eq!(glyphs.glyph(Symbol::A), "  ");
/// assert_eq!(glyphs.glyph(Symbol::D), "▓▓");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GlyphMap {
    glyphs: [&'static str; BAND_COUNT],
}

impl GlyphMap {
    /// Shade blocks, darkest band rendered as blank.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            glyphs: ["  ", "░░", "▒▒", "▓▓"],
        }
    }

    /// Display string of `symbol`.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, symbol: Symbol) -> &'static str {
        self.glyphs[symbol.band()]
    }

    /// Decode a frame into `out`: one line per row, rows joined by `\n`,
    /// no trailing newline.
    ///
    /// `out` is cleared first and reused across frames.
    ///
    /// # Example
    /// ```
    /// use ll_render::glyph::GlyphMap;
    /// let frame = "ABCD".parse().unwrap();
    /// let mut out = String::new();
    /// GlyphMap::standard().decode_into(&frame, 2, &mut out);
    /// assert_eq!(out, "  ░░\n▒▒▓▓");
    /// ```
    pub fn decode_into(&self, frame: &EncodedFrame, width: usize, out: &mut String) {
        out.clear();
        for (y, row) in frame.rows(width).enumerate() {
            if y > 0 {
                out.push('\n');
            }
            for &symbol in row {
                out.push_str(self.glyph(symbol));
            }
        }
    }
}

impl Default for GlyphMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_glyph_has_the_same_width() {
        let glyphs = GlyphMap::standard();
        for symbol in Symbol::ALL {
            assert_eq!(glyphs.glyph(symbol).chars().count(), GLYPH_WIDTH);
        }
    }

    #[test]
    fn glyphs_are_distinct() {
        let glyphs = GlyphMap::standard();
        for a in Symbol::ALL {
            for b in Symbol::ALL {
                if a != b {
                    assert_ne!(glyphs.glyph(a), glyphs.glyph(b));
                }
            }
        }
    }

    #[test]
    fn decode_keeps_leading_blank_glyphs() {
        let frame: EncodedFrame = "AAAD".parse().unwrap();
        let mut out = String::from("stale");
        GlyphMap::standard().decode_into(&frame, 2, &mut out);
        assert_eq!(out, "    \n  ▓▓");
    }

    proptest! {
        #[test]
        fn decoded_frame_is_a_full_grid(
            (width, symbols) in (1usize..12, 1usize..8).prop_flat_map(|(w, h)| {
                (Just(w), proptest::collection::vec(proptest::sample::select(Symbol::ALL.to_vec()), w * h))
            })
        ) {
            let height = symbols.len() / width;
            let frame = EncodedFrame::from_symbols(symbols);
            let mut out = String::new();
            GlyphMap::standard().decode_into(&frame, width, &mut out);
            let lines: Vec<&str> = out.split('\n').collect();
            prop_assert_eq!(lines.len(), height);
            for line in lines {
                prop_assert_eq!(line.chars().count(), width * GLYPH_WIDTH);
            }
        }
    }
}
