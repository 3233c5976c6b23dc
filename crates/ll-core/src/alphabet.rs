use std::fmt;

/// Nombre de bandes de luminance de l'alphabet.
pub const BAND_COUNT: usize = 4;

/// Largeur d'une bande de luminance (256 / `BAND_COUNT`).
pub const BAND_WIDTH: u16 = 64;

/// One luminance band, ordered darkest → brightest.
///
/// The derived `Ord` follows luminance: `A < B < C < D`.
///
/// # Example
/// ```
/// use ll_core::alphabet::Symbol;
/// assert_eq!(Symbol::from_code('C'), Some(Symbol::C));
/// assert_eq!(Symbol::D.code(), 'D');
/// assert!(Symbol::A < Symbol::D);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// Band 0 : [0, 64).
    A,
    /// Band 1 : [64, 128).
    B,
    /// Band 2 : [128, 192).
    C,
    /// Band 3 : [192, 256).
    D,
}

impl Symbol {
    /// All symbols in band order.
    pub const ALL: [Symbol; BAND_COUNT] = [Symbol::A, Symbol::B, Symbol::C, Symbol::D];

    /// Character code used in the serialized form.
    #[inline(always)]
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
        }
    }

    /// Inverse of [`Symbol::code`].
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Symbol::A),
            'B' => Some(Symbol::B),
            'C' => Some(Symbol::C),
            'D' => Some(Symbol::D),
            _ => None,
        }
    }

    /// Band index in `0..BAND_COUNT`.
    #[inline(always)]
    #[must_use]
    pub const fn band(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Lookup table mapping luminance [0..255] → band symbol.
///
/// Pre-computed once for O(1) per-sample cost.
///
/// # Example
/// ```
/// use ll_core::alphabet::{Symbol, SymbolAlphabet};
/// let alphabet = SymbolAlphabet::standard();
/// assert_eq!(alphabet.quantize(0), Symbol::A);
/// assert_eq!(alphabet.quantize(63), Symbol::A);
/// assert_eq!(alphabet.quantize(64), Symbol::B);
/// assert_eq!(alphabet.quantize(255), Symbol::D);
/// ```
#[derive(Clone)]
pub struct SymbolAlphabet {
    lut: [Symbol; 256],
}

impl SymbolAlphabet {
    /// Four equal bands of width `BAND_WIDTH`.
    #[must_use]
    pub fn standard() -> Self {
        let mut lut = [Symbol::A; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            let band = (i / usize::from(BAND_WIDTH)).min(BAND_COUNT - 1);
            *slot = Symbol::ALL[band];
        }
        Self { lut }
    }

    /// Map one luminance sample to its band symbol.
    #[inline(always)]
    #[must_use]
    pub fn quantize(&self, luminance: u8) -> Symbol {
        self.lut[usize::from(luminance)]
    }

    /// Inclusive luminance range covered by `symbol`.
    ///
    /// # Example
    /// ```
    /// use ll_core::alphabet::{Symbol, SymbolAlphabet};
    /// let alphabet = SymbolAlphabet::standard();
    /// assert_eq!(alphabet.band_range(Symbol::B), Some((64, 127)));
    /// ```
    #[must_use]
    pub fn band_range(&self, symbol: Symbol) -> Option<(u8, u8)> {
        let first = self.lut.iter().position(|&s| s == symbol)?;
        let last = self.lut.iter().rposition(|&s| s == symbol)?;
        Some((first as u8, last as u8))
    }
}

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn band_boundaries() {
        let alphabet = SymbolAlphabet::standard();
        assert_eq!(alphabet.quantize(63), Symbol::A);
        assert_eq!(alphabet.quantize(64), Symbol::B);
        assert_eq!(alphabet.quantize(127), Symbol::B);
        assert_eq!(alphabet.quantize(128), Symbol::C);
        assert_eq!(alphabet.quantize(191), Symbol::C);
        assert_eq!(alphabet.quantize(192), Symbol::D);
    }

    #[test]
    fn bands_are_contiguous_and_exhaustive() {
        let alphabet = SymbolAlphabet::standard();
        let mut expected_start = 0u16;
        for symbol in Symbol::ALL {
            let (lo, hi) = alphabet.band_range(symbol).unwrap();
            assert_eq!(u16::from(lo), expected_start);
            assert_eq!(u16::from(hi) - u16::from(lo) + 1, BAND_WIDTH);
            expected_start = u16::from(hi) + 1;
        }
        assert_eq!(expected_start, 256);
    }

    #[test]
    fn codes_round_trip() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_code(symbol.code()), Some(symbol));
        }
        assert_eq!(Symbol::from_code('E'), None);
        assert_eq!(Symbol::from_code('a'), None);
    }

    proptest! {
        #[test]
        fn quantize_is_monotonic(a in any::<u8>(), b in any::<u8>()) {
            let alphabet = SymbolAlphabet::standard();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(alphabet.quantize(lo) <= alphabet.quantize(hi));
        }

        #[test]
        fn same_band_same_symbol(a in any::<u8>(), b in any::<u8>()) {
            let alphabet = SymbolAlphabet::standard();
            let same_band = u16::from(a) / BAND_WIDTH == u16::from(b) / BAND_WIDTH;
            prop_assert_eq!(same_band, alphabet.quantize(a) == alphabet.quantize(b));
        }
    }
}
