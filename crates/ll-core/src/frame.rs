use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::Symbol;
use crate::error::CoreError;

/// Grille de luminance d'une image décodée, avant quantification.
///
/// Stocke un échantillon 8 bits par pixel, row-major.
///
/// # Example
/// ```
/// use ll_core::frame::RawFrame;
/// let frame = RawFrame::new(2, 2, vec![0, 64, 128, 255]).unwrap();
/// assert_eq!(frame.luminance(1, 1), 255);
/// assert!(RawFrame::new(2, 2, vec![0; 3]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl RawFrame {
    /// Build a frame, checking that `samples.len() == width * height`.
    ///
    /// # Errors
    /// Returns [`CoreError::SampleCount`] on a size mismatch.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(CoreError::SampleCount {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Frame filled with one luminance value.
    ///
    /// # Example
    /// ```
    /// use ll_core::frame::RawFrame;
    /// let frame = RawFrame::filled(3, 2, 200);
    /// assert_eq!(frame.samples().len(), 6);
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, luminance: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![luminance; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major samples.
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Échantillon au pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.samples[y as usize * self.width as usize + x as usize]
    }
}

/// Frame quantifiée : une suite de symboles row-major.
///
/// Serialized as a plain string of symbol codes (`"AABD..."`).
///
/// # Example
/// ```
/// use ll_core::frame::EncodedFrame;
/// let frame: EncodedFrame = "ABCD".parse().unwrap();
/// assert_eq!(frame.len(), 4);
/// assert_eq!(frame.to_string(), "ABCD");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedFrame {
    symbols: Vec<Symbol>,
}

impl EncodedFrame {
    /// Wrap an already quantized symbol sequence.
    #[must_use]
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Symbols, row-major.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// `true` if the frame holds no symbol.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// One row of `width` symbols.
    ///
    /// # Example
    /// ```
    /// use ll_core::frame::EncodedFrame;
    /// use ll_core::alphabet::Symbol;
    /// let frame: EncodedFrame = "ABCD".parse().unwrap();
    /// let rows: Vec<_> = frame.rows(2).collect();
    /// assert_eq!(rows[1], &[Symbol::C, Symbol::D]);
    /// ```
    pub fn rows(&self, width: usize) -> std::slice::Chunks<'_, Symbol> {
        self.symbols.chunks(width.max(1))
    }
}

impl FromStr for EncodedFrame {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .enumerate()
            .map(|(offset, code)| {
                Symbol::from_code(code).ok_or(CoreError::UnknownSymbol { code, offset })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { symbols })
    }
}

impl TryFrom<String> for EncodedFrame {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EncodedFrame> for String {
    fn from(frame: EncodedFrame) -> Self {
        frame.to_string()
    }
}

impl fmt::Display for EncodedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.symbols.len());
        out.extend(self.symbols.iter().map(|s| s.code()));
        f.write_str(&out)
    }
}
