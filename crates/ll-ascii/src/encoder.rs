use ll_core::alphabet::SymbolAlphabet;
use ll_core::frame::{EncodedFrame, RawFrame};

/// Quantize a frame into its symbol sequence.
///
/// Walks the samples row-major and maps each one through the alphabet LUT.
/// The output always holds exactly `width * height` symbols.
///
/// # Example
/// ```
/// use ll_core::alphabet::SymbolAlphabet;
/// use ll_core::frame::RawFrame;
/// use ll_ascii::encoder::encode_frame;
///
/// let black = RawFrame::filled(2, 2, 0);
/// let encoded = encode_frame(&black, &SymbolAlphabet::standard());
/// assert_eq!(encoded.to_string(), "AAAA");
/// ```
#[must_use]
pub fn encode_frame(frame: &RawFrame, alphabet: &SymbolAlphabet) -> EncodedFrame {
    let symbols = frame
        .samples()
        .iter()
        .map(|&lum| alphabet.quantize(lum))
        .collect();
    EncodedFrame::from_symbols(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll_core::alphabet::Symbol;
    use proptest::prelude::*;

    #[test]
    fn black_frame_is_all_lowest_band() {
        let encoded = encode_frame(&RawFrame::filled(2, 2, 0), &SymbolAlphabet::standard());
        assert_eq!(encoded.to_string(), "AAAA");
    }

    #[test]
    fn row_major_order_is_kept() {
        let frame = RawFrame::new(2, 2, vec![255, 0, 100, 150]).unwrap();
        let encoded = encode_frame(&frame, &SymbolAlphabet::standard());
        assert_eq!(
            encoded.symbols(),
            &[Symbol::D, Symbol::A, Symbol::B, Symbol::C]
        );
    }

    proptest! {
        #[test]
        fn length_is_width_times_height(
            (width, height, samples) in (1u32..24, 1u32..24).prop_flat_map(|(w, h)| {
                (Just(w), Just(h), proptest::collection::vec(any::<u8>(), (w * h) as usize))
            })
        ) {
            let frame = RawFrame::new(width, height, samples).unwrap();
            let encoded = encode_frame(&frame, &SymbolAlphabet::standard());
            prop_assert_eq!(encoded.len(), (width * height) as usize);
        }
    }
}
