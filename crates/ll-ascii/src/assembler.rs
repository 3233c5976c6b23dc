use ll_core::alphabet::SymbolAlphabet;
use ll_core::error::CoreError;
use ll_core::frame::{EncodedFrame, RawFrame};
use ll_core::video::VideoData;

use crate::encoder::encode_frame;

/// Assemble les frames encodées d'une vidéo, dans l'ordre de lecture.
///
/// Frames are pushed one at a time so the caller can drop each
/// [`RawFrame`] as soon as it is encoded. The first frame fixes the
/// dimensions of the batch.
///
/// # Example
/// ```
/// use ll_core::frame::RawFrame;
/// use ll_ascii::assembler::VideoAssembler;
///
/// let mut assembler = VideoAssembler::new(24).unwrap();
/// assembler.push(&RawFrame::filled(4, 2, 0)).unwrap();
/// assembler.push(&RawFrame::filled(4, 2, 255)).unwrap();
/// let video = assembler.finish().unwrap();
/// assert_eq!(video.frames.len(), 2);
/// assert_eq!(video.frames[1].to_string(), "DDDDDDDD");
/// ```
pub struct VideoAssembler {
    fps: u32,
    alphabet: SymbolAlphabet,
    dims: Option<(u32, u32)>,
    frames: Vec<EncodedFrame>,
}

impl VideoAssembler {
    /// Create an assembler for a video played at `fps`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidFps`] if `fps == 0`.
    pub fn new(fps: u32) -> Result<Self, CoreError> {
        if fps == 0 {
            return Err(CoreError::InvalidFps(fps));
        }
        Ok(Self {
            fps,
            alphabet: SymbolAlphabet::standard(),
            dims: None,
            frames: Vec::new(),
        })
    }

    /// Encode one frame and append it.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] for a zero-sized first frame
    /// and [`CoreError::DimensionMismatch`] when a frame differs from the
    /// first one.
    pub fn push(&mut self, frame: &RawFrame) -> Result<(), CoreError> {
        let actual = (frame.width(), frame.height());
        match self.dims {
            None => {
                if actual.0 == 0 || actual.1 == 0 {
                    return Err(CoreError::InvalidDimensions {
                        width: actual.0,
                        height: actual.1,
                    });
                }
                self.dims = Some(actual);
            }
            Some(expected) if expected != actual => {
                return Err(CoreError::DimensionMismatch {
                    index: self.frames.len(),
                    expected_width: expected.0,
                    expected_height: expected.1,
                    actual_width: actual.0,
                    actual_height: actual.1,
                });
            }
            Some(_) => {}
        }

        self.frames.push(encode_frame(frame, &self.alphabet));
        log::debug!("frame {} encodée ({}×{})", self.frames.len(), actual.0, actual.1);
        Ok(())
    }

    /// Frames encoded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` before the first successful [`VideoAssembler::push`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Produce the video.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyInput`] if no frame was pushed.
    pub fn finish(self) -> Result<VideoData, CoreError> {
        let Some((width, height)) = self.dims else {
            return Err(CoreError::EmptyInput);
        };
        log::info!(
            "{} frames assemblées ({width}×{height} @ {}fps)",
            self.frames.len(),
            self.fps
        );
        Ok(VideoData {
            width,
            height,
            fps: self.fps,
            frames: self.frames,
        })
    }
}

/// Encode a whole batch at once.
///
/// # Errors
/// Same as [`VideoAssembler::push`] and [`VideoAssembler::finish`].
///
/// # Example
/// ```
/// use ll_ascii::assembler::assemble;
/// use ll_core::error::CoreError;
/// assert_eq!(assemble(&[], 24), Err(CoreError::EmptyInput));
/// ```
pub fn assemble(frames: &[RawFrame], fps: u32) -> Result<VideoData, CoreError> {
    let mut assembler = VideoAssembler::new(fps)?;
    for frame in frames {
        assembler.push(frame)?;
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(assemble(&[], 24), Err(CoreError::EmptyInput));
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(matches!(
            VideoAssembler::new(0),
            Err(CoreError::InvalidFps(0))
        ));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let frames = [
            RawFrame::filled(4, 2, 0),
            RawFrame::filled(4, 2, 0),
            RawFrame::filled(2, 4, 0),
        ];
        assert_eq!(
            assemble(&frames, 24),
            Err(CoreError::DimensionMismatch {
                index: 2,
                expected_width: 4,
                expected_height: 2,
                actual_width: 2,
                actual_height: 4,
            })
        );
    }

    #[test]
    fn order_and_metadata_are_preserved() {
        let frames: Vec<RawFrame> = [0u8, 70, 130, 200]
            .iter()
            .map(|&lum| RawFrame::filled(3, 1, lum))
            .collect();
        let video = assemble(&frames, 12).unwrap();
        assert_eq!((video.width, video.height, video.fps), (3, 1, 12));
        let codes: Vec<String> = video.frames.iter().map(ToString::to_string).collect();
        assert_eq!(codes, ["AAA", "BBB", "CCC", "DDD"]);
        assert!(video.validate().is_ok());
    }

    #[test]
    fn push_counts_encoded_frames() {
        let mut assembler = VideoAssembler::new(24).unwrap();
        assert!(assembler.is_empty());
        assembler.push(&RawFrame::filled(2, 2, 10)).unwrap();
        assembler.push(&RawFrame::filled(2, 2, 240)).unwrap();
        assert_eq!(assembler.len(), 2);
        assert!(assembler.push(&RawFrame::filled(2, 1, 0)).is_err());
        assert_eq!(assembler.len(), 2);
    }

    #[test]
    fn zero_sized_frame_is_rejected() {
        let mut assembler = VideoAssembler::new(24).unwrap();
        assert!(matches!(
            assembler.push(&RawFrame::filled(0, 3, 0)),
            Err(CoreError::InvalidDimensions { .. })
        ));
        assert!(assembler.is_empty());
    }
}
