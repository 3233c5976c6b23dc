use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::frame::EncodedFrame;

/// Vidéo encodée complète, unité transférée de l'encodeur au player.
///
/// Field order is the serialized order: `width`, `height`, `fps`, `data`.
///
/// # Example
/// ```
/// use ll_core::video::VideoData;
/// let video = VideoData {
///     width: 2,
///     height: 1,
///     fps: 1,
///     frames: vec!["AB".parse().unwrap()],
/// };
/// assert!(video.validate().is_ok());
/// assert_eq!(video.frame_len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoData {
    /// Width in symbols.
    pub width: u32,
    /// Height in symbols.
    pub height: u32,
    /// Playback rate, frames per second.
    pub fps: u32,
    /// Frames in playback order.
    #[serde(rename = "data")]
    pub frames: Vec<EncodedFrame>,
}

impl VideoData {
    /// Number of symbols every frame must hold.
    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Playback duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / f64::from(self.fps)
    }

    /// Check every invariant a player relies on.
    ///
    /// # Errors
    /// Returns the first violated invariant: zero dimensions, zero fps,
    /// no frames, or a frame whose length differs from `width*height`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(CoreError::InvalidFps(self.fps));
        }
        if self.frames.is_empty() {
            return Err(CoreError::EmptyInput);
        }
        let expected = self.frame_len();
        if let Some((index, frame)) = self
            .frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.len() != expected)
        {
            return Err(CoreError::FrameLength {
                index,
                expected,
                actual: frame.len(),
            });
        }
        Ok(())
    }
}
