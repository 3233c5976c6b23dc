use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};
use ll_core::error::CoreError;
use ll_core::frame::RawFrame;

/// Resizer réutilisable wrappant fast_image_resize, un canal 8 bits.
///
/// Keeps its scratch buffer between frames of a batch.
///
/// # Example
/// ```
/// use ll_source::resize::Resizer;
/// use ll_core::frame::RawFrame;
/// let mut r = Resizer::new();
/// let small = r.resize(&RawFrame::filled(8, 8, 128), 4, 2).unwrap();
/// assert_eq!((small.width(), small.height()), (4, 2));
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (fast_image_resize wants `&mut` on it).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` to `width`×`height`. Same size returns a copy.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or the resize fails.
    pub fn resize(&mut self, src: &RawFrame, width: u32, height: u32) -> Result<RawFrame> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height }.into());
        }
        if src.width() == width && src.height() == height {
            return Ok(src.clone());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(src.samples());

        let src_image =
            Image::from_slice_u8(src.width(), src.height(), &mut self.src_buf, PixelType::U8)
                .context("Invalid source dimensions")?;
        let mut dst_image = Image::new(width, height, PixelType::U8);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        let frame = RawFrame::new(width, height, dst_image.into_vec())?;
        Ok(frame)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_frame_stays_uniform() {
        let mut r = Resizer::new();
        let out = r.resize(&RawFrame::filled(40, 30, 200), 10, 6).unwrap();
        assert!(out.samples().iter().all(|&v| v.abs_diff(200) <= 1));
    }

    #[test]
    fn same_size_is_identity() {
        let src = RawFrame::new(2, 1, vec![3, 250]).unwrap();
        let mut r = Resizer::new();
        assert_eq!(r.resize(&src, 2, 1).unwrap(), src);
    }
}
