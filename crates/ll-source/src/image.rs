use std::path::Path;

use anyhow::{Context, Result};
use ll_core::frame::RawFrame;

/// Décode une image en luminance 8 bits.
///
/// Color images are converted with the `image` crate's luma weights; the
/// alpha channel is dropped.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use ll_source::image::load_luminance;
/// use std::path::Path;
/// let frame = load_luminance(Path::new("tmp/out1.png")).unwrap();
/// ```
pub fn load_luminance(path: &Path) -> Result<RawFrame> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    let frame = RawFrame::new(width, height, luma.into_raw())?;
    Ok(frame)
}
