use anyhow::{Context, Result, bail};
use ll_core::config::OutputHeight;
use ll_core::error::CoreError;

/// Lignes du terminal laissées libres sous la frame (le saut de ligne final).
pub const RESERVED_ROWS: u32 = 1;

/// Taille du terminal courant en (colonnes, lignes).
///
/// # Errors
/// Returns an error if stdout is not a terminal or its size is unknown.
pub fn terminal_size() -> Result<(u32, u32)> {
    let (cols, rows) = crossterm::terminal::size()
        .context("Impossible de lire la taille du terminal (utilisez --height)")?;
    Ok((u32::from(cols), u32::from(rows)))
}

/// Nombre de lignes de sortie pour un réglage de hauteur.
///
/// `Detect` reads the current terminal and refuses one taller than wide.
///
/// # Errors
/// Returns an error when detection fails or yields no usable row.
pub fn resolve_rows(height: OutputHeight) -> Result<u32> {
    match height {
        OutputHeight::Rows(rows) => Ok(rows),
        OutputHeight::Detect => {
            let (cols, rows) = terminal_size()?;
            rows_for_terminal(cols, rows)
        }
    }
}

/// Rows usable for playback in a `cols`×`rows` terminal.
fn rows_for_terminal(cols: u32, rows: u32) -> Result<u32> {
    if cols < rows {
        bail!("Le terminal ne peut pas être plus haut que large ({cols}x{rows})");
    }
    let usable = rows.saturating_sub(RESERVED_ROWS);
    if usable == 0 {
        bail!("Terminal trop petit ({cols}x{rows})");
    }
    log::info!("Terminal détecté : {cols}x{rows}, {usable} lignes utilisées");
    Ok(usable)
}

/// Dimensions cibles pour une source `src_width`×`src_height` affichée sur `rows` lignes.
///
/// Width keeps the source aspect ratio. Both sides are rounded down to an
/// even number, as ffmpeg's scaler requires.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if either side ends up at zero.
///
/// # Example
/// ```
/// use ll_source::geometry::scaled_dimensions;
/// assert_eq!(scaled_dimensions(480, 360, 45).unwrap(), (60, 44));
/// assert!(scaled_dimensions(480, 360, 1).is_err());
/// ```
pub fn scaled_dimensions(
    src_width: u32,
    src_height: u32,
    rows: u32,
) -> Result<(u32, u32), CoreError> {
    if src_width == 0 || src_height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: src_width,
            height: src_height,
        });
    }
    let scale = f64::from(rows) / f64::from(src_height);
    let mut width = (f64::from(src_width) * scale).round() as u32;
    let mut height = rows;
    width -= width % 2;
    height -= height % 2;
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_are_even() {
        let (w, h) = scaled_dimensions(1920, 1080, 37).unwrap();
        assert_eq!((w % 2, h % 2), (0, 0));
        assert_eq!((w, h), (66, 36));
    }

    #[test]
    fn fixed_rows_skip_detection() {
        assert_eq!(resolve_rows(OutputHeight::Rows(30)).unwrap(), 30);
    }

    #[test]
    fn tall_terminal_is_refused() {
        assert!(rows_for_terminal(40, 80).is_err());
    }

    #[test]
    fn one_row_is_reserved() {
        assert_eq!(rows_for_terminal(200, 50).unwrap(), 49);
        assert!(rows_for_terminal(10, 1).is_err());
    }
}
