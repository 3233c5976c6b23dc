use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions image reconnues.
const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Numéro de frame : première suite de chiffres du nom de fichier.
///
/// # Example
/// ```
/// use std::path::Path;
/// use ll_source::frames::frame_number;
/// assert_eq!(frame_number(Path::new("tmp/out12.png")), Some(12));
/// assert_eq!(frame_number(Path::new("cover.png")), None);
/// ```
#[must_use]
pub fn frame_number(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits = &name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Liste les images d'un dossier dans l'ordre de lecture.
///
/// Files are ordered by [`frame_number`], numerically (`out2` before
/// `out10`). Files without a number come last, by name. Subdirectories and
/// non-image files are ignored.
///
/// # Errors
/// Returns an error if the directory cannot be read or holds no image.
pub fn list_frame_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Impossible de lire {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| IMAGE_EXTS.contains(&ext.to_lowercase().as_str()));
        if is_image {
            files.push(path);
        } else {
            log::warn!("Fichier ignoré (pas une image) : {}", path.display());
        }
    }

    if files.is_empty() {
        bail!("Aucune frame trouvée dans {}", dir.display());
    }

    files.sort_by(|a, b| {
        let key = |p: &Path| (frame_number(p).map_or((1, 0), |n| (0, n)), p.to_path_buf());
        key(a).cmp(&key(b))
    });
    log::info!("{} frames trouvées dans {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["out10.png", "out2.png", "out1.png", "notes.txt", "zz.png"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("out3.png.d")).unwrap();

        let names: Vec<String> = list_frame_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["out1.png", "out2.png", "out10.png", "zz.png"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_frame_files(dir.path()).is_err());
    }

    #[test]
    fn first_digit_run_wins() {
        assert_eq!(frame_number(Path::new("scene2_frame0040.png")), Some(2));
        assert_eq!(frame_number(Path::new("0007.jpg")), Some(7));
    }
}
