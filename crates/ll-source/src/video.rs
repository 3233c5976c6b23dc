// Transcodage délégué aux exécutables `ffmpeg` et `ffprobe` (subprocess).
// Prérequis : les deux accessibles dans PATH.
//
//   - `ensure_ffmpeg`  : vérifie la présence des deux binaires
//   - `probe_video`    : interroge ffprobe pour width/height
//   - `extract_frames` : scale + rééchantillonnage fps → out%d.png
//   - `clear_extracted_frames` : purge des out%d.png d'une extraction précédente

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Modèle de nom des frames extraites (numérotées à partir de 1).
pub const FRAME_PATTERN: &str = "out%d.png";

/// Métadonnées extraites via ffprobe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
}

/// Vérifie que `ffmpeg` et `ffprobe` peuvent être lancés.
///
/// # Errors
/// Returns an error naming the first missing binary.
pub fn ensure_ffmpeg() -> Result<()> {
    for bin in ["ffmpeg", "ffprobe"] {
        let status = Command::new(bin)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("{bin} doit être installé et accessible dans le PATH"))?;
        if !status.success() {
            bail!("{bin} -version a échoué ({status})");
        }
    }
    Ok(())
}

/// Interroge `ffprobe` pour obtenir les dimensions du flux vidéo principal.
///
/// # Errors
/// Retourne une erreur si `ffprobe` est introuvable ou si le fichier
/// ne contient aucun flux vidéo décodable.
pub fn probe_video(path: &Path) -> Result<VideoInfo> {
    let path_str = path.to_str().context("Chemin vidéo invalide (non-UTF8)")?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "default=noprint_wrappers=1",
            "-i",
            path_str,
        ])
        .stdin(Stdio::null())
        .output()
        .context(
            "Impossible de lancer ffprobe. Vérifiez que ffprobe est installé et dans le PATH.",
        )?;

    if !output.status.success() {
        bail!(
            "ffprobe a échoué sur {} : {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let info = parse_probe_output(&String::from_utf8_lossy(&output.stdout)).with_context(|| {
        format!("ffprobe n'a trouvé aucun flux vidéo dans {}", path.display())
    })?;

    log::info!(
        "probe_video: {}x{} ({})",
        info.width,
        info.height,
        path.display()
    );
    Ok(info)
}

/// Parse `width=..` / `height=..` lines.
fn parse_probe_output(text: &str) -> Result<VideoInfo> {
    let mut width = None;
    let mut height = None;
    for line in text.lines() {
        if let Some(val) = line.strip_prefix("width=") {
            width = val.trim().parse::<u32>().ok();
        } else if let Some(val) = line.strip_prefix("height=") {
            height = val.trim().parse::<u32>().ok();
        }
    }
    match (width, height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(VideoInfo { width, height }),
        _ => bail!("dimensions absentes ou nulles dans la sortie ffprobe"),
    }
}

/// `true` pour un nom produit par [`FRAME_PATTERN`] (`out<n>.png`).
fn is_extracted_frame(name: &str) -> bool {
    name.strip_prefix("out")
        .and_then(|rest| rest.strip_suffix(".png"))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Supprime les frames `out<n>.png` laissées dans `dir` par une extraction précédente.
///
/// ffmpeg only overwrites the frames it writes, so a shorter run would
/// otherwise leave stale frames after its own. Other files are kept.
/// Returns the number of files removed.
///
/// # Errors
/// Returns an error if the directory cannot be read or a frame cannot be
/// removed.
pub fn clear_extracted_frames(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in
        fs::read_dir(dir).with_context(|| format!("Impossible de lire {}", dir.display()))?
    {
        let path = entry?.path();
        let stale = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_extracted_frame);
        if stale {
            fs::remove_file(&path)
                .with_context(|| format!("Impossible de supprimer {}", path.display()))?;
            removed += 1;
        }
    }
    if removed > 0 {
        log::info!("{removed} anciennes frames supprimées de {}", dir.display());
    }
    Ok(removed)
}

/// Lance `ffmpeg` pour écrire les frames `width`×`height` à `fps` dans `out_dir`.
///
/// Frames are written as `out1.png`, `out2.png`, ... (see [`FRAME_PATTERN`]).
/// Scaling and frame-rate resampling happen in a single pass. Frames left
/// in `out_dir` by an earlier extraction are removed first.
///
/// # Errors
/// Returns an error if ffmpeg cannot be spawned or exits with a failure.
pub fn extract_frames(
    path: &Path,
    width: u32,
    height: u32,
    fps: u32,
    out_dir: &Path,
) -> Result<()> {
    let path_str = path.to_str().context("Chemin vidéo invalide (non-UTF8)")?;
    let pattern = out_dir.join(FRAME_PATTERN);
    let pattern_str = pattern
        .to_str()
        .context("Chemin de sortie invalide (non-UTF8)")?;
    let filter = format!("scale={width}:{height},fps={fps}");

    clear_extracted_frames(out_dir)?;

    log::info!(
        "Extraction des frames {width}x{height} @ {fps}fps vers {}",
        out_dir.display()
    );

    let output = Command::new("ffmpeg")
        .args([
            "-y",
            "-i",
            path_str,
            "-vf",
            &filter,
            "-an",
            "-hide_banner",
            "-loglevel",
            "error",
            pattern_str,
        ])
        .stdin(Stdio::null())
        .output()
        .context("Impossible de lancer ffmpeg. Vérifiez qu'il est installé et dans le PATH.")?;

    if !output.status.success() {
        bail!(
            "ffmpeg a échoué ({}) : {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
