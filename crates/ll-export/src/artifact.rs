use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ll_core::error::CoreError;
use ll_core::video::VideoData;

/// Interpreter line of every artifact.
///
/// On Unix the kernel runs `lumaloop play <artifact>` when the artifact is
/// executed directly.
pub const ARTIFACT_SHEBANG: &str = "#!/usr/bin/env -S lumaloop play";

/// Sérialise une vidéo en texte d'artefact : ligne d'interpréteur + littéral JSON.
///
/// The literal is `{"width":..,"height":..,"fps":..,"data":[..]}` on a single
/// line. Output is deterministic: the same video always yields the same bytes.
///
/// # Errors
/// Returns an error if JSON serialization fails.
///
/// # Example
/// ```
/// use ll_core::video::VideoData;
/// use ll_export::artifact::render_artifact;
///
/// let video = VideoData { width: 2, height: 1, fps: 1, frames: vec!["AB".parse().unwrap()] };
/// let text = render_artifact(&video).unwrap();
/// assert!(text.ends_with("{\"width\":2,\"height\":1,\"fps\":1,\"data\":[\"AB\"]}\n"));
/// ```
pub fn render_artifact(video: &VideoData) -> Result<String> {
    let literal = serde_json::to_string(video).context("Sérialisation des données vidéo")?;
    let mut text = String::with_capacity(ARTIFACT_SHEBANG.len() + literal.len() + 2);
    text.push_str(ARTIFACT_SHEBANG);
    text.push('\n');
    text.push_str(&literal);
    text.push('\n');
    Ok(text)
}

/// Extrait et valide le littéral de données d'un texte d'artefact.
///
/// Interpreter lines (`#!...`) and blank lines before the literal are
/// skipped, so a bare JSON literal is accepted too.
///
/// # Errors
/// Returns [`CoreError::MissingData`] when no literal is present,
/// [`CoreError::MalformedData`] when it does not parse, and the
/// [`VideoData::validate`] error when it parses but breaks an invariant.
///
/// # Example
/// ```
/// use ll_export::artifact::parse_artifact;
/// let video = parse_artifact("{\"width\":2,\"height\":1,\"fps\":1,\"data\":[\"AB\"]}").unwrap();
/// assert_eq!(video.frames.len(), 1);
/// ```
pub fn parse_artifact(text: &str) -> Result<VideoData, CoreError> {
    let literal = data_literal(text).ok_or(CoreError::MissingData)?;
    let video: VideoData =
        serde_json::from_str(literal).map_err(|e| CoreError::MalformedData(e.to_string()))?;
    video.validate()?;
    Ok(video)
}

/// Everything after the leading interpreter and blank lines, if non-empty.
fn data_literal(text: &str) -> Option<&str> {
    let mut rest = text;
    loop {
        let trimmed = rest.trim_start();
        if trimmed.starts_with("#!") {
            rest = trimmed.split_once('\n').map_or("", |(_, tail)| tail);
        } else {
            let literal = trimmed.trim_end();
            return (!literal.is_empty()).then_some(literal);
        }
    }
}

/// Écrit l'artefact sur disque, en écrasant un fichier existant.
///
/// The whole text is rendered before the file is opened. On Unix the file
/// is made executable.
///
/// # Errors
/// Returns an error if serialization or any filesystem operation fails.
pub fn write_artifact(path: &Path, video: &VideoData) -> Result<()> {
    let text = render_artifact(video)?;
    fs::write(path, text.as_bytes())
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Impossible de rendre {} exécutable", path.display()))?;
    }

    log::info!(
        "Artefact écrit : {} ({} frames, {} octets)",
        path.display(),
        video.frames.len(),
        text.len()
    );
    Ok(())
}

/// Lit et valide un artefact depuis le disque.
///
/// # Errors
/// Returns an error if the file cannot be read or its data is invalid.
pub fn read_artifact(path: &Path) -> Result<VideoData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let video =
        parse_artifact(&text).with_context(|| format!("Artefact invalide : {}", path.display()))?;
    Ok(video)
}
