use std::path::Path;

use anyhow::Result;
use ll_export::artifact::read_artifact;
use ll_render::player::Player;
use ll_render::surface::TerminalSurface;

/// Point d'entrée de `play` : lit l'artefact et le joue sur stdout.
///
/// # Errors
/// Returns an error if the artifact cannot be read or is invalid, or if
/// the terminal write fails.
pub fn run_play(artifact: &Path) -> Result<()> {
    let video = read_artifact(artifact)?;
    let mut player = Player::new(video)?;
    let mut surface = TerminalSurface::new(std::io::stdout().lock());
    player.play(&mut surface)?;
    Ok(())
}
