use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use ll_core::config::{EncodeConfig, OutputHeight};

/// Fichier de configuration lu quand `--config` est absent.
pub const DEFAULT_CONFIG: &str = "lumaloop.toml";

/// lumaloop : vidéo → boucle de blocs dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Sous-commandes.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encoder une vidéo (ou un dossier de frames) en artefact jouable.
    Encode(EncodeArgs),
    /// Jouer un artefact dans le terminal.
    Play {
        /// Artefact produit par `encode`.
        artifact: PathBuf,
    },
}

/// Options de `encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Source : chemin vers une vidéo (ffmpeg + ffprobe requis).
    #[arg(long)]
    pub video: Option<PathBuf>,

    /// Source : dossier de frames déjà extraites (out1.png, out2.png, ...).
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// FPS d'extraction et de lecture.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Hauteur en lignes, ou "detect" pour la hauteur du terminal.
    #[arg(long)]
    pub height: Option<OutputHeight>,

    /// Artefact de sortie (écrasé s'il existe).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : lumaloop.toml s'il existe.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Garder les frames extraites dans ce dossier au lieu d'un dossier temporaire.
    #[arg(long)]
    pub keep_frames: Option<PathBuf>,
}

/// Source visuelle validée.
#[derive(Debug, Clone, Copy)]
pub enum EncodeSource<'a> {
    Video(&'a Path),
    Frames(&'a Path),
}

impl EncodeArgs {
    /// Validate that exactly one source is provided.
    ///
    /// # Errors
    /// Returns an error if zero or both sources are specified.
    pub fn source(&self) -> anyhow::Result<EncodeSource<'_>> {
        match (self.video.as_deref(), self.frames.as_deref()) {
            (Some(video), None) => Ok(EncodeSource::Video(video)),
            (None, Some(dir)) => Ok(EncodeSource::Frames(dir)),
            (None, None) => {
                anyhow::bail!("Aucune source spécifiée. Utilisez --video ou --frames.")
            }
            (Some(_), Some(_)) => {
                anyhow::bail!("Une seule source à la fois : --video OU --frames.")
            }
        }
    }

    /// Apply command-line overrides on top of a loaded config.
    ///
    /// # Errors
    /// Returns an error if an override makes the config invalid.
    pub fn apply_overrides(&self, mut config: EncodeConfig) -> anyhow::Result<EncodeConfig> {
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(height) = self.height {
            config.video_height = height;
        }
        if let Some(ref output) = self.output {
            config.output_file.clone_from(output);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lumaloop").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn encode_flags_override_config() {
        let cli = parse(&[
            "encode", "--frames", "tmp", "--fps", "12", "--height", "40", "-o", "ba.lumaloop",
        ]);
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        let config = args.apply_overrides(EncodeConfig::default()).unwrap();
        assert_eq!(config.fps, 12);
        assert_eq!(config.video_height, OutputHeight::Rows(40));
        assert_eq!(config.output_file, PathBuf::from("ba.lumaloop"));
        assert!(matches!(args.source().unwrap(), EncodeSource::Frames(_)));
    }

    #[test]
    fn zero_fps_override_is_rejected() {
        let cli = parse(&["encode", "--frames", "tmp", "--fps", "0"]);
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert!(args.apply_overrides(EncodeConfig::default()).is_err());
    }

    #[test]
    fn exactly_one_source() {
        let Command::Encode(none) = parse(&["encode"]).command else {
            panic!("expected encode");
        };
        assert!(none.source().is_err());
        let Command::Encode(both) = parse(&["encode", "--video", "a.mp4", "--frames", "d"]).command
        else {
            panic!("expected encode");
        };
        assert!(both.source().is_err());
    }

    #[test]
    fn play_takes_a_path_and_global_log_level() {
        let cli = parse(&["play", "ba.lumaloop", "--log-level", "info"]);
        assert_eq!(cli.log_level, "info");
        assert!(matches!(cli.command, Command::Play { .. }));
    }
}
