use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ll_ascii::assembler::VideoAssembler;
use ll_core::config::{EncodeConfig, OutputHeight, load_config};
use ll_core::error::CoreError;
use ll_core::video::VideoData;
use ll_export::artifact::write_artifact;
use ll_source::frames::list_frame_files;
use ll_source::geometry::{resolve_rows, scaled_dimensions};
use ll_source::image::load_luminance;
use ll_source::resize::Resizer;
use ll_source::video::{ensure_ffmpeg, extract_frames, probe_video};

use crate::cli::{DEFAULT_CONFIG, EncodeArgs, EncodeSource};

/// Point d'entrée de `encode` : source → VideoData → artefact.
///
/// Nothing is written unless every frame encoded successfully.
///
/// # Errors
/// Returns an error if configuration, extraction, decoding, encoding or
/// writing fails.
pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let source = args.source()?;
    let config = args.apply_overrides(resolve_config(args.config.as_deref())?)?;
    log::info!("Configuration : {config:?}");

    let video = match source {
        EncodeSource::Video(path) => encode_video(path, &config, args.keep_frames.as_deref())?,
        EncodeSource::Frames(dir) => encode_directory(dir, config.fps, config.video_height)?,
    };

    write_artifact(&config.output_file, &video)
}

/// Resolve config: explicit `--config` must exist, the default file is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<EncodeConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let default = PathBuf::from(DEFAULT_CONFIG);
    if default.exists() {
        load_config(&default)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            default.display()
        );
        Ok(EncodeConfig::default())
    }
}

/// Probe, scale and extract with ffmpeg, then encode the extracted stills.
fn encode_video(
    path: &Path,
    config: &EncodeConfig,
    keep_frames: Option<&Path>,
) -> Result<VideoData> {
    ensure_ffmpeg()?;

    log::info!("Étape 1/3 : Analyse de {}", path.display());
    let info = probe_video(path)?;
    let rows = resolve_rows(config.video_height)?;
    let (width, height) = scaled_dimensions(info.width, info.height, rows)?;

    log::info!("Étape 2/3 : Extraction {width}x{height} @ {}fps", config.fps);
    // The temp dir must outlive the encoding loop below.
    let temp_dir;
    let frames_dir = if let Some(dir) = keep_frames {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Impossible de créer {}", dir.display()))?;
        dir
    } else {
        temp_dir = tempfile::Builder::new()
            .prefix("lumaloop-")
            .tempdir()
            .context("Impossible de créer le dossier temporaire")?;
        temp_dir.path()
    };
    extract_frames(path, width, height, config.fps, frames_dir)?;

    log::info!("Étape 3/3 : Quantification");
    encode_directory(frames_dir, config.fps, OutputHeight::Rows(height))
}

/// Encode every still of `dir`, in frame-number order.
///
/// The first frame fixes the source size. With a fixed `height` every
/// frame is resized to that height (width follows the aspect ratio),
/// otherwise frames are encoded at their native size.
///
/// # Errors
/// Returns an error if the directory holds no frame, a frame cannot be
/// decoded, or frames disagree on their native size.
pub fn encode_directory(dir: &Path, fps: u32, height: OutputHeight) -> Result<VideoData> {
    let files = list_frame_files(dir)?;
    let mut assembler = VideoAssembler::new(fps)?;
    let mut resizer = Resizer::new();
    let mut sizes: Option<((u32, u32), (u32, u32))> = None;

    for (index, path) in files.iter().enumerate() {
        let frame = load_luminance(path)?;
        let native = (frame.width(), frame.height());

        let (first_native, target) = match sizes {
            Some(s) => s,
            None => {
                let target = match height {
                    OutputHeight::Rows(rows) => scaled_dimensions(native.0, native.1, rows)?,
                    OutputHeight::Detect => native,
                };
                log::info!(
                    "Frames {}x{} → {}x{}",
                    native.0,
                    native.1,
                    target.0,
                    target.1
                );
                *sizes.insert((native, target))
            }
        };

        if native != first_native {
            return Err(CoreError::DimensionMismatch {
                index,
                expected_width: first_native.0,
                expected_height: first_native.1,
                actual_width: native.0,
                actual_height: native.1,
            })
            .with_context(|| format!("Frame {}", path.display()));
        }

        let frame = if native == target {
            frame
        } else {
            resizer.resize(&frame, target.0, target.1)?
        };
        assembler
            .push(&frame)
            .with_context(|| format!("Frame {}", path.display()))?;
    }

    Ok(assembler.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use ll_source::video::clear_extracted_frames;

    fn write_frame(dir: &Path, name: &str, level: u8) {
        GrayImage::from_pixel(4, 2, Luma([level]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn reused_frames_directory_keeps_only_the_new_extraction() {
        let dir = tempfile::tempdir().unwrap();
        // Earlier, longer extraction.
        for name in ["out1.png", "out2.png", "out3.png"] {
            write_frame(dir.path(), name, 255);
        }

        // What the next extraction does before ffmpeg writes out1..out2.
        clear_extracted_frames(dir.path()).unwrap();
        write_frame(dir.path(), "out1.png", 0);
        write_frame(dir.path(), "out2.png", 0);

        let video = encode_directory(dir.path(), 24, OutputHeight::Detect).unwrap();
        let frames: Vec<String> = video.frames.iter().map(ToString::to_string).collect();
        assert_eq!(frames, ["AAAAAAAA", "AAAAAAAA"]);
    }

    #[test]
    fn fixed_height_scales_the_first_frame_size() {
        let dir = tempfile::tempdir().unwrap();
        GrayImage::from_pixel(8, 4, Luma([100]))
            .save(dir.path().join("out1.png"))
            .unwrap();

        let video = encode_directory(dir.path(), 10, OutputHeight::Rows(2)).unwrap();
        assert_eq!((video.width, video.height, video.fps), (4, 2, 10));
    }
}
