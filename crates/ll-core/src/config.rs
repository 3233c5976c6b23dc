use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// FPS par défaut de l'encodage.
pub const DEFAULT_FPS: u32 = 24;

/// Chemin de sortie par défaut de l'artefact.
pub const DEFAULT_OUTPUT_FILE: &str = "out.lumaloop";

/// Hauteur de sortie : fixe, ou détectée depuis le terminal courant.
///
/// In TOML: `video_height = "detect"` or `video_height = 40`.
///
/// # Example
/// ```
/// use ll_core::config::OutputHeight;
/// assert_eq!(OutputHeight::default(), OutputHeight::Detect);
/// assert_eq!("32".parse::<OutputHeight>().unwrap(), OutputHeight::Rows(32));
/// assert_eq!("detect".parse::<OutputHeight>().unwrap(), OutputHeight::Detect);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HeightSetting", into = "HeightSetting")]
pub enum OutputHeight {
    /// Use the number of rows of the terminal running the encoder.
    #[default]
    Detect,
    /// Fixed number of rows.
    Rows(u32),
}

/// Raw TOML shape of [`OutputHeight`].
#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum HeightSetting {
    Rows(u32),
    Keyword(String),
}

impl TryFrom<HeightSetting> for OutputHeight {
    type Error = CoreError;

    fn try_from(value: HeightSetting) -> Result<Self, Self::Error> {
        match value {
            HeightSetting::Rows(0) => Err(CoreError::Config(
                "video_height doit être strictement positif".into(),
            )),
            HeightSetting::Rows(rows) => Ok(OutputHeight::Rows(rows)),
            HeightSetting::Keyword(k) => k.parse(),
        }
    }
}

impl From<OutputHeight> for HeightSetting {
    fn from(value: OutputHeight) -> Self {
        match value {
            OutputHeight::Detect => HeightSetting::Keyword("detect".into()),
            OutputHeight::Rows(rows) => HeightSetting::Rows(rows),
        }
    }
}

impl std::str::FromStr for OutputHeight {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("detect") || s.eq_ignore_ascii_case("auto") {
            return Ok(OutputHeight::Detect);
        }
        match s.parse::<u32>() {
            Ok(0) | Err(_) => Err(CoreError::Config(format!(
                "video_height invalide : {s:?} (entier positif ou \"detect\")"
            ))),
            Ok(rows) => Ok(OutputHeight::Rows(rows)),
        }
    }
}

impl fmt::Display for OutputHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputHeight::Detect => f.write_str("detect"),
            OutputHeight::Rows(rows) => write!(f, "{rows}"),
        }
    }
}

/// Configuration explicite de l'encodeur.
///
/// # Example
/// ```
/// use ll_core::config::EncodeConfig;
/// let config = EncodeConfig::default();
/// assert_eq!(config.fps, 24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncodeConfig {
    /// Frame rate of extraction and playback.
    pub fps: u32,
    /// Playback height in terminal rows.
    pub video_height: OutputHeight,
    /// Artifact destination, overwritten if present.
    pub output_file: PathBuf,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            video_height: OutputHeight::Detect,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl EncodeConfig {
    /// Reject values the encoder cannot honour.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidFps`] for a zero frame rate and
    /// [`CoreError::Config`] for a zero height or an empty output path.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.fps == 0 {
            return Err(CoreError::InvalidFps(self.fps));
        }
        if self.video_height == OutputHeight::Rows(0) {
            return Err(CoreError::Config(
                "video_height doit être strictement positif".into(),
            ));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(CoreError::Config("output_file vide".into()));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    encode: Option<EncodeSection>,
}

/// Encode section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct EncodeSection {
    fps: Option<u32>,
    video_height: Option<OutputHeight>,
    output_file: Option<PathBuf>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML or a value is invalid.
///
/// # Example
/// ```
/// use ll_core::config::{parse_config, OutputHeight};
/// let config = parse_config("[encode]\nfps = 12\nvideo_height = 30\n").unwrap();
/// assert_eq!(config.fps, 12);
/// assert_eq!(config.video_height, OutputHeight::Rows(30));
/// ```
pub fn parse_config(content: &str) -> Result<EncodeConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = EncodeConfig::default();
    if let Some(e) = file.encode {
        if let Some(v) = e.fps {
            config.fps = v;
        }
        if let Some(v) = e.video_height {
            config.video_height = v;
        }
        if let Some(v) = e.output_file {
            config.output_file = v;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ll_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("lumaloop.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<EncodeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content).with_context(|| format!("Config {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {config:?}", path.display());
    Ok(config)
}
