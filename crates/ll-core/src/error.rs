use thiserror::Error;

/// Errors originating from the core module.
///
/// Every variant is fatal for the run that raised it: an encode never writes
/// a partial artifact and a player never starts on invalid data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A raw frame does not hold `width*height` samples.
    #[error("Frame {width}×{height} : {expected} échantillons attendus, {actual} reçus")]
    SampleCount {
        /// Width of the frame.
        width: u32,
        /// Height of the frame.
        height: u32,
        /// `width*height`.
        expected: usize,
        /// Samples actually supplied.
        actual: usize,
    },

    /// A frame disagrees with the dimensions of the first frame of its batch.
    #[error(
        "Frame {index} : dimensions {actual_width}×{actual_height}, attendu {expected_width}×{expected_height}"
    )]
    DimensionMismatch {
        /// Position of the offending frame in the batch.
        index: usize,
        /// Batch width.
        expected_width: u32,
        /// Batch height.
        expected_height: u32,
        /// Offending frame width.
        actual_width: u32,
        /// Offending frame height.
        actual_height: u32,
    },

    /// No frame was supplied.
    #[error("Aucune frame à encoder")]
    EmptyInput,

    /// Frame rate must be strictly positive.
    #[error("FPS invalide : {0}")]
    InvalidFps(u32),

    /// An encoded frame has the wrong number of symbols.
    #[error("Frame encodée {index} : {expected} symboles attendus, {actual} reçus")]
    FrameLength {
        /// Position of the frame in the video.
        index: usize,
        /// `width*height`.
        expected: usize,
        /// Symbols found.
        actual: usize,
    },

    /// A symbol code outside the alphabet.
    #[error("Code symbole inconnu {code:?} à la position {offset}")]
    UnknownSymbol {
        /// The offending character.
        code: char,
        /// Offset inside the frame string.
        offset: usize,
    },

    /// The artifact does not contain a data literal.
    #[error("Aucune donnée vidéo dans l'artefact")]
    MissingData,

    /// The artifact's data literal cannot be parsed.
    #[error("Données vidéo illisibles : {0}")]
    MalformedData(String),
}
