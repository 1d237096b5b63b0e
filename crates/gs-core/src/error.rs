use thiserror::Error;

/// Errors originating from the core pipeline.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Source file missing, unreadable or not a decodable image.
    #[error("Source illisible : {path} ({reason})")]
    SourceUnreadable {
        /// Path of the source file.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// The external frame decoder reported a failure.
    #[error("Extraction des frames échouée : {0}")]
    FrameDecodeFailed(String),

    /// A single frame could not be read or converted.
    #[error("Frame {index} inconvertible : {reason}")]
    FrameConversion {
        /// Zero-based temporal index of the frame.
        index: usize,
        /// Underlying cause.
        reason: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Character ramp with no characters.
    #[error("Rampe de caractères vide")]
    InvalidRamp,

    /// No frame survived the conversion step.
    #[error("Aucune frame ASCII générée")]
    EmptyCache,

    /// Writing a frame to the display failed.
    #[error("Échec du rendu : {0}")]
    RenderFailure(String),

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::SourceUnreadable`].
    pub fn unreadable(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::SourceUnreadable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}
