//! Error types for loudness measurement and normalization

use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur during loudness measurement or normalization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoudnessError {
    /// Buffer is empty, has an unsupported shape, or contains non-finite samples
    #[error("Invalid audio ({parameter}): {reason}")]
    InvalidAudio {
        /// Name of the offending buffer property
        parameter: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Target loudness is not a finite number
    #[error("Invalid target loudness: {0} LUFS (must be finite)")]
    InvalidTarget(f64),

    /// Measured loudness is negative infinity (silence or below -70 LUFS)
    #[error("Audio is silent (integrated loudness is -inf LUFS); cannot normalize to {target_lufs} LUFS")]
    SilentInput {
        /// Requested target level
        target_lufs: f64,
    },

    /// Gating could not produce a loudness value
    #[error("Loudness measurement failed: {0}")]
    Measurement(String),
}

impl LoudnessError {
    /// Create an invalid audio error for the named buffer property
    pub fn invalid_audio(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAudio {
            parameter,
            reason: reason.into(),
        }
    }
}

impl From<carwash_core::CoreError> for LoudnessError {
    fn from(err: carwash_core::CoreError) -> Self {
        Self::invalid_audio("buffer", err.to_string())
    }
}
