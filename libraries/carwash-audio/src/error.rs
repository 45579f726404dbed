/// Codec-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio codec error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Container or extension this crate cannot read or write
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Stream decoded to something unusable
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Decoded data does not form a valid buffer
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(#[from] carwash_core::CoreError),

    /// Loudness measurement or normalization failed
    #[error(transparent)]
    Loudness(#[from] carwash_loudness::LoudnessError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Symphonia error (probe, codec setup, packet read)
    #[error("Symphonia error: {0}")]
    Symphonia(String),

    /// WAV writer error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}
