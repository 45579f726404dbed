//! Error types for lyric parsing and mapping

use thiserror::Error;

/// Result type for lyric operations
pub type Result<T> = std::result::Result<T, LyricsError>;

/// Errors that can occur while reading or mapping lyrics
#[derive(Error, Debug)]
pub enum LyricsError {
    /// A tempo parameter is out of range
    #[error("Invalid tempo ({parameter}): {reason}")]
    InvalidTempo {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A lyric line carries a NaN or infinite timestamp
    #[error("Invalid timestamp {timestamp} on lyric line {index}")]
    InvalidTimestamp {
        /// Position of the line in the input sequence
        index: usize,
        /// The offending value
        timestamp: f64,
    },

    /// Reading the LRC file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the mapping failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LyricsError {
    /// Create an invalid tempo error for the named parameter
    pub fn invalid_tempo(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTempo {
            parameter,
            reason: reason.into(),
        }
    }
}
