/// Core error types for Car Wash Mixer
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while constructing or inspecting shared domain types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Buffer has no channels
    #[error("Audio buffer must have at least one channel")]
    NoChannels,

    /// Channels have different lengths
    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    RaggedChannels {
        /// Offending channel index
        channel: usize,
        /// Length of channel 0
        expected: usize,
        /// Length of the offending channel
        actual: usize,
    },

    /// Interleaved sample count is not a multiple of the channel count
    #[error("Sample count {samples} is not divisible by channel count {channels}")]
    PartialFrame {
        /// Total interleaved samples
        samples: usize,
        /// Declared channel count
        channels: usize,
    },

    /// Sample rate of zero
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),
}
