/// Codec traits implemented outside the processing core
use std::path::Path;

use crate::types::AudioBuffer;

/// Decodes an audio file of any supported container into an `AudioBuffer`
///
/// Implementations must be thread-safe: the server decodes on blocking worker
/// threads.
pub trait AudioDecoder: Send + Sync {
    /// Error type produced by this decoder
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode the entire file at `path` into memory
    fn decode(&self, path: &Path) -> Result<AudioBuffer, Self::Error>;

    /// Check if the decoder supports the given file format
    fn supports_format(&self, path: &Path) -> bool;
}

/// Encodes an `AudioBuffer` back to a file
pub trait AudioEncoder: Send + Sync {
    /// Error type produced by this encoder
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write `buffer` to `path`, replacing any existing file
    fn encode(&self, buffer: &AudioBuffer, path: &Path) -> Result<(), Self::Error>;

    /// Check if the encoder can write to the given path
    fn supports_format(&self, path: &Path) -> bool;
}
