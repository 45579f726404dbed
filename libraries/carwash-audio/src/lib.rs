//! Car Wash Mixer Audio
//!
//! File-level codec support for the mixer.
//!
//! This crate provides:
//! - Decoding via Symphonia (MP3, FLAC, OGG Vorbis, WAV, AAC/M4A) into a
//!   planar `f32` [`AudioBuffer`](carwash_core::AudioBuffer), all channels kept
//! - WAV encoding via hound at the buffer's original bit depth (or an override)
//! - [`MixPipeline`]: decode, loudness-normalize and re-encode in one call
//!
//! # Example: Decode, process, write back
//!
//! ```rust,no_run
//! use carwash_audio::{SymphoniaDecoder, WavEncoder};
//! use carwash_core::{AudioDecoder, AudioEncoder};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let buffer = SymphoniaDecoder::new().decode(Path::new("/music/wash.flac"))?;
//! println!(
//!     "Decoded {} frames x {} channels at {} Hz",
//!     buffer.frames(),
//!     buffer.channel_count(),
//!     buffer.sample_rate().as_hz()
//! );
//!
//! WavEncoder::new().encode(&buffer, Path::new("/music/wash.wav"))?;
//! # Ok(())
//! # }
//! ```

mod decoder;
mod encoder;
mod error;
mod pipeline;

pub use decoder::{SymphoniaDecoder, SUPPORTED_EXTENSIONS};
pub use encoder::WavEncoder;
pub use error::{AudioError, Result};
pub use pipeline::{MixPipeline, MixReport};
