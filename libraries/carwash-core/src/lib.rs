//! Car Wash Mixer Core
//!
//! Platform-agnostic types, traits, and error handling shared by the
//! loudness, lyrics, and codec crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioBuffer`, `SampleRate`, `SampleFormat`
//! - **Core Traits**: `AudioDecoder`, `AudioEncoder`
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use carwash_core::{AudioBuffer, SampleFormat, SampleRate};
//!
//! let buffer = AudioBuffer::from_interleaved(
//!     &[0.5, -0.5, 0.25, -0.25],
//!     2,
//!     SampleRate::CD_QUALITY,
//!     SampleFormat::Pcm16,
//! )
//! .unwrap();
//!
//! assert_eq!(buffer.frames(), 2);
//! assert_eq!(buffer.channel(1), &[-0.5, -0.25]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use traits::{AudioDecoder, AudioEncoder};
pub use types::{AudioBuffer, SampleFormat, SampleRate};
