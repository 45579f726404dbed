//! Loudness measurement and normalization for Car Wash Mixer
//!
//! This crate provides:
//! - Integrated loudness measurement per ITU-R BS.1770 (K-weighting, 400 ms
//!   blocks with 75% overlap, absolute and relative gating)
//! - Normalization of a decoded buffer to a target LUFS with a peak-safety
//!   clamp that never lets a sample exceed digital full scale
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌────────────────────┐
//! │ AudioBuffer │ ──► │ K-weighting  │ ──► │ Gated blocks │ ──► │ LoudnessMeasurement│
//! └─────────────┘     └──────────────┘     └──────────────┘     └────────────────────┘
//!                                                                          │
//!                                                                          ▼
//!                     ┌──────────────┐     ┌──────────────┐     ┌────────────────────┐
//!                     │ Normalized   │ ◄── │ Peak clamp   │ ◄── │ Gain (target - I)  │
//!                     └──────────────┘     └──────────────┘     └────────────────────┘
//! ```
//!
//! Both stages are pure functions: the input buffer is never modified and
//! results are bit-reproducible for identical input.
//!
//! # Example
//!
//! ```ignore
//! use carwash_loudness::{normalize, STREAMING_TARGET_LUFS};
//!
//! let result = normalize(&buffer, STREAMING_TARGET_LUFS)?;
//! println!("Measured {:.1} LUFS", result.measured.integrated_lufs);
//! println!("Applied gain: {:.2} dB", result.applied_gain_db);
//! ```

#![deny(unsafe_code)]

mod error;
mod gain;
mod k_weighting;
mod meter;
mod normalizer;

pub use error::{LoudnessError, Result};
pub use gain::{db_to_linear, gain_for_target, linear_to_db};
pub use k_weighting::KWeightingFilter;
pub use meter::{measure_loudness, LoudnessMeasurement};
pub use normalizer::{normalize, NormalizeConfig, Normalized};

/// Streaming platform reference level (-14 LUFS), the default target
pub const STREAMING_TARGET_LUFS: f64 = -14.0;

/// EBU R128 broadcast reference level (-23 LUFS)
pub const EBU_R128_BROADCAST_LUFS: f64 = -23.0;

/// ReplayGain 2.0 reference loudness level (-18 LUFS)
pub const REPLAYGAIN_REFERENCE_LUFS: f64 = -18.0;

/// Absolute gating threshold in LUFS
pub const ABSOLUTE_GATE_LUFS: f64 = -70.0;

/// Relative gating threshold in LU below the absolute-gated mean
pub const RELATIVE_GATE_LU: f64 = -10.0;

/// Lowest sample rate accepted for measurement
pub const MIN_SAMPLE_RATE: u32 = 8_000;

/// Highest sample rate accepted for measurement
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Highest channel count accepted for measurement
pub const MAX_CHANNELS: usize = 8;
