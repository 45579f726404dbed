//! Integrated loudness measurement (ITU-R BS.1770 / EBU R128)
//!
//! The measurement runs in three steps:
//! 1. K-weight every channel
//! 2. Compute channel-weighted mean-square energy over 400 ms blocks that
//!    overlap by 75% (one block every 100 ms)
//! 3. Gate the blocks twice (absolute -70 LUFS, then 10 LU below the mean of
//!    the survivors) and average what remains
//!
//! Energy is accumulated per 100 ms hop while filtering, so only one `f64`
//! per hop is kept instead of a filtered copy of the whole buffer. Each block
//! is the sum of four consecutive hops, which gives the same result as
//! filtering into a working copy and slicing blocks out of it.

use std::fmt;

use carwash_core::AudioBuffer;

use crate::error::{LoudnessError, Result};
use crate::k_weighting::KWeightingFilter;
use crate::{
    ABSOLUTE_GATE_LUFS, MAX_CHANNELS, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, RELATIVE_GATE_LU,
};

/// Hops (100 ms) per gating block (400 ms)
const HOPS_PER_BLOCK: usize = 4;

/// Offset in the block loudness formula: L = -0.691 + 10 log10(energy)
const LUFS_OFFSET: f64 = -0.691;

/// Channel weight for surround channels (+1.5 dB)
const SURROUND_WEIGHT: f64 = 1.41;

/// Result of an integrated loudness measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessMeasurement {
    /// Integrated loudness in LUFS; `-inf` when every block is below the
    /// absolute gate
    pub integrated_lufs: f64,

    /// Number of 400 ms blocks the buffer was split into
    pub total_blocks: usize,

    /// Number of blocks that survived both gates
    pub gated_blocks: usize,
}

impl LoudnessMeasurement {
    /// True when the buffer is silent (or entirely below -70 LUFS)
    pub fn is_silent(&self) -> bool {
        self.integrated_lufs == f64::NEG_INFINITY
    }
}

impl fmt::Display for LoudnessMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Integrated loudness: {:.2} LUFS ({} of {} blocks after gating)",
            self.integrated_lufs, self.gated_blocks, self.total_blocks
        )
    }
}

/// Measure the integrated loudness of `buffer`
///
/// # Errors
/// - [`LoudnessError::InvalidAudio`] if the buffer is empty, has an
///   unsupported sample rate or channel count, or holds non-finite samples
/// - [`LoudnessError::Measurement`] if the buffer is shorter than one
///   400 ms block, or gating leaves no blocks for a reason other than silence
///
/// Silence is not an error here: it is reported as `-inf` LUFS.
pub fn measure_loudness(buffer: &AudioBuffer) -> Result<LoudnessMeasurement> {
    validate_buffer(buffer)?;

    let sample_rate = buffer.sample_rate().as_hz();
    let hop = ((sample_rate + 5) / 10) as usize;
    let hops = buffer.frames() / hop;
    if hops < HOPS_PER_BLOCK {
        return Err(LoudnessError::Measurement(format!(
            "{:.3} s of audio is shorter than one 400 ms gating block",
            buffer.duration_secs()
        )));
    }

    let channel_count = buffer.channel_count();
    let mut hop_energy = vec![0.0_f64; hops];
    for (index, samples) in buffer.channels().iter().enumerate() {
        let weight = channel_weight(index, channel_count);
        if weight == 0.0 {
            continue;
        }

        let mut filter = KWeightingFilter::new(sample_rate);
        for (energy, chunk) in hop_energy.iter_mut().zip(samples.chunks_exact(hop)) {
            let sum: f64 = chunk
                .iter()
                .map(|&s| {
                    let y = filter.process(f64::from(s));
                    y * y
                })
                .sum();
            *energy += weight * sum;
        }
    }

    let block_len = (hop * HOPS_PER_BLOCK) as f64;
    let blocks: Vec<f64> = hop_energy
        .windows(HOPS_PER_BLOCK)
        .map(|w| w.iter().sum::<f64>() / block_len)
        .collect();
    let total_blocks = blocks.len();

    // Pass 1: absolute gate
    let absolute_threshold = lufs_to_energy(ABSOLUTE_GATE_LUFS);
    let above_absolute: Vec<f64> = blocks
        .iter()
        .copied()
        .filter(|&e| e > absolute_threshold)
        .collect();

    if above_absolute.is_empty() {
        tracing::debug!(total_blocks, "All blocks below absolute gate, reporting silence");
        return Ok(LoudnessMeasurement {
            integrated_lufs: f64::NEG_INFINITY,
            total_blocks,
            gated_blocks: 0,
        });
    }

    // Pass 2: relative gate
    let relative_threshold =
        lufs_to_energy(energy_to_lufs(mean(&above_absolute)) + RELATIVE_GATE_LU);
    let gated: Vec<f64> = above_absolute
        .into_iter()
        .filter(|&e| e > relative_threshold)
        .collect();

    if gated.is_empty() {
        return Err(LoudnessError::Measurement(
            "relative gate removed every block".to_string(),
        ));
    }

    let integrated_lufs = energy_to_lufs(mean(&gated));
    if !integrated_lufs.is_finite() {
        return Err(LoudnessError::Measurement(format!(
            "gated block energy produced a non-finite loudness ({})",
            integrated_lufs
        )));
    }

    tracing::debug!(
        integrated_lufs,
        total_blocks,
        gated_blocks = gated.len(),
        "Measured integrated loudness"
    );

    Ok(LoudnessMeasurement {
        integrated_lufs,
        total_blocks,
        gated_blocks: gated.len(),
    })
}

/// Reject buffers the measurement cannot handle
pub(crate) fn validate_buffer(buffer: &AudioBuffer) -> Result<()> {
    let sample_rate = buffer.sample_rate().as_hz();
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        return Err(LoudnessError::invalid_audio(
            "sample_rate",
            format!(
                "{} Hz (must be between {} and {})",
                sample_rate, MIN_SAMPLE_RATE, MAX_SAMPLE_RATE
            ),
        ));
    }

    let channels = buffer.channel_count();
    if !(1..=MAX_CHANNELS).contains(&channels) {
        return Err(LoudnessError::invalid_audio(
            "channels",
            format!("{} (must be 1-{})", channels, MAX_CHANNELS),
        ));
    }

    if buffer.is_empty() {
        return Err(LoudnessError::invalid_audio("samples", "buffer has no frames"));
    }

    for (channel, samples) in buffer.channels().iter().enumerate() {
        if let Some(frame) = samples.iter().position(|s| !s.is_finite()) {
            return Err(LoudnessError::invalid_audio(
                "samples",
                format!(
                    "non-finite sample {} at channel {}, frame {}",
                    samples[frame], channel, frame
                ),
            ));
        }
    }

    Ok(())
}

/// BS.1770 channel weight for the default channel layouts
///
/// - 1-3 channels: L, R, C
/// - 4 channels: L, R, Ls, Rs
/// - 5 channels: L, R, C, Ls, Rs
/// - 6+ channels: L, R, C, LFE, Ls, Rs; LFE and anything past Rs are not measured
fn channel_weight(index: usize, channel_count: usize) -> f64 {
    match channel_count {
        0..=3 => 1.0,
        4 => {
            if index < 2 {
                1.0
            } else {
                SURROUND_WEIGHT
            }
        }
        5 => {
            if index < 3 {
                1.0
            } else {
                SURROUND_WEIGHT
            }
        }
        _ => match index {
            0..=2 => 1.0,
            4 | 5 => SURROUND_WEIGHT,
            _ => 0.0,
        },
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn energy_to_lufs(energy: f64) -> f64 {
    LUFS_OFFSET + 10.0 * energy.log10()
}

fn lufs_to_energy(lufs: f64) -> f64 {
    10.0_f64.powf((lufs - LUFS_OFFSET) / 10.0)
}
