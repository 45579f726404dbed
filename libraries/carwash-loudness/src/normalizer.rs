//! Loudness normalization to a target level
//!
//! Measures the buffer, computes the gain that moves it to the target, and
//! scales a copy of the samples. If the ideal gain would push any sample past
//! digital full scale, the gain is lowered so the peak lands on 1.0 and the
//! result reports the gain that was actually applied.

use carwash_core::AudioBuffer;

use crate::error::{LoudnessError, Result};
use crate::gain::{db_to_linear, gain_for_target, linear_to_db};
use crate::meter::{measure_loudness, LoudnessMeasurement};
use crate::STREAMING_TARGET_LUFS;

/// Parameters for a normalization run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeConfig {
    /// Target integrated loudness in LUFS
    pub target_lufs: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target_lufs: STREAMING_TARGET_LUFS,
        }
    }
}

impl NormalizeConfig {
    /// Create a config for the given target
    pub fn new(target_lufs: f64) -> Self {
        Self { target_lufs }
    }

    /// Check the target is usable
    pub fn validate(&self) -> Result<()> {
        if self.target_lufs.is_finite() {
            Ok(())
        } else {
            Err(LoudnessError::InvalidTarget(self.target_lufs))
        }
    }

    /// Normalize `buffer` with this config
    pub fn apply(&self, buffer: &AudioBuffer) -> Result<Normalized> {
        normalize(buffer, self.target_lufs)
    }
}

/// Output of [`normalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Scaled copy of the input (same rate, channel count, and length)
    pub buffer: AudioBuffer,

    /// Loudness of the input
    pub measured: LoudnessMeasurement,

    /// Gain that would hit the target exactly
    pub ideal_gain_db: f64,

    /// Gain actually applied; lower than `ideal_gain_db` when peak-limited
    pub applied_gain_db: f64,

    /// Whether the peak-safety clamp reduced the gain
    pub peak_limited: bool,
}

impl Normalized {
    /// Split into the normalized buffer and the applied gain in dB
    pub fn into_parts(self) -> (AudioBuffer, f64) {
        (self.buffer, self.applied_gain_db)
    }

    /// How far below the target the output ends up, in LU
    ///
    /// Zero unless the peak clamp engaged.
    pub fn shortfall_db(&self) -> f64 {
        self.ideal_gain_db - self.applied_gain_db
    }
}

/// Normalize `buffer` to `target_lufs`
///
/// The input is never modified; a new buffer is returned.
///
/// # Errors
/// - [`LoudnessError::InvalidTarget`] if `target_lufs` is not finite
/// - [`LoudnessError::InvalidAudio`] / [`LoudnessError::Measurement`] from
///   [`measure_loudness`]
/// - [`LoudnessError::SilentInput`] if the input measures `-inf` LUFS
pub fn normalize(buffer: &AudioBuffer, target_lufs: f64) -> Result<Normalized> {
    if !target_lufs.is_finite() {
        return Err(LoudnessError::InvalidTarget(target_lufs));
    }

    let measured = measure_loudness(buffer)?;
    if measured.is_silent() {
        return Err(LoudnessError::SilentInput { target_lufs });
    }

    let ideal_gain_db = gain_for_target(measured.integrated_lufs, target_lufs);
    let mut gain = db_to_linear(ideal_gain_db);

    let peak = f64::from(buffer.peak());
    let peak_limited = peak * gain > 1.0;
    if peak_limited {
        gain = 1.0 / peak;
        tracing::info!(
            ideal_gain_db,
            applied_gain_db = linear_to_db(gain),
            peak,
            "Gain reduced to keep peak at full scale"
        );
    }
    let applied_gain_db = linear_to_db(gain);

    let channels: Vec<Vec<f32>> = buffer
        .channels()
        .iter()
        .map(|samples| {
            samples
                .iter()
                .map(|&s| (f64::from(s) * gain).clamp(-1.0, 1.0) as f32)
                .collect()
        })
        .collect();
    let output = buffer.with_channels(channels)?;

    tracing::debug!(
        measured_lufs = measured.integrated_lufs,
        target_lufs,
        applied_gain_db,
        "Normalized buffer"
    );

    Ok(Normalized {
        buffer: output,
        measured,
        ideal_gain_db,
        applied_gain_db,
        peak_limited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carwash_core::{SampleFormat, SampleRate};
    use std::f32::consts::PI;

    fn sine_buffer(amplitude: f32, channels: usize, duration_secs: f32) -> AudioBuffer {
        let n = (48_000.0 * duration_secs) as usize;
        let tone: Vec<f32> = (0..n)
            .map(|i| amplitude * (2.0 * PI * 1000.0 * i as f32 / 48_000.0).sin())
            .collect();
        AudioBuffer::new(
            vec![tone; channels],
            SampleRate::DVD_QUALITY,
            SampleFormat::Pcm16,
        )
        .unwrap()
    }

    #[test]
    fn test_default_target_is_streaming_level() {
        assert_eq!(NormalizeConfig::default().target_lufs, -14.0);
    }

    #[test]
    fn test_quiet_input_gets_positive_gain() {
        // About -43 LUFS
        let input = sine_buffer(0.01, 1, 3.0);
        let result = normalize(&input, -14.0).unwrap();

        assert!(result.applied_gain_db > 0.0);
        assert!(!result.peak_limited);
        assert!((result.applied_gain_db - result.ideal_gain_db).abs() < 1e-9);
    }

    #[test]
    fn test_loud_input_gets_negative_gain() {
        // About -6 LUFS
        let input = sine_buffer(0.5, 2, 3.0);
        let result = normalize(&input, -14.0).unwrap();

        assert!(result.applied_gain_db < 0.0);
        assert!(!result.peak_limited);

        let after = measure_loudness(&result.buffer).unwrap();
        assert!((after.integrated_lufs - (-14.0)).abs() < 0.01);
    }

    #[test]
    fn test_peak_clamp_reports_actual_gain() {
        // About -9 LUFS with a 0.5 peak: +9 dB would clip, +6.02 dB will not
        let input = sine_buffer(0.5, 1, 3.0);
        let result = normalize(&input, 0.0).unwrap();

        assert!(result.peak_limited);
        assert!(result.applied_gain_db < result.ideal_gain_db);
        assert!((result.applied_gain_db - 6.02).abs() < 0.05);
        assert!(result.shortfall_db() > 2.5);

        let peak = result.buffer.peak();
        assert!(peak <= 1.0);
        assert!(peak > 0.999, "Peak should land at full scale, got {}", peak);
    }

    #[test]
    fn test_silent_input_fails() {
        let input = AudioBuffer::new(
            vec![vec![0.0; 48_000]; 2],
            SampleRate::DVD_QUALITY,
            SampleFormat::Pcm16,
        )
        .unwrap();

        assert_eq!(
            normalize(&input, -14.0),
            Err(LoudnessError::SilentInput { target_lufs: -14.0 })
        );
    }

    #[test]
    fn test_non_finite_target_fails() {
        let input = sine_buffer(0.1, 1, 1.0);
        assert!(matches!(
            normalize(&input, f64::NAN),
            Err(LoudnessError::InvalidTarget(_))
        ));
        assert!(NormalizeConfig::new(f64::INFINITY).validate().is_err());
        assert!(NormalizeConfig::new(-23.0).validate().is_ok());
    }

    #[test]
    fn test_output_shape_matches_input() {
        let input = sine_buffer(0.2, 2, 2.0);
        let snapshot = input.clone();
        let (output, _) = normalize(&input, -20.0).unwrap().into_parts();

        assert_eq!(output.sample_rate(), input.sample_rate());
        assert_eq!(output.format(), input.format());
        assert_eq!(output.channel_count(), input.channel_count());
        assert_eq!(output.frames(), input.frames());
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_config_apply_matches_free_function() {
        let input = sine_buffer(0.2, 2, 2.0);
        let config = NormalizeConfig::new(-18.0);

        assert_eq!(config.apply(&input), normalize(&input, -18.0));
    }
}
