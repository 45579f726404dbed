//! File-to-file mix pipeline
//!
//! ```text
//! input file -> AudioDecoder -> normalize(target) -> AudioEncoder -> output file
//! ```
//!
//! The decoder and encoder sit behind the core codec traits so front-ends
//! and tests can swap either side.

use crate::decoder::SymphoniaDecoder;
use crate::encoder::WavEncoder;
use crate::error::{AudioError, Result};
use carwash_core::{AudioDecoder, AudioEncoder};
use carwash_loudness::NormalizeConfig;
use std::fmt;
use std::path::Path;

/// Outcome of one mix run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixReport {
    /// Integrated loudness of the input (LUFS)
    pub original_loudness: f64,

    /// Requested target (LUFS)
    pub target_lufs: f64,

    /// Gain needed to hit the target exactly (dB)
    pub ideal_gain_db: f64,

    /// Gain actually applied after the peak clamp (dB)
    pub applied_gain_db: f64,

    /// True if the peak clamp reduced the gain
    pub peak_limited: bool,

    /// Frames written
    pub frames: usize,

    /// Channels written
    pub channels: usize,
}

/// Human-readable summary shared by the CLI and the HTTP API
impl fmt::Display for MixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done. Loudness was {:.2} LUFS, applied {:.2} dB (target {:.2} LUFS).",
            self.original_loudness, self.applied_gain_db, self.target_lufs
        )
    }
}

/// Decode, normalize and re-encode one file
#[derive(Debug, Clone, Default)]
pub struct MixPipeline<D = SymphoniaDecoder, E = WavEncoder> {
    decoder: D,
    encoder: E,
}

impl<D, E> MixPipeline<D, E>
where
    D: AudioDecoder,
    E: AudioEncoder,
    AudioError: From<D::Error> + From<E::Error>,
{
    /// Build a pipeline from explicit codec halves
    pub fn new(decoder: D, encoder: E) -> Self {
        Self { decoder, encoder }
    }

    /// Normalize `input` to `target_lufs` and write the result to `output`
    ///
    /// The target and the output path are checked before anything is
    /// decoded. `output` is overwritten if it exists.
    ///
    /// # Errors
    /// - [`AudioError::Loudness`] for a bad target, silent input or audio
    ///   too short to measure
    /// - [`AudioError::UnsupportedFormat`] if the encoder cannot write `output`
    /// - [`AudioError::FileNotFound`] and other codec errors from decoding
    pub fn run(&self, input: &Path, output: &Path, target_lufs: f64) -> Result<MixReport> {
        let config = NormalizeConfig::new(target_lufs);
        config.validate()?;

        if !self.encoder.supports_format(output) {
            return Err(AudioError::UnsupportedFormat(format!(
                "cannot write {}",
                output.display()
            )));
        }
        if !self.decoder.supports_format(input) {
            tracing::warn!(
                input = %input.display(),
                "Unrecognised input extension, probing contents"
            );
        }

        let buffer = self.decoder.decode(input)?;
        let normalized = config.apply(&buffer)?;
        self.encoder.encode(&normalized.buffer, output)?;

        let report = MixReport {
            original_loudness: normalized.measured.integrated_lufs,
            target_lufs,
            ideal_gain_db: normalized.ideal_gain_db,
            applied_gain_db: normalized.applied_gain_db,
            peak_limited: normalized.peak_limited,
            frames: normalized.buffer.frames(),
            channels: normalized.buffer.channel_count(),
        };

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            original_lufs = report.original_loudness,
            applied_gain_db = report.applied_gain_db,
            peak_limited = report.peak_limited,
            "Mix complete"
        );

        Ok(report)
    }
}

impl MixPipeline {
    /// Symphonia decoder and WAV encoder at the source bit depth
    pub fn standard() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carwash_loudness::LoudnessError;

    #[test]
    fn report_summary_format() {
        let report = MixReport {
            original_loudness: -20.456,
            target_lufs: -14.0,
            ideal_gain_db: 6.456,
            applied_gain_db: 6.456,
            peak_limited: false,
            frames: 48_000,
            channels: 2,
        };

        assert_eq!(
            report.to_string(),
            "Done. Loudness was -20.46 LUFS, applied 6.46 dB (target -14.00 LUFS)."
        );
    }

    #[test]
    fn bad_target_fails_before_touching_files() {
        let result = MixPipeline::standard().run(
            Path::new("/nonexistent/in.wav"),
            Path::new("/nonexistent/out.wav"),
            f64::NAN,
        );

        assert!(matches!(
            result,
            Err(AudioError::Loudness(LoudnessError::InvalidTarget(_)))
        ));
    }

    #[test]
    fn lossy_output_rejected_before_decoding() {
        let result = MixPipeline::standard().run(
            Path::new("/nonexistent/in.wav"),
            Path::new("out.mp3"),
            -14.0,
        );

        assert!(matches!(result, Err(AudioError::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = MixPipeline::standard().run(
            &dir.path().join("missing.flac"),
            &dir.path().join("out.wav"),
            -14.0,
        );

        assert!(matches!(result, Err(AudioError::FileNotFound(_))));
    }
}
