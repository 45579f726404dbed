/// WAV encoder implementation using hound
use crate::error::{AudioError, Result};
use carwash_core::{AudioBuffer, AudioEncoder, SampleFormat};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Writes buffers as interleaved WAV
///
/// The buffer's own [`SampleFormat`] is used unless an override is set.
/// Integer formats are quantised with symmetric scaling and saturate at
/// full scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder {
    format_override: Option<SampleFormat>,
}

impl WavEncoder {
    /// Encoder that keeps each buffer's sample format
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder that always writes `format`
    pub fn with_format(format: SampleFormat) -> Self {
        Self {
            format_override: Some(format),
        }
    }

    fn spec_for(&self, buffer: &AudioBuffer) -> Result<hound::WavSpec> {
        let format = self.format_override.unwrap_or(buffer.format());
        let channels = u16::try_from(buffer.channel_count()).map_err(|_| {
            AudioError::UnsupportedFormat(format!(
                "{} channels exceed the WAV limit",
                buffer.channel_count()
            ))
        })?;

        Ok(hound::WavSpec {
            channels,
            sample_rate: buffer.sample_rate().as_hz(),
            bits_per_sample: format.bits_per_sample(),
            sample_format: if format.is_float() {
                hound::SampleFormat::Float
            } else {
                hound::SampleFormat::Int
            },
        })
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_wav(buffer: &AudioBuffer, spec: hound::WavSpec, path: &Path) -> Result<()> {
    let mut writer = hound::WavWriter::create(path, spec)?;

    for frame in 0..buffer.frames() {
        for channel in buffer.channels() {
            let sample = channel[frame];
            match spec.sample_format {
                hound::SampleFormat::Float => writer.write_sample(sample)?,
                hound::SampleFormat::Int => {
                    writer.write_sample(quantize(sample, spec.bits_per_sample))?;
                }
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

fn quantize(sample: f32, bits: u16) -> i32 {
    let scale = f64::from(1_u32 << (bits - 1));
    (f64::from(sample) * scale).round().clamp(-scale, scale - 1.0) as i32
}

impl AudioEncoder for WavEncoder {
    type Error = AudioError;

    fn encode(&self, buffer: &AudioBuffer, path: &Path) -> Result<()> {
        if !self.supports_format(path) {
            return Err(AudioError::UnsupportedFormat(format!(
                "{} (only .wav output is supported)",
                path.display()
            )));
        }

        let spec = self.spec_for(buffer)?;

        // Written next to the target and renamed into place once complete
        let partial = partial_path(path);
        if let Err(e) = write_wav(buffer, spec, &partial)
            .and_then(|()| std::fs::rename(&partial, path).map_err(AudioError::from))
        {
            if partial.exists() {
                let _ = std::fs::remove_file(&partial);
            }
            return Err(e);
        }

        tracing::debug!(
            path = %path.display(),
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            bits = spec.bits_per_sample,
            frames = buffer.frames(),
            "Wrote WAV file"
        );

        Ok(())
    }

    fn supports_format(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
    }
}
