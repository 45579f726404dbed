/// Audio-related types
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Common sample rates
    pub const CD_QUALITY: Self = Self(44_100);
    pub const DVD_QUALITY: Self = Self(48_000);
    pub const HIGH_RES_96: Self = Self(96_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

/// On-disk sample format a buffer was decoded from
///
/// Samples are always held as `f32` in memory; this only tells the encoder
/// which width to write back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// 16-bit signed integer PCM
    Pcm16,
    /// 24-bit signed integer PCM
    Pcm24,
    /// 32-bit signed integer PCM
    Pcm32,
    /// 32-bit IEEE float
    #[default]
    Float32,
}

impl SampleFormat {
    /// Bits per sample on disk
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            Self::Pcm16 => 16,
            Self::Pcm24 => 24,
            Self::Pcm32 | Self::Float32 => 32,
        }
    }

    /// Whether samples are stored as floating point
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32)
    }
}

/// Audio buffer containing decoded samples
///
/// Samples are stored planar (one `Vec` per channel) as f32, nominally in
/// the range [-1.0, 1.0]. Every channel has the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: SampleRate,
    format: SampleFormat,
}

impl AudioBuffer {
    /// Create a buffer from planar channel data
    ///
    /// # Errors
    /// Fails on zero channels, channels of different lengths, or a zero
    /// sample rate. An empty (zero-frame) buffer is allowed here; processing
    /// stages decide whether they accept it.
    pub fn new(
        channels: Vec<Vec<f32>>,
        sample_rate: SampleRate,
        format: SampleFormat,
    ) -> Result<Self> {
        if sample_rate.as_hz() == 0 {
            return Err(CoreError::InvalidSampleRate(0));
        }
        let Some(first) = channels.first() else {
            return Err(CoreError::NoChannels);
        };
        let expected = first.len();
        if let Some((channel, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != expected)
        {
            return Err(CoreError::RaggedChannels {
                channel,
                expected,
                actual: ch.len(),
            });
        }

        Ok(Self {
            channels,
            sample_rate,
            format,
        })
    }

    /// Create a buffer from interleaved samples ([L, R, L, R, ...] for stereo)
    pub fn from_interleaved(
        samples: &[f32],
        channel_count: usize,
        sample_rate: SampleRate,
        format: SampleFormat,
    ) -> Result<Self> {
        if channel_count == 0 {
            return Err(CoreError::NoChannels);
        }
        if samples.len() % channel_count != 0 {
            return Err(CoreError::PartialFrame {
                samples: samples.len(),
                channels: channel_count,
            });
        }

        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (ch, &sample) in channels.iter_mut().zip(frame) {
                ch.push(sample);
            }
        }

        Self::new(channels, sample_rate, format)
    }

    /// Build a replacement buffer with the same rate and format
    ///
    /// Used by processing stages that produce new sample data; the source
    /// buffer is left untouched.
    pub fn with_channels(&self, channels: Vec<Vec<f32>>) -> Result<Self> {
        Self::new(channels, self.sample_rate, self.format)
    }

    /// Interleave all channels into a single vector
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames() * self.channel_count());
        for i in 0..self.frames() {
            for ch in &self.channels {
                out.push(ch[i]);
            }
        }
        out
    }

    /// Sample rate of the buffer
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Sample format the buffer was decoded from
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Number of channels (1 = mono, 2 = stereo, etc.)
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate.as_hz())
    }

    /// Check if the buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Samples of one channel
    ///
    /// # Panics
    /// Panics if `index >= channel_count()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// All channels, planar
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Largest absolute sample value across all channels
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0_f32, |peak, s| peak.max(s.abs()))
    }

    /// Consume the buffer, returning its planar channel data
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}
