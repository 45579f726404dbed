/// Audio decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use carwash_core::{AudioBuffer, AudioDecoder, SampleFormat, SampleRate};
use std::path::Path;
use symphonia::core::audio::{AudioBuffer as SymphoniaBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{
    CodecParameters, DecoderOptions, CODEC_TYPE_PCM_F32BE, CODEC_TYPE_PCM_F32LE,
    CODEC_TYPE_PCM_F64BE, CODEC_TYPE_PCM_F64LE,
};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::{Sample, SampleFormat as CodecSampleFormat};

/// Extensions the decoder accepts (lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "m4a", "aac"];

/// Whole-file decoder built on Symphonia
///
/// Supports: MP3, FLAC, OGG Vorbis, WAV, AAC/M4A
///
/// Every channel of the default track is kept as-is (no downmix) and
/// converted to planar `f32`. The source bit depth is recorded in the
/// buffer's [`SampleFormat`] so the encoder can write the same depth back.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Map codec parameters onto the closest output format
    ///
    /// Lossy codecs report no bit depth and decode to float, so they map to
    /// `Float32`.
    fn sample_format_of(params: &CodecParameters) -> SampleFormat {
        let float_codec = [
            CODEC_TYPE_PCM_F32LE,
            CODEC_TYPE_PCM_F32BE,
            CODEC_TYPE_PCM_F64LE,
            CODEC_TYPE_PCM_F64BE,
        ]
        .contains(&params.codec);
        if float_codec {
            return SampleFormat::Float32;
        }

        match (params.sample_format, params.bits_per_sample) {
            (Some(CodecSampleFormat::F32 | CodecSampleFormat::F64), _) | (_, None) => {
                SampleFormat::Float32
            }
            (_, Some(bits)) if bits <= 16 => SampleFormat::Pcm16,
            (_, Some(bits)) if bits <= 24 => SampleFormat::Pcm24,
            (_, Some(_)) => SampleFormat::Pcm32,
        }
    }

    /// Append one decoded packet to the planar output
    ///
    /// Signed integers use symmetric scaling (divide by 2^(N-1)); unsigned
    /// integers are re-centred on zero first.
    fn append_packet(decoded: &AudioBufferRef<'_>, planar: &mut [Vec<f32>]) {
        match decoded {
            AudioBufferRef::F32(buf) => append_planar(buf, planar, |s| s),
            AudioBufferRef::F64(buf) => append_planar(buf, planar, |s| s as f32),
            AudioBufferRef::S32(buf) => {
                append_planar(buf, planar, |s| (f64::from(s) / 2_147_483_648.0) as f32);
            }
            AudioBufferRef::S24(buf) => {
                append_planar(buf, planar, |s| s.inner() as f32 / 8_388_608.0);
            }
            AudioBufferRef::S16(buf) => append_planar(buf, planar, |s| f32::from(s) / 32_768.0),
            AudioBufferRef::S8(buf) => append_planar(buf, planar, |s| f32::from(s) / 128.0),
            AudioBufferRef::U32(buf) => append_planar(buf, planar, |s| {
                ((f64::from(s) - 2_147_483_648.0) / 2_147_483_648.0) as f32
            }),
            AudioBufferRef::U24(buf) => append_planar(buf, planar, |s| {
                (s.inner() as f32 - 8_388_608.0) / 8_388_608.0
            }),
            AudioBufferRef::U16(buf) => {
                append_planar(buf, planar, |s| (f32::from(s) - 32_768.0) / 32_768.0);
            }
            AudioBufferRef::U8(buf) => {
                append_planar(buf, planar, |s| (f32::from(s) - 128.0) / 128.0);
            }
        }
    }
}

fn append_planar<S, F>(buf: &SymphoniaBuffer<S>, planar: &mut [Vec<f32>], to_f32: F)
where
    S: Sample,
    F: Fn(S) -> f32,
{
    for (index, out) in planar.iter_mut().enumerate() {
        out.extend(buf.chan(index).iter().map(|&s| to_f32(s)));
    }
}

impl AudioDecoder for SymphoniaDecoder {
    type Error = AudioError;

    fn decode(&self, path: &Path) -> Result<AudioBuffer> {
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Extension hint helps the probe pick a format reader
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| match e {
                SymphoniaError::Unsupported(what) => {
                    AudioError::UnsupportedFormat(format!("{}: {}", path.display(), what))
                }
                other => AudioError::Symphonia(format!("Failed to probe file: {}", other)),
            })?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

        let track_id = track.id;
        let sample_format = Self::sample_format_of(&track.codec_params);
        let mut sample_rate = track.codec_params.sample_rate;
        let mut planar: Option<Vec<Vec<f32>>> = track
            .codec_params
            .channels
            .map(|layout| vec![Vec::new(); layout.count()]);

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

        let mut skipped_packets = 0_usize;
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => {
                    return Err(AudioError::Symphonia(format!("Error reading packet: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = e,
                        "Skipping undecodable packet"
                    );
                    skipped_packets += 1;
                    continue;
                }
                Err(e) => return Err(AudioError::DecodeError(e.to_string())),
            };

            let spec = *decoded.spec();
            sample_rate.get_or_insert(spec.rate);
            let channels = planar.get_or_insert_with(|| vec![Vec::new(); spec.channels.count()]);
            if channels.len() != spec.channels.count() {
                return Err(AudioError::DecodeError(format!(
                    "Channel count changed mid-stream from {} to {}",
                    channels.len(),
                    spec.channels.count()
                )));
            }

            Self::append_packet(&decoded, channels);
        }

        let channels = planar
            .ok_or_else(|| AudioError::DecodeError("Stream has no channel layout".to_string()))?;
        let sample_rate = sample_rate
            .ok_or_else(|| AudioError::DecodeError("Stream has no sample rate".to_string()))?;

        let buffer = AudioBuffer::new(channels, SampleRate::new(sample_rate), sample_format)?;

        tracing::debug!(
            path = %path.display(),
            sample_rate,
            channels = buffer.channel_count(),
            frames = buffer.frames(),
            format = ?sample_format,
            skipped_packets,
            "Decoded audio file"
        );

        Ok(buffer)
    }

    fn supports_format(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
    }
}
