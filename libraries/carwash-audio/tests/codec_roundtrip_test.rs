//! Codec round-trip tests
//!
//! Files are written to temporary directories with the crate's own encoder
//! (or hound directly) and read back through Symphonia.

use carwash_audio::{AudioError, SymphoniaDecoder, WavEncoder};
use carwash_core::{AudioBuffer, AudioDecoder, AudioEncoder, SampleFormat, SampleRate};
use proptest::prelude::*;
use std::f32::consts::PI;
use std::path::Path;

/// Sine per channel, each channel at a different frequency so swaps show up
fn multitone(channels: usize, rate: u32, frames: usize, format: SampleFormat) -> AudioBuffer {
    let data: Vec<Vec<f32>> = (0..channels)
        .map(|ch| {
            let freq = 220.0 * (ch + 1) as f32;
            (0..frames)
                .map(|i| 0.8 * (2.0 * PI * freq * i as f32 / rate as f32).sin())
                .collect::<Vec<f32>>()
        })
        .collect();
    AudioBuffer::new(data, SampleRate::new(rate), format).unwrap()
}

fn roundtrip(buffer: &AudioBuffer, encoder: WavEncoder, path: &Path) -> AudioBuffer {
    encoder.encode(buffer, path).unwrap();
    SymphoniaDecoder::new().decode(path).unwrap()
}

fn max_error(a: &AudioBuffer, b: &AudioBuffer) -> f32 {
    a.channels()
        .iter()
        .zip(b.channels())
        .flat_map(|(x, y)| x.iter().zip(y).map(|(p, q)| (p - q).abs()))
        .fold(0.0, f32::max)
}

#[test]
fn float32_roundtrip_is_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let original = multitone(2, 44_100, 4_410, SampleFormat::Float32);

    let decoded = roundtrip(&original, WavEncoder::new(), &dir.path().join("float.wav"));

    assert_eq!(decoded.format(), SampleFormat::Float32);
    assert_eq!(decoded.sample_rate().as_hz(), 44_100);
    assert_eq!(decoded, original);
}

#[test]
fn pcm16_roundtrip_within_one_step() {
    let dir = tempfile::tempdir().unwrap();
    let original = multitone(1, 48_000, 4_800, SampleFormat::Pcm16);

    let decoded = roundtrip(&original, WavEncoder::new(), &dir.path().join("pcm16.wav"));

    assert_eq!(decoded.format(), SampleFormat::Pcm16);
    assert_eq!(decoded.channel_count(), 1);
    assert_eq!(decoded.frames(), original.frames());
    assert!(max_error(&original, &decoded) <= 1.0 / 32_768.0);
}

#[test]
fn pcm24_roundtrip_within_one_step() {
    let dir = tempfile::tempdir().unwrap();
    let original = multitone(2, 96_000, 9_600, SampleFormat::Pcm24);

    let decoded = roundtrip(&original, WavEncoder::new(), &dir.path().join("pcm24.wav"));

    assert_eq!(decoded.format(), SampleFormat::Pcm24);
    assert!(max_error(&original, &decoded) <= 1.0 / 8_388_608.0);
}

#[test]
fn second_pass_is_lossless_once_quantised() {
    let dir = tempfile::tempdir().unwrap();
    let original = multitone(2, 44_100, 2_000, SampleFormat::Pcm16);

    let once = roundtrip(&original, WavEncoder::new(), &dir.path().join("a.wav"));
    let twice = roundtrip(&once, WavEncoder::new(), &dir.path().join("b.wav"));

    assert_eq!(once, twice);
}

#[test]
fn surround_channels_are_not_downmixed() {
    let dir = tempfile::tempdir().unwrap();
    let original = multitone(6, 48_000, 2_400, SampleFormat::Float32);

    let decoded = roundtrip(&original, WavEncoder::new(), &dir.path().join("surround.wav"));

    assert_eq!(decoded.channel_count(), 6);
    assert_eq!(decoded, original);
}

#[test]
fn format_override_changes_bit_depth() {
    let dir = tempfile::tempdir().unwrap();
    let original = multitone(2, 44_100, 1_000, SampleFormat::Float32);

    let decoded = roundtrip(
        &original,
        WavEncoder::with_format(SampleFormat::Pcm16),
        &dir.path().join("override.wav"),
    );

    assert_eq!(decoded.format(), SampleFormat::Pcm16);
    assert!(max_error(&original, &decoded) <= 1.0 / 32_768.0);
}

#[test]
fn decodes_externally_written_pcm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("external.wav");

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..100_i16 {
        writer.write_sample(i * 100).unwrap();
        writer.write_sample(-i * 100).unwrap();
    }
    writer.finalize().unwrap();

    let decoded = SymphoniaDecoder::new().decode(&path).unwrap();

    assert_eq!(decoded.sample_rate().as_hz(), 22_050);
    assert_eq!(decoded.frames(), 100);
    assert_eq!(decoded.channel(0)[10], 1_000.0 / 32_768.0);
    assert_eq!(decoded.channel(1)[10], -1_000.0 / 32_768.0);
}

#[test]
fn clipping_input_saturates_in_integer_output() {
    let dir = tempfile::tempdir().unwrap();
    let original = AudioBuffer::new(
        vec![vec![1.5, -1.5, 0.25]],
        SampleRate::CD_QUALITY,
        SampleFormat::Pcm16,
    )
    .unwrap();

    let decoded = roundtrip(&original, WavEncoder::new(), &dir.path().join("clip.wav"));

    assert_eq!(decoded.channel(0), &[32_767.0 / 32_768.0, -1.0, 0.25]);
}

#[test]
fn garbage_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.wav");
    std::fs::write(&path, b"definitely not a RIFF file").unwrap();

    let result = SymphoniaDecoder::new().decode(&path);
    assert!(matches!(
        result,
        Err(AudioError::UnsupportedFormat(_) | AudioError::Symphonia(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: PCM16 round trip error never exceeds one quantisation step
    #[test]
    fn pcm16_error_bounded(samples in prop::collection::vec(-1.0_f32..=1.0, 1..512)) {
        let dir = tempfile::tempdir().unwrap();
        let original = AudioBuffer::new(
            vec![samples],
            SampleRate::CD_QUALITY,
            SampleFormat::Pcm16,
        )
        .unwrap();

        let decoded = roundtrip(&original, WavEncoder::new(), &dir.path().join("prop.wav"));
        prop_assert!(max_error(&original, &decoded) <= 1.0 / 32_768.0);
    }
}
